#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tower Blast adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use tower_blast_core::{EnemyId, HudSnapshot, Point, TowerId, TowerKind};
use tower_blast_world::{query, World};

/// Text shown once the session has ended.
pub const GAME_OVER_BANNER: &str = "Game Over!";

/// Opaque RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
}

impl Color {
    /// Creates a color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Hex notation `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue)
        )
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colors used by every adapter so frames look the same across backends.
pub mod palette {
    use super::Color;
    use tower_blast_core::TowerKind;

    /// Fill of the enemy path.
    pub const PATH: Color = Color::from_rgb_u8(0xe0, 0xc0, 0x00);
    /// Fill of every enemy disc.
    pub const ENEMY: Color = Color::from_rgb_u8(0xff, 0x4d, 0x4d);

    /// Fill used for towers of the provided kind.
    #[must_use]
    pub const fn tower(kind: TowerKind) -> Color {
        match kind {
            TowerKind::Dart => Color::from_rgb_u8(0x8d, 0x55, 0x24),
            TowerKind::Sniper => Color::from_rgb_u8(0x60, 0x7d, 0x8b),
            TowerKind::Cannon => Color::from_rgb_u8(0xbd, 0xb7, 0x6b),
        }
    }
}

/// Immutable snapshot describing a tower placed within the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Center of the tower disc.
    pub position: Vec2,
    /// Radius of the attack range, drawn as a faint circle.
    pub range: f32,
    /// Fill color of the tower disc.
    pub color: Color,
}

impl SceneTower {
    /// Creates a new scene tower descriptor using the palette color for `kind`.
    #[must_use]
    pub const fn new(id: TowerId, kind: TowerKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            range: kind.spec().range,
            color: palette::tower(kind),
        }
    }
}

/// Immutable snapshot describing an enemy walking the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier allocated to the enemy by the world.
    pub id: EnemyId,
    /// Center of the enemy disc.
    pub position: Vec2,
    /// Remaining health, drawn as a label on the disc.
    pub health: i32,
    /// Fill color of the enemy disc.
    pub color: Color,
}

impl SceneEnemy {
    /// Creates a new scene enemy descriptor.
    #[must_use]
    pub const fn new(id: EnemyId, position: Vec2, health: i32) -> Self {
        Self {
            id,
            position,
            health,
            color: palette::ENEMY,
        }
    }

    /// Text drawn on top of the disc.
    #[must_use]
    pub fn label(&self) -> String {
        self.health.to_string()
    }
}

/// Scene description combining the path, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Polyline through every waypoint in travel order.
    pub path: Vec<Vec2>,
    /// Stroke color of the path polyline.
    pub path_color: Color,
    /// Towers in placement order.
    pub towers: Vec<SceneTower>,
    /// Enemies in spawn order.
    pub enemies: Vec<SceneEnemy>,
    /// Values shown in the heads-up display.
    pub hud: HudSnapshot,
    /// Whether the game-over banner should be drawn.
    pub game_over: bool,
}

impl Scene {
    /// Captures everything a backend needs to draw the current frame.
    #[must_use]
    pub fn capture(world: &World, game_over: bool) -> Self {
        let path = query::path(world)
            .waypoints()
            .iter()
            .copied()
            .map(to_vec2)
            .collect();
        let towers = query::tower_view(world)
            .iter()
            .map(|tower| SceneTower::new(tower.id, tower.kind, to_vec2(tower.position)))
            .collect();
        let enemies = query::enemy_view(world)
            .iter()
            .map(|enemy| SceneEnemy::new(enemy.id, to_vec2(enemy.position), enemy.health))
            .collect();

        Self {
            path,
            path_color: palette::PATH,
            towers,
            enemies,
            hud: query::hud(world),
            game_over,
        }
    }

    /// Status line drawn in the top-left corner.
    #[must_use]
    pub fn hud_text(&self) -> String {
        format!(
            "Money: {}  Lives: {}  Round: {}",
            self.hud.money, self.hud.lives, self.hud.round
        )
    }

    /// Banner drawn across the play area, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        self.game_over.then_some(GAME_OVER_BANNER)
    }
}

fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Backend capable of presenting Tower Blast scenes.
pub trait Renderer {
    /// Draws a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

impl<R> Renderer for &mut R
where
    R: Renderer + ?Sized,
{
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        (**self).present(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_blast_core::{Command, Path};

    fn world() -> World {
        let path = Path::new(vec![
            Point::new(0.0, 250.0),
            Point::new(200.0, 250.0),
            Point::new(200.0, 100.0),
        ])
        .expect("valid path");
        World::new(path)
    }

    #[test]
    fn palette_matches_hex_notation() {
        assert_eq!(palette::PATH.to_hex(), "#e0c000");
        assert_eq!(palette::ENEMY.to_hex(), "#ff4d4d");
        assert_eq!(palette::tower(TowerKind::Dart).to_hex(), "#8d5524");
        assert_eq!(palette::tower(TowerKind::Sniper).to_hex(), "#607d8b");
        assert_eq!(palette::tower(TowerKind::Cannon).to_hex(), "#bdb76b");
    }

    #[test]
    fn hex_notation_round_trips_bytes() {
        assert_eq!(Color::from_rgb_u8(0, 0x7f, 0xff).to_hex(), "#007fff");
    }

    #[test]
    fn capture_lists_every_inhabitant() {
        let mut world = world();
        let mut events = Vec::new();
        tower_blast_world::apply(
            &mut world,
            Command::PlaceTower {
                kind: TowerKind::Sniper,
                position: Point::new(50.0, 50.0),
            },
            &mut events,
        );
        tower_blast_world::apply(
            &mut world,
            Command::SpawnEnemy {
                health: 15,
                next_spawn_in: 10,
            },
            &mut events,
        );

        let scene = Scene::capture(&world, false);

        assert_eq!(scene.path.len(), 3);
        assert_eq!(scene.path[0], Vec2::new(0.0, 250.0));
        assert_eq!(scene.path_color, palette::PATH);
        assert_eq!(scene.towers.len(), 1);
        assert_eq!(scene.towers[0].range, 300.0);
        assert_eq!(scene.towers[0].color, palette::tower(TowerKind::Sniper));
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.enemies[0].position, Vec2::new(0.0, 250.0));
        assert_eq!(scene.enemies[0].label(), "15");
        assert_eq!(scene.enemies[0].color, palette::ENEMY);
        assert_eq!(scene.hud_text(), "Money: 300  Lives: 20  Round: 1");
        assert_eq!(scene.banner(), None);
    }

    #[test]
    fn game_over_scene_carries_banner() {
        let scene = Scene::capture(&world(), true);
        assert_eq!(scene.banner(), Some(GAME_OVER_BANNER));
    }

    #[test]
    fn renderer_is_usable_through_a_mutable_reference() {
        #[derive(Default)]
        struct Counting {
            frames: usize,
        }

        impl Renderer for Counting {
            fn present(&mut self, _scene: &Scene) -> AnyResult<()> {
                self.frames += 1;
                Ok(())
            }
        }

        fn draw_twice(mut renderer: impl Renderer, scene: &Scene) -> AnyResult<()> {
            renderer.present(scene)?;
            renderer.present(scene)
        }

        let mut renderer = Counting::default();
        draw_twice(&mut renderer, &Scene::capture(&world(), false)).expect("frames presented");
        assert_eq!(renderer.frames, 2);
    }
}
