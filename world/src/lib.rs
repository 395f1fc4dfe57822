#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Tower Blast.

mod enemies;
mod towers;

use tower_blast_core::{
    Command, Event, HudSnapshot, Path, PlacementError, Point, TowerId, TowerKind, ENEMY_BOUNTY,
    STARTING_ENEMY_HEALTH, STARTING_ENEMY_SPEED, STARTING_LIVES, STARTING_MONEY, STARTING_ROUND,
    WELCOME_BANNER,
};
use tracing::{debug, trace};

use self::{enemies::EnemyRoster, towers::TowerRegistry};

/// Represents the authoritative state of a single game session.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    path: Path,
    money: u32,
    lives: i32,
    round: u32,
    enemy_speed: f32,
    enemy_base_health: i32,
    spawn_timer: i32,
    enemies: EnemyRoster,
    towers: TowerRegistry,
    tick_index: u64,
}

impl World {
    /// Creates a fresh session on the provided path.
    #[must_use]
    pub fn new(path: Path) -> Self {
        Self {
            banner: WELCOME_BANNER,
            path,
            money: STARTING_MONEY,
            lives: STARTING_LIVES,
            round: STARTING_ROUND,
            enemy_speed: STARTING_ENEMY_SPEED,
            enemy_base_health: STARTING_ENEMY_HEALTH,
            spawn_timer: 0,
            enemies: EnemyRoster::new(),
            towers: TowerRegistry::new(),
            tick_index: 0,
        }
    }

    fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            money: self.money,
            lives: self.lives,
            round: self.round,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.spawn_timer = world.spawn_timer.saturating_sub(1);
            world.towers.cool_down();
            trace!(
                tick = world.tick_index,
                spawn_timer = world.spawn_timer,
                enemies = world.enemies.len(),
                "tick"
            );
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SpawnEnemy {
            health,
            next_spawn_in,
        } => {
            let position = world.path.first();
            let enemy = world.enemies.spawn(position, health);
            world.spawn_timer = next_spawn_in;
            debug!(enemy = enemy.get(), health, next_spawn_in, "enemy spawned");
            out_events.push(Event::EnemySpawned {
                enemy,
                position,
                health,
            });
        }
        Command::StepEnemy {
            enemy,
            position,
            path_index,
        } => {
            let last_index = world.path.last_index();
            if let Some(state) = world.enemies.get_mut(enemy) {
                state.position = position;
                state.path_index = path_index.min(last_index);
            }
        }
        Command::ReleaseEscapedEnemies => {
            let last_index = world.path.last_index();
            let escaped = world
                .enemies
                .remove_where(|enemy| enemy.path_index >= last_index);
            for enemy in escaped {
                world.lives = world.lives.saturating_sub(1);
                debug!(enemy = enemy.get(), lives = world.lives, "enemy escaped");
                out_events.push(Event::EnemyEscaped { enemy });
                out_events.push(Event::HudChanged { hud: world.hud() });
            }
        }
        Command::FireTower { tower, targets } => {
            let Some(state) = world.towers.get_mut(tower) else {
                return;
            };
            let spec = state.kind.spec();
            state.cooldown = spec.fire_rate;
            for target in &targets {
                if let Some(enemy) = world.enemies.get_mut(*target) {
                    enemy.health = enemy.health.saturating_sub(spec.damage);
                }
            }
            out_events.push(Event::TowerFired { tower, targets });
        }
        Command::ReapDefeatedEnemies => {
            let defeated = world.enemies.remove_where(|enemy| enemy.health <= 0);
            for enemy in defeated {
                world.money = world.money.saturating_add(ENEMY_BOUNTY);
                debug!(enemy = enemy.get(), money = world.money, "enemy defeated");
                out_events.push(Event::EnemyDefeated {
                    enemy,
                    bounty: ENEMY_BOUNTY,
                });
                out_events.push(Event::HudChanged { hud: world.hud() });
            }
        }
        Command::AdvanceRound {
            enemy_base_health,
            enemy_speed,
            pause,
        } => {
            world.round = world.round.saturating_add(1);
            world.enemy_base_health = enemy_base_health;
            world.enemy_speed = enemy_speed;
            world.spawn_timer = pause;
            debug!(
                round = world.round,
                enemy_base_health, enemy_speed, "round advanced"
            );
            out_events.push(Event::RoundAdvanced { round: world.round });
            out_events.push(Event::HudChanged { hud: world.hud() });
        }
        Command::PlaceTower { kind, position } => {
            let _ = place_tower(world, kind, position, out_events);
        }
    }
}

/// Places a tower if the player can afford it, reporting the outcome directly.
///
/// Emits the same events as applying `Command::PlaceTower`. A rejected
/// placement leaves the world untouched.
pub fn place_tower(
    world: &mut World,
    kind: TowerKind,
    position: Point,
    out_events: &mut Vec<Event>,
) -> Result<TowerId, PlacementError> {
    let cost = kind.spec().cost;
    if world.money < cost {
        debug!(%kind, money = world.money, cost, "tower placement rejected");
        out_events.push(Event::TowerPlacementRejected {
            kind,
            position,
            reason: PlacementError::InsufficientFunds,
        });
        return Err(PlacementError::InsufficientFunds);
    }

    world.money -= cost;
    let tower = world.towers.insert(kind, position);
    debug!(
        tower = tower.get(),
        %kind,
        x = position.x,
        y = position.y,
        money = world.money,
        "tower placed"
    );
    out_events.push(Event::TowerPlaced {
        tower,
        kind,
        position,
    });
    out_events.push(Event::HudChanged { hud: world.hud() });
    Ok(tower)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use tower_blast_core::{EnemyView, HudSnapshot, Path, RoundSnapshot, TowerView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the path enemies follow.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Captures a read-only view of the enemies on the path.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.snapshots())
    }

    /// Captures a read-only view of the placed towers.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.snapshots())
    }

    /// Number of enemies currently on the path.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures the round progression state.
    #[must_use]
    pub fn round(world: &World) -> RoundSnapshot {
        RoundSnapshot {
            round: world.round,
            spawn_timer: world.spawn_timer,
            enemy_base_health: world.enemy_base_health,
            enemy_speed: world.enemy_speed,
        }
    }

    /// Captures the values shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        world.hud()
    }

    /// Number of ticks processed since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
