use tower_blast_core::{Command, EnemyId, Path, Point, TowerKind};
use tower_blast_system_tower_targeting::TowerTargeting;
use tower_blast_world::{self as world, query, World};

fn world_with_enemies(positions: &[Point]) -> World {
    let path = Path::new(vec![Point::new(0.0, 0.0), Point::new(800.0, 0.0)]).expect("valid");
    let mut world = World::new(path);
    let mut events = Vec::new();
    for (index, position) in positions.iter().enumerate() {
        world::apply(
            &mut world,
            Command::SpawnEnemy {
                health: 10,
                next_spawn_in: 30,
            },
            &mut events,
        );
        world::apply(
            &mut world,
            Command::StepEnemy {
                enemy: EnemyId::new(index as u32),
                position: *position,
                path_index: 0,
            },
            &mut events,
        );
    }
    world
}

#[test]
fn fresh_tower_is_ready_after_its_first_tick() {
    let mut world = world_with_enemies(&[Point::new(50.0, 0.0)]);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Dart,
            position: Point::new(0.0, 0.0),
        },
        &mut events,
    );
    world::apply(&mut world, Command::Tick, &mut events);

    let mut targeting = TowerTargeting::new();
    let mut targets = Vec::new();
    targeting.handle(
        &query::tower_view(&world),
        &query::enemy_view(&world),
        &mut targets,
    );

    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].enemies, vec![EnemyId::new(0)]);
}

#[test]
fn each_tower_sees_only_its_own_range() {
    let mut world = world_with_enemies(&[
        Point::new(50.0, 0.0),
        Point::new(250.0, 0.0),
        Point::new(700.0, 0.0),
    ]);
    let mut events = Vec::new();
    for kind in [TowerKind::Dart, TowerKind::Sniper] {
        world::apply(
            &mut world,
            Command::PlaceTower {
                kind,
                position: Point::new(0.0, 0.0),
            },
            &mut events,
        );
    }

    let mut targeting = TowerTargeting::new();
    let mut targets = Vec::new();
    targeting.handle(
        &query::tower_view(&world),
        &query::enemy_view(&world),
        &mut targets,
    );

    let summary: Vec<(TowerKind, Vec<EnemyId>)> = targets
        .into_iter()
        .map(|target| (target.kind, target.enemies))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TowerKind::Dart, vec![EnemyId::new(0)]),
            (TowerKind::Sniper, vec![EnemyId::new(0), EnemyId::new(1)]),
        ]
    );
}
