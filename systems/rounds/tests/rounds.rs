use tower_blast_core::{Command, Event, Path, Point};
use tower_blast_system_rounds::{Config, Rounds};
use tower_blast_world::{self as world, query, World};

fn session() -> World {
    World::new(Path::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).expect("valid"))
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

/// Applies a tick and the spawn check, returning whether an enemy spawned.
fn spawn_tick(world: &mut World, rounds: &Rounds) -> bool {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
    let mut commands = Vec::new();
    rounds.handle_spawn(&events, query::round(world), &mut commands);
    apply_all(world, commands)
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. }))
}

#[test]
fn first_tick_spawns_and_schedules_next_enemy() {
    let mut world = session();
    let rounds = Rounds::default();

    assert!(spawn_tick(&mut world, &rounds));
    assert_eq!(query::round(&world).spawn_timer, 28);

    let spawns = (0..56).filter(|_| spawn_tick(&mut world, &rounds)).count();
    assert_eq!(spawns, 2);
    assert_eq!(query::enemy_count(&world), 3);
}

#[test]
fn spawned_enemies_use_current_base_health() {
    let mut world = session();
    let rounds = Rounds::default();
    let _ = apply_all(
        &mut world,
        vec![Command::AdvanceRound {
            enemy_base_health: 25,
            enemy_speed: 1.5,
            pause: 0,
        }],
    );

    assert!(spawn_tick(&mut world, &rounds));

    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.health, 25);
    assert_eq!(enemy.position, Point::new(0.0, 0.0));
    assert_eq!(query::round(&world).spawn_timer, 26);
}

#[test]
fn round_advances_only_during_a_lull() {
    let mut world = session();
    let rounds = Rounds::default();

    let mut commands = Vec::new();
    rounds.handle_round_end(query::round(&world), query::enemy_count(&world), &mut commands);
    assert!(commands.is_empty(), "timer at zero is not a lull");

    let _ = apply_all(&mut world, vec![Command::Tick]);
    rounds.handle_round_end(query::round(&world), query::enemy_count(&world), &mut commands);
    let events = apply_all(&mut world, commands);

    assert!(events.contains(&Event::RoundAdvanced { round: 2 }));
    let round = query::round(&world);
    assert_eq!(round.round, 2);
    assert_eq!(round.enemy_base_health, 15);
    assert_eq!(round.spawn_timer, 60);

    let mut commands = Vec::new();
    rounds.handle_round_end(round, 0, &mut commands);
    assert!(commands.is_empty(), "round advance fires once per lull");
}

#[test]
fn survivors_block_round_advance_regardless_of_timer() {
    let mut world = session();
    let rounds = Rounds::default();
    let _ = apply_all(
        &mut world,
        vec![Command::SpawnEnemy {
            health: 10,
            next_spawn_in: -40,
        }],
    );

    let mut commands = Vec::new();
    rounds.handle_round_end(query::round(&world), query::enemy_count(&world), &mut commands);

    assert!(commands.is_empty());
    assert_eq!(query::round(&world).round, 1);
}

#[test]
fn custom_configuration_changes_cadence() {
    let rounds = Rounds::new(Config::new(12, 1, 4, 2, 0.5, 5));
    assert_eq!(rounds.config().spawn_interval(3), 9);
    assert_eq!(rounds.config().spawn_interval(20), 4);

    let mut world = session();
    let _ = apply_all(&mut world, vec![Command::Tick]);
    let mut commands = Vec::new();
    rounds.handle_round_end(query::round(&world), 0, &mut commands);

    assert!(matches!(
        commands.as_slice(),
        [Command::AdvanceRound {
            enemy_base_health: 12,
            pause: 5,
            ..
        }]
    ));
}
