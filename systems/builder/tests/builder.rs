use tower_blast_core::{Command, Event, Path, PlacementError, Point, TowerKind};
use tower_blast_system_builder::{Builder, BuilderInput};
use tower_blast_world::{self as world, query, World};

#[test]
fn click_without_selection_is_ignored() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(None, Some(Point::new(10.0, 10.0))),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(builder.selected(), None);
}

#[test]
fn selection_persists_across_clicks() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(BuilderInput::new(Some(TowerKind::Sniper), None), &mut commands);
    assert!(commands.is_empty(), "selecting alone does not place");

    builder.handle(
        BuilderInput::new(None, Some(Point::new(1.0, 2.0))),
        &mut commands,
    );
    builder.handle(
        BuilderInput::new(None, Some(Point::new(3.0, 4.0))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::PlaceTower {
                kind: TowerKind::Sniper,
                position: Point::new(1.0, 2.0),
            },
            Command::PlaceTower {
                kind: TowerKind::Sniper,
                position: Point::new(3.0, 4.0),
            },
        ]
    );
}

#[test]
fn selection_and_click_in_the_same_frame_use_the_new_kind() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();
    builder.handle(BuilderInput::new(Some(TowerKind::Dart), None), &mut commands);

    builder.handle(
        BuilderInput::new(Some(TowerKind::Cannon), Some(Point::new(5.0, 5.0))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceTower {
            kind: TowerKind::Cannon,
            position: Point::new(5.0, 5.0),
        }]
    );
}

#[test]
fn preview_reports_affordability() {
    let mut builder = Builder::new();
    assert!(builder.preview(Some(Point::default()), 500).is_none());

    let mut commands = Vec::new();
    builder.handle(BuilderInput::new(Some(TowerKind::Cannon), None), &mut commands);

    let preview = builder
        .preview(Some(Point::new(7.0, 8.0)), 299)
        .expect("preview for selected tower");
    assert!(!preview.affordable);
    assert!((preview.range - 100.0).abs() < f32::EPSILON);
    assert!(builder.preview(Some(Point::default()), 300).is_some_and(|p| p.affordable));
    assert!(builder.preview(None, 300).is_none());
}

#[test]
fn world_rejects_clicks_the_player_cannot_afford() {
    let path = Path::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]).expect("valid");
    let mut world = World::new(path);
    let mut builder = Builder::new();
    let mut commands = Vec::new();
    builder.handle(BuilderInput::new(Some(TowerKind::Sniper), None), &mut commands);
    for x in [10.0, 20.0, 30.0] {
        builder.handle(BuilderInput::new(None, Some(Point::new(x, 50.0))), &mut commands);
    }

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(query::hud(&world).money, 100);
    assert_eq!(query::tower_view(&world).into_vec().len(), 2);
    assert!(matches!(
        events.last(),
        Some(Event::TowerPlacementRejected {
            reason: PlacementError::InsufficientFunds,
            ..
        })
    ));
}
