use tower_blast_core::{PathError, Point};
use tower_blast_system_bootstrap::{Bootstrap, MapPreset};
use tower_blast_world::{query, World};

#[test]
fn fresh_session_greets_the_player() {
    let bootstrap = Bootstrap;
    let world = World::new(bootstrap.path(MapPreset::Curvy).expect("preset path"));

    assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Tower Blast.");
    assert_eq!(query::path(&world).first(), Point::new(0.0, 400.0));
}

#[test]
fn degenerate_custom_paths_are_rejected_up_front() {
    let bootstrap = Bootstrap;

    assert_eq!(
        bootstrap.custom_path(vec![Point::new(3.0, 3.0)]),
        Err(PathError::TooShort { waypoints: 1 })
    );

    let path = bootstrap
        .custom_path(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
        .expect("two waypoints are enough");
    assert_eq!(path.last_index(), 1);
}
