#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tower Blast engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tower Blast.";

/// Money available to the player when a session starts.
pub const STARTING_MONEY: u32 = 500;

/// Lives available to the player when a session starts.
pub const STARTING_LIVES: i32 = 20;

/// Round number assigned to a fresh session.
pub const STARTING_ROUND: u32 = 1;

/// Distance travelled by every enemy per tick when a session starts.
pub const STARTING_ENEMY_SPEED: f32 = 1.0;

/// Health assigned to spawned enemies when a session starts.
pub const STARTING_ENEMY_HEALTH: i32 = 10;

/// Currency awarded for every defeated enemy.
pub const ENEMY_BOUNTY: u32 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances every per-tick timer owned by the world by one frame.
    Tick,
    /// Requests that a new enemy enter the path at its first waypoint.
    SpawnEnemy {
        /// Health assigned to the spawned enemy.
        health: i32,
        /// Number of ticks until the next spawn becomes due.
        next_spawn_in: i32,
    },
    /// Moves an enemy to a new position along the path.
    StepEnemy {
        /// Identifier of the enemy being moved.
        enemy: EnemyId,
        /// Position the enemy occupies after the step.
        position: Point,
        /// Index of the last waypoint the enemy has reached.
        path_index: usize,
    },
    /// Removes every enemy that reached the final waypoint, costing one life each.
    ReleaseEscapedEnemies,
    /// Fires a tower at the provided enemies and restarts its cooldown.
    FireTower {
        /// Identifier of the tower that fires.
        tower: TowerId,
        /// Enemies receiving the tower's damage.
        targets: Vec<EnemyId>,
    },
    /// Removes every enemy whose health is exhausted, paying out bounties.
    ReapDefeatedEnemies,
    /// Moves the session into the next round using the provided difficulty.
    AdvanceRound {
        /// Health assigned to enemies spawned during the new round.
        enemy_base_health: i32,
        /// Per-tick enemy speed used during the new round.
        enemy_speed: f32,
        /// Number of ticks to wait before the first spawn of the new round.
        pause: i32,
    },
    /// Requests placement of a tower at the provided position.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Position of the tower's center in world units.
        position: Point,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one tick.
    TimeAdvanced {
        /// Number of ticks processed since the session started.
        tick: u64,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Position the enemy occupies after spawning.
        position: Point,
        /// Health assigned to the enemy.
        health: i32,
    },
    /// Reports that an enemy reached the end of the path.
    EnemyEscaped {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
    },
    /// Reports that an enemy was destroyed by tower fire.
    EnemyDefeated {
        /// Identifier of the enemy that was destroyed.
        enemy: EnemyId,
        /// Currency awarded for the kill.
        bounty: u32,
    },
    /// Confirms that a tower fired during the tick.
    TowerFired {
        /// Identifier of the tower that fired.
        tower: TowerId,
        /// Enemies that received damage.
        targets: Vec<EnemyId>,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Position of the tower's center.
        position: Point,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Position provided in the placement request.
        position: Point,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that a new round started.
    RoundAdvanced {
        /// Round number that became active.
        round: u32,
    },
    /// Signals that money, lives or round changed and displays should refresh.
    HudChanged {
        /// Values shown on the heads-up display after the change.
        hud: HudSnapshot,
    },
}

/// Location in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Computes the Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Fixed, ordered route that enemies traverse.
///
/// A path always holds at least two finite waypoints; [`Path::new`] rejects
/// anything else so the simulation never observes a degenerate route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Path {
    waypoints: Vec<Point>,
}

impl Path {
    /// Validates and wraps the provided waypoint sequence.
    pub fn new(waypoints: Vec<Point>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooShort {
                waypoints: waypoints.len(),
            });
        }

        if let Some(index) = waypoints.iter().position(|point| !point.is_finite()) {
            return Err(PathError::NonFinite { index });
        }

        Ok(Self { waypoints })
    }

    /// Ordered waypoints composing the path.
    #[must_use]
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Waypoint where enemies enter the path.
    #[must_use]
    pub fn first(&self) -> Point {
        self.waypoints[0]
    }

    /// Waypoint stored at the provided index, if any.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Point> {
        self.waypoints.get(index).copied()
    }

    /// Index of the final waypoint; enemies reaching it leave the path.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Number of waypoints in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`; validated paths hold at least two waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

impl TryFrom<Vec<Point>> for Path {
    type Error = PathError;

    fn try_from(waypoints: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.waypoints
    }
}

/// Reasons a waypoint sequence cannot be used as a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// Fewer than two waypoints were supplied.
    #[error("a path needs at least 2 waypoints, got {waypoints}")]
    TooShort {
        /// Number of waypoints supplied.
        waypoints: usize,
    },
    /// A waypoint contained a NaN or infinite coordinate.
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFinite {
        /// Index of the offending waypoint.
        index: usize,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Cheap single-target tower with a short range.
    Dart,
    /// Long-range single-target tower that fires slowly.
    Sniper,
    /// Short-range tower that damages every enemy in range.
    Cannon,
}

impl TowerKind {
    /// Every tower kind in the order presented to players.
    pub const ALL: [TowerKind; 3] = [Self::Dart, Self::Sniper, Self::Cannon];

    /// Static attack parameters for the tower kind.
    #[must_use]
    pub const fn spec(self) -> TowerSpec {
        match self {
            Self::Dart => TowerSpec {
                cost: 100,
                range: 90.0,
                damage: 5,
                fire_rate: 40,
                splash: false,
            },
            Self::Sniper => TowerSpec {
                cost: 200,
                range: 300.0,
                damage: 10,
                fire_rate: 80,
                splash: false,
            },
            Self::Cannon => TowerSpec {
                cost: 300,
                range: 100.0,
                damage: 20,
                fire_rate: 100,
                splash: true,
            },
        }
    }

    /// Lowercase name used in configuration files and the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dart => "dart",
            Self::Sniper => "sniper",
            Self::Cannon => "cannon",
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TowerKind {
    type Err = UnknownTowerKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownTowerKind(value.to_owned()))
    }
}

/// Error returned when parsing an unrecognised tower kind name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown tower kind `{0}` (expected dart, sniper or cannon)")]
pub struct UnknownTowerKind(pub String);

/// Static attack parameters shared by every tower of a kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSpec {
    /// Money required to place the tower.
    pub cost: u32,
    /// Enemies strictly closer than this distance are in range.
    pub range: f32,
    /// Health removed from each enemy hit.
    pub damage: i32,
    /// Cooldown value restored after the tower fires.
    pub fire_rate: i32,
    /// Whether every enemy in range is hit instead of only the first.
    pub splash: bool,
}

/// Reasons a tower placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The player cannot afford the requested tower.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// The session already ended.
    #[error("the session is over")]
    SessionOver,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current position of the enemy.
    pub position: Point,
    /// Index of the last waypoint the enemy reached.
    pub path_index: usize,
    /// Remaining health.
    pub health: i32,
}

/// Read-only snapshot describing all enemies on the path.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Identifiers are allocated in spawn order, so sorting by identifier
    /// yields the insertion order targeting relies on.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Position of the tower's center.
    pub position: Point,
    /// Ticks remaining until the tower may fire; zero or below means ready.
    pub cooldown: i32,
}

impl TowerSnapshot {
    /// Reports whether the tower may fire this tick.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cooldown <= 0
    }
}

/// Read-only snapshot describing all towers placed in the session.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Enemies within range of a tower that is ready to fire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TowerTarget {
    /// Tower whose range was inspected.
    pub tower: TowerId,
    /// Kind of the tower, deciding between splash and single-target fire.
    pub kind: TowerKind,
    /// Enemies strictly inside the tower's range, in spawn order. Never empty.
    pub enemies: Vec<EnemyId>,
}

/// Round progression state consumed by the round scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundSnapshot {
    /// Active round number, starting at one.
    pub round: u32,
    /// Ticks remaining until the next spawn.
    pub spawn_timer: i32,
    /// Health assigned to newly spawned enemies.
    pub enemy_base_health: i32,
    /// Per-tick movement speed shared by every enemy.
    pub enemy_speed: f32,
}

/// Values presented on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Money available for placing towers.
    pub money: u32,
    /// Lives remaining before the game ends.
    pub lives: i32,
    /// Active round number.
    pub round: u32,
}

#[cfg(test)]
mod tests {
    use super::{HudSnapshot, Path, PathError, PlacementError, Point, TowerKind};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn path_requires_two_waypoints() {
        assert_eq!(
            Path::new(vec![Point::new(0.0, 0.0)]),
            Err(PathError::TooShort { waypoints: 1 })
        );
        assert_eq!(Path::new(Vec::new()), Err(PathError::TooShort { waypoints: 0 }));
    }

    #[test]
    fn path_rejects_non_finite_waypoints() {
        let result = Path::new(vec![Point::new(0.0, 0.0), Point::new(f32::NAN, 1.0)]);
        assert_eq!(result, Err(PathError::NonFinite { index: 1 }));
    }

    #[test]
    fn path_exposes_endpoints() {
        let path = Path::new(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
        ])
        .expect("valid path");

        assert_eq!(path.first(), Point::new(0.0, 0.0));
        assert_eq!(path.last_index(), 2);
        assert_eq!(path.waypoint(1), Some(Point::new(5.0, 0.0)));
        assert_eq!(path.waypoint(3), None);
    }

    #[test]
    fn path_deserialization_validates_waypoints() {
        let bytes = bincode::serialize(&vec![Point::new(1.0, 2.0)]).expect("serialize");
        let restored: Result<Path, _> = bincode::deserialize(&bytes);
        assert!(restored.is_err());

        let path = Path::new(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]).expect("valid");
        assert_round_trip(&path);
    }

    #[test]
    fn distance_is_euclidean() {
        let origin = Point::new(0.0, 0.0);
        assert!((origin.distance(Point::new(3.0, 4.0)) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tower_table_matches_published_stats() {
        let dart = TowerKind::Dart.spec();
        assert_eq!((dart.cost, dart.damage, dart.fire_rate), (100, 5, 40));
        assert!(!dart.splash);

        let sniper = TowerKind::Sniper.spec();
        assert_eq!((sniper.cost, sniper.damage, sniper.fire_rate), (200, 10, 80));
        assert!((sniper.range - 300.0).abs() < f32::EPSILON);

        let cannon = TowerKind::Cannon.spec();
        assert_eq!((cannon.cost, cannon.damage, cannon.fire_rate), (300, 20, 100));
        assert!(cannon.splash);
    }

    #[test]
    fn tower_kind_parses_case_insensitively() {
        assert_eq!("Dart".parse::<TowerKind>(), Ok(TowerKind::Dart));
        assert_eq!(" cannon ".parse::<TowerKind>(), Ok(TowerKind::Cannon));
        assert!("laser".parse::<TowerKind>().is_err());
        assert_eq!(TowerKind::Sniper.to_string(), "sniper");
    }

    #[test]
    fn contract_values_round_trip_through_bincode() {
        assert_round_trip(&TowerKind::Cannon);
        assert_round_trip(&PlacementError::InsufficientFunds);
        assert_round_trip(&HudSnapshot {
            money: 410,
            lives: 19,
            round: 2,
        });
    }
}
