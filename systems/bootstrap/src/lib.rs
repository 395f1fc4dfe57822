#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Tower Blast session.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_blast_core::{Path, PathError, Point};
use tower_blast_world::{query, World};

/// Built-in maps selectable before a session starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapPreset {
    /// Square switchbacks across the whole field.
    #[default]
    Classic,
    /// Gentler route with two diagonal legs.
    Curvy,
}

impl MapPreset {
    /// Every preset in menu order.
    pub const ALL: [MapPreset; 2] = [Self::Classic, Self::Curvy];

    /// Lowercase name used in configuration files and the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Curvy => "curvy",
        }
    }

    /// Waypoints composing the preset's route on an 800x500 field.
    #[must_use]
    pub const fn waypoints(self) -> &'static [Point] {
        match self {
            Self::Classic => &CLASSIC_WAYPOINTS,
            Self::Curvy => &CURVY_WAYPOINTS,
        }
    }

    /// Validated path for the preset.
    pub fn path(self) -> Result<Path, PathError> {
        Path::new(self.waypoints().to_vec())
    }
}

const CLASSIC_WAYPOINTS: [Point; 6] = [
    Point::new(0.0, 250.0),
    Point::new(200.0, 250.0),
    Point::new(200.0, 100.0),
    Point::new(600.0, 100.0),
    Point::new(600.0, 400.0),
    Point::new(800.0, 400.0),
];

const CURVY_WAYPOINTS: [Point; 6] = [
    Point::new(0.0, 400.0),
    Point::new(150.0, 400.0),
    Point::new(200.0, 200.0),
    Point::new(400.0, 200.0),
    Point::new(600.0, 350.0),
    Point::new(800.0, 350.0),
];

impl fmt::Display for MapPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MapPreset {
    type Err = UnknownMapPreset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownMapPreset(value.to_owned()))
    }
}

/// Error returned when parsing an unrecognised map name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown map `{0}` (expected classic or curvy)")]
pub struct UnknownMapPreset(pub String);

/// Produces the data required to start a session and greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Resolves the path of a built-in map.
    pub fn path(&self, preset: MapPreset) -> Result<Path, PathError> {
        preset.path()
    }

    /// Validates an externally supplied waypoint list.
    ///
    /// Degenerate routes are rejected here so they never reach a running session.
    pub fn custom_path(&self, waypoints: Vec<Point>) -> Result<Path, PathError> {
        Path::new(waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds_a_path() {
        for preset in MapPreset::ALL {
            let path = preset.path().expect("preset waypoints form a valid path");
            assert_eq!(path.len(), 6, "{preset} should have six waypoints");
            assert!((path.first().x - 0.0).abs() < f32::EPSILON);
            assert!((path.waypoints()[path.last_index()].x - 800.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn presets_parse_from_names() {
        assert_eq!("curvy".parse::<MapPreset>(), Ok(MapPreset::Curvy));
        assert_eq!("CLASSIC".parse::<MapPreset>(), Ok(MapPreset::Classic));
        assert!("spiral".parse::<MapPreset>().is_err());
    }
}
