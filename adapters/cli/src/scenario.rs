use std::{fs, path::Path as FsPath, str::FromStr};

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_blast_core::{Path, PathError, Point, TowerKind, UnknownTowerKind};
use tower_blast_system_bootstrap::{Bootstrap, MapPreset};

/// Frames simulated when neither the scenario nor the command line says otherwise.
pub(crate) const DEFAULT_FRAMES: u64 = 600;

/// Scripted session loaded from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Built-in map to play on.
    #[serde(default)]
    pub map: Option<MapPreset>,
    /// Custom waypoints that replace the map preset when present.
    #[serde(default)]
    pub path: Option<Vec<[f32; 2]>>,
    /// Number of frames to simulate.
    #[serde(default)]
    pub frames: Option<u64>,
    /// Towers placed before the tick of their frame.
    #[serde(default)]
    pub towers: Vec<ScheduledTower>,
}

/// Tower placement scheduled for a specific frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScheduledTower {
    /// Kind of tower to buy.
    pub kind: TowerKind,
    /// Horizontal coordinate of the tower center.
    pub x: f32,
    /// Vertical coordinate of the tower center.
    pub y: f32,
    /// Frame before whose tick the placement is attempted.
    #[serde(default)]
    pub frame: u64,
}

impl ScheduledTower {
    /// Center of the tower.
    #[must_use]
    pub(crate) fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Errors raised while interpreting scenario content.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    /// The TOML document could not be parsed.
    #[error("could not parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    /// The custom path failed validation.
    #[error("scenario path is invalid: {0}")]
    InvalidPath(#[from] PathError),
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub(crate) fn from_toml_str(source: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = toml::from_str(source)?;
        let _ = scenario.resolve_path()?;
        Ok(scenario)
    }

    /// Reads and parses the scenario stored at `location`.
    pub(crate) fn load(location: &FsPath) -> AnyResult<Self> {
        let source = fs::read_to_string(location)
            .with_context(|| format!("failed to read scenario {}", location.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("failed to load scenario {}", location.display()))
    }

    /// Path enemies follow: the custom waypoints if any, otherwise the map preset.
    pub(crate) fn resolve_path(&self) -> Result<Path, ScenarioError> {
        let bootstrap = Bootstrap;
        match &self.path {
            Some(points) => {
                let waypoints = points.iter().map(|[x, y]| Point::new(*x, *y)).collect();
                Ok(bootstrap.custom_path(waypoints)?)
            }
            None => Ok(bootstrap.path(self.map.unwrap_or_default())?),
        }
    }

    /// Frames to simulate.
    #[must_use]
    pub(crate) fn frames(&self) -> u64 {
        self.frames.unwrap_or(DEFAULT_FRAMES)
    }

    /// Placements due before the tick of `frame`, in declaration order.
    pub(crate) fn towers_at(&self, frame: u64) -> impl Iterator<Item = &ScheduledTower> {
        self.towers.iter().filter(move |tower| tower.frame == frame)
    }
}

/// Errors raised while parsing a `kind@x,y` placement flag.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TowerArgError {
    /// The value did not contain the `@` separator.
    #[error("expected kind@x,y, got '{0}'")]
    MissingSeparator(String),
    /// The tower kind was not recognized.
    #[error(transparent)]
    UnknownKind(#[from] UnknownTowerKind),
    /// A coordinate could not be parsed.
    #[error("invalid coordinates '{0}'")]
    InvalidCoordinates(String),
}

impl FromStr for ScheduledTower {
    type Err = TowerArgError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (kind, coordinates) = value
            .split_once('@')
            .ok_or_else(|| TowerArgError::MissingSeparator(value.to_owned()))?;
        let kind = kind.trim().parse::<TowerKind>()?;

        let invalid = || TowerArgError::InvalidCoordinates(coordinates.to_owned());
        let (x, y) = coordinates.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<f32>().map_err(|_| invalid())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }

        Ok(Self {
            kind,
            x,
            y,
            frame: 0,
        })
    }
}
