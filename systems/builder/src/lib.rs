#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that turns tower selection and clicks into placement commands.

use tower_blast_core::{Command, Point, TowerKind};

/// Declarative placement preview describing a potential tower construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of tower proposed for placement.
    pub kind: TowerKind,
    /// Position the tower would occupy.
    pub position: Point,
    /// Radius of the range circle adapters may draw.
    pub range: f32,
    /// Indicates whether the player can currently afford the tower.
    pub affordable: bool,
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Tower kind picked from the tower menu on this frame, if any.
    pub select: Option<TowerKind>,
    /// Position clicked on the play field on this frame, if any.
    pub click: Option<Point>,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(select: Option<TowerKind>, click: Option<Point>) -> Self {
        Self { select, click }
    }
}

/// Placement system that remembers the selected tower kind between frames.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    selected: Option<TowerKind>,
}

impl Builder {
    /// Creates a new builder with no tower selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Tower kind currently selected, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<TowerKind> {
        self.selected
    }

    /// Consumes frame input and emits `Command::PlaceTower` for clicks made
    /// while a tower kind is selected.
    ///
    /// Affordability is left to the world, which rejects placements the
    /// player cannot pay for.
    pub fn handle(&mut self, input: BuilderInput, out: &mut Vec<Command>) {
        if let Some(kind) = input.select {
            self.selected = Some(kind);
        }

        let (Some(kind), Some(position)) = (self.selected, input.click) else {
            return;
        };

        out.push(Command::PlaceTower { kind, position });
    }

    /// Describes what placing the selected tower at `cursor` would look like.
    #[must_use]
    pub fn preview(&self, cursor: Option<Point>, money: u32) -> Option<PlacementPreview> {
        let kind = self.selected?;
        let position = cursor?;
        let spec = kind.spec();
        Some(PlacementPreview {
            kind,
            position,
            range: spec.range,
            affordable: money >= spec.cost,
        })
    }
}
