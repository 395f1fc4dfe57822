//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use tower_blast_core::{Point, TowerId, TowerKind, TowerSnapshot};

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Position of the tower's center.
    pub(crate) position: Point,
    /// Ticks remaining until the tower may fire again.
    pub(crate) cooldown: i32,
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a freshly placed tower, ready to fire on its first tick.
    pub(crate) fn insert(&mut self, kind: TowerKind, position: Point) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                position,
                cooldown: 0,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    /// Decrements every tower cooldown by a single tick.
    pub(crate) fn cool_down(&mut self) {
        for tower in self.entries.values_mut() {
            tower.cooldown = tower.cooldown.saturating_sub(1);
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<TowerSnapshot> {
        self.entries
            .values()
            .map(|tower| TowerSnapshot {
                id: tower.id,
                kind: tower.kind,
                position: tower.position,
                cooldown: tower.cooldown,
            })
            .collect()
    }
}
