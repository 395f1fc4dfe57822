//! Enemy roster kept in spawn order.

use tower_blast_core::{EnemyId, EnemySnapshot, Point};

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) position: Point,
    pub(crate) path_index: usize,
    pub(crate) health: i32,
}

/// Active enemies in insertion order plus the identifier counter.
#[derive(Debug)]
pub(crate) struct EnemyRoster {
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
}

impl EnemyRoster {
    pub(crate) fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    pub(crate) fn spawn(&mut self, position: Point, health: i32) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        self.enemies.push(Enemy {
            id,
            position,
            path_index: 0,
            health,
        });
        id
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    /// Drops every enemy matching `predicate` in a single retain pass and
    /// returns the removed identifiers in spawn order.
    pub(crate) fn remove_where<F>(&mut self, mut predicate: F) -> Vec<EnemyId>
    where
        F: FnMut(&Enemy) -> bool,
    {
        let mut removed = Vec::new();
        self.enemies.retain(|enemy| {
            if predicate(enemy) {
                removed.push(enemy.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.enemies.len()
    }

    pub(crate) fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                position: enemy.position,
                path_index: enemy.path_index,
                health: enemy.health,
            })
            .collect()
    }
}
