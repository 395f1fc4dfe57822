#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that lists the enemies within range of every ready tower.

use tower_blast_core::{EnemyId, EnemyView, Point, TowerTarget, TowerView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes targets for every tower whose cooldown has elapsed.
    ///
    /// The output buffer is cleared before populating it. Towers with no
    /// enemy strictly inside their range are omitted, which leaves their
    /// cooldown untouched until a target shows up. Enemies are listed in
    /// spawn order; no distance ordering is applied.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<TowerTarget>) {
        out.clear();

        if enemies.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);

        for tower in towers.iter().filter(|tower| tower.is_ready()) {
            let range = tower.kind.spec().range;
            let in_range: Vec<EnemyId> = self
                .enemy_workspace
                .iter()
                .filter(|candidate| candidate.position.distance(tower.position) < range)
                .map(|candidate| candidate.id)
                .collect();

            if in_range.is_empty() {
                continue;
            }

            out.push(TowerTarget {
                tower: tower.id,
                kind: tower.kind,
                enemies: in_range,
            });
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());
        self.enemy_workspace
            .extend(enemies.iter().map(|snapshot| EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: Point,
}
