#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits firing commands from targeting data.

use tower_blast_core::{Command, TowerTarget};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a `Command::FireTower` per target assignment, followed by a
    /// single `Command::ReapDefeatedEnemies` once every tower has fired.
    ///
    /// Splash towers hit every enemy in range. Single-target towers hit the
    /// first enemy listed, which is the earliest spawned one in range.
    pub fn handle(&mut self, tower_targets: &[TowerTarget], out: &mut Vec<Command>) {
        if tower_targets.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in tower_targets {
            let targets = if target.kind.spec().splash {
                target.enemies.clone()
            } else {
                target.enemies.first().copied().into_iter().collect()
            };

            if targets.is_empty() {
                continue;
            }

            self.scratch.push(Command::FireTower {
                tower: target.tower,
                targets,
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        self.scratch.push(Command::ReapDefeatedEnemies);
        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
