#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along the path.

use tower_blast_core::{Command, EnemyView, Event, Path, Point};

/// Pure system that reacts to world events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::StepEnemy` per enemy that still has a waypoint
    /// ahead, followed by `Command::ReleaseEscapedEnemies` when any enemy
    /// reaches the end of the path.
    ///
    /// Nothing is emitted unless `events` contains `Event::TimeAdvanced`.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        path: &Path,
        speed: f32,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        if enemies.is_empty() {
            return;
        }

        self.scratch.clear();
        let last_index = path.last_index();
        let mut escaped = false;

        for enemy in enemies.iter() {
            let mut path_index = enemy.path_index;
            if let Some(waypoint) = path.waypoint(path_index.saturating_add(1)) {
                let (position, arrived) = step_toward(enemy.position, waypoint, speed);
                if arrived {
                    path_index += 1;
                }
                self.scratch.push(Command::StepEnemy {
                    enemy: enemy.id,
                    position,
                    path_index,
                });
            }

            if path_index >= last_index {
                escaped = true;
            }
        }

        if escaped {
            self.scratch.push(Command::ReleaseEscapedEnemies);
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

/// Moves `position` toward `waypoint` by `speed`, snapping onto the waypoint
/// when it is closer than a single step. Returns whether the waypoint was reached.
fn step_toward(position: Point, waypoint: Point, speed: f32) -> (Point, bool) {
    let dx = waypoint.x - position.x;
    let dy = waypoint.y - position.y;
    let distance = dx.hypot(dy);

    if distance < speed || distance <= 0.0 {
        return (waypoint, true);
    }

    let next = Point::new(
        position.x + dx / distance * speed,
        position.y + dy / distance * speed,
    );
    (next, false)
}
