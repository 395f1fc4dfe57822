#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic round scheduler responsible for spawning enemies and
//! scaling difficulty between rounds.

use tower_blast_core::{Command, Event, RoundSnapshot};

/// Configuration parameters required to construct the round scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    base_spawn_interval: i32,
    spawn_interval_step: i32,
    min_spawn_interval: i32,
    health_step: i32,
    speed_step: f32,
    round_pause: i32,
}

impl Config {
    /// Creates a new configuration with explicit spawn cadence and scaling.
    ///
    /// The spawn interval for round `r` is
    /// `max(base_spawn_interval - r * spawn_interval_step, min_spawn_interval)`.
    #[must_use]
    pub const fn new(
        base_spawn_interval: i32,
        spawn_interval_step: i32,
        min_spawn_interval: i32,
        health_step: i32,
        speed_step: f32,
        round_pause: i32,
    ) -> Self {
        Self {
            base_spawn_interval,
            spawn_interval_step,
            min_spawn_interval,
            health_step,
            speed_step,
            round_pause,
        }
    }

    /// Number of ticks between spawns during the provided round.
    #[must_use]
    pub fn spawn_interval(&self, round: u32) -> i32 {
        let shrink = i64::from(round) * i64::from(self.spawn_interval_step);
        let interval = (i64::from(self.base_spawn_interval) - shrink)
            .max(i64::from(self.min_spawn_interval));
        i32::try_from(interval).unwrap_or(i32::MAX)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(30, 2, 10, 5, 0.1, 60)
    }
}

/// Pure system that decides when enemies spawn and when rounds end.
#[derive(Debug, Default)]
pub struct Rounds {
    config: Config,
}

impl Rounds {
    /// Creates a new round scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration driving the scheduler.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Emits `Command::SpawnEnemy` when the tick lapsed the spawn timer.
    ///
    /// The world decrements the timer while applying `Command::Tick`, so this
    /// only reacts to batches containing `Event::TimeAdvanced`.
    pub fn handle_spawn(&self, events: &[Event], round: RoundSnapshot, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        if round.spawn_timer > 0 {
            return;
        }

        out.push(Command::SpawnEnemy {
            health: round.enemy_base_health,
            next_spawn_in: self.config.spawn_interval(round.round),
        });
    }

    /// Emits `Command::AdvanceRound` during a lull: no enemies alive and the
    /// spawn timer strictly below zero.
    pub fn handle_round_end(
        &self,
        round: RoundSnapshot,
        active_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        if active_enemies != 0 || round.spawn_timer >= 0 {
            return;
        }

        out.push(Command::AdvanceRound {
            enemy_base_health: round
                .enemy_base_health
                .saturating_add(self.config.health_step),
            enemy_speed: round.enemy_speed + self.config.speed_step,
            pause: self.config.round_pause,
        });
    }
}
