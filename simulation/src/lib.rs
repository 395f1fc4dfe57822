#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-driven orchestrator that composes the world and the pure systems.
//!
//! A [`Simulation`] owns one session. Hosts call [`Simulation::tick`] once per
//! frame; each call runs to completion, applying the round scheduler,
//! movement and combat passes in a fixed order. Placement requests take
//! `&mut self` as well, so they always land between two ticks.

use tower_blast_core::{
    Command, Event, HudSnapshot, Path, PlacementError, Point, TowerId, TowerKind, TowerTarget,
};
use tower_blast_system_movement::Movement;
use tower_blast_system_rounds::{Config, Rounds};
use tower_blast_system_tower_combat::TowerCombat;
use tower_blast_system_tower_targeting::TowerTargeting;
use tower_blast_world::{self as world, query, World};
use tracing::info;

/// Observer notified whenever money, lives or round change.
pub trait HudSink {
    /// Receives the heads-up display values after a change.
    fn refresh(&mut self, hud: HudSnapshot);

    /// Called once when the session transitions into the game-over state.
    fn game_over(&mut self, hud: HudSnapshot) {
        let _ = hud;
    }
}

impl<F> HudSink for F
where
    F: FnMut(HudSnapshot),
{
    fn refresh(&mut self, hud: HudSnapshot) {
        self(hud);
    }
}

/// Lifecycle state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Ticks advance the simulation.
    Running,
    /// Lives ran out; ticks no longer mutate the session.
    GameOver,
}

/// Result of a single frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame was simulated; the host should schedule another tick.
    Running(HudSnapshot),
    /// The session is over; the host should show the end screen and stop ticking.
    GameOver(HudSnapshot),
}

impl TickOutcome {
    /// Reports whether the session ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }

    /// Display values captured at the end of the step.
    #[must_use]
    pub const fn hud(&self) -> HudSnapshot {
        match self {
            Self::Running(hud) | Self::GameOver(hud) => *hud,
        }
    }
}

/// Owns a session and drives it one frame at a time.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    state: SessionState,
    rounds: Rounds,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    events: Vec<Event>,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
}

impl Simulation {
    /// Starts a fresh session on `path` with the default round configuration.
    #[must_use]
    pub fn start(path: Path) -> Self {
        Self::with_config(path, Config::default())
    }

    /// Starts a fresh session on `path` using a custom round configuration.
    #[must_use]
    pub fn with_config(path: Path, config: Config) -> Self {
        info!(waypoints = path.len(), "session started");
        Self {
            world: World::new(path),
            state: SessionState::Running,
            rounds: Rounds::new(config),
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            events: Vec::new(),
            commands: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Replaces the session with a fresh one on the same path and refreshes `sink`.
    pub fn restart<S>(&mut self, sink: &mut S)
    where
        S: HudSink + ?Sized,
    {
        let path = query::path(&self.world).clone();
        info!(
            previous_round = query::round(&self.world).round,
            "session restarted"
        );
        self.world = World::new(path);
        self.state = SessionState::Running;
        self.events.clear();
        sink.refresh(self.hud());
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read-only access to the session state for renderers and queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Values shown on the heads-up display.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        query::hud(&self.world)
    }

    /// Events produced by the most recent tick, in application order.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Places a tower if the player can afford it.
    ///
    /// Rejected placements leave the session untouched.
    pub fn place_tower<S>(
        &mut self,
        kind: TowerKind,
        position: Point,
        sink: &mut S,
    ) -> Result<TowerId, PlacementError>
    where
        S: HudSink + ?Sized,
    {
        if self.state == SessionState::GameOver {
            return Err(PlacementError::SessionOver);
        }

        let mut events = Vec::new();
        let placed = world::place_tower(&mut self.world, kind, position, &mut events);
        forward_hud_changes(&events, sink);
        placed
    }

    /// Advances the session by one frame.
    pub fn tick<S>(&mut self, sink: &mut S) -> TickOutcome
    where
        S: HudSink + ?Sized,
    {
        if self.state == SessionState::GameOver {
            return TickOutcome::GameOver(self.hud());
        }

        let hud = self.hud();
        if hud.lives <= 0 {
            self.state = SessionState::GameOver;
            info!(
                round = hud.round,
                money = hud.money,
                tick = query::tick_index(&self.world),
                "game over"
            );
            sink.game_over(hud);
            return TickOutcome::GameOver(hud);
        }

        self.events.clear();
        world::apply(&mut self.world, Command::Tick, &mut self.events);

        self.rounds
            .handle_spawn(&self.events, query::round(&self.world), &mut self.commands);
        flush(&mut self.world, &mut self.commands, &mut self.events);

        let enemies = query::enemy_view(&self.world);
        let speed = query::round(&self.world).enemy_speed;
        self.movement.handle(
            &self.events,
            &enemies,
            query::path(&self.world),
            speed,
            &mut self.commands,
        );
        flush(&mut self.world, &mut self.commands, &mut self.events);

        self.targeting.handle(
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.targets,
        );
        self.combat.handle(&self.targets, &mut self.commands);
        flush(&mut self.world, &mut self.commands, &mut self.events);

        self.rounds.handle_round_end(
            query::round(&self.world),
            query::enemy_count(&self.world),
            &mut self.commands,
        );
        flush(&mut self.world, &mut self.commands, &mut self.events);

        forward_hud_changes(&self.events, sink);
        TickOutcome::Running(self.hud())
    }
}

fn flush(world: &mut World, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
    for command in commands.drain(..) {
        world::apply(world, command, events);
    }
}

fn forward_hud_changes<S>(events: &[Event], sink: &mut S)
where
    S: HudSink + ?Sized,
{
    for event in events {
        if let Event::HudChanged { hud } = event {
            sink.refresh(*hud);
        }
    }
}
