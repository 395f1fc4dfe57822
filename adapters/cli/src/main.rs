#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Tower Blast sessions headlessly.

mod scenario;
mod text;

use std::{io, path::PathBuf};

use anyhow::{ensure, Result as AnyResult};
use clap::Parser;
use tower_blast_core::{Command, HudSnapshot};
use tower_blast_rendering::{Renderer, Scene};
use tower_blast_simulation::{HudSink, Simulation};
use tower_blast_system_bootstrap::{Bootstrap, MapPreset};
use tower_blast_system_builder::{Builder, BuilderInput};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    scenario::{Scenario, ScheduledTower},
    text::TextRenderer,
};

#[derive(Parser, Debug)]
#[command(name = "tower-blast")]
#[command(about = "Runs a Tower Blast session and prints its frames")]
struct Args {
    /// Built-in map to play on
    #[arg(long)]
    map: Option<MapPreset>,

    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,

    /// Tower to place before the first tick, as kind@x,y (repeatable)
    #[arg(long = "tower", value_name = "KIND@X,Y")]
    towers: Vec<ScheduledTower>,

    /// Print every Nth frame
    #[arg(long, default_value_t = 60)]
    every: u64,

    /// List every tower and enemy in printed frames
    #[arg(long)]
    verbose: bool,

    /// TOML scenario providing the map, frame count and scheduled towers
    #[arg(long)]
    scenario: Option<PathBuf>,
}

impl Args {
    /// Merges the scenario file with command-line overrides.
    fn into_scenario(self) -> AnyResult<Scenario> {
        let mut scenario = match &self.scenario {
            Some(location) => Scenario::load(location)?,
            None => Scenario::default(),
        };

        if let Some(map) = self.map {
            scenario.map = Some(map);
            scenario.path = None;
        }
        if let Some(frames) = self.frames {
            scenario.frames = Some(frames);
        }
        scenario.towers.extend(self.towers);
        Ok(scenario)
    }
}

/// Forwards HUD refreshes to the log.
#[derive(Debug, Default)]
struct LogSink;

impl HudSink for LogSink {
    fn refresh(&mut self, hud: HudSnapshot) {
        debug!(money = hud.money, lives = hud.lives, round = hud.round, "hud");
    }

    fn game_over(&mut self, hud: HudSnapshot) {
        warn!(round = hud.round, "all lives lost");
    }
}

/// Entry point for the Tower Blast command-line interface.
fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let every = args.every;
    let verbose = args.verbose;
    ensure!(every > 0, "--every must be at least 1");

    let scenario = args.into_scenario()?;
    let mut renderer = TextRenderer::new(io::stdout().lock(), verbose);
    run(&scenario, every, &mut renderer)
}

/// Plays `scenario`, presenting every `every`th frame and the final one.
fn run(scenario: &Scenario, every: u64, renderer: &mut impl Renderer) -> AnyResult<()> {
    let path = scenario.resolve_path()?;
    let mut simulation = Simulation::start(path);
    let mut builder = Builder::new();
    let mut sink = LogSink;
    let mut commands = Vec::new();

    println!("{}", Bootstrap.welcome_banner(simulation.world()));

    let frames = scenario.frames();
    for frame in 0..frames {
        for tower in scenario.towers_at(frame) {
            place(&mut simulation, &mut builder, tower, frame, &mut commands);
        }

        let outcome = simulation.tick(&mut sink);
        let last = frame + 1 == frames;
        if outcome.is_game_over() || last || frame % every == 0 {
            renderer.present(&Scene::capture(simulation.world(), outcome.is_game_over()))?;
        }
        if outcome.is_game_over() {
            break;
        }
    }

    let hud = simulation.hud();
    info!(
        money = hud.money,
        lives = hud.lives,
        round = hud.round,
        "session finished"
    );
    Ok(())
}

/// Selects the scheduled tower kind, previews the click and places it when affordable.
fn place(
    simulation: &mut Simulation,
    builder: &mut Builder,
    tower: &ScheduledTower,
    frame: u64,
    commands: &mut Vec<Command>,
) {
    let position = tower.position();
    builder.handle(BuilderInput::new(Some(tower.kind), None), commands);

    let money = simulation.hud().money;
    if let Some(preview) = builder.preview(Some(position), money) {
        if !preview.affordable {
            warn!(
                frame,
                kind = %preview.kind,
                money,
                cost = preview.kind.spec().cost,
                "cannot afford tower"
            );
            return;
        }
        debug!(
            frame,
            kind = %preview.kind,
            x = preview.position.x,
            y = preview.position.y,
            range = preview.range,
            "placing tower"
        );
    }

    builder.handle(BuilderInput::new(None, Some(position)), commands);
    for command in commands.drain(..) {
        let Command::PlaceTower { kind, position } = command else {
            continue;
        };
        match simulation.place_tower(kind, position, &mut LogSink) {
            Ok(tower) => info!(frame, tower = tower.get(), %kind, "tower placed"),
            Err(reason) => warn!(frame, %kind, %reason, "tower not placed"),
        }
    }
}
