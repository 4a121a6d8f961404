//! Headless LANEWAR runner: two random deciders play a match in real time.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lanewar_agents::RandomDecider;
use lanewar_app::{SimConfig, Simulation};
use lanewar_core::constants::DEFAULT_TIMESTEP_SECS;
use lanewar_core::enums::Side;
use lanewar_core::spec::GameSpec;
use lanewar_sim::Game;

const DEFAULT_LOG_FILTER: &str = "info";

/// How often the runner logs a progress line.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(author, version, about = "Run a headless LANEWAR match between two random players", long_about = None)]
struct Cli {
    /// Game spec as JSON; the built-in example is used if omitted
    #[arg(long)]
    spec: Option<PathBuf>,
    /// Wall-clock duration of the match
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,
    /// Simulated seconds per tick
    #[arg(long, default_value_t = DEFAULT_TIMESTEP_SECS)]
    timestep: f64,
    /// Seed for the friendly decider; the enemy uses seed + 1
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Alternate which side moves first every tick
    #[arg(long)]
    fair: bool,
}

#[derive(Debug, Serialize)]
struct MatchSummary {
    tick: u64,
    elapsed_secs: f64,
    friendly_balance: i64,
    enemy_balance: i64,
    units_per_lane: Vec<LaneSummary>,
}

#[derive(Debug, Serialize)]
struct LaneSummary {
    friendly: usize,
    enemy: usize,
}

impl MatchSummary {
    fn from_game(game: &Game) -> Self {
        let count = |units: &[lanewar_sim::Unit], side: Side| {
            units.iter().filter(|unit| unit.side == side).count()
        };
        Self {
            tick: game.time.tick,
            elapsed_secs: game.time.elapsed_secs,
            friendly_balance: game.player(Side::Friendly).balance,
            enemy_balance: game.player(Side::Enemy).balance,
            units_per_lane: game
                .lanes
                .iter()
                .map(|lane| LaneSummary {
                    friendly: count(&lane.units, Side::Friendly),
                    enemy: count(&lane.units, Side::Enemy),
                })
                .collect(),
        }
    }
}

fn load_spec(path: Option<&PathBuf>) -> anyhow::Result<GameSpec> {
    let Some(path) = path else {
        return Ok(GameSpec::example());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading spec {}", path.display()))?;
    GameSpec::from_json(&json).with_context(|| format!("parsing spec {}", path.display()))
}

/// `RUST_LOG` if it is set and parses, otherwise [`DEFAULT_LOG_FILTER`].
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();
    let duration = Duration::try_from_secs_f64(cli.seconds)
        .context("--seconds must be a non-negative number of seconds")?;

    let spec = Arc::new(load_spec(cli.spec.as_ref())?);
    info!(lanes = spec.lanes, units = spec.units.len(), "Loaded spec");

    let config = SimConfig {
        timestep_secs: cli.timestep,
        fair: cli.fair,
    };
    let mut sim = Simulation::new(
        spec,
        RandomDecider::new(cli.seed),
        RandomDecider::new(cli.seed.wrapping_add(1)),
        config,
    )?;

    let deadline = Instant::now() + duration;
    let mut scratch = None;
    sim.start()?;
    while Instant::now() < deadline {
        std::thread::sleep(REPORT_INTERVAL.min(deadline.saturating_duration_since(Instant::now())));
        let game = sim.get_state(&mut scratch)?;
        info!(
            tick = game.time.tick,
            friendly = game.player(Side::Friendly).balance,
            enemy = game.player(Side::Enemy).balance,
            units = game.unit_count(),
            "Match progress"
        );
    }
    sim.stop()?;

    let summary = MatchSummary::from_game(sim.get_state(&mut scratch)?);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
