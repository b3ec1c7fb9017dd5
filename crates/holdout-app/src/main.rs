//! Headless HOLDOUT runner.
//!
//! Runs one session without graphics and reports what happened.
//!
//! # Usage
//!
//! ```bash
//! # One minute of simulated time with default settings
//! holdout --ticks 3600
//!
//! # Custom tuning, verbose logs, final state as JSON on stdout
//! holdout --config tuning.json --seed 7 --verbose --dump-snapshot
//!
//! # Run on the fixed-rate game loop thread instead of as fast as possible
//! holdout --realtime --ticks 600
//! ```
//!
//! Logs go to stderr; stdout carries only the optional snapshot dump.
//! `RUST_LOG` overrides the `--verbose` level, e.g.
//! `RUST_LOG=holdout_sim=debug holdout`.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use holdout_app::error::HostError;
use holdout_app::game_loop::{log_event, TICK_DURATION};
use holdout_app::state::AppState;
use holdout_core::config::GameConfig;
use holdout_core::state::GameStateSnapshot;
use holdout_sim::{SimConfig, SimulationEngine};

#[derive(Parser)]
#[command(name = "holdout")]
#[command(about = "Headless survival-defense simulation runner")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for world layout and wave spawns
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of ticks to simulate (60 per second)
    #[arg(short, long, default_value = "3600")]
    ticks: u64,

    /// Print the final snapshot as JSON to stdout
    #[arg(long)]
    dump_snapshot: bool,

    /// Run on the game loop thread at the real tick rate. Events are logged
    /// from that thread as they happen
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<(), HostError> {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for the snapshot dump)
    let filter = log_filter(cli.verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    let game = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let config = SimConfig {
        seed: cli.seed,
        game,
    };

    let snapshot = if cli.realtime {
        run_realtime(config, cli.ticks)?
    } else {
        Some(run_batch(config, cli.ticks))
    };

    let Some(snapshot) = snapshot else {
        info!("No ticks ran");
        return Ok(());
    };
    info!(
        tick = snapshot.time.tick,
        wave = snapshot.wave.wave_number,
        zombies_alive = snapshot.zombies.len(),
        kills = snapshot.score.zombies_killed,
        deaths = snapshot.score.player_deaths,
        structures_lost = snapshot.score.structures_lost,
        "Session finished"
    );

    if cli.dump_snapshot {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

/// `RUST_LOG` directives when set and valid, otherwise the `--verbose` level.
fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Tick as fast as possible, logging every event.
fn run_batch(config: SimConfig, ticks: u64) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(config);
    let mut last = GameStateSnapshot::default();
    for _ in 0..ticks {
        last = engine.tick();
        for event in &last.events {
            log_event(last.time.tick, event);
        }
    }
    last
}

/// Let the game loop thread run for the wall-clock span of `ticks`.
fn run_realtime(config: SimConfig, ticks: u64) -> Result<Option<GameStateSnapshot>, HostError> {
    let state = AppState::new();
    state.start(config).map_err(HostError::Spawn)?;
    std::thread::sleep(TICK_DURATION * ticks.min(u32::MAX as u64) as u32);
    state.stop();
    Ok(state.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_picks_level_without_rust_log() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        assert_eq!(log_filter(true, None).to_string(), "debug");
    }

    #[test]
    fn test_rust_log_overrides_verbose() {
        let filter = log_filter(false, Some("holdout_sim=debug".into()));
        assert_eq!(filter.to_string(), "holdout_sim=debug");
    }
}
