//! Game loop thread: runs the simulation engine at TICK_RATE and publishes snapshots.
//!
//! The engine is created inside this thread so the thread owns it outright.
//! Commands arrive via an `mpsc` channel. Snapshots are stored in shared
//! state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use holdout_core::constants::TICK_RATE;
use holdout_core::events::SimEvent;
use holdout_core::state::GameStateSnapshot;
use holdout_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// A running game loop: the channel into it and its thread.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub thread: JoinHandle<()>,
}

impl GameLoopHandle {
    /// Send Shutdown and wait for the thread to exit.
    ///
    /// Once this returns the loop will not publish another snapshot.
    pub fn shutdown(self) {
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        if self.thread.join().is_err() {
            warn!("Game loop thread panicked");
        }
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("holdout-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(seed = config.seed, "Game loop started");
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "Game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();
        for event in &snapshot.events {
            log_event(snapshot.time.tick, event);
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            debug!(behind = ?(now - next_tick_time), "Game loop fell behind");
            next_tick_time = now;
        }
    }
}

/// Log one simulation event. Waves, deaths and losses at info, the rest at debug.
pub fn log_event(tick: u64, event: &SimEvent) {
    match event {
        SimEvent::WaveStarted { .. }
        | SimEvent::WaveEnded { .. }
        | SimEvent::PlayerDied
        | SimEvent::StructureDestroyed { .. } => info!(tick, ?event, "Event"),
        _ => debug!(tick, ?event, "Event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::commands::PlayerCommand;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::SetMoveIntent {
            dx: 1.0,
            dy: 0.0,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::SetMoveIntent { .. })
        ));
        assert!(matches!(commands[1], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_publishes_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let handle = spawn_game_loop(SimConfig::default(), Arc::clone(&latest)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while latest.lock().unwrap().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        let tick = latest.lock().unwrap().as_ref().map(|s| s.time.tick);
        assert!(tick.is_some_and(|t| t >= 1));

        handle.shutdown();
        let final_tick = latest.lock().unwrap().as_ref().map(|s| s.time.tick);
        std::thread::sleep(TICK_DURATION * 5);
        let later_tick = latest.lock().unwrap().as_ref().map(|s| s.time.tick);
        assert_eq!(final_tick, later_tick, "no snapshot after shutdown returns");
    }

    #[test]
    fn test_snapshot_json_after_first_wave() {
        let mut engine = SimulationEngine::new(SimConfig::default());

        // Run through the first wave spawn to populate entities
        for _ in 0..1000 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(!snapshot.zombies.is_empty());
        assert_eq!(json["zombies"].as_array().map(Vec::len), Some(snapshot.zombies.len()));
        assert_eq!(json["wave"]["phase"], "Active");
        assert_eq!(json["wave"]["wave_number"], 1);
        assert_eq!(json["time"]["tick"], 1001);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
