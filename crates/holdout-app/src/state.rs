//! State shared between collaborators and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use holdout_core::commands::PlayerCommand;
use holdout_core::state::GameStateSnapshot;
use holdout_sim::SimConfig;

use crate::game_loop::{spawn_game_loop, GameLoopHandle};

/// Commands sent from collaborators to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running (or not yet started) game loop.
///
/// Send + Sync so input and presentation threads can share one instance:
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - the latest snapshot sits in `Arc<Mutex<...>>`, shared with the loop thread
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// The running loop's thread, joined on `stop`.
    worker: Mutex<Option<JoinHandle<()>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            worker: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on its own thread. A running session is shut down
    /// first, and its last snapshot discarded.
    pub fn start(&self, config: SimConfig) -> std::io::Result<()> {
        self.stop();
        if let Ok(mut lock) = self.latest_snapshot.lock() {
            *lock = None;
        }
        let GameLoopHandle { commands, thread } =
            spawn_game_loop(config, Arc::clone(&self.latest_snapshot))?;
        if let Ok(mut lock) = self.command_tx.lock() {
            *lock = Some(commands);
        }
        if let Ok(mut lock) = self.worker.lock() {
            *lock = Some(thread);
        }
        Ok(())
    }

    /// Forward a player command. Returns false when no loop is listening.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let Ok(lock) = self.command_tx.lock() else {
            return false;
        };
        lock.as_ref()
            .is_some_and(|tx| tx.send(GameLoopCommand::PlayerCommand(command)).is_ok())
    }

    /// Whether a loop has been started and not stopped.
    pub fn is_running(&self) -> bool {
        self.command_tx.lock().is_ok_and(|lock| lock.is_some())
    }

    /// The most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Shut the loop down and wait for its thread. Safe to call when
    /// nothing is running.
    pub fn stop(&self) {
        let commands = self.command_tx.lock().ok().and_then(|mut lock| lock.take());
        let thread = self.worker.lock().ok().and_then(|mut lock| lock.take());
        match (commands, thread) {
            (Some(commands), Some(thread)) => GameLoopHandle { commands, thread }.shutdown(),
            (Some(commands), None) => {
                let _ = commands.send(GameLoopCommand::Shutdown);
            }
            (None, _) => {}
        }
    }
}
