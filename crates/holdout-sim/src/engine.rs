//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the world, processes player commands, runs all
//! systems in a fixed order, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use holdout_core::commands::PlayerCommand;
use holdout_core::config::GameConfig;
use holdout_core::constants::TICK_RATE;
use holdout_core::enums::StructureKind;
use holdout_core::error::RejectReason;
use holdout_core::events::SimEvent;
use holdout_core::state::GameStateSnapshot;
use holdout_core::types::{GridCell, SimTime};

use crate::systems;
use crate::world::World;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Tunable world, player, wave and economy parameters.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// Running totals reported in every snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub zombies_killed: u32,
    pub player_deaths: u32,
    pub structures_lost: u32,
}

impl ScoreState {
    fn record(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::PlayerDied => self.player_deaths += 1,
                SimEvent::StructureDestroyed { .. } => self.structures_lost += 1,
                SimEvent::ZombiesKilled { count } => self.zombies_killed += count,
                _ => {}
            }
        }
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: GameConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    cell_buffer: Vec<GridCell>,
    events: Vec<SimEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = world_setup::setup_session(&config.game, &mut rng);
        Self {
            world,
            time: SimTime::default(),
            config: config.game,
            rng,
            command_queue: VecDeque::new(),
            cell_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.time.advance();
        self.process_commands();

        // Startup grace: nothing moves, produces or spawns yet.
        if self.time.tick >= self.config.waves.startup_grace_ticks {
            self.run_systems();
        }

        self.score.record(&self.events);
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.config, &self.score, events)
    }

    /// Build `kind` on `cell` right away.
    ///
    /// The outcome is also reported as an event in the next snapshot.
    pub fn place_structure(
        &mut self,
        kind: StructureKind,
        cell: GridCell,
    ) -> Result<(), RejectReason> {
        let result =
            systems::economy::request_placement(&mut self.world, &self.config.costs, kind, cell);
        match result {
            Ok(()) => {
                debug!(%kind, %cell, "Structure placed");
                self.events.push(SimEvent::StructurePlaced { kind, cell });
            }
            Err(reason) => {
                debug!(%kind, %cell, %reason, "Placement rejected");
                self.events.push(SimEvent::PlacementRejected { kind, cell, reason });
            }
        }
        result
    }

    /// Buy upgrade `choice` for the turret on `cell` right away.
    ///
    /// Returns the turret's new level. The outcome is also reported as an
    /// event in the next snapshot.
    pub fn upgrade_turret(&mut self, cell: GridCell, choice: usize) -> Result<u8, RejectReason> {
        let result =
            systems::economy::request_upgrade(&mut self.world, &self.config.upgrades, cell, choice);
        match result {
            Ok(level) => {
                let variant = self
                    .world
                    .structures
                    .turret_at(cell)
                    .and_then(|t| t.variant.clone())
                    .unwrap_or_default();
                debug!(%cell, level, %variant, "Turret upgraded");
                self.events.push(SimEvent::TurretUpgraded {
                    cell,
                    level,
                    variant,
                });
            }
            Err(reason) => {
                debug!(%cell, choice, %reason, "Upgrade rejected");
                self.events.push(SimEvent::UpgradeRejected {
                    cell,
                    choice,
                    reason,
                });
            }
        }
        result
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that need exact setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get the running score.
    pub fn score(&self) -> ScoreState {
        self.score
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Rejections surface as events only.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetMoveIntent { dx, dy } => {
                self.world.player.move_intent = glam::DVec2::new(dx, dy);
            }
            PlayerCommand::PlaceStructure { kind, cell } => {
                let _ = self.place_structure(kind, cell);
            }
            PlayerCommand::UpgradeTurret { cell, choice } => {
                let _ = self.upgrade_turret(cell, choice);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tile_size = self.config.world.tile_size;

        // 1. Player movement, then pick up whatever is underfoot
        systems::movement::move_player(&mut self.world, &self.config);
        systems::economy::gather_resources(&mut self.world, &mut self.events);

        // 2. Generator income
        systems::economy::tick_production(&mut self.world, TICK_RATE);

        // 3. Zombie pursuit, structure collisions and melee
        systems::movement::run_zombies(
            &mut self.world,
            &self.config,
            &mut self.cell_buffer,
            &mut self.events,
        );

        // 4. Turrets, arrows, visual timers
        systems::combat::run_turrets(&mut self.world, tile_size);
        systems::combat::run_projectiles(&mut self.world);
        systems::combat::tick_effects(&mut self.world);

        // 5. Prune the dead, then advance the wave controller
        systems::cleanup::run(&mut self.world, &mut self.events);
        systems::wave_spawner::run(&mut self.world, &mut self.rng, &self.config, &mut self.events);
    }
}
