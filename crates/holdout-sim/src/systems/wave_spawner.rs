//! Wave spawning system: a two-state controller driving escalating waves.
//!
//! Idle counts up to the wave interval, then the wave goes Active and all of
//! its zombies spawn at once. Active waves are time-boxed: they end after
//! `max_wave_ticks` whether or not anything survived.

use rand_chacha::ChaCha8Rng;
use tracing::info;

use holdout_core::config::GameConfig;
use holdout_core::enums::WavePhase;
use holdout_core::events::SimEvent;

use crate::world::World;
use crate::world_setup;

/// Wave controller state, stored on the world.
#[derive(Debug, Clone)]
pub struct WaveController {
    pub phase: WavePhase,
    /// 1-based number of the current (or next) wave.
    pub wave_number: u32,
    /// Idle ticks counted toward the next wave.
    pub timer: u32,
    /// Ticks since the active wave started.
    pub elapsed: u32,
}

impl Default for WaveController {
    fn default() -> Self {
        Self {
            phase: WavePhase::Idle,
            wave_number: 1,
            timer: 0,
            elapsed: 0,
        }
    }
}

/// Advance the controller by one tick, spawning a wave when it comes due.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    events: &mut Vec<SimEvent>,
) {
    let waves = &config.waves;

    match world.waves.phase {
        WavePhase::Idle => {
            world.waves.timer += 1;
            if world.waves.timer < waves.wave_interval_ticks {
                return;
            }

            let wave = world.waves.wave_number;
            world.waves.phase = WavePhase::Active;
            world.waves.timer = 0;
            world.waves.elapsed = 0;

            let enemy_count = waves.enemy_count(wave);
            let difficulty = waves.difficulty(wave);
            for _ in 0..enemy_count {
                let zombie = world_setup::spawn_zombie(rng, &config.world, waves, difficulty);
                world.zombies.push(zombie);
            }

            info!(wave, enemy_count, difficulty, "Wave started");
            events.push(SimEvent::WaveStarted { wave, enemy_count });
        }
        WavePhase::Active => {
            world.waves.elapsed += 1;
            if world.waves.elapsed < waves.max_wave_ticks {
                return;
            }

            let wave = world.waves.wave_number;
            let survivors = world.living_zombie_count() as u32;
            world.waves.phase = WavePhase::Idle;
            world.waves.wave_number += 1;
            world.waves.timer = 0;

            info!(wave, survivors, "Wave timed out");
            events.push(SimEvent::WaveEnded { wave, survivors });
        }
    }
}
