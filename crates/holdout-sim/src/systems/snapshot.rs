//! Snapshot system: reads the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use holdout_core::config::GameConfig;
use holdout_core::constants::TICK_RATE;
use holdout_core::enums::WavePhase;
use holdout_core::events::SimEvent;
use holdout_core::state::*;
use holdout_core::types::SimTime;

use crate::engine::ScoreState;
use crate::world::{StructureRef, World};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    config: &GameConfig,
    score: &ScoreState,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        player: build_player(world),
        structures: build_structures(world, config.world.tile_size),
        zombies: build_zombies(world),
        projectiles: world
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                position: p.position,
            })
            .collect(),
        resource_nodes: world
            .live_resource_nodes()
            .map(|n| ResourceNodeView {
                position: n.position,
                radius: n.radius,
                kind: n.kind,
            })
            .collect(),
        wave: build_wave(world, config),
        score: ScoreView {
            zombies_killed: score.zombies_killed,
            player_deaths: score.player_deaths,
            structures_lost: score.structures_lost,
        },
        events,
    }
}

fn build_player(world: &World) -> PlayerView {
    let player = &world.player;
    PlayerView {
        position: player.position,
        radius: player.radius,
        hp: player.hp,
        max_hp: player.max_hp,
        money: player.money,
        resources: player.resources,
    }
}

/// Structures in scan order: walls, generators, turrets.
fn build_structures(world: &World, tile_size: f64) -> Vec<StructureView> {
    world
        .structures
        .iter()
        .map(|s| {
            let (level, variant, range, effect) = match s {
                StructureRef::Turret(t) => (t.level, t.variant.clone(), Some(t.range), t.effect),
                StructureRef::Wall(_) | StructureRef::Generator(_) => (0, None, None, None),
            };
            StructureView {
                kind: s.kind(),
                cell: s.cell(),
                position: s.cell().origin(tile_size),
                hp: s.hp(),
                level,
                variant,
                range,
                effect,
            }
        })
        .collect()
}

fn build_zombies(world: &World) -> Vec<ZombieView> {
    world
        .zombies
        .iter()
        .map(|z| ZombieView {
            position: z.position,
            radius: z.radius,
            hp: z.hp,
            slowed: z.slow_timer > 0,
        })
        .collect()
}

fn build_wave(world: &World, config: &GameConfig) -> WaveView {
    let waves = &world.waves;
    let (countdown_ticks, elapsed_ticks, remaining) = match waves.phase {
        WavePhase::Idle => {
            let countdown = config.waves.wave_interval_ticks.saturating_sub(waves.timer);
            (countdown, 0, countdown)
        }
        WavePhase::Active => (
            0,
            waves.elapsed,
            config.waves.max_wave_ticks.saturating_sub(waves.elapsed),
        ),
    };

    WaveView {
        phase: waves.phase,
        wave_number: waves.wave_number,
        countdown_ticks,
        elapsed_ticks,
        seconds_remaining: remaining.div_ceil(TICK_RATE),
    }
}
