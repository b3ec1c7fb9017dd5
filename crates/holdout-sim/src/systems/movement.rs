//! Movement & collision: player motion, zombie pursuit, push-back and melee.
//!
//! Zombies are processed in collection order. Each one scans the structure
//! list as it stood when its turn began, so a structure destroyed mid-scan
//! is neither skipped past nor visited twice.

use glam::DVec2;
use tracing::{debug, info};

use holdout_core::components::{Player, Zombie};
use holdout_core::config::GameConfig;
use holdout_core::constants::*;
use holdout_core::events::SimEvent;
use holdout_core::types::GridCell;

use crate::geometry::{circles_overlap, direction, overlaps_circle_tile};
use crate::world::{Structures, World};

/// Apply the player's movement intent and clamp to the world bounds.
pub fn move_player(world: &mut World, config: &GameConfig) {
    let player = &mut world.player;
    player.position += player.move_intent;
    player.position = clamp_to_world(player.position, player.radius, config);
}

/// Run pursuit, structure collision and attacks for every living zombie.
///
/// `cell_buffer` is scratch space reused across ticks.
pub fn run_zombies(
    world: &mut World,
    config: &GameConfig,
    cell_buffer: &mut Vec<GridCell>,
    events: &mut Vec<SimEvent>,
) {
    let World {
        player,
        structures,
        zombies,
        ..
    } = world;
    let tile_size = config.world.tile_size;

    structures.collect_cells(cell_buffer);

    for zombie in zombies.iter_mut() {
        if zombie.hp <= 0.0 {
            continue;
        }
        if zombie.attack_cooldown > 0 {
            zombie.attack_cooldown -= 1;
        }

        let speed_factor = tick_slow(zombie);
        let velocity = direction(zombie.position, player.position) * zombie.speed * speed_factor;

        if collide_with_structures(zombie, structures, cell_buffer, tile_size, events) {
            structures.collect_cells(cell_buffer);
        }

        zombie.position += velocity;

        if zombie.attack_cooldown == 0
            && circles_overlap(zombie.position, zombie.radius, player.position, player.radius)
        {
            zombie.attack_cooldown = ZOMBIE_ATTACK_COOLDOWN;
            player.hp -= ZOMBIE_PLAYER_DAMAGE;
            if player.hp <= 0.0 {
                respawn_player(player, config);
                events.push(SimEvent::PlayerDied);
            }
        }
    }
}

/// Current speed multiplier; counts the slow timer down, or resets to neutral.
fn tick_slow(zombie: &mut Zombie) -> f64 {
    if zombie.slow_timer > 0 {
        zombie.slow_timer -= 1;
        zombie.slow
    } else {
        zombie.slow = 1.0;
        zombie.slow_timer = 0;
        1.0
    }
}

/// Push the zombie out of every structure it overlaps and bite one if ready.
///
/// Returns true when a structure was destroyed.
fn collide_with_structures(
    zombie: &mut Zombie,
    structures: &mut Structures,
    cells: &[GridCell],
    tile_size: f64,
    events: &mut Vec<SimEvent>,
) -> bool {
    let mut destroyed_any = false;

    for &cell in cells {
        let origin = cell.origin(tile_size);
        if !overlaps_circle_tile(zombie.position, zombie.radius, origin, tile_size) {
            continue;
        }

        // Step out along the axis of larger offset from the tile centre.
        let offset = zombie.position - cell.center(tile_size);
        if offset.x.abs() > offset.y.abs() {
            zombie.position.x += if offset.x > 0.0 { zombie.speed } else { -zombie.speed };
        } else {
            zombie.position.y += if offset.y > 0.0 { zombie.speed } else { -zombie.speed };
        }

        if zombie.attack_cooldown == 0 {
            zombie.attack_cooldown = ZOMBIE_ATTACK_COOLDOWN;
            if let Some(kind) = structures.damage_at(cell, ZOMBIE_STRUCTURE_DAMAGE) {
                debug!(%kind, %cell, "Structure destroyed");
                events.push(SimEvent::StructureDestroyed { kind, cell });
                destroyed_any = true;
            }
        }
    }

    destroyed_any
}

/// Full respawn: hp restored, money and resources lost, back to the centre.
fn respawn_player(player: &mut Player, config: &GameConfig) {
    info!(
        money_lost = player.money,
        resources_lost = player.resources,
        "Player died"
    );
    player.hp = player.max_hp;
    player.money = 0.0;
    player.resources = 0;
    player.position = config.world.center();
}

/// Keep a circle inside the world. `max` then `min`, so a world narrower
/// than the circle pins it to the far edge instead of panicking.
fn clamp_to_world(position: DVec2, radius: f64, config: &GameConfig) -> DVec2 {
    DVec2::new(
        position.x.max(radius).min(config.world.width() - radius),
        position.y.max(radius).min(config.world.height() - radius),
    )
}
