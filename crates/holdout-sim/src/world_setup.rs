//! Entity spawn factories for setting up the simulation world.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::components::*;
use holdout_core::config::{GameConfig, WaveConfig, WorldConfig};
use holdout_core::enums::ResourceKind;

use crate::world::World;

/// Build a fresh world: player at the centre, resource nodes scattered.
pub fn setup_session(config: &GameConfig, rng: &mut ChaCha8Rng) -> World {
    let mut world = World::new(spawn_player(config));
    scatter_resource_nodes(&mut world, rng, &config.world);
    world
}

/// The player at the world centre with starting funds.
pub fn spawn_player(config: &GameConfig) -> Player {
    Player {
        position: config.world.center(),
        radius: config.player.radius,
        speed: config.player.speed,
        move_intent: DVec2::ZERO,
        resources: config.player.starting_resources,
        money: config.player.starting_money,
        hp: config.player.max_hp,
        max_hp: config.player.max_hp,
    }
}

/// Scatter gatherable nodes uniformly over the world.
pub fn scatter_resource_nodes(world: &mut World, rng: &mut ChaCha8Rng, world_config: &WorldConfig) {
    world.resource_nodes.reserve(world_config.resource_node_count);
    for _ in 0..world_config.resource_node_count {
        let position = random_position(rng, world_config);
        let kind = if rng.gen_bool(world_config.tree_fraction.clamp(0.0, 1.0)) {
            ResourceKind::Tree
        } else {
            ResourceKind::Rock
        };
        world.resource_nodes.push(ResourceNode {
            position,
            radius: world_config.resource_node_radius,
            kind,
            taken: false,
        });
    }
}

/// A zombie at a random world position with difficulty-scaled stats.
///
/// `speed = base * (1 + U[0, jitter) * difficulty)`,
/// `hp = floor(base_hp * difficulty)`.
pub fn spawn_zombie(
    rng: &mut ChaCha8Rng,
    world_config: &WorldConfig,
    waves: &WaveConfig,
    difficulty: f64,
) -> Zombie {
    let position = random_position(rng, world_config);
    let jitter = if waves.zombie_speed_jitter > 0.0 {
        rng.gen_range(0.0..waves.zombie_speed_jitter)
    } else {
        0.0
    };

    Zombie {
        position,
        radius: waves.zombie_radius,
        speed: waves.zombie_base_speed * (1.0 + jitter * difficulty),
        hp: (waves.zombie_base_hp * difficulty).floor(),
        attack_cooldown: 0,
        slow: 1.0,
        slow_timer: 0,
    }
}

/// A zombie with fixed stats at a known spot (for tests needing exact setups).
#[cfg(test)]
pub fn zombie_at(position: DVec2, hp: f64, speed: f64) -> Zombie {
    Zombie {
        position,
        radius: 14.0,
        speed,
        hp,
        attack_cooldown: 0,
        slow: 1.0,
        slow_timer: 0,
    }
}

fn random_position(rng: &mut ChaCha8Rng, world_config: &WorldConfig) -> DVec2 {
    DVec2::new(
        rng.gen::<f64>() * world_config.width(),
        rng.gen::<f64>() * world_config.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn session_has_player_at_center_and_nodes_in_bounds() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let world = setup_session(&config, &mut rng);

        assert_eq!(world.player.position, DVec2::new(1500.0, 1500.0));
        assert_eq!(world.player.hp, 100.0);
        assert_eq!(world.resource_nodes.len(), 90);
        for node in &world.resource_nodes {
            assert!(node.position.x >= 0.0 && node.position.x < 3000.0);
            assert!(node.position.y >= 0.0 && node.position.y < 3000.0);
            assert!(!node.taken);
        }
        let trees = world
            .resource_nodes
            .iter()
            .filter(|n| n.kind == ResourceKind::Tree)
            .count();
        assert!(trees > 0 && trees < 90);
    }

    #[test]
    fn zombie_hp_is_floored() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Wave 1: difficulty 1.25 -> hp 125.
        let zombie = spawn_zombie(&mut rng, &config.world, &config.waves, 1.25);
        assert_eq!(zombie.hp, 125.0);
        assert_eq!(zombie.radius, 14.0);
        assert_eq!(zombie.slow, 1.0);
    }
}
