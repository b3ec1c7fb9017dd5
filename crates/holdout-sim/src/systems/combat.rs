//! Combat resolver: turret fire, arrow ballistics and visual effect decay.
//!
//! Damage lands on zombies in place; the dead are pruned later by
//! [`super::cleanup`], so every step here still sees them this tick.

use glam::DVec2;

use holdout_core::components::{Projectile, TurretEffect, TurretWeapon, Zombie};
use holdout_core::constants::*;

use crate::geometry::distance;
use crate::world::World;

/// Fire every turret whose cooldown has run out and that has a target.
pub fn run_turrets(world: &mut World, tile_size: f64) {
    let World {
        structures,
        zombies,
        projectiles,
        ..
    } = world;

    for turret in structures.turrets.iter_mut() {
        if turret.cooldown > 0 {
            turret.cooldown -= 1;
            continue;
        }

        let origin = turret.cell.center(tile_size);
        let Some(target) = nearest_in_range(origin, turret.range, zombies) else {
            continue;
        };
        turret.cooldown = turret.fire_rate;

        match turret.weapon {
            TurretWeapon::Arrow { damage } => projectiles.push(Projectile {
                position: origin,
                target: zombies[target].position,
                damage,
                speed: PROJECTILE_SPEED,
            }),
            TurretWeapon::Laser { damage } => {
                let zombie = &mut zombies[target];
                zombie.hp -= damage;
                turret.effect = Some(TurretEffect::Laser {
                    target: zombie.position,
                    timer: LASER_EFFECT_TICKS,
                });
            }
            TurretWeapon::Ice { slow, duration } => {
                for zombie in zombies
                    .iter_mut()
                    .filter(|z| distance(z.position, origin) <= turret.range)
                {
                    zombie.slow = slow;
                    zombie.slow_timer = duration;
                }
                turret.effect = Some(TurretEffect::Frost {
                    timer: FROST_EFFECT_TICKS,
                });
            }
        }
    }
}

/// Index of the closest zombie strictly inside `range`; earliest wins ties.
fn nearest_in_range(origin: DVec2, range: f64, zombies: &[Zombie]) -> Option<usize> {
    let mut best = None;
    let mut best_distance = range;
    for (idx, zombie) in zombies.iter().enumerate() {
        let d = distance(zombie.position, origin);
        if d < best_distance {
            best_distance = d;
            best = Some(idx);
        }
    }
    best
}

/// Advance arrows toward their fixed aim point and resolve hits.
///
/// An arrow within one step of its aim point expires without damage.
pub fn run_projectiles(world: &mut World) {
    let World {
        zombies,
        projectiles,
        ..
    } = world;

    for idx in (0..projectiles.len()).rev() {
        let projectile = &mut projectiles[idx];
        let to_target = projectile.target - projectile.position;
        let remaining = to_target.length();
        if remaining <= projectile.speed {
            projectiles.remove(idx);
            continue;
        }
        projectile.position += to_target / remaining * projectile.speed;

        let position = projectile.position;
        let damage = projectile.damage;
        if let Some(zombie) = zombies
            .iter_mut()
            .find(|z| distance(z.position, position) < z.radius)
        {
            zombie.hp -= damage;
            projectiles.remove(idx);
        }
    }
}

/// Count visual effect timers down, clearing them at zero.
pub fn tick_effects(world: &mut World) {
    for turret in world.structures.turrets.iter_mut() {
        let Some(effect) = turret.effect.as_mut() else {
            continue;
        };
        let timer = match effect {
            TurretEffect::Laser { timer, .. } | TurretEffect::Frost { timer } => timer,
        };
        *timer = timer.saturating_sub(1);
        if *timer == 0 {
            turret.effect = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::config::GameConfig;
    use holdout_core::enums::{StructureKind, TurretKind};
    use holdout_core::types::GridCell;

    use crate::systems::economy::request_placement;
    use crate::world_setup::{spawn_player, zombie_at};

    const TILE: f64 = 50.0;
    const CELL: GridCell = GridCell { col: 10, row: 10 };
    // Centre of CELL.
    const CENTER: DVec2 = DVec2::new(525.0, 525.0);

    fn with_turret(kind: TurretKind) -> World {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        request_placement(&mut world, &config.costs, StructureKind::Turret(kind), CELL)
            .unwrap();
        world
    }

    #[test]
    fn idle_turret_keeps_cooldown() {
        let mut world = with_turret(TurretKind::Arrow);
        // Exactly at range is out of range.
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(240.0, 0.0), 100.0, 0.0));
        run_turrets(&mut world, TILE);
        assert_eq!(world.structures.turrets[0].cooldown, 0);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn cooldown_counts_down_one_per_tick() {
        let mut world = with_turret(TurretKind::Arrow);
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(100.0, 0.0), 1000.0, 0.0));

        run_turrets(&mut world, TILE);
        assert_eq!(world.structures.turrets[0].cooldown, 60);
        assert_eq!(world.projectiles.len(), 1);

        for expected in (0..60).rev() {
            run_turrets(&mut world, TILE);
            assert_eq!(world.structures.turrets[0].cooldown, expected);
        }
        assert_eq!(world.projectiles.len(), 1);

        run_turrets(&mut world, TILE);
        assert_eq!(world.structures.turrets[0].cooldown, 60);
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn arrow_aims_at_position_at_fire_time() {
        let mut world = with_turret(TurretKind::Arrow);
        let spot = CENTER + DVec2::new(0.0, -150.0);
        world.zombies.push(zombie_at(spot, 100.0, 0.0));
        run_turrets(&mut world, TILE);

        let arrow = &world.projectiles[0];
        assert_eq!(arrow.position, CENTER);
        assert_eq!(arrow.target, spot);
        assert_eq!(arrow.damage, 40.0);
        assert_eq!(arrow.speed, PROJECTILE_SPEED);
    }

    #[test]
    fn unintercepted_arrow_expires_without_damage() {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        world.projectiles.push(Projectile {
            position: DVec2::ZERO,
            target: DVec2::new(95.0, 0.0),
            damage: 40.0,
            speed: 10.0,
        });

        for _ in 0..9 {
            run_projectiles(&mut world);
        }
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].position, DVec2::new(90.0, 0.0));

        run_projectiles(&mut world);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn arrow_hits_first_zombie_in_its_path() {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        world
            .zombies
            .push(zombie_at(DVec2::new(30.0, 0.0), 100.0, 0.0));
        world
            .zombies
            .push(zombie_at(DVec2::new(30.0, 5.0), 100.0, 0.0));
        world.projectiles.push(Projectile {
            position: DVec2::ZERO,
            target: DVec2::new(200.0, 0.0),
            damage: 40.0,
            speed: 10.0,
        });

        run_projectiles(&mut world); // x = 10, 20 away
        assert_eq!(world.zombies[0].hp, 100.0);
        run_projectiles(&mut world); // x = 20, inside
        assert_eq!(world.zombies[0].hp, 60.0);
        assert_eq!(world.zombies[1].hp, 100.0, "no piercing");
        assert!(world.projectiles.is_empty());
    }

    fn arrow(from: DVec2, to: DVec2) -> Projectile {
        Projectile {
            position: from,
            target: to,
            damage: 40.0,
            speed: 10.0,
        }
    }

    fn three_arrows(middle: Projectile) -> World {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        world
            .projectiles
            .push(arrow(DVec2::ZERO, DVec2::new(100.0, 0.0)));
        world.projectiles.push(middle);
        world
            .projectiles
            .push(arrow(DVec2::new(0.0, 200.0), DVec2::new(0.0, 300.0)));
        world
    }

    fn assert_neighbours_stepped_once(world: &World) {
        let positions: Vec<DVec2> = world.projectiles.iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![DVec2::new(10.0, 0.0), DVec2::new(0.0, 210.0)]
        );
    }

    #[test]
    fn expiring_middle_arrow_leaves_neighbours_stepped_once() {
        let mut world = three_arrows(arrow(DVec2::new(0.0, 100.0), DVec2::new(5.0, 100.0)));
        run_projectiles(&mut world);
        assert_neighbours_stepped_once(&world);
    }

    #[test]
    fn hitting_middle_arrow_leaves_neighbours_stepped_once() {
        let mut world = three_arrows(arrow(DVec2::new(0.0, 100.0), DVec2::new(100.0, 100.0)));
        world
            .zombies
            .push(zombie_at(DVec2::new(15.0, 100.0), 100.0, 0.0));
        run_projectiles(&mut world);
        assert_neighbours_stepped_once(&world);
        assert_eq!(world.zombies[0].hp, 60.0);
    }

    #[test]
    fn laser_kills_in_thirteen_hits() {
        let mut world = with_turret(TurretKind::Laser);
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(50.0, 0.0), 100.0, 0.0));

        let mut hits = 0;
        while world.zombies[0].hp > 0.0 {
            let before = world.zombies[0].hp;
            run_turrets(&mut world, TILE);
            if world.zombies[0].hp < before {
                hits += 1;
            }
        }
        assert_eq!(hits, 13);
        assert!(matches!(
            world.structures.turrets[0].effect,
            Some(TurretEffect::Laser { timer: 15, .. })
        ));
    }

    #[test]
    fn ties_go_to_the_first_zombie() {
        let mut world = with_turret(TurretKind::Laser);
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(40.0, 0.0), 100.0, 0.0));
        world
            .zombies
            .push(zombie_at(CENTER - DVec2::new(40.0, 0.0), 100.0, 0.0));
        run_turrets(&mut world, TILE);
        assert_eq!(world.zombies[0].hp, 92.0);
        assert_eq!(world.zombies[1].hp, 100.0);
    }

    #[test]
    fn nearest_zombie_is_targeted() {
        let mut world = with_turret(TurretKind::Laser);
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(80.0, 0.0), 100.0, 0.0));
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(0.0, 30.0), 100.0, 0.0));
        run_turrets(&mut world, TILE);
        assert_eq!(world.zombies[0].hp, 100.0);
        assert_eq!(world.zombies[1].hp, 92.0);
    }

    #[test]
    fn ice_slows_everything_within_range_inclusive() {
        let mut world = with_turret(TurretKind::Ice);
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(199.0, 0.0), 100.0, 1.0));
        world
            .zombies
            .push(zombie_at(CENTER + DVec2::new(0.0, 200.0), 100.0, 1.0));
        world
            .zombies
            .push(zombie_at(CENTER - DVec2::new(201.0, 0.0), 100.0, 1.0));
        // An older, stronger slow is overwritten.
        world.zombies[0].slow = 0.1;
        world.zombies[0].slow_timer = 5;

        run_turrets(&mut world, TILE);

        for zombie in &world.zombies[..2] {
            assert_eq!(zombie.slow, 0.5);
            assert_eq!(zombie.slow_timer, 120);
        }
        assert_eq!(world.zombies[2].slow, 1.0);
        assert_eq!(world.zombies[2].slow_timer, 0);
        assert_eq!(
            world.structures.turrets[0].effect,
            Some(TurretEffect::Frost { timer: 15 })
        );
    }

    #[test]
    fn effects_expire() {
        let mut world = with_turret(TurretKind::Ice);
        world.structures.turrets[0].effect = Some(TurretEffect::Frost { timer: 2 });
        tick_effects(&mut world);
        assert_eq!(
            world.structures.turrets[0].effect,
            Some(TurretEffect::Frost { timer: 1 })
        );
        tick_effects(&mut world);
        assert_eq!(world.structures.turrets[0].effect, None);
    }
}
