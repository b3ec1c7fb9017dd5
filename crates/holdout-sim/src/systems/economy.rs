//! Economy & build system: placement, upgrades, production, gathering.
//!
//! Every request is an instantaneous decision: it either applies in full or
//! is rejected with a reason and leaves the world untouched.

use tracing::debug;

use holdout_core::components::*;
use holdout_core::config::{Cost, CostTable, TurretSpec, UpgradeChoice, UpgradeTable};
use holdout_core::constants::{MAX_GENERATORS, STRUCTURE_HP};
use holdout_core::enums::StructureKind;
use holdout_core::error::RejectReason;
use holdout_core::events::SimEvent;
use holdout_core::types::GridCell;

use crate::world::World;

/// Build `kind` on `cell`, paying from the player's funds.
pub fn request_placement(
    world: &mut World,
    costs: &CostTable,
    kind: StructureKind,
    cell: GridCell,
) -> Result<(), RejectReason> {
    if world.structures.is_occupied(cell) {
        return Err(RejectReason::CellOccupied);
    }
    if kind == StructureKind::Generator && world.structures.generators.len() >= MAX_GENERATORS {
        return Err(RejectReason::CapReached);
    }

    let player = &mut world.player;
    match costs.cost_of(kind) {
        Cost::Money(price) => {
            if player.money < price {
                return Err(RejectReason::InsufficientFunds);
            }
            player.money -= price;
        }
        Cost::Resources(price) => {
            if player.resources < price {
                return Err(RejectReason::InsufficientFunds);
            }
            player.resources -= price;
        }
    }

    match kind {
        StructureKind::Wall => world.structures.walls.push(Wall {
            cell,
            hp: STRUCTURE_HP,
        }),
        StructureKind::Generator => world.structures.generators.push(Generator {
            cell,
            hp: STRUCTURE_HP,
            production: costs.generator.production,
        }),
        StructureKind::Turret(turret) => world
            .structures
            .turrets
            .push(build_turret(cell, costs.turret(turret))),
    }
    Ok(())
}

/// Buy upgrade `choice` of the turret's next tier. Returns the new level.
pub fn request_upgrade(
    world: &mut World,
    upgrades: &UpgradeTable,
    cell: GridCell,
    choice: usize,
) -> Result<u8, RejectReason> {
    let turret = world
        .structures
        .turret_at_mut(cell)
        .ok_or(RejectReason::NoTurret)?;

    let tiers = upgrades.tiers(turret.weapon.kind());
    let tier = tiers
        .get(turret.level as usize)
        .ok_or(RejectReason::MaxLevel)?;
    let choice = tier
        .choices
        .get(choice)
        .ok_or(RejectReason::UnknownChoice)?;

    if world.player.money < choice.cost {
        return Err(RejectReason::InsufficientFunds);
    }
    world.player.money -= choice.cost;

    apply_choice(turret, choice);
    turret.level += 1;
    Ok(turret.level)
}

/// Credit each generator's per-second production, spread over a second of ticks.
pub fn tick_production(world: &mut World, tick_rate: u32) {
    let per_tick: f64 = world
        .structures
        .generators
        .iter()
        .map(|g| g.production / tick_rate as f64)
        .sum();
    world.player.money += per_tick;
}

/// Pick up every untaken node the player is standing on.
///
/// Uses the same per-axis test as structure collisions: both offsets must be
/// under the summed radii.
pub fn gather_resources(world: &mut World, events: &mut Vec<SimEvent>) {
    let player = &mut world.player;
    for node in world.resource_nodes.iter_mut().filter(|n| !n.taken) {
        let reach = player.radius + node.radius;
        let offset = player.position - node.position;
        if offset.x.abs() < reach && offset.y.abs() < reach {
            node.taken = true;
            player.resources += 1;
            debug!(kind = ?node.kind, total = player.resources, "Resource gathered");
            events.push(SimEvent::ResourceGathered { kind: node.kind });
        }
    }
}

fn build_turret(cell: GridCell, spec: &TurretSpec) -> Turret {
    Turret {
        cell,
        hp: STRUCTURE_HP,
        range: spec.range,
        fire_rate: spec.fire_rate,
        cooldown: 0,
        weapon: spec.weapon,
        level: 0,
        variant: None,
        effect: None,
    }
}

/// Overwrite the stats the choice specifies; the rest stay as they are.
fn apply_choice(turret: &mut Turret, choice: &UpgradeChoice) {
    if let Some(range) = choice.range {
        turret.range = range;
    }
    if let Some(fire_rate) = choice.fire_rate {
        turret.fire_rate = fire_rate;
    }
    match &mut turret.weapon {
        TurretWeapon::Arrow { damage } | TurretWeapon::Laser { damage } => {
            if let Some(new_damage) = choice.damage {
                *damage = new_damage;
            }
        }
        TurretWeapon::Ice { slow, duration } => {
            if let Some(new_slow) = choice.slow {
                *slow = new_slow;
            }
            if let Some(new_duration) = choice.duration {
                *duration = new_duration;
            }
        }
    }
    turret.variant = Some(choice.name.clone());
}
