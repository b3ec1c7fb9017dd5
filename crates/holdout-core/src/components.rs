//! Entity records owned by the simulation world.
//!
//! Components are plain data structs with no behaviour.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridCell;

/// The player's avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: DVec2,
    pub radius: f64,
    pub speed: f64,
    /// Per-tick displacement written by the input collaborator, already speed-scaled.
    pub move_intent: DVec2,
    pub resources: u32,
    pub money: f64,
    pub hp: f64,
    pub max_hp: f64,
}

/// A gatherable tree or rock. Never deleted, only marked taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNode {
    pub position: DVec2,
    pub radius: f64,
    pub kind: ResourceKind,
    pub taken: bool,
}

/// Pure obstacle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub cell: GridCell,
    pub hp: f64,
}

/// Produces money over time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generator {
    pub cell: GridCell,
    pub hp: f64,
    /// Money per second.
    pub production: f64,
}

/// Kind-specific turret payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurretWeapon {
    Arrow { damage: f64 },
    Laser { damage: f64 },
    /// `slow` is the speed multiplier applied, `duration` its length in ticks.
    Ice { slow: f64, duration: u32 },
}

/// Short-lived visual marker. Read by presentation, ignored by combat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurretEffect {
    Laser { target: DVec2, timer: u32 },
    Frost { timer: u32 },
}

/// Automatic defensive structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub cell: GridCell,
    pub hp: f64,
    pub range: f64,
    /// Cooldown reset value after each shot, in ticks.
    pub fire_rate: u32,
    /// Ticks until the turret may fire again.
    pub cooldown: u32,
    pub weapon: TurretWeapon,
    /// Number of upgrades bought.
    pub level: u8,
    /// Name of the last upgrade choice, for presentation.
    pub variant: Option<String>,
    pub effect: Option<TurretEffect>,
}

/// Enemy that walks toward the player and chews through structures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub position: DVec2,
    pub radius: f64,
    pub speed: f64,
    pub hp: f64,
    pub attack_cooldown: u32,
    /// Speed multiplier while `slow_timer > 0`. Neutral value is 1.
    pub slow: f64,
    pub slow_timer: u32,
}

/// Fire-and-forget arrow flying toward a fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec2,
    pub target: DVec2,
    pub damage: f64,
    pub speed: f64,
}

impl TurretWeapon {
    pub fn kind(&self) -> TurretKind {
        match self {
            TurretWeapon::Arrow { .. } => TurretKind::Arrow,
            TurretWeapon::Laser { .. } => TurretKind::Laser,
            TurretWeapon::Ice { .. } => TurretKind::Ice,
        }
    }
}
