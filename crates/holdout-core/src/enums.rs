//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of a gatherable resource node. Cosmetic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[default]
    Tree,
    Rock,
}

/// Turret weapon family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurretKind {
    /// Fires fire-and-forget projectiles at a point.
    #[default]
    Arrow,
    /// Hit-scan beam, damage applied instantly.
    Laser,
    /// Area slow around the turret.
    Ice,
}

/// Anything the player can place on the build grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Wall,
    Generator,
    Turret(TurretKind),
}

/// Wave controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Counting down to the next wave.
    #[default]
    Idle,
    /// A wave is in progress.
    Active,
}

impl TurretKind {
    pub const ALL: [TurretKind; 3] = [TurretKind::Arrow, TurretKind::Laser, TurretKind::Ice];
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureKind::Wall => write!(f, "wall"),
            StructureKind::Generator => write!(f, "generator"),
            StructureKind::Turret(TurretKind::Arrow) => write!(f, "arrow turret"),
            StructureKind::Turret(TurretKind::Laser) => write!(f, "laser turret"),
            StructureKind::Turret(TurretKind::Ice) => write!(f, "ice turret"),
        }
    }
}
