//! Events emitted by the simulation for UI and audio feedback.
//!
//! Events are collected during a tick and handed out with that tick's
//! snapshot; they carry no state the next tick depends on.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::RejectReason;
use crate::types::GridCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A wave began and its zombies were spawned.
    WaveStarted { wave: u32, enemy_count: u32 },
    /// A wave timed out. Survivors stay on the map.
    WaveEnded { wave: u32, survivors: u32 },
    StructurePlaced { kind: StructureKind, cell: GridCell },
    PlacementRejected {
        kind: StructureKind,
        cell: GridCell,
        reason: RejectReason,
    },
    TurretUpgraded {
        cell: GridCell,
        level: u8,
        variant: String,
    },
    UpgradeRejected {
        cell: GridCell,
        choice: usize,
        reason: RejectReason,
    },
    /// Zombies reduced a structure to zero hp.
    StructureDestroyed { kind: StructureKind, cell: GridCell },
    ResourceGathered { kind: ResourceKind },
    /// Zombies pruned at the end of the tick.
    ZombiesKilled { count: u32 },
    /// Player hp hit zero; money and resources were lost.
    PlayerDied,
}
