//! Player intents written into the simulation by input and UI collaborators.
//!
//! Commands are queued and applied at the start of the next tick, before
//! any movement.

use serde::{Deserialize, Serialize};

use crate::enums::StructureKind;
use crate::types::GridCell;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the per-tick movement vector (already speed-scaled).
    /// Stays in effect until the next `SetMoveIntent`.
    SetMoveIntent { dx: f64, dy: f64 },
    /// Build a structure on a grid cell.
    PlaceStructure { kind: StructureKind, cell: GridCell },
    /// Buy an upgrade choice for the turret on `cell`.
    UpgradeTurret { cell: GridCell, choice: usize },
}
