//! Game state snapshot: the read-only view handed to presentation each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::TurretEffect;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{GridCell, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub player: PlayerView,
    pub structures: Vec<StructureView>,
    pub zombies: Vec<ZombieView>,
    pub projectiles: Vec<ProjectileView>,
    pub resource_nodes: Vec<ResourceNodeView>,
    pub wave: WaveView,
    pub score: ScoreView,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub radius: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub money: f64,
    pub resources: u32,
}

/// A live wall, generator or turret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureView {
    pub kind: StructureKind,
    pub cell: GridCell,
    /// Top-left corner in world space.
    pub position: DVec2,
    pub hp: f64,
    /// Turret upgrade level; 0 for walls and generators.
    pub level: u8,
    pub variant: Option<String>,
    /// Turret range, for range rings.
    pub range: Option<f64>,
    pub effect: Option<TurretEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZombieView {
    pub position: DVec2,
    pub radius: f64,
    pub hp: f64,
    pub slowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNodeView {
    pub position: DVec2,
    pub radius: f64,
    pub kind: ResourceKind,
}

/// Wave controller status for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub phase: WavePhase,
    pub wave_number: u32,
    /// Idle ticks until the next wave (0 while active).
    pub countdown_ticks: u32,
    /// Ticks since the current wave started (0 while idle).
    pub elapsed_ticks: u32,
    /// Whole seconds left in the current phase, rounded up.
    pub seconds_remaining: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub zombies_killed: u32,
    pub player_deaths: u32,
    pub structures_lost: u32,
}
