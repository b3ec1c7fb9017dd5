//! Static game configuration: world size, wave tuning, cost and upgrade tables.
//!
//! Everything here is read once at session start. The defaults reproduce the
//! stock game; a JSON file may override any subset of fields.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::components::TurretWeapon;
use crate::enums::{StructureKind, TurretKind};
use crate::error::ConfigError;

/// Complete session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub waves: WaveConfig,
    pub costs: CostTable,
    pub upgrades: UpgradeTable,
}

/// World geometry and initial resource scatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side of one build-grid cell in pixels.
    pub tile_size: f64,
    pub map_tiles_w: u32,
    pub map_tiles_h: u32,
    pub resource_node_count: usize,
    pub resource_node_radius: f64,
    /// Fraction of resource nodes spawned as trees (the rest are rocks).
    pub tree_fraction: f64,
}

/// Player avatar tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f64,
    /// Movement speed the input collaborator scales its intent by.
    pub speed: f64,
    pub max_hp: f64,
    pub starting_money: f64,
    pub starting_resources: u32,
}

/// Wave timing and escalation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Ticks at session start during which no system runs.
    pub startup_grace_ticks: u64,
    /// Idle ticks between waves.
    pub wave_interval_ticks: u32,
    /// Ticks a wave stays active, regardless of survivors.
    pub max_wave_ticks: u32,
    pub enemies_per_wave: u32,
    /// Additional zombies for every wave after the first.
    pub extra_enemies_per_wave: u32,
    /// Difficulty added per wave number: `1 + wave * step`.
    pub difficulty_step: f64,
    pub zombie_radius: f64,
    pub zombie_base_speed: f64,
    /// Upper bound of the uniform speed jitter, scaled by difficulty.
    pub zombie_speed_jitter: f64,
    pub zombie_base_hp: f64,
}

/// Price of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cost {
    Money(f64),
    Resources(u32),
}

/// Wall price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSpec {
    pub money: f64,
}

/// Generator price and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSpec {
    pub resources: u32,
    /// Money produced per second.
    pub production: f64,
}

/// Turret price and base stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretSpec {
    pub money: f64,
    pub range: f64,
    /// Cooldown in ticks after each shot.
    pub fire_rate: u32,
    pub weapon: TurretWeapon,
}

/// Per-structure cost table and base stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    pub wall: WallSpec,
    pub generator: GeneratorSpec,
    pub arrow_turret: TurretSpec,
    pub laser_turret: TurretSpec,
    pub ice_turret: TurretSpec,
}

/// One purchasable upgrade. Stats left as `None` keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeChoice {
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub range: Option<f64>,
    #[serde(default)]
    pub fire_rate: Option<u32>,
    #[serde(default)]
    pub damage: Option<f64>,
    #[serde(default)]
    pub slow: Option<f64>,
    #[serde(default)]
    pub duration: Option<u32>,
}

/// A set of mutually exclusive upgrade choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeTier {
    pub choices: Vec<UpgradeChoice>,
}

/// Ordered upgrade tiers for each turret kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTable {
    pub arrow: Vec<UpgradeTier>,
    pub laser: Vec<UpgradeTier>,
    pub ice: Vec<UpgradeTier>,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !(world.tile_size.is_finite() && world.tile_size > 0.0) {
            return Err(invalid(format!(
                "world.tile_size must be positive, got {}",
                world.tile_size
            )));
        }
        let radius = self.player.radius;
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(invalid(format!(
                "player.radius must be non-negative, got {radius}"
            )));
        }
        if world.width() < 2.0 * radius || world.height() < 2.0 * radius {
            return Err(invalid(format!(
                "world {}x{} is too small for a player of radius {radius}",
                world.width(),
                world.height()
            )));
        }
        if !(0.0..=1.0).contains(&world.tree_fraction) {
            return Err(invalid(format!(
                "world.tree_fraction must be within [0, 1], got {}",
                world.tree_fraction
            )));
        }
        let jitter = self.waves.zombie_speed_jitter;
        if !(jitter.is_finite() && jitter >= 0.0) {
            return Err(invalid(format!(
                "waves.zombie_speed_jitter must be non-negative, got {jitter}"
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

impl WorldConfig {
    pub fn width(&self) -> f64 {
        self.map_tiles_w as f64 * self.tile_size
    }

    pub fn height(&self) -> f64 {
        self.map_tiles_h as f64 * self.tile_size
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width() / 2.0, self.height() / 2.0)
    }
}

impl WaveConfig {
    /// Number of zombies spawned for `wave` (1-based).
    pub fn enemy_count(&self, wave: u32) -> u32 {
        self.enemies_per_wave + wave.saturating_sub(1) * self.extra_enemies_per_wave
    }

    /// Stat multiplier for `wave`.
    pub fn difficulty(&self, wave: u32) -> f64 {
        1.0 + wave as f64 * self.difficulty_step
    }
}

impl CostTable {
    pub fn cost_of(&self, kind: StructureKind) -> Cost {
        match kind {
            StructureKind::Wall => Cost::Money(self.wall.money),
            StructureKind::Generator => Cost::Resources(self.generator.resources),
            StructureKind::Turret(turret) => Cost::Money(self.turret(turret).money),
        }
    }

    pub fn turret(&self, kind: TurretKind) -> &TurretSpec {
        match kind {
            TurretKind::Arrow => &self.arrow_turret,
            TurretKind::Laser => &self.laser_turret,
            TurretKind::Ice => &self.ice_turret,
        }
    }
}

impl UpgradeTable {
    pub fn tiers(&self, kind: TurretKind) -> &[UpgradeTier] {
        match kind {
            TurretKind::Arrow => &self.arrow,
            TurretKind::Laser => &self.laser,
            TurretKind::Ice => &self.ice,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 50.0,
            map_tiles_w: 60,
            map_tiles_h: 60,
            resource_node_count: 90,
            resource_node_radius: 18.0,
            tree_fraction: 0.6,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: 16.0,
            speed: 3.5,
            max_hp: 100.0,
            starting_money: 10_000.0,
            starting_resources: 0,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            startup_grace_ticks: 60,
            wave_interval_ticks: 15 * 60,
            max_wave_ticks: 60 * 60,
            enemies_per_wave: 10,
            extra_enemies_per_wave: 5,
            difficulty_step: 0.25,
            zombie_radius: 14.0,
            zombie_base_speed: 0.8,
            zombie_speed_jitter: 0.5,
            zombie_base_hp: 100.0,
        }
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            wall: WallSpec { money: 10.0 },
            generator: GeneratorSpec {
                resources: 5,
                production: 0.5,
            },
            arrow_turret: TurretSpec {
                money: 35.0,
                range: 240.0,
                fire_rate: 60,
                weapon: TurretWeapon::Arrow { damage: 40.0 },
            },
            laser_turret: TurretSpec {
                money: 45.0,
                range: 100.0,
                fire_rate: 5,
                weapon: TurretWeapon::Laser { damage: 8.0 },
            },
            ice_turret: TurretSpec {
                money: 100.0,
                range: 200.0,
                fire_rate: 60,
                weapon: TurretWeapon::Ice {
                    slow: 0.5,
                    duration: 120,
                },
            },
        }
    }
}

impl Default for UpgradeTable {
    fn default() -> Self {
        let choice = |name: &str, cost: f64| UpgradeChoice {
            name: name.to_string(),
            cost,
            range: None,
            fire_rate: None,
            damage: None,
            slow: None,
            duration: None,
        };

        Self {
            arrow: vec![UpgradeTier {
                choices: vec![
                    UpgradeChoice {
                        damage: Some(20.0),
                        fire_rate: Some(10),
                        range: Some(180.0),
                        ..choice("Machine gun", 150.0)
                    },
                    UpgradeChoice {
                        damage: Some(80.0),
                        fire_rate: Some(70),
                        range: Some(300.0),
                        ..choice("Cannon", 200.0)
                    },
                ],
            }],
            laser: vec![UpgradeTier {
                choices: vec![
                    UpgradeChoice {
                        damage: Some(10.0),
                        fire_rate: Some(5),
                        range: Some(250.0),
                        ..choice("Long laser", 250.0)
                    },
                    UpgradeChoice {
                        damage: Some(45.0),
                        fire_rate: Some(5),
                        range: Some(100.0),
                        ..choice("Magma ray", 300.0)
                    },
                ],
            }],
            ice: vec![UpgradeTier {
                choices: vec![
                    UpgradeChoice {
                        slow: Some(0.0),
                        range: Some(220.0),
                        fire_rate: Some(400),
                        duration: Some(120),
                        ..choice("Freeze turret", 340.0)
                    },
                    // Keeps the base fire rate.
                    UpgradeChoice {
                        slow: Some(0.3),
                        range: Some(220.0),
                        duration: Some(120),
                        ..choice("Slow turret", 250.0)
                    },
                ],
            }],
        }
    }
}
