//! Simulation constants and tuning parameters.
//!
//! Values that callers may want to tune per session live in
//! [`crate::config::GameConfig`] instead.

/// Simulation tick rate (Hz). One tick per rendered frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Structures ---

/// Hit points every structure is placed with.
pub const STRUCTURE_HP: f64 = 100.0;

/// Maximum number of live generators.
pub const MAX_GENERATORS: usize = 4;

// --- Zombies ---

/// Damage a zombie deals to a structure it is pressed against.
pub const ZOMBIE_STRUCTURE_DAMAGE: f64 = 15.0;

/// Damage a zombie deals to the player on contact.
pub const ZOMBIE_PLAYER_DAMAGE: f64 = 10.0;

/// Ticks between zombie attacks (structure or player).
pub const ZOMBIE_ATTACK_COOLDOWN: u32 = 45;

// --- Turrets ---

/// Arrow projectile travel speed (pixels per tick).
pub const PROJECTILE_SPEED: f64 = 10.0;

/// Ticks a laser beam stays visible after firing.
pub const LASER_EFFECT_TICKS: u32 = 15;

/// Ticks the frost pulse stays visible after an ice turret fires.
pub const FROST_EFFECT_TICKS: u32 = 15;
