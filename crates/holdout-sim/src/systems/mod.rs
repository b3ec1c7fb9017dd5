//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; everything they touch lives in the world or is
//! passed in by the engine.

pub mod cleanup;
pub mod combat;
pub mod economy;
pub mod movement;
pub mod snapshot;
pub mod wave_spawner;
