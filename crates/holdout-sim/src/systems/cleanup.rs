//! Cleanup system: prunes zombies killed this tick.

use holdout_core::events::SimEvent;

use crate::world::World;

/// Remove every zombie at or below zero hp, preserving the order of the rest.
///
/// Returns how many were removed and reports them as one event.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) -> u32 {
    let before = world.zombies.len();
    world.zombies.retain(|z| z.hp > 0.0);
    let count = (before - world.zombies.len()) as u32;
    if count > 0 {
        events.push(SimEvent::ZombiesKilled { count });
    }
    count
}
