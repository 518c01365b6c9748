//! Cleanup system: despawns scuttled ships and orphaned modules.

use hecs::{Entity, World};

use super::module_sync::Orphaned;
use crate::modules::Module;
use crate::ship::Ship;

/// Remove ships without a hull, and orphaned modules once their last shot has
/// landed. Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, ship) in world.query_mut::<&Ship>() {
        if ship.hull().is_none() {
            despawn_buffer.push(entity);
        }
    }

    // A detached cannon keeps owning its shot until the shot expires.
    for (entity, (module, _orphaned)) in world.query_mut::<(&Module, &Orphaned)>() {
        let in_flight = module.as_cannon().map_or(0, |c| c.projectiles().len());
        if in_flight == 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
