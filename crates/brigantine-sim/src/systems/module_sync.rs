//! Module sync: keeps every module's secondary bodies on its world pose and
//! marks modules whose ship is gone.

use std::collections::HashMap;

use hecs::{Entity, World};

use brigantine_core::events::AudioEvent;
use brigantine_core::types::Pose;

use crate::lifecycle::{self, FiberChange, SyncOutcome};
use crate::modules::Module;
use crate::physics::PhysicsWorld;
use crate::ship::Ship;

/// Marks a module whose parent ship no longer resolves.
#[derive(Debug, Clone, Copy)]
pub struct Orphaned;

/// Current pose of every ship that still has a hull.
pub fn ship_poses(world: &World, physics: &dyn PhysicsWorld) -> HashMap<Entity, Pose> {
    world
        .query::<&Ship>()
        .iter()
        .filter_map(|(entity, ship)| ship.pose(physics).map(|pose| (entity, pose)))
        .collect()
}

/// Resolve a module's parent to a pose. `None` covers both "no parent" and
/// "parent gone".
pub fn parent_pose(module: &Module, poses: &HashMap<Entity, Pose>) -> Option<Pose> {
    module.parent().and_then(|ship| poses.get(&ship).copied())
}

/// Sound for a fiber transition, if it has one.
pub fn fiber_audio(change: FiberChange, module: u32) -> Option<AudioEvent> {
    match change {
        FiberChange::Created => Some(AudioEvent::SailUnfurled { module }),
        FiberChange::Removed => Some(AudioEvent::SailFurled { module }),
        FiberChange::Rebuilt | FiberChange::Unchanged => None,
    }
}

/// Sync every module. Returns how many lost their ship this tick.
pub fn run(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    audio: &mut Vec<AudioEvent>,
) -> usize {
    let poses = ship_poses(world, physics);
    let mut orphaned = Vec::new();

    for (entity, module) in world.query_mut::<&mut Module>() {
        let parent = parent_pose(module, &poses);
        match lifecycle::sync(module, parent, physics) {
            SyncOutcome::Orphaned => orphaned.push(entity),
            SyncOutcome::Synced(change) => audio.extend(fiber_audio(change, module.id())),
            SyncOutcome::Idle => {}
        }
    }

    for &entity in &orphaned {
        let _ = world.insert_one(entity, Orphaned);
    }
    orphaned.len()
}
