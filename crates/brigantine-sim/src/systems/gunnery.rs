//! Gunnery: firing cannons, reloading, and splashing spent shot.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use brigantine_core::constants::*;
use brigantine_core::enums::Broadside;
use brigantine_core::events::AudioEvent;

use super::module_sync::{parent_pose, ship_poses};
use crate::effects::Effect;
use crate::ephemeral::EphemeralSet;
use crate::modules::Module;
use crate::physics::PhysicsWorld;

/// Fire the cannon on `entity` along `direction` (world frame; zero means the
/// cannon's facing). On success a muzzle burst and a report are queued.
pub fn fire_cannon(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    entity: Entity,
    direction: DVec2,
    rng: &mut ChaCha8Rng,
    effects: &mut EphemeralSet<Effect>,
    audio: &mut Vec<AudioEvent>,
) -> bool {
    let poses = ship_poses(world, physics);
    let Ok(mut module) = world.get::<&mut Module>(entity) else {
        return false;
    };
    let id = module.id();
    let parent = parent_pose(&*module, &poses);
    let Some(cannon) = module.as_cannon_mut() else {
        log::debug!("module {id} is not a cannon");
        return false;
    };
    if !cannon.fire(parent, direction, physics) {
        return false;
    }

    let muzzle = cannon.mount.world_pose(parent).position;
    effects.push(Effect::explosion(muzzle, MUZZLE_BURST_SIZE, rng));
    audio.push(AudioEvent::CannonFire {
        module: id,
        position: muzzle,
    });
    true
}

/// Fire every cannon on one side of `ship` along its own facing. Returns how
/// many went off.
pub fn fire_broadside(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    ship: Entity,
    side: Broadside,
    rng: &mut ChaCha8Rng,
    effects: &mut EphemeralSet<Effect>,
    audio: &mut Vec<AudioEvent>,
) -> usize {
    let guns: Vec<Entity> = world
        .query::<&Module>()
        .iter()
        .filter(|(_, module)| {
            module.parent() == Some(ship)
                && module.as_cannon().is_some_and(|c| c.side() == Some(side))
        })
        .map(|(entity, _)| entity)
        .collect();

    guns.into_iter()
        .filter(|&gun| fire_cannon(world, physics, gun, DVec2::ZERO, rng, effects, audio))
        .count()
}

/// Reload every cannon and advance its shot. Shot that runs out of time
/// drops into the sea with a splash.
pub fn run(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    dt: f64,
    rng: &mut ChaCha8Rng,
    effects: &mut EphemeralSet<Effect>,
    audio: &mut Vec<AudioEvent>,
) {
    let mut splashes = Vec::new();
    for (_entity, module) in world.query_mut::<&mut Module>() {
        if let Some(cannon) = module.as_cannon_mut() {
            cannon.update(dt, physics, |shot| splashes.push(shot.position()));
        }
    }

    for position in splashes {
        effects.push(Effect::splash(position, SPLASH_SIZE, rng));
        audio.push(AudioEvent::Splash { position });
    }
}
