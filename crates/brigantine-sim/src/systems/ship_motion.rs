//! Ship motion: folds each ship's sails and wheel into a propulsion force and
//! a turn rate, then hands them to the physics world.

use std::collections::HashMap;

use hecs::{Entity, World};

use brigantine_core::constants::*;

use super::module_sync::ship_poses;
use super::wind::Wind;
use crate::modules::Module;
use crate::physics::PhysicsWorld;
use crate::ship::Ship;

#[derive(Debug, Clone, Copy, Default)]
struct Propulsion {
    sail_power: f64,
    steering: f64,
    /// Whether `steering` came from a manned wheel.
    manned: bool,
}

/// Apply drive and steering to every ship. Runs before each physics step.
pub fn run(world: &mut World, physics: &mut dyn PhysicsWorld, wind: &Wind) {
    let poses = ship_poses(world, physics);
    let mut summary: HashMap<Entity, Propulsion> = HashMap::new();

    for (_entity, module) in world.query::<&Module>().iter() {
        let Some(ship) = module.parent() else {
            continue;
        };
        let Some(pose) = poses.get(&ship) else {
            continue;
        };
        let entry = summary.entry(ship).or_default();
        match module {
            Module::Sail(sail) => {
                entry.sail_power += sail.efficiency(wind.direction, pose.angle);
            }
            // A manned wheel wins; otherwise the rudder stays where it was left.
            Module::Wheel(wheel) if wheel.is_controlled() || !entry.manned => {
                entry.steering = wheel.steering();
                entry.manned = wheel.is_controlled();
            }
            _ => {}
        }
    }

    for (entity, ship) in world.query_mut::<&mut Ship>() {
        let Some(hull) = ship.hull() else {
            continue;
        };
        let Some(pose) = poses.get(&entity) else {
            continue;
        };
        let drive = summary.get(&entity).copied().unwrap_or_default();
        ship.sail_power = drive.sail_power;

        let force = pose.forward() * (SAIL_THRUST * drive.sail_power * wind.speed);
        if let Err(err) = physics.apply_force(hull, force) {
            log::warn!("ship {}: drive not applied: {err}", ship.id);
            continue;
        }
        let speed = physics.velocity(hull).unwrap_or_default().length();
        let steerage = (speed / STEERAGE_SPEED).min(1.0);
        if let Err(err) = physics.set_angular_velocity(hull, TURN_RATE * drive.steering * steerage) {
            log::warn!("ship {}: steering not applied: {err}", ship.id);
        }
    }
}
