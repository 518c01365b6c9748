//! Entity spawn factories for setting up the voyage.
//!
//! Creates ships with their standard fit of modules, and scatters treasure.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use brigantine_core::constants::*;
use brigantine_core::enums::{Broadside, TreasureKind};
use brigantine_core::error::PhysicsResult;
use brigantine_core::types::Pose;

use crate::lifecycle;
use crate::modules::{Cannon, Module, Mount, Sail, Wheel};
use crate::physics::PhysicsWorld;
use crate::ship::Ship;
use crate::treasure::Treasure;

/// Monotonic id counters for everything the snapshot names.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_ship: u32,
    next_module: u32,
    next_treasure: u32,
}

impl IdAllocator {
    pub fn ship(&mut self) -> u32 {
        let id = self.next_ship;
        self.next_ship += 1;
        id
    }

    pub fn module(&mut self) -> u32 {
        let id = self.next_module;
        self.next_module += 1;
        id
    }

    pub fn treasure(&mut self) -> u32 {
        let id = self.next_treasure;
        self.next_treasure += 1;
        id
    }
}

/// Cannon tuning applied to every gun of a new ship.
#[derive(Debug, Clone, Copy)]
pub struct Armament {
    pub cooldown: f64,
    pub damage: f64,
}

impl Default for Armament {
    fn default() -> Self {
        Self {
            cooldown: CANNON_MAX_COOLDOWN,
            damage: CANNON_DAMAGE,
        }
    }
}

/// Gun ports as (x, side). Local y grows to starboard.
const GUN_PORTS: [(f64, Broadside); 4] = [
    (25.0, Broadside::Port),
    (25.0, Broadside::Starboard),
    (-15.0, Broadside::Port),
    (-15.0, Broadside::Starboard),
];

const GUN_PORT_Y: f64 = 36.0;

/// Spawn a ship at `pose` with two furled sails, a wheel and four cannons,
/// all attached and holding their bodies.
pub fn spawn_ship(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    ids: &mut IdAllocator,
    name: &str,
    pose: Pose,
    armament: Armament,
) -> PhysicsResult<Entity> {
    let hull = physics.create_body(Ship::hull_desc(pose))?;
    let ship = world.spawn((Ship::new(ids.ship(), name, hull),));

    let mut fit: Vec<Module> = vec![
        Sail::new(Mount::new(ids.module(), DVec2::new(50.0, 0.0), 0.0)).into(),
        Sail::new(Mount::new(ids.module(), DVec2::new(-20.0, 0.0), 0.0)).into(),
        Wheel::new(Mount::new(ids.module(), DVec2::new(-80.0, 0.0), 0.0)).into(),
    ];
    for (x, side) in GUN_PORTS {
        let (y, rotation) = match side {
            Broadside::Port => (-GUN_PORT_Y, -FRAC_PI_2),
            Broadside::Starboard => (GUN_PORT_Y, FRAC_PI_2),
        };
        let cannon = Cannon::new(Mount::new(ids.module(), DVec2::new(x, y), rotation))
            .with_tuning(armament.cooldown, armament.damage)
            .on_side(side);
        fit.push(cannon.into());
    }

    for mut module in fit {
        lifecycle::attach(&mut module, ship);
        lifecycle::create_bodies(&mut module, Some(pose), physics);
        world.spawn((module,));
    }

    log::debug!("ship `{name}` launched at {:?}", pose.position);
    Ok(ship)
}

fn pick_kind(rng: &mut ChaCha8Rng) -> TreasureKind {
    match rng.gen_range(0..10) {
        0..=5 => TreasureKind::Coin,
        6..=8 => TreasureKind::Gems,
        _ => TreasureKind::Chest,
    }
}

/// Scatter `count` pieces of treasure uniformly over the ring between the
/// pickup range of the origin and `radius`. Returns how many were placed.
pub fn scatter_treasure(
    world: &mut World,
    physics: &mut dyn PhysicsWorld,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    count: usize,
    radius: f64,
) -> usize {
    let inner = (SHIP_PICKUP_RADIUS * 2.0).min(radius);
    let mut placed = 0;
    for _ in 0..count {
        let kind = pick_kind(rng);
        let bearing = rng.gen_range(0.0..TAU);
        let t: f64 = rng.gen_range(0.0..=1.0);
        let range = (inner * inner + t * (radius * radius - inner * inner)).sqrt();
        let phase = rng.gen_range(0.0..TAU);

        let position = DVec2::from_angle(bearing) * range;
        match Treasure::spawn(ids.treasure(), kind, position, phase, physics) {
            Ok(treasure) => {
                world.spawn((treasure,));
                placed += 1;
            }
            Err(err) => log::warn!("treasure not placed: {err}"),
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::KinematicWorld;
    use brigantine_core::collision::BodyLabel;
    use brigantine_core::enums::LifecycleState;
    use rand::SeedableRng;

    #[test]
    fn ship_gets_its_standard_fit() {
        let mut world = World::new();
        let mut physics = KinematicWorld::new();
        let mut ids = IdAllocator::default();
        let ship = spawn_ship(
            &mut world,
            &mut physics,
            &mut ids,
            "Test",
            Pose::ORIGIN,
            Armament::default(),
        )
        .unwrap();

        let modules: Vec<_> = world
            .query::<&Module>()
            .iter()
            .map(|(_, m)| (m.kind(), m.parent(), m.lifecycle_state()))
            .collect();
        assert_eq!(modules.len(), 7);
        assert!(modules
            .iter()
            .all(|&(_, parent, state)| parent == Some(ship)
                && state == LifecycleState::AttachedWithBody));

        assert_eq!(physics.count_with_label(BodyLabel::Hull), 1);
        assert_eq!(physics.count_with_label(BodyLabel::SailMast), 2);
        assert_eq!(physics.count_with_label(BodyLabel::SailFiber), 0);
        assert_eq!(physics.count_with_label(BodyLabel::Wheel), 1);
        assert_eq!(physics.count_with_label(BodyLabel::Cannon), 4);
    }

    #[test]
    fn treasure_lands_inside_the_ring() {
        let mut world = World::new();
        let mut physics = KinematicWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ids = IdAllocator::default();
        let placed = scatter_treasure(&mut world, &mut physics, &mut rng, &mut ids, 40, 1_000.0);
        assert_eq!(placed, 40);

        for (_, t) in world.query::<&Treasure>().iter() {
            let r = t.anchor().length();
            assert!(r >= SHIP_PICKUP_RADIUS * 2.0 - 1e-9 && r <= 1_000.0 + 1e-9);
            assert!(!t.is_collected());
        }
    }
}
