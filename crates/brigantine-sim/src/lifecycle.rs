//! Module lifecycle: attaching to ships, acquiring and releasing secondary
//! bodies, and keeping those bodies on the module's world pose.
//!
//! State is derived from `(parent, bodies)`; see [`Module::lifecycle_state`].
//! Callers resolve the parent handle through the ship registry and pass the
//! resulting pose in. `Some(entity)` with no pose means the ship is gone.

use hecs::Entity;

use brigantine_core::enums::LifecycleState;
use brigantine_core::error::PhysicsResult;
use brigantine_core::types::{BodyHandle, Pose};

use crate::modules::{Cannon, Module, Sail, Wheel};
use crate::physics::{push_pose, BodyDesc, PhysicsWorld};

/// What happened to a sail's fiber during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiberChange {
    Unchanged,
    /// Sail opened: a fiber now exists.
    Created,
    /// Sail furled: the fiber was released.
    Removed,
    /// Openness changed while open: old fiber released, new one created.
    Rebuilt,
}

/// Result of a per-tick sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No parent; nothing to do.
    Idle,
    /// Parent no longer resolves. Bodies were released and the module is now
    /// detached.
    Orphaned,
    Synced(FiberChange),
}

/// Record `ship` as the parent. Only valid from `Detached`; creates no bodies.
pub fn attach(module: &mut Module, ship: Entity) -> bool {
    if module.lifecycle_state() != LifecycleState::Detached {
        log::debug!("module {} already attached", module.id());
        return false;
    }
    module.mount_mut().parent = Some(ship);
    log::debug!("module {} attached to {ship:?}", module.id());
    true
}

/// Release every secondary body and clear the parent.
pub fn detach(module: &mut Module, physics: &mut dyn PhysicsWorld) {
    let released = remove_bodies(module, physics);
    module.mount_mut().parent = None;
    log::debug!("module {} detached, {released} bodies released", module.id());
}

fn create(physics: &mut dyn PhysicsWorld, desc: BodyDesc, id: u32) -> Option<BodyHandle> {
    match physics.create_body(desc) {
        Ok(handle) => Some(handle),
        Err(err) => {
            log::warn!("module {id}: {} body not created: {err}", desc.label.as_str());
            None
        }
    }
}

/// Create whatever secondary bodies the module is missing at its current
/// world pose. A no-op without a parent pose.
///
/// Returns whether the module now owns bodies.
pub fn create_bodies(
    module: &mut Module,
    parent: Option<Pose>,
    physics: &mut dyn PhysicsWorld,
) -> bool {
    let Some(parent) = parent.filter(|_| module.parent().is_some()) else {
        log::debug!("module {}: no parent pose, bodies not created", module.id());
        return false;
    };
    let world = module.world_pose(Some(parent));
    let id = module.id();
    match module {
        Module::Sail(sail) => {
            if sail.mast.is_none() {
                sail.mast = create(physics, Sail::mast_desc(world), id);
            }
            if sail.is_open() && sail.fiber.is_none() {
                create_fiber(sail, world, physics);
            }
        }
        Module::Wheel(wheel) => {
            if wheel.body.is_none() {
                wheel.body = create(physics, Wheel::body_desc(world), id);
            }
        }
        Module::Cannon(cannon) => {
            if cannon.body.is_none() {
                cannon.body = create(physics, Cannon::body_desc(world), id);
            }
        }
    }
    module.lifecycle_state() == LifecycleState::AttachedWithBody
}

/// Release every secondary body. Returns how many were removed. Projectiles
/// a cannon already fired are not secondary bodies and keep flying.
pub fn remove_bodies(module: &mut Module, physics: &mut dyn PhysicsWorld) -> usize {
    let handles: Vec<BodyHandle> = match module {
        Module::Sail(sail) => {
            sail.fiber_openness = 0.0;
            sail.mast.take().into_iter().chain(sail.fiber.take()).collect()
        }
        Module::Wheel(wheel) => wheel.body.take().into_iter().collect(),
        Module::Cannon(cannon) => cannon.body.take().into_iter().collect(),
    };
    handles
        .into_iter()
        .filter(|&handle| physics.remove_body(handle))
        .count()
}

fn create_fiber(sail: &mut Sail, world: Pose, physics: &mut dyn PhysicsWorld) -> bool {
    let id = sail.mount.id;
    match create(physics, sail.fiber_desc(world), id) {
        Some(handle) => {
            sail.fiber = Some(handle);
            sail.fiber_openness = sail.openness();
            true
        }
        None => false,
    }
}

fn remove_fiber(sail: &mut Sail, physics: &mut dyn PhysicsWorld) {
    if let Some(handle) = sail.fiber.take() {
        physics.remove_body(handle);
    }
    sail.fiber_openness = 0.0;
}

/// Make the fiber match the sail's openness: present iff open, rebuilt when
/// openness changed since it was built. Needs the sail's world pose.
pub fn reconcile_fiber(sail: &mut Sail, world: Pose, physics: &mut dyn PhysicsWorld) -> FiberChange {
    match (sail.is_open(), sail.fiber.is_some()) {
        (false, false) => FiberChange::Unchanged,
        (false, true) => {
            remove_fiber(sail, physics);
            log::debug!("sail {} furled, fiber released", sail.mount.id);
            FiberChange::Removed
        }
        (true, false) => {
            if create_fiber(sail, world, physics) {
                log::debug!("sail {} opened to {:.0}%", sail.mount.id, sail.openness());
                FiberChange::Created
            } else {
                FiberChange::Unchanged
            }
        }
        (true, true) if sail.fiber_openness != sail.openness() => {
            remove_fiber(sail, physics);
            if create_fiber(sail, world, physics) {
                FiberChange::Rebuilt
            } else {
                // The old fiber is gone either way.
                FiberChange::Removed
            }
        }
        (true, true) => FiberChange::Unchanged,
    }
}

fn push_all(module: &Module, world: Pose, physics: &mut dyn PhysicsWorld) -> PhysicsResult<()> {
    match module {
        Module::Sail(sail) => {
            if let Some(mast) = sail.mast {
                push_pose(physics, mast, world)?;
            }
            if let Some(fiber) = sail.fiber {
                push_pose(physics, fiber, sail.fiber_pose(world))?;
            }
        }
        Module::Wheel(wheel) => {
            if let Some(body) = wheel.body {
                push_pose(physics, body, world)?;
            }
        }
        Module::Cannon(cannon) => {
            if let Some(body) = cannon.body {
                push_pose(physics, body, world)?;
            }
        }
    }
    Ok(())
}

/// Per-tick maintenance. `parent` is the resolved pose of the module's ship,
/// `None` if the handle no longer resolves.
pub fn sync(module: &mut Module, parent: Option<Pose>, physics: &mut dyn PhysicsWorld) -> SyncOutcome {
    if module.parent().is_none() {
        return SyncOutcome::Idle;
    }
    let Some(parent) = parent else {
        log::debug!("module {} lost its ship", module.id());
        detach(module, physics);
        return SyncOutcome::Orphaned;
    };

    let world = module.world_pose(Some(parent));
    let change = match module {
        Module::Sail(sail) => reconcile_fiber(sail, world, physics),
        _ => FiberChange::Unchanged,
    };
    if let Err(err) = push_all(module, world, physics) {
        log::warn!("module {}: pose not pushed: {err}", module.id());
    }
    SyncOutcome::Synced(change)
}

/// Set a sail's openness and reconcile its fiber right away, so a crossing
/// of zero creates or destroys the fiber exactly once.
pub fn set_sail_openness(
    module: &mut Module,
    openness: f64,
    parent: Option<Pose>,
    physics: &mut dyn PhysicsWorld,
) -> FiberChange {
    let attached = module.parent().is_some();
    let world = module.world_pose(parent);
    let Some(sail) = module.as_sail_mut() else {
        log::debug!("module is not a sail, openness ignored");
        return FiberChange::Unchanged;
    };
    sail.set_openness(openness);
    match parent {
        Some(_) if attached => reconcile_fiber(sail, world, physics),
        _ => FiberChange::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::Mount;
    use crate::physics::KinematicWorld;
    use brigantine_core::collision::BodyLabel;
    use glam::DVec2;

    fn ship(world: &mut hecs::World) -> Entity {
        world.spawn(("ship",))
    }

    fn sail(id: u32) -> Module {
        Module::Sail(Sail::new(Mount::new(id, DVec2::new(50.0, 0.0), 0.0)))
    }

    #[test]
    fn attach_only_from_detached() {
        let mut registry = hecs::World::new();
        let a = ship(&mut registry);
        let b = ship(&mut registry);
        let mut m = sail(1);
        assert!(attach(&mut m, a));
        assert_eq!(m.lifecycle_state(), LifecycleState::AttachedNoBody);
        assert!(!attach(&mut m, b));
        assert_eq!(m.parent(), Some(a));
    }

    #[test]
    fn bodies_need_a_parent_pose() {
        let mut registry = hecs::World::new();
        let mut physics = KinematicWorld::new();
        let mut m = Module::Wheel(Wheel::new(Mount::new(2, DVec2::ZERO, 0.0)));

        assert!(!create_bodies(&mut m, Some(Pose::ORIGIN), &mut physics));
        assert_eq!(m.lifecycle_state(), LifecycleState::Detached);

        attach(&mut m, ship(&mut registry));
        assert!(!create_bodies(&mut m, None, &mut physics));
        assert_eq!(m.lifecycle_state(), LifecycleState::AttachedNoBody);
        assert_eq!(physics.body_count(), 0);

        assert!(create_bodies(&mut m, Some(Pose::ORIGIN), &mut physics));
        assert_eq!(m.lifecycle_state(), LifecycleState::AttachedWithBody);
        let body = m.bodies()[0];
        assert_eq!(physics.is_sensor(body), Some(true));

        assert_eq!(remove_bodies(&mut m, &mut physics), 1);
        assert_eq!(m.lifecycle_state(), LifecycleState::AttachedNoBody);
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn fiber_exists_iff_open() {
        let mut registry = hecs::World::new();
        let mut physics = KinematicWorld::new();
        let mut m = sail(1);
        attach(&mut m, ship(&mut registry));
        create_bodies(&mut m, Some(Pose::ORIGIN), &mut physics);
        assert_eq!(physics.count_with_label(BodyLabel::SailFiber), 0);

        let steps = [
            (50.0, FiberChange::Created, 1),
            (0.0, FiberChange::Removed, 0),
            (30.0, FiberChange::Created, 1),
            (30.0, FiberChange::Unchanged, 1),
            (60.0, FiberChange::Rebuilt, 1),
        ];
        for (openness, change, fibers) in steps {
            let got = set_sail_openness(&mut m, openness, Some(Pose::ORIGIN), &mut physics);
            assert_eq!(got, change, "openness {openness}");
            assert_eq!(physics.count_with_label(BodyLabel::SailFiber), fibers);
            assert_eq!(m.as_sail().unwrap().has_fiber(), fibers == 1);
        }
        assert_eq!(physics.count_with_label(BodyLabel::SailMast), 1);
    }

    #[test]
    fn sync_pushes_world_pose() {
        let mut registry = hecs::World::new();
        let mut physics = KinematicWorld::new();
        let mut m = sail(1);
        attach(&mut m, ship(&mut registry));
        set_sail_openness(&mut m, 100.0, Some(Pose::ORIGIN), &mut physics);
        create_bodies(&mut m, Some(Pose::ORIGIN), &mut physics);
        m.as_sail_mut().unwrap().set_angle(45.0);

        let parent = Pose::new(100.0, 100.0, std::f64::consts::FRAC_PI_2);
        assert_eq!(
            sync(&mut m, Some(parent), &mut physics),
            SyncOutcome::Synced(FiberChange::Unchanged)
        );
        let sail = m.as_sail().unwrap();
        let mast = physics.pose(sail.mast().unwrap()).unwrap();
        assert!((mast.position - DVec2::new(100.0, 150.0)).length() < 1e-9);
        let fiber = physics.pose(sail.fiber().unwrap()).unwrap();
        let expected = std::f64::consts::FRAC_PI_2 + 45f64.to_radians();
        assert!((fiber.angle - expected).abs() < 1e-9);
    }

    #[test]
    fn lost_parent_releases_and_detaches() {
        let mut registry = hecs::World::new();
        let mut physics = KinematicWorld::new();
        let mut m = Module::Cannon(Cannon::new(Mount::new(4, DVec2::ZERO, 0.0)));
        attach(&mut m, ship(&mut registry));
        create_bodies(&mut m, Some(Pose::ORIGIN), &mut physics);
        assert_eq!(physics.body_count(), 1);

        assert_eq!(sync(&mut m, None, &mut physics), SyncOutcome::Orphaned);
        assert_eq!(m.lifecycle_state(), LifecycleState::Detached);
        assert_eq!(physics.body_count(), 0);
        assert_eq!(sync(&mut m, None, &mut physics), SyncOutcome::Idle);
    }
}
