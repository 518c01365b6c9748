//! Kinematic reference implementation of [`PhysicsWorld`].
//!
//! Bodies live as entities in a private hecs world. Each step integrates
//! accumulated force into velocity and velocity into pose, with exponential
//! damping. Contacts are never resolved; the filters are stored so a frontend
//! or test can inspect them.

use glam::DVec2;
use hecs::{Entity, World};

use brigantine_core::collision::{BodyLabel, CollisionFilter};
use brigantine_core::error::{PhysicsError, PhysicsResult};
use brigantine_core::types::{BodyHandle, Pose};

use super::{BodyDesc, PhysicsWorld, Shape};

/// Fixed properties of a body, set at creation.
#[derive(Debug, Clone, Copy)]
struct Body {
    label: BodyLabel,
    shape: Shape,
    mass: f64,
    is_sensor: bool,
    filter: CollisionFilter,
    linear_damping: f64,
    angular_damping: f64,
}

/// Mutable motion state of a body.
#[derive(Debug, Clone, Copy, Default)]
struct Motion {
    velocity: DVec2,
    angular_velocity: f64,
    force: DVec2,
}

/// A headless body store with simple Euler integration.
#[derive(Default)]
pub struct KinematicWorld {
    world: World,
}

impl KinematicWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bodies carrying `label`.
    pub fn count_with_label(&self, label: BodyLabel) -> usize {
        self.world
            .query::<&Body>()
            .iter()
            .filter(|(_, body)| body.label == label)
            .count()
    }

    pub fn label(&self, handle: BodyHandle) -> Option<BodyLabel> {
        self.body(handle).map(|b| b.label)
    }

    pub fn shape(&self, handle: BodyHandle) -> Option<Shape> {
        self.body(handle).map(|b| b.shape)
    }

    pub fn filter(&self, handle: BodyHandle) -> Option<CollisionFilter> {
        self.body(handle).map(|b| b.filter)
    }

    pub fn is_sensor(&self, handle: BodyHandle) -> Option<bool> {
        self.body(handle).map(|b| b.is_sensor)
    }

    pub fn mass(&self, handle: BodyHandle) -> Option<f64> {
        self.body(handle).map(|b| b.mass)
    }

    fn body(&self, handle: BodyHandle) -> Option<Body> {
        let entity = entity_of(handle)?;
        self.world.get::<&Body>(entity).ok().map(|b| *b)
    }

    fn with_pose<R>(
        &mut self,
        handle: BodyHandle,
        f: impl FnOnce(&mut Pose) -> R,
    ) -> PhysicsResult<R> {
        let entity = entity_of(handle).ok_or(PhysicsError::UnknownBody(handle))?;
        let mut pose = self
            .world
            .get::<&mut Pose>(entity)
            .map_err(|_| PhysicsError::UnknownBody(handle))?;
        Ok(f(&mut pose))
    }

    fn with_motion<R>(
        &mut self,
        handle: BodyHandle,
        f: impl FnOnce(&mut Motion) -> R,
    ) -> PhysicsResult<R> {
        let entity = entity_of(handle).ok_or(PhysicsError::UnknownBody(handle))?;
        let mut motion = self
            .world
            .get::<&mut Motion>(entity)
            .map_err(|_| PhysicsError::UnknownBody(handle))?;
        Ok(f(&mut motion))
    }
}

fn handle_of(entity: Entity) -> BodyHandle {
    BodyHandle(entity.to_bits().get())
}

fn entity_of(handle: BodyHandle) -> Option<Entity> {
    Entity::from_bits(handle.0)
}

impl PhysicsWorld for KinematicWorld {
    fn create_body(&mut self, desc: BodyDesc) -> PhysicsResult<BodyHandle> {
        desc.shape.validate()?;
        if !desc.density.is_finite() || desc.density < 0.0 {
            return Err(PhysicsError::InvalidShape(format!(
                "density {} for {}",
                desc.density,
                desc.label.as_str()
            )));
        }

        let body = Body {
            label: desc.label,
            shape: desc.shape,
            mass: desc.shape.area() * desc.density,
            is_sensor: desc.is_sensor,
            filter: desc.filter,
            linear_damping: desc.linear_damping.max(0.0),
            angular_damping: desc.angular_damping.max(0.0),
        };
        let motion = Motion {
            velocity: desc.velocity,
            ..Default::default()
        };
        let entity = self.world.spawn((body, desc.pose, motion));
        Ok(handle_of(entity))
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        match entity_of(handle) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        entity_of(handle).is_some_and(|e| self.world.contains(e))
    }

    fn body_count(&self) -> usize {
        self.world.len() as usize
    }

    fn position(&self, handle: BodyHandle) -> Option<DVec2> {
        let entity = entity_of(handle)?;
        self.world.get::<&Pose>(entity).ok().map(|p| p.position)
    }

    fn angle(&self, handle: BodyHandle) -> Option<f64> {
        let entity = entity_of(handle)?;
        self.world.get::<&Pose>(entity).ok().map(|p| p.angle)
    }

    fn velocity(&self, handle: BodyHandle) -> Option<DVec2> {
        let entity = entity_of(handle)?;
        self.world.get::<&Motion>(entity).ok().map(|m| m.velocity)
    }

    fn set_position(&mut self, handle: BodyHandle, position: DVec2) -> PhysicsResult<()> {
        self.with_pose(handle, |pose| pose.position = position)
    }

    fn set_angle(&mut self, handle: BodyHandle, angle: f64) -> PhysicsResult<()> {
        self.with_pose(handle, |pose| pose.angle = angle)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: DVec2) -> PhysicsResult<()> {
        self.with_motion(handle, |m| m.velocity = velocity)
    }

    fn set_angular_velocity(
        &mut self,
        handle: BodyHandle,
        angular_velocity: f64,
    ) -> PhysicsResult<()> {
        self.with_motion(handle, |m| m.angular_velocity = angular_velocity)
    }

    fn apply_force(&mut self, handle: BodyHandle, force: DVec2) -> PhysicsResult<()> {
        self.with_motion(handle, |m| m.force += force)
    }

    fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        for (_entity, (body, pose, motion)) in
            self.world.query_mut::<(&Body, &mut Pose, &mut Motion)>()
        {
            if body.mass > 0.0 {
                motion.velocity += motion.force / body.mass * dt;
            }
            motion.force = DVec2::ZERO;
            motion.velocity *= (-body.linear_damping * dt).exp();
            motion.angular_velocity *= (-body.angular_damping * dt).exp();

            pose.position += motion.velocity * dt;
            pose.angle += motion.angular_velocity * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball() -> BodyDesc {
        BodyDesc::new(BodyLabel::Projectile, Shape::Circle { radius: 2.0 })
    }

    #[test]
    fn create_and_remove() {
        let mut physics = KinematicWorld::new();
        let handle = physics.create_body(ball()).unwrap();
        assert!(physics.contains(handle));
        assert_eq!(physics.body_count(), 1);

        assert!(physics.remove_body(handle));
        assert!(!physics.contains(handle));
        assert!(!physics.remove_body(handle), "double remove is refused");
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn stale_handle_does_not_resolve_after_reuse() {
        let mut physics = KinematicWorld::new();
        let first = physics.create_body(ball()).unwrap();
        physics.remove_body(first);
        let second = physics.create_body(ball()).unwrap();
        assert_ne!(first, second);
        assert!(!physics.contains(first));
        assert!(physics.position(first).is_none());
        assert!(matches!(
            physics.set_position(first, DVec2::ONE),
            Err(PhysicsError::UnknownBody(_))
        ));
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        let mut physics = KinematicWorld::new();
        let bad = BodyDesc::new(BodyLabel::SailFiber, Shape::Rect { width: 6.0, height: 0.0 });
        assert!(matches!(
            physics.create_body(bad),
            Err(PhysicsError::InvalidShape(_))
        ));
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn filter_comes_from_label() {
        let mut physics = KinematicWorld::new();
        let handle = physics
            .create_body(BodyDesc::new(BodyLabel::SailFiber, Shape::Rect { width: 6.0, height: 40.0 }).sensor())
            .unwrap();
        assert_eq!(physics.filter(handle), Some(BodyLabel::SailFiber.filter()));
        assert_eq!(physics.is_sensor(handle), Some(true));
        assert_eq!(physics.count_with_label(BodyLabel::SailFiber), 1);
    }

    #[test]
    fn step_integrates_velocity() {
        let mut physics = KinematicWorld::new();
        let handle = physics
            .create_body(ball().with_velocity(DVec2::new(10.0, -4.0)))
            .unwrap();
        physics.step(0.5);
        let pos = physics.position(handle).unwrap();
        assert!((pos.x - 5.0).abs() < 1e-9);
        assert!((pos.y + 2.0).abs() < 1e-9);
    }

    #[test]
    fn force_accelerates_and_is_cleared() {
        let mut physics = KinematicWorld::new();
        let handle = physics
            .create_body(BodyDesc::new(BodyLabel::Hull, Shape::Rect { width: 10.0, height: 10.0 }).with_density(0.01))
            .unwrap();
        // mass = 100 * 0.01 = 1
        physics.apply_force(handle, DVec2::new(2.0, 0.0)).unwrap();
        physics.step(1.0);
        assert!((physics.velocity(handle).unwrap().x - 2.0).abs() < 1e-9);

        physics.step(1.0);
        assert!(
            (physics.velocity(handle).unwrap().x - 2.0).abs() < 1e-9,
            "force must not carry over to the next step"
        );
    }

    #[test]
    fn set_pose_keeps_velocity() {
        let mut physics = KinematicWorld::new();
        let handle = physics
            .create_body(ball().with_velocity(DVec2::new(3.0, 0.0)))
            .unwrap();
        physics.set_position(handle, DVec2::new(100.0, 100.0)).unwrap();
        physics.set_angle(handle, 1.0).unwrap();
        assert_eq!(physics.velocity(handle), Some(DVec2::new(3.0, 0.0)));
        assert_eq!(physics.angle(handle), Some(1.0));
    }

    #[test]
    fn damping_slows_bodies() {
        let mut physics = KinematicWorld::new();
        let handle = physics
            .create_body(
                ball()
                    .with_velocity(DVec2::new(10.0, 0.0))
                    .with_damping(1.0, 0.0),
            )
            .unwrap();
        physics.step(1.0);
        let v = physics.velocity(handle).unwrap().x;
        assert!(v < 10.0 && v > 0.0, "damped speed {v}");
    }
}
