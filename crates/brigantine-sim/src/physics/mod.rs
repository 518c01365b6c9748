//! Physics collaborator interface.
//!
//! The simulation never integrates or resolves contacts itself. It asks a
//! `PhysicsWorld` for bodies, pushes poses into them, reads poses back once
//! per tick and removes bodies when their owner's lifecycle ends. Every
//! body is owned by exactly one simulation entity at a time.

pub mod kinematic;

use glam::DVec2;

use brigantine_core::collision::{BodyLabel, CollisionFilter};
use brigantine_core::error::{PhysicsError, PhysicsResult};
use brigantine_core::types::{BodyHandle, Pose};

pub use kinematic::KinematicWorld;

/// Collision shape of a body, in the body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    /// Axis-aligned in the body frame: `width` along local x, `height` along local y.
    Rect { width: f64, height: f64 },
}

impl Shape {
    pub fn area(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => std::f64::consts::PI * radius * radius,
            Shape::Rect { width, height } => width * height,
        }
    }

    /// Reject degenerate shapes before they reach the engine.
    pub fn validate(&self) -> PhysicsResult<()> {
        let ok = match *self {
            Shape::Circle { radius } => radius.is_finite() && radius > 0.0,
            Shape::Rect { width, height } => {
                width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(PhysicsError::InvalidShape(format!("{self:?}")))
        }
    }
}

/// Everything the engine needs to create a body.
///
/// The collision filter always comes from the label; only the group may be
/// overridden. Density, sensor flag and filter are fixed for the body's life.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub label: BodyLabel,
    pub shape: Shape,
    pub density: f64,
    pub is_sensor: bool,
    pub filter: CollisionFilter,
    pub pose: Pose,
    pub velocity: DVec2,
    pub linear_damping: f64,
    pub angular_damping: f64,
}

impl BodyDesc {
    pub fn new(label: BodyLabel, shape: Shape) -> Self {
        Self {
            label,
            shape,
            density: 0.001,
            is_sensor: false,
            filter: label.filter(),
            pose: Pose::ORIGIN,
            velocity: DVec2::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    pub fn sensor(mut self) -> Self {
        self.is_sensor = true;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn at(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn with_group(mut self, group: i32) -> Self {
        self.filter = self.filter.with_group(group);
        self
    }
}

/// The physics engine as seen by the simulation core.
///
/// Object-safe so lifecycle code can take `&mut dyn PhysicsWorld`.
pub trait PhysicsWorld {
    /// Create a body and add it to the world.
    fn create_body(&mut self, desc: BodyDesc) -> PhysicsResult<BodyHandle>;

    /// Remove a body from the world. Returns `false` if it was not present.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    fn contains(&self, handle: BodyHandle) -> bool;

    /// Number of live bodies.
    fn body_count(&self) -> usize;

    fn position(&self, handle: BodyHandle) -> Option<DVec2>;

    fn angle(&self, handle: BodyHandle) -> Option<f64>;

    fn velocity(&self, handle: BodyHandle) -> Option<DVec2>;

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        Some(Pose {
            position: self.position(handle)?,
            angle: self.angle(handle)?,
        })
    }

    /// Teleport a body. Velocity is left untouched.
    fn set_position(&mut self, handle: BodyHandle, position: DVec2) -> PhysicsResult<()>;

    /// Rotate a body in place. Angular velocity is left untouched.
    fn set_angle(&mut self, handle: BodyHandle, angle: f64) -> PhysicsResult<()>;

    fn set_velocity(&mut self, handle: BodyHandle, velocity: DVec2) -> PhysicsResult<()>;

    fn set_angular_velocity(&mut self, handle: BodyHandle, angular_velocity: f64)
        -> PhysicsResult<()>;

    /// Accumulate a world-space force for the next step.
    fn apply_force(&mut self, handle: BodyHandle, force: DVec2) -> PhysicsResult<()>;

    /// Integrate all bodies by `dt` seconds.
    fn step(&mut self, dt: f64);
}

/// Push a pose into a body without touching its velocity or fixed properties.
pub fn push_pose(
    physics: &mut dyn PhysicsWorld,
    handle: BodyHandle,
    pose: Pose,
) -> PhysicsResult<()> {
    physics.set_position(handle, pose.position)?;
    physics.set_angle(handle, pose.angle)
}
