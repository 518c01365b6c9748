//! Cannonballs. A projectile is owned by the cannon that fired it and holds
//! one physics body until it drops into the sea.

use glam::DVec2;

use brigantine_core::collision::BodyLabel;
use brigantine_core::constants::*;
use brigantine_core::error::PhysicsResult;
use brigantine_core::types::{BodyHandle, Pose};

use crate::ephemeral::Ephemeral;
use crate::physics::{BodyDesc, PhysicsWorld, Shape};
use crate::render::{self, palette, Surface};

#[derive(Debug, Clone)]
pub struct Projectile {
    cannon_id: u32,
    position: DVec2,
    velocity: DVec2,
    age: f64,
    max_lifetime: f64,
    damage: f64,
    body: Option<BodyHandle>,
}

impl Projectile {
    /// Spawn a projectile at `origin` flying along `direction` (normalized by
    /// the caller) at `speed`, and create its body.
    pub fn launch(
        cannon_id: u32,
        origin: DVec2,
        direction: DVec2,
        speed: f64,
        damage: f64,
        physics: &mut dyn PhysicsWorld,
    ) -> PhysicsResult<Self> {
        let velocity = direction * speed;
        let desc = BodyDesc::new(
            BodyLabel::Projectile,
            Shape::Circle {
                radius: PROJECTILE_RADIUS,
            },
        )
        .with_density(PROJECTILE_DENSITY)
        .at(Pose {
            position: origin,
            angle: direction.y.atan2(direction.x),
        })
        .with_velocity(velocity);
        let body = physics.create_body(desc)?;

        Ok(Self {
            cannon_id,
            position: origin,
            velocity,
            age: 0.0,
            max_lifetime: PROJECTILE_MAX_LIFETIME,
            damage,
            body: Some(body),
        })
    }

    pub fn with_max_lifetime(mut self, max_lifetime: f64) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }

    pub fn cannon_id(&self) -> u32 {
        self.cannon_id
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn should_destroy(&self) -> bool {
        self.age >= self.max_lifetime
    }

    /// Read the authoritative position back from the physics body.
    pub fn observe(&mut self, physics: &dyn PhysicsWorld) {
        if let Some(position) = self.body.and_then(|b| physics.position(b)) {
            self.position = position;
        }
    }
}

impl Ephemeral for Projectile {
    fn tick(&mut self, dt: f64) {
        self.age = (self.age + dt).min(self.max_lifetime);
        // Without a body nobody else moves us.
        if self.body.is_none() {
            self.position += self.velocity * dt;
        }
    }

    fn is_finished(&self) -> bool {
        self.should_destroy()
    }

    fn render(&self, surface: &mut dyn Surface) {
        render::fill_circle(surface, self.position, PROJECTILE_RADIUS, &palette::SHOT.into());
    }

    fn release(&mut self, physics: &mut dyn PhysicsWorld) {
        if let Some(body) = self.body.take() {
            physics.remove_body(body);
        }
    }
}
