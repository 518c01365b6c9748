//! Cannon: cooldown-gated firing and the projectiles it owns.

use glam::DVec2;

use brigantine_core::collision::BodyLabel;
use brigantine_core::constants::*;
use brigantine_core::enums::Broadside;
use brigantine_core::types::{BodyHandle, Pose};

use super::Mount;
use crate::ephemeral::EphemeralSet;
use crate::mechanics;
use crate::physics::{BodyDesc, PhysicsWorld, Shape};
use crate::projectile::Projectile;
use crate::render::{self, palette, Surface};

#[derive(Debug, Clone)]
pub struct Cannon {
    pub mount: Mount,
    cooldown_remaining: f64,
    max_cooldown: f64,
    damage: f64,
    side: Option<Broadside>,
    pub(crate) body: Option<BodyHandle>,
    projectiles: EphemeralSet<Projectile>,
}

impl Cannon {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            cooldown_remaining: 0.0,
            max_cooldown: CANNON_MAX_COOLDOWN,
            damage: CANNON_DAMAGE,
            side: None,
            body: None,
            projectiles: EphemeralSet::new(),
        }
    }

    pub fn with_tuning(mut self, max_cooldown: f64, damage: f64) -> Self {
        self.max_cooldown = max_cooldown.max(0.0);
        self.damage = damage.max(0.0);
        self
    }

    pub fn on_side(mut self, side: Broadside) -> Self {
        self.side = Some(side);
        self
    }

    pub fn side(&self) -> Option<Broadside> {
        self.side
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown_remaining
    }

    pub fn max_cooldown(&self) -> f64 {
        self.max_cooldown
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn projectiles(&self) -> &EphemeralSet<Projectile> {
        &self.projectiles
    }

    /// Fire along `direction` (world frame). A zero or non-finite direction
    /// falls back to the cannon's facing.
    ///
    /// Returns `false` without spawning anything while reloading, when the
    /// cannon has no parent pose, or when the physics world refuses the body.
    pub fn fire(
        &mut self,
        parent: Option<Pose>,
        direction: DVec2,
        physics: &mut dyn PhysicsWorld,
    ) -> bool {
        if !self.is_ready() {
            log::debug!(
                "cannon {} still reloading ({:.2}s)",
                self.mount.id,
                self.cooldown_remaining
            );
            return false;
        }
        let Some(parent) = parent else {
            log::debug!("cannon {} has no ship to fire from", self.mount.id);
            return false;
        };
        let world = self.mount.world_pose(Some(parent));
        let direction = direction.try_normalize().unwrap_or_else(|| world.forward());

        match Projectile::launch(
            self.mount.id,
            world.position,
            direction,
            mechanics::projectile_speed(self.damage),
            self.damage,
            physics,
        ) {
            Ok(shot) => {
                self.projectiles.push(shot);
                self.cooldown_remaining = self.max_cooldown;
                true
            }
            Err(err) => {
                log::warn!("cannon {} failed to spawn projectile: {err}", self.mount.id);
                false
            }
        }
    }

    /// Fire along the cannon's own facing.
    pub fn fire_forward(&mut self, parent: Option<Pose>, physics: &mut dyn PhysicsWorld) -> bool {
        self.fire(parent, DVec2::ZERO, physics)
    }

    /// Reload, then advance live projectiles. Every projectile that expires
    /// is passed to `on_expire` after its body was released.
    pub fn update(
        &mut self,
        dt: f64,
        physics: &mut dyn PhysicsWorld,
        on_expire: impl FnMut(&Projectile),
    ) -> usize {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        for shot in self.projectiles.iter_mut() {
            shot.observe(physics);
        }
        self.projectiles.tick_with(dt, physics, on_expire)
    }

    /// Drop every live projectile and free its body.
    pub fn clear_projectiles(&mut self, physics: &mut dyn PhysicsWorld) {
        self.projectiles.clear(physics);
    }

    pub(crate) fn body_desc(world: Pose) -> BodyDesc {
        BodyDesc::new(
            BodyLabel::Cannon,
            Shape::Rect {
                width: CANNON_BODY_LENGTH,
                height: CANNON_BODY_WIDTH,
            },
        )
        .with_density(CANNON_DENSITY)
        .at(world)
    }

    /// Barrel in the mount frame; the muzzle points along local +x.
    pub(crate) fn render(&self, surface: &mut dyn Surface) {
        render::fill_centered_rect(
            surface,
            DVec2::new(CANNON_BODY_LENGTH, CANNON_BODY_WIDTH),
            &palette::CANNON.into(),
        );
        let muzzle = if self.is_ready() {
            palette::CANNON_READY
        } else {
            palette::CANNON
        };
        render::fill_circle(
            surface,
            DVec2::new(CANNON_BODY_LENGTH / 2.0, 0.0),
            CANNON_BODY_WIDTH / 3.0,
            &muzzle.into(),
        );
    }

    /// Live projectiles, drawn in world space.
    pub fn render_projectiles(&self, surface: &mut dyn Surface) {
        self.projectiles.render(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::KinematicWorld;

    fn cannon() -> Cannon {
        Cannon::new(Mount::new(3, DVec2::new(10.0, 0.0), std::f64::consts::FRAC_PI_2))
    }

    #[test]
    fn second_shot_within_cooldown_fails() {
        let mut physics = KinematicWorld::new();
        let mut c = cannon();
        assert!(c.fire(Some(Pose::ORIGIN), DVec2::X, &mut physics));
        assert_eq!(c.projectiles().len(), 1);
        assert_eq!(c.cooldown_remaining(), CANNON_MAX_COOLDOWN);

        assert!(!c.fire(Some(Pose::ORIGIN), DVec2::X, &mut physics));
        assert_eq!(c.projectiles().len(), 1);
        assert_eq!(physics.count_with_label(BodyLabel::Projectile), 1);
    }

    #[test]
    fn no_parent_no_shot() {
        let mut physics = KinematicWorld::new();
        let mut c = cannon();
        assert!(!c.fire(None, DVec2::X, &mut physics));
        assert!(c.projectiles().is_empty());
        assert!(c.is_ready());
    }

    #[test]
    fn zero_direction_uses_facing() {
        let mut physics = KinematicWorld::new();
        let mut c = cannon();
        assert!(c.fire_forward(Some(Pose::ORIGIN), &mut physics));
        let shot = c.projectiles().iter().next().unwrap();
        let v = shot.velocity();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - mechanics::projectile_speed(CANNON_DAMAGE)).abs() < 1e-9);
        assert!((shot.position() - DVec2::new(10.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn cooldown_clamps_at_zero() {
        let mut physics = KinematicWorld::new();
        let mut c = cannon();
        c.fire(Some(Pose::ORIGIN), DVec2::X, &mut physics);
        c.update(100.0, &mut physics, |_| {});
        assert_eq!(c.cooldown_remaining(), 0.0);
        assert!(c.is_ready());
    }

    #[test]
    fn expired_shots_are_reported_and_released() {
        let mut physics = KinematicWorld::new();
        let mut c = cannon();
        c.fire(Some(Pose::ORIGIN), DVec2::X, &mut physics);
        let mut expired = Vec::new();
        for _ in 0..4 {
            physics.step(0.5);
            c.update(0.5, &mut physics, |p| expired.push(p.position()));
        }
        assert_eq!(expired.len(), 1);
        assert!(c.projectiles().is_empty());
        assert_eq!(physics.body_count(), 0);
        // The splash point is where the body ended up, not the muzzle.
        assert!(expired[0].x > 10.0);
    }
}
