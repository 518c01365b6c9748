//! Sail: a solid mast plus a fiber sensor that exists only while the sail
//! is at least partly open.

use brigantine_core::collision::BodyLabel;
use brigantine_core::constants::*;
use brigantine_core::types::{BodyHandle, Pose};
use glam::DVec2;

use super::Mount;
use crate::mechanics;
use crate::physics::{BodyDesc, Shape};
use crate::render::{self, palette, Surface};

#[derive(Debug, Clone)]
pub struct Sail {
    pub mount: Mount,
    openness: f64,
    angle: f64,
    pub(crate) mast: Option<BodyHandle>,
    pub(crate) fiber: Option<BodyHandle>,
    /// Openness the current fiber body was built for.
    pub(crate) fiber_openness: f64,
}

impl Sail {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            openness: 0.0,
            angle: 0.0,
            mast: None,
            fiber: None,
            fiber_openness: 0.0,
        }
    }

    /// Openness in percent, `0.0..=100.0`.
    pub fn openness(&self) -> f64 {
        self.openness
    }

    /// Yard angle in degrees, `-75.0..=75.0`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_open(&self) -> bool {
        self.openness > 0.0
    }

    pub fn has_fiber(&self) -> bool {
        self.fiber.is_some()
    }

    pub fn mast(&self) -> Option<BodyHandle> {
        self.mast
    }

    pub fn fiber(&self) -> Option<BodyHandle> {
        self.fiber
    }

    /// Set openness, clamped. Non-finite input is ignored. Bodies are
    /// reconciled by the lifecycle manager.
    pub fn set_openness(&mut self, openness: f64) -> f64 {
        if openness.is_finite() {
            self.openness = openness.clamp(0.0, SAIL_MAX_OPENNESS);
        }
        self.openness
    }

    pub fn adjust_openness(&mut self, delta: f64) -> f64 {
        self.set_openness(self.openness + delta)
    }

    pub fn set_angle(&mut self, degrees: f64) -> f64 {
        if degrees.is_finite() {
            self.angle = degrees.clamp(-SAIL_MAX_ANGLE, SAIL_MAX_ANGLE);
        }
        self.angle
    }

    pub fn rotate(&mut self, delta: f64) -> f64 {
        self.set_angle(self.angle + delta)
    }

    /// Current drive fraction for the given wind and ship heading (radians).
    pub fn efficiency(&self, wind_direction: f64, ship_heading: f64) -> f64 {
        mechanics::sail_efficiency(self.openness, self.angle, wind_direction, ship_heading)
    }

    /// Pose of the fiber: the mount pose turned by the yard angle.
    pub fn fiber_pose(&self, world: Pose) -> Pose {
        Pose {
            position: world.position,
            angle: world.angle + self.angle.to_radians(),
        }
    }

    pub(crate) fn mast_desc(world: Pose) -> BodyDesc {
        BodyDesc::new(
            BodyLabel::SailMast,
            Shape::Circle {
                radius: SAIL_MAST_RADIUS,
            },
        )
        .with_density(SAIL_MAST_DENSITY)
        .at(world)
    }

    pub(crate) fn fiber_desc(&self, world: Pose) -> BodyDesc {
        BodyDesc::new(
            BodyLabel::SailFiber,
            Shape::Rect {
                width: SAIL_FIBER_THICKNESS,
                height: mechanics::fiber_height(self.openness),
            },
        )
        .sensor()
        .at(self.fiber_pose(world))
    }

    /// Draw in the mount's local frame.
    pub(crate) fn render(&self, surface: &mut dyn Surface) {
        if self.is_open() {
            let half = mechanics::fiber_height(self.openness) / 2.0;
            let belly = SAIL_FIBER_THICKNESS + 14.0 * self.openness / SAIL_MAX_OPENNESS;
            surface.save();
            surface.rotate(self.angle.to_radians());
            surface.begin_path();
            surface.move_to(DVec2::new(0.0, -half));
            surface.quadratic_curve_to(DVec2::new(belly, 0.0), DVec2::new(0.0, half));
            surface.close_path();
            surface.fill(&palette::SAIL.into());
            surface.begin_path();
            surface.move_to(DVec2::new(0.0, -half));
            surface.line_to(DVec2::new(0.0, half));
            surface.stroke(&palette::MAST.into(), 3.0);
            surface.restore();
        }
        render::fill_circle(surface, DVec2::ZERO, SAIL_MAST_RADIUS, &palette::MAST.into());
    }
}
