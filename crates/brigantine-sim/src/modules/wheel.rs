//! Steering wheel.

use glam::DVec2;

use brigantine_core::collision::BodyLabel;
use brigantine_core::constants::*;
use brigantine_core::types::{BodyHandle, Pose};

use super::Mount;
use crate::mechanics;
use crate::physics::{BodyDesc, Shape};
use crate::render::{self, palette, Surface};

#[derive(Debug, Clone)]
pub struct Wheel {
    pub mount: Mount,
    angle: f64,
    is_controlled: bool,
    pub(crate) body: Option<BodyHandle>,
}

/// Size of one turn step: the magnitude of the request, bounded.
fn step(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.abs().min(WHEEL_MAX_STEP)
    } else {
        0.0
    }
}

impl Wheel {
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            angle: 0.0,
            is_controlled: false,
            body: None,
        }
    }

    /// Deflection in degrees, `-30.0..=30.0`. Negative is to port.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_controlled(&self) -> bool {
        self.is_controlled
    }

    pub fn set_controlled(&mut self, controlled: bool) {
        self.is_controlled = controlled;
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn turn_left(&mut self, amount: f64) -> f64 {
        self.angle = (self.angle - step(amount)).clamp(-WHEEL_MAX_ANGLE, WHEEL_MAX_ANGLE);
        self.angle
    }

    pub fn turn_right(&mut self, amount: f64) -> f64 {
        self.angle = (self.angle + step(amount)).clamp(-WHEEL_MAX_ANGLE, WHEEL_MAX_ANGLE);
        self.angle
    }

    /// Ease back toward centre without overshooting.
    pub fn center(&mut self) -> f64 {
        if self.angle.abs() <= WHEEL_CENTER_STEP {
            self.angle = 0.0;
        } else {
            self.angle -= WHEEL_CENTER_STEP * self.angle.signum();
        }
        self.angle
    }

    pub fn effectiveness(&self) -> f64 {
        mechanics::wheel_effectiveness(self.angle)
    }

    /// Effectiveness signed by turn direction.
    pub fn steering(&self) -> f64 {
        mechanics::wheel_steering(self.angle)
    }

    pub(crate) fn body_desc(world: Pose) -> BodyDesc {
        BodyDesc::new(
            BodyLabel::Wheel,
            Shape::Rect {
                width: WHEEL_BODY_SIZE,
                height: WHEEL_BODY_SIZE,
            },
        )
        .sensor()
        .at(world)
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface) {
        let color = if self.is_controlled {
            palette::WHEEL_ACTIVE
        } else {
            palette::WHEEL
        };
        let radius = WHEEL_BODY_SIZE / 2.0;
        surface.begin_path();
        surface.arc(DVec2::ZERO, radius, 0.0, std::f64::consts::TAU);
        surface.stroke(&color.into(), 3.0);

        // Spokes turn four times as far as the rudder.
        surface.save();
        surface.rotate((self.angle * 4.0).to_radians());
        surface.begin_path();
        for k in 0..4 {
            let dir = DVec2::from_angle(k as f64 * std::f64::consts::FRAC_PI_4);
            surface.move_to(-dir * radius);
            surface.line_to(dir * radius);
        }
        surface.stroke(&color.into(), 1.5);
        surface.restore();
        render::fill_circle(surface, DVec2::ZERO, 2.5, &color.into());
    }
}
