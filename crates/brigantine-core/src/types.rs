//! Fundamental geometric and simulation types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position and orientation in world space (meters, radians).
///
/// Angles follow the drawing-surface convention: 0 points along +x and
/// positive angles rotate from +x toward +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec2,
    pub angle: f64,
}

/// Opaque handle to a body owned by the physics collaborator.
///
/// Handles are generational: once a body is removed its handle never
/// resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Pose {
    /// Fallback pose used when a module has no parent to derive from.
    pub const ORIGIN: Pose = Pose {
        position: DVec2::ZERO,
        angle: 0.0,
    };

    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            angle,
        }
    }

    /// Unit vector pointing along this pose's heading.
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{:#x}", self.0)
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Sanitize a frame delta: negative or non-finite values become 0.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
