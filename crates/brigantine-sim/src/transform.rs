//! Transform composition: local module offset/rotation to world space.

use glam::DVec2;

use brigantine_core::types::Pose;

/// World pose of a child placed at `offset`/`rotation` in `parent`'s frame.
///
/// Evaluated fresh every tick; the parent is dynamic.
pub fn compose(parent: Pose, offset: DVec2, rotation: f64) -> Pose {
    Pose {
        position: parent.position + DVec2::from_angle(parent.angle).rotate(offset),
        angle: parent.angle + rotation,
    }
}

/// Like [`compose`], but a missing parent yields [`Pose::ORIGIN`] so callers
/// always have a defined position.
pub fn compose_or_origin(parent: Option<Pose>, offset: DVec2, rotation: f64) -> Pose {
    parent.map_or(Pose::ORIGIN, |p| compose(p, offset, rotation))
}
