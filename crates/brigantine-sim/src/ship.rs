//! Ship registry entry: the hull body and its name.

use glam::DVec2;

use brigantine_core::collision::BodyLabel;
use brigantine_core::constants::*;
use brigantine_core::types::{BodyHandle, Pose};

use crate::physics::{BodyDesc, PhysicsWorld, Shape};
use crate::render::{palette, Surface};

#[derive(Debug, Clone)]
pub struct Ship {
    pub id: u32,
    pub name: String,
    pub(crate) hull: Option<BodyHandle>,
    /// Summed sail efficiency from the last propulsion pass.
    pub sail_power: f64,
}

impl Ship {
    pub fn new(id: u32, name: impl Into<String>, hull: BodyHandle) -> Self {
        Self {
            id,
            name: name.into(),
            hull: Some(hull),
            sail_power: 0.0,
        }
    }

    pub fn hull(&self) -> Option<BodyHandle> {
        self.hull
    }

    /// Current pose, read from the hull body.
    pub fn pose(&self, physics: &dyn PhysicsWorld) -> Option<Pose> {
        self.hull.and_then(|hull| physics.pose(hull))
    }

    pub fn velocity(&self, physics: &dyn PhysicsWorld) -> DVec2 {
        self.hull
            .and_then(|hull| physics.velocity(hull))
            .unwrap_or(DVec2::ZERO)
    }

    /// Release the hull body. Modules still pointing at this ship observe a
    /// missing parent on their next sync.
    pub fn release(&mut self, physics: &mut dyn PhysicsWorld) {
        if let Some(hull) = self.hull.take() {
            physics.remove_body(hull);
        }
    }

    pub fn hull_desc(pose: Pose) -> BodyDesc {
        BodyDesc::new(
            BodyLabel::Hull,
            Shape::Rect {
                width: HULL_LENGTH,
                height: HULL_BEAM,
            },
        )
        .with_density(HULL_DENSITY)
        .with_damping(HULL_LINEAR_DAMPING, HULL_ANGULAR_DAMPING)
        .at(pose)
    }

    /// Hull outline with a pointed bow along local +x.
    pub fn render(&self, pose: Pose, surface: &mut dyn Surface) {
        let half_len = HULL_LENGTH / 2.0;
        let half_beam = HULL_BEAM / 2.0;
        surface.save();
        surface.translate(pose.position);
        surface.rotate(pose.angle);

        surface.begin_path();
        surface.move_to(DVec2::new(-half_len, -half_beam));
        surface.line_to(DVec2::new(half_len * 0.5, -half_beam));
        surface.quadratic_curve_to(DVec2::new(half_len, -half_beam), DVec2::new(half_len, 0.0));
        surface.quadratic_curve_to(DVec2::new(half_len, half_beam), DVec2::new(half_len * 0.5, half_beam));
        surface.line_to(DVec2::new(-half_len, half_beam));
        surface.close_path();
        surface.fill(&palette::HULL.into());

        surface.begin_path();
        surface.rect(
            DVec2::new(-half_len + 8.0, -half_beam + 8.0),
            DVec2::new(HULL_LENGTH * 0.7, HULL_BEAM - 16.0),
        );
        surface.fill(&palette::DECK.into());
        surface.restore();
    }
}
