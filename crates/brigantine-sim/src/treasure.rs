//! Floating treasure: a sensor body that bobs until a ship picks it up.

use glam::DVec2;

use brigantine_core::collision::BodyLabel;
use brigantine_core::constants::*;
use brigantine_core::enums::TreasureKind;
use brigantine_core::error::PhysicsResult;
use brigantine_core::types::{BodyHandle, Pose};

use crate::physics::{BodyDesc, PhysicsWorld, Shape};
use crate::render::{self, palette, Surface};

#[derive(Debug, Clone)]
pub struct Treasure {
    pub id: u32,
    kind: TreasureKind,
    anchor: DVec2,
    bob_phase: f64,
    collected: bool,
    body: Option<BodyHandle>,
}

impl Treasure {
    pub fn spawn(
        id: u32,
        kind: TreasureKind,
        position: DVec2,
        phase: f64,
        physics: &mut dyn PhysicsWorld,
    ) -> PhysicsResult<Self> {
        let desc = BodyDesc::new(
            BodyLabel::Treasure(kind),
            Shape::Circle {
                radius: kind.radius(),
            },
        )
        .sensor()
        .at(Pose {
            position,
            angle: 0.0,
        });
        let body = physics.create_body(desc)?;
        Ok(Self {
            id,
            kind,
            anchor: position,
            bob_phase: phase,
            collected: false,
            body: Some(body),
        })
    }

    pub fn kind(&self) -> TreasureKind {
        self.kind
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn bob_phase(&self) -> f64 {
        self.bob_phase
    }

    /// Drawn position including the bob offset.
    pub fn position(&self) -> DVec2 {
        self.anchor + DVec2::new(0.0, self.bob_phase.sin() * TREASURE_BOB_AMPLITUDE)
    }

    /// Where a ship has to be to pick it up.
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// Advance the bob. Collected treasure is frozen.
    pub fn update(&mut self, dt: f64) {
        if self.collected {
            return;
        }
        self.bob_phase = (self.bob_phase + dt * TREASURE_BOB_RATE) % std::f64::consts::TAU;
    }

    /// Whether a ship hull centred at `point` reaches this treasure.
    pub fn in_reach(&self, point: DVec2) -> bool {
        !self.collected
            && point.distance_squared(self.anchor)
                <= (SHIP_PICKUP_RADIUS + self.kind.radius()).powi(2)
    }

    /// Mark collected and release the sensor. Returns the value on the first
    /// call only.
    pub fn collect(&mut self, physics: &mut dyn PhysicsWorld) -> Option<u32> {
        if self.collected {
            return None;
        }
        self.collected = true;
        if let Some(body) = self.body.take() {
            physics.remove_body(body);
        }
        Some(self.kind.value())
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.collected {
            return;
        }
        let pos = self.position();
        let r = self.kind.radius();
        match self.kind {
            TreasureKind::Coin => {
                render::fill_circle(surface, pos, r, &palette::GOLD.into());
            }
            TreasureKind::Gems => {
                surface.begin_path();
                surface.move_to(pos + DVec2::new(0.0, -r));
                surface.line_to(pos + DVec2::new(r, 0.0));
                surface.line_to(pos + DVec2::new(0.0, r));
                surface.line_to(pos + DVec2::new(-r, 0.0));
                surface.close_path();
                surface.fill(&palette::GEM.into());
            }
            TreasureKind::Chest => {
                surface.save();
                surface.translate(pos);
                render::fill_centered_rect(surface, DVec2::new(r * 2.0, r * 1.4), &palette::CHEST.into());
                surface.begin_path();
                surface.move_to(DVec2::new(-r, 0.0));
                surface.line_to(DVec2::new(r, 0.0));
                surface.stroke(&palette::GOLD.into(), 2.0);
                surface.restore();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::KinematicWorld;
    use crate::render::DrawList;

    #[test]
    fn collect_once_and_release_body() {
        let mut physics = KinematicWorld::new();
        let mut t = Treasure::spawn(1, TreasureKind::Gems, DVec2::new(10.0, 0.0), 0.0, &mut physics)
            .unwrap();
        assert_eq!(physics.is_sensor(t.body().unwrap()), Some(true));

        assert_eq!(t.collect(&mut physics), Some(50));
        assert_eq!(t.collect(&mut physics), None);
        assert!(t.body().is_none());
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn collected_treasure_is_frozen_and_invisible() {
        let mut physics = KinematicWorld::new();
        let mut t =
            Treasure::spawn(1, TreasureKind::Coin, DVec2::ZERO, 0.0, &mut physics).unwrap();
        t.update(0.25);
        assert!(t.bob_phase() > 0.0);

        t.collect(&mut physics);
        let phase = t.bob_phase();
        t.update(1.0);
        assert_eq!(t.bob_phase(), phase);

        let mut list = DrawList::new(DVec2::new(100.0, 100.0));
        t.render(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn reach_includes_treasure_radius() {
        let mut physics = KinematicWorld::new();
        let t = Treasure::spawn(1, TreasureKind::Chest, DVec2::ZERO, 0.0, &mut physics).unwrap();
        let edge = SHIP_PICKUP_RADIUS + TreasureKind::Chest.radius();
        assert!(t.in_reach(DVec2::new(edge, 0.0)));
        assert!(!t.in_reach(DVec2::new(edge + 0.1, 0.0)));
    }
}
