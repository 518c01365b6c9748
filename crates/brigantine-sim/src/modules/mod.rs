//! Ship modules: sails, the wheel and cannons.
//!
//! `Module` is a closed set of variants. Every variant embeds a [`Mount`]
//! carrying what all modules share: an id, the local offset and rotation on
//! the ship, and a non-owning handle to the parent ship.

pub mod cannon;
pub mod sail;
pub mod wheel;

use glam::DVec2;
use hecs::Entity;

use brigantine_core::enums::{LifecycleState, ModuleKind};
use brigantine_core::types::{BodyHandle, Pose};

use crate::render::Surface;
use crate::transform;

pub use cannon::Cannon;
pub use sail::Sail;
pub use wheel::Wheel;

/// Placement of a module on its ship.
#[derive(Debug, Clone)]
pub struct Mount {
    pub id: u32,
    /// Offset from the ship centre in the ship's frame.
    pub offset: DVec2,
    /// Rotation relative to the ship heading (radians).
    pub rotation: f64,
    /// Parent ship in the registry. May outlive the ship; always resolve
    /// through the registry before use.
    pub(crate) parent: Option<Entity>,
}

impl Mount {
    pub fn new(id: u32, offset: DVec2, rotation: f64) -> Self {
        Self {
            id,
            offset,
            rotation,
            parent: None,
        }
    }

    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    /// World pose given the parent ship's pose, or the origin if there is none.
    pub fn world_pose(&self, parent: Option<Pose>) -> Pose {
        transform::compose_or_origin(parent, self.offset, self.rotation)
    }
}

#[derive(Debug, Clone)]
pub enum Module {
    Sail(Sail),
    Wheel(Wheel),
    Cannon(Cannon),
}

impl Module {
    pub fn mount(&self) -> &Mount {
        match self {
            Module::Sail(s) => &s.mount,
            Module::Wheel(w) => &w.mount,
            Module::Cannon(c) => &c.mount,
        }
    }

    pub fn mount_mut(&mut self) -> &mut Mount {
        match self {
            Module::Sail(s) => &mut s.mount,
            Module::Wheel(w) => &mut w.mount,
            Module::Cannon(c) => &mut c.mount,
        }
    }

    pub fn id(&self) -> u32 {
        self.mount().id
    }

    pub fn parent(&self) -> Option<Entity> {
        self.mount().parent
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Module::Sail(_) => ModuleKind::Sail,
            Module::Wheel(_) => ModuleKind::Wheel,
            Module::Cannon(_) => ModuleKind::Cannon,
        }
    }

    /// Secondary bodies currently owned by this module.
    pub fn bodies(&self) -> Vec<BodyHandle> {
        match self {
            Module::Sail(s) => s.mast.into_iter().chain(s.fiber).collect(),
            Module::Wheel(w) => w.body.into_iter().collect(),
            Module::Cannon(c) => c.body.into_iter().collect(),
        }
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        if self.parent().is_none() {
            LifecycleState::Detached
        } else if self.bodies().is_empty() {
            LifecycleState::AttachedNoBody
        } else {
            LifecycleState::AttachedWithBody
        }
    }

    pub fn world_pose(&self, parent: Option<Pose>) -> Pose {
        self.mount().world_pose(parent)
    }

    pub fn as_sail(&self) -> Option<&Sail> {
        match self {
            Module::Sail(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sail_mut(&mut self) -> Option<&mut Sail> {
        match self {
            Module::Sail(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_wheel(&self) -> Option<&Wheel> {
        match self {
            Module::Wheel(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_wheel_mut(&mut self) -> Option<&mut Wheel> {
        match self {
            Module::Wheel(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_cannon(&self) -> Option<&Cannon> {
        match self {
            Module::Cannon(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_cannon_mut(&mut self) -> Option<&mut Cannon> {
        match self {
            Module::Cannon(c) => Some(c),
            _ => None,
        }
    }

    /// Draw the module on its ship. Nothing is drawn without a parent pose.
    pub fn render(&self, parent: Option<Pose>, surface: &mut dyn Surface) {
        let Some(parent) = parent else {
            return;
        };
        let pose = self.world_pose(Some(parent));
        surface.save();
        surface.translate(pose.position);
        surface.rotate(pose.angle);
        match self {
            Module::Sail(s) => s.render(surface),
            Module::Wheel(w) => w.render(surface),
            Module::Cannon(c) => c.render(surface),
        }
        surface.restore();
    }
}

impl From<Sail> for Module {
    fn from(sail: Sail) -> Self {
        Module::Sail(sail)
    }
}

impl From<Wheel> for Module {
    fn from(wheel: Wheel) -> Self {
        Module::Wheel(wheel)
    }
}

impl From<Cannon> for Module {
    fn from(cannon: Cannon) -> Self {
        Module::Cannon(cannon)
    }
}
