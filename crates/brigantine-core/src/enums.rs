//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Module variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Sail,
    Wheel,
    Cannon,
}

/// Lifecycle state of a module relative to its ship and physics bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// No parent ship.
    #[default]
    Detached,
    /// Attached to a ship, no secondary bodies.
    AttachedNoBody,
    /// Attached and owning at least one secondary body.
    AttachedWithBody,
}

/// Floating treasure variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreasureKind {
    Coin,
    Gems,
    Chest,
}

impl TreasureKind {
    /// Pickup and sensor radius.
    pub fn radius(&self) -> f64 {
        match self {
            TreasureKind::Coin => 8.0,
            TreasureKind::Gems => 10.0,
            TreasureKind::Chest => 16.0,
        }
    }

    /// Score awarded on collection.
    pub fn value(&self) -> u32 {
        match self {
            TreasureKind::Coin => 10,
            TreasureKind::Gems => 50,
            TreasureKind::Chest => 200,
        }
    }
}

/// Visual effect variant (without per-instance data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectType {
    /// Expanding ring at a point of impact.
    Impact,
    /// Radial particle burst.
    Explosion,
    /// Water droplets thrown up and falling back.
    Splash,
    /// Full-frame colour flash (screen space).
    Flash,
}

/// Which side of the ship a cannon points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Broadside {
    Port,
    Starboard,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the voyage starts; nothing simulates.
    #[default]
    Docked,
    Sailing,
    Paused,
}
