//! Game state snapshot: the complete visible state sent to the frontend
//! after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Pose, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wind: WindView,
    pub ships: Vec<ShipView>,
    pub modules: Vec<ModuleView>,
    pub projectiles: Vec<ProjectileView>,
    pub treasures: Vec<TreasureView>,
    pub effects: Vec<EffectView>,
    pub audio_events: Vec<AudioEvent>,
    pub score: ScoreView,
}

/// Current wind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WindView {
    /// Direction the wind blows toward (radians).
    pub direction: f64,
    pub speed: f64,
}

/// A ship hull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub ship_id: u32,
    pub name: String,
    pub pose: Pose,
    pub velocity: DVec2,
    /// Summed efficiency of all sails this tick.
    pub sail_power: f64,
}

/// A module with its derived world pose and mechanical state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleView {
    pub module_id: u32,
    /// Owning ship, if the parent handle still resolves.
    pub ship_id: Option<u32>,
    pub kind: ModuleKind,
    pub pose: Pose,
    pub state: LifecycleState,
    pub body_count: usize,
    pub details: ModuleDetails,
}

/// Variant-specific module state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ModuleDetails {
    Sail {
        openness: f64,
        angle_deg: f64,
        efficiency: f64,
        has_fiber: bool,
    },
    Wheel {
        angle_deg: f64,
        is_controlled: bool,
        effectiveness: f64,
    },
    Cannon {
        cooldown_remaining: f64,
        max_cooldown: f64,
        ready: bool,
        live_projectiles: usize,
    },
}

/// A cannonball in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub cannon_id: u32,
    pub position: DVec2,
    pub velocity: DVec2,
    pub age: f64,
    pub damage: f64,
}

/// A piece of floating treasure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasureView {
    pub treasure_id: u32,
    pub kind: TreasureKind,
    pub position: DVec2,
    pub collected: bool,
}

/// A running visual effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectView {
    pub effect: EffectType,
    pub position: DVec2,
    pub size: f64,
    pub progress: f64,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub treasure_value: u32,
    pub treasures_collected: u32,
    pub treasures_total: u32,
    pub shots_fired: u32,
    pub voyage_time_secs: f64,
}
