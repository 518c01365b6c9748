//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Modules and
//! ships are addressed by the stable ids published in the snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::Broadside;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Voyage control ---
    /// Assemble the fleet and start simulating.
    StartVoyage,
    Pause,
    Resume,

    // --- Wheel ---
    /// Put the player in control of a wheel.
    TakeWheel { module: u32 },
    /// Let go of a wheel.
    ReleaseWheel { module: u32 },
    /// Turn a controlled wheel to port by up to `degrees`.
    TurnWheelLeft { module: u32, degrees: f64 },
    /// Turn a controlled wheel to starboard by up to `degrees`.
    TurnWheelRight { module: u32, degrees: f64 },
    /// Ease a controlled wheel back toward centre.
    CenterWheel { module: u32 },

    // --- Sails ---
    /// Set sail openness (percent, clamped to 0..=100).
    SetSailOpenness { module: u32, openness: f64 },
    /// Reef (negative) or let out (positive) a sail.
    AdjustSailOpenness { module: u32, delta: f64 },
    /// Set the yard angle (degrees, clamped to ±75).
    SetSailAngle { module: u32, degrees: f64 },

    // --- Guns ---
    /// Fire one cannon along a world-space direction.
    FireCannon { module: u32, direction_x: f64, direction_y: f64 },
    /// Fire every ready cannon on one side of a ship along its facing.
    FireBroadside { ship: u32, side: Broadside },

    // --- Fleet ---
    /// Release a ship and its hull body. Its modules detach next tick.
    ScuttleShip { ship: u32 },
}
