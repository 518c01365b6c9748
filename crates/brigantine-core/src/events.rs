//! Events emitted by the simulation for audio feedback.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::TreasureKind;

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A cannon fired.
    CannonFire { module: u32, position: DVec2 },
    /// A shot dropped into the sea.
    Splash { position: DVec2 },
    /// A sail was let out from fully furled.
    SailUnfurled { module: u32 },
    /// A sail was furled completely.
    SailFurled { module: u32 },
    /// Treasure was picked up.
    TreasureCollected { kind: TreasureKind, value: u32 },
    /// A ship was scuttled.
    ShipScuttled { ship: u32 },
}
