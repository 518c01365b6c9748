//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over the registry and the physics world. They
//! own no state; everything lives in components or is passed in.

pub mod cleanup;
pub mod gunnery;
pub mod module_sync;
pub mod ship_motion;
pub mod snapshot;
pub mod treasure;
pub mod wind;
