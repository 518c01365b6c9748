//! Headless sailing and gunnery simulation for BRIGANTINE.
//!
//! Ships carry attachable modules (sails, a wheel, cannons) whose physics
//! bodies follow the hull every tick. The engine owns a hecs registry and a
//! physics world, applies player commands at tick boundaries, and produces a
//! `GameStateSnapshot` per frame.

pub mod audio;
pub mod effects;
pub mod engine;
pub mod ephemeral;
pub mod lifecycle;
pub mod mechanics;
pub mod modules;
pub mod physics;
pub mod projectile;
pub mod render;
pub mod score;
pub mod ship;
pub mod systems;
pub mod transform;
pub mod treasure;
pub mod world_setup;

pub use brigantine_core as core;
pub use engine::{SimConfig, SimulationEngine};
