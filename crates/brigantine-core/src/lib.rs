//! Core types and definitions for the BRIGANTINE sailing simulation.
//!
//! This crate defines the vocabulary shared by the simulation and any
//! frontend: geometry, the collision taxonomy, commands, events, state
//! snapshots, error types and tuning constants. It has no dependency on a
//! physics engine, renderer or runtime framework.

pub mod collision;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
