//! Error types for the fallible seams: the physics collaborator and
//! configuration loading. Everything else in the simulation absorbs invalid
//! requests as no-ops.

use crate::types::BodyHandle;

/// Errors reported by a physics collaborator.
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    /// The handle does not name a live body.
    #[error("unknown body {0}")]
    UnknownBody(BodyHandle),

    /// A shape was requested with non-positive or non-finite dimensions.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

/// Errors raised while loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config document is not valid JSON for the config schema.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its permitted range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Convenience result type for physics operations.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Convenience result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
