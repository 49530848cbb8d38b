//! Error types for the physics core.

use thiserror::Error;

use crate::body::BodyId;

/// A body was described with values the force law cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidBodyError {
    #[error("body mass must be positive and finite, got {0}")]
    NonPositiveMass(f32),

    #[error("body radius must be non-negative and finite, got {0}")]
    InvalidRadius(f32),

    #[error("body {0} must be finite")]
    NonFinite(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid body: {0}")]
    InvalidBody(#[from] InvalidBodyError),

    #[error("duplicate body id {0} in initial configuration")]
    DuplicateId(BodyId),

    #[error("no body ids left to assign")]
    IdSpaceExhausted,
}

pub type Result<T> = std::result::Result<T, SimError>;
