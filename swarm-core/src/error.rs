use thiserror::Error;

/// Errors raised when building or editing a world.
///
/// The tick itself never fails; these only cover construction-time
/// invariants and the external mutation points.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwarmError {
    /// Obstacle and goal radii must be positive and finite.
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("max speed must be non-negative and finite, got {0}")]
    InvalidMaxSpeed(f32),

    #[error("perception radius must be non-negative and finite, got {0}")]
    InvalidPerceptionRadius(f32),

    #[error("agent size must be non-negative and finite, got {0}")]
    InvalidSize(f32),

    #[error("arena must have positive finite dimensions, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    /// A reposition request named an obstacle or goal that does not exist.
    #[error("no {kind} at index {index}")]
    UnknownEntity { kind: &'static str, index: usize },
}

pub type Result<T> = core::result::Result<T, SwarmError>;
