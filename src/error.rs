//! Error types for surface construction, configuration and export.

use thiserror::Error;

/// Result type for itswave operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Errors that can occur outside the per-frame hot path.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Grid dimensions must be positive and their product addressable.
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Kernel radius read from a signed source was negative.
    #[error("Kernel radius must be non-negative, got {0}")]
    NegativeKernelRadius(i64),

    /// Frame delta must be positive and finite.
    #[error("Invalid frame delta: {0}")]
    InvalidDelta(f32),

    /// Display cell size must be positive and finite.
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(f32),

    /// Coefficients exceed the stability bound for the given delta.
    #[error(
        "Unstable coefficients for delta {delta}: acceleration {acceleration} (max {max_acceleration}), damping {damping} (max {max_damping})"
    )]
    Unstable {
        acceleration: f32,
        damping: f32,
        delta: f32,
        max_acceleration: f32,
        max_damping: f32,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config or snapshot (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PNG encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
