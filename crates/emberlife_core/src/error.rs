//! Error types for emberlife_core.
//!
//! The simulation itself is total: wraparound makes every coordinate valid and
//! every probability draw is well defined. What can fail is construction:
//! bad dimensions or bad configuration. Display failures surface as
//! `anyhow::Error` from the boundary traits.

use thiserror::Error;

/// Main error type for emberlife_core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// A grid needs at least one cell on each axis.
    #[error("Invalid grid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimensions { width: u16, height: u16 },

    /// Two grids that must share a shape do not.
    #[error("Grid dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (u16, u16),
        right: (u16, u16),
    },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for emberlife_core operations.
pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
