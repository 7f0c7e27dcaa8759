//! Configuration errors
//!
//! Generation itself never fails: degraded placements, rejected corridors and
//! overlapping regions are ordinary outcomes. Only a configuration that cannot
//! describe a run is reported as an error.

use thiserror::Error;

/// Reasons a [`DungeonConfig`](crate::DungeonConfig) is rejected by `validate()`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{what} size range is invalid: min {min} must be at least 1 and not above max {max}")]
    InvalidSizeRange {
        what: &'static str,
        min: i32,
        max: i32,
    },

    #[error("placement bounds are empty: ({min_x}, {min_y}) .. ({max_x}, {max_y})")]
    EmptyBounds {
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },

    #[error("room count must be at least 1")]
    NoRooms,

    #[error("corridor width must be at least 1, got {0}")]
    InvalidCorridorWidth(i32),

    #[error("room padding must not be negative, got {0}")]
    NegativePadding(i32),

    #[error("placement attempt budget must be at least 1")]
    NoAttempts,

    #[error("start room size must be at least 1x1, got {width}x{height}")]
    InvalidStartRoom { width: i32, height: i32 },

    #[error("{what} is {value}, outside the supported range -{limit}..={limit}")]
    OutOfRange {
        what: &'static str,
        value: i32,
        limit: i32,
    },

    #[error("region theme palette is empty")]
    EmptyPalette,
}
