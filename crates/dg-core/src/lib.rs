//! dg-core: seeded room-and-corridor dungeon generation
//!
//! This crate contains the whole generation algorithm with no I/O
//! dependencies: room placement with padding backoff, nearest-room linking,
//! L-shaped corridor routing, corridor deduplication, and wall derivation.
//! Every random decision is drawn from an explicit [`RandomSource`], so a run
//! is a pure function of its configuration and seed.
//!
//! Supports `no_std` environments by disabling the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::boxed::Box;
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod config;
pub mod dungeon;

mod error;
mod rng;

pub use config::{
    DungeonConfig, LinkStrategy, PlacementBounds, RegionConfig, Size, SizeRange, StartPlacement,
    ThemeConfig, WallPolicy,
};
pub use dungeon::{
    generate, generate_with, CellState, Coord, Corridor, DungeonGenerator, GenerationResult, Grid,
    GridPainter, PlacedRoom, RegenerationListener, Room, Theme, ThemeId,
};
pub use error::ConfigError;
pub use rng::{GameRng, RandomSource};
