//! Dungeon system
//!
//! Contains the grid model, room placement, corridor routing and the
//! generation driver that ties them together.

mod cell;
mod connector;
mod coord;
mod corridor;
mod generation;
mod grid;
mod placer;
mod region;
mod room;
mod walls;

pub use cell::{CellState, Theme, ThemeId};
pub use connector::{link_index, nearest_index, nearest_room};
pub use coord::Coord;
pub use corridor::{route, ConnectivityTracker, Corridor, CorridorDeduplicator, Direction, Route};
pub use generation::{
    generate, generate_with, DungeonGenerator, GenerationResult, PlacedRoom, RegenerationListener,
};
pub use grid::{Grid, GridPainter};
pub use placer::{PlacementOutcome, RoomPlacer};
pub use region::{Region, RegionCatalog, RegionLookup};
pub use room::Room;
pub use walls::{derive_walls, offsets};
