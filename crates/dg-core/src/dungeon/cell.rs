//! Cell states and paint themes

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Occupancy of one grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Floor,
    Wall,
}

impl CellState {
    /// ASCII symbol used by debug dumps
    pub const fn symbol(&self) -> char {
        match self {
            CellState::Empty => ' ',
            CellState::Floor => '.',
            CellState::Wall => '#',
        }
    }
}

/// Identifier of a paint theme (a tile set chosen by the renderer)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ThemeId(pub u16);

impl ThemeId {
    pub const ROOM_FLOOR: ThemeId = ThemeId(0);
    pub const CORRIDOR_FLOOR: ThemeId = ThemeId(1);
    pub const WALL: ThemeId = ThemeId(2);
}

/// A floor theme paired with the wall theme that borders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Theme {
    pub floor: ThemeId,
    pub wall: ThemeId,
}

impl Theme {
    pub const fn new(floor: ThemeId, wall: ThemeId) -> Self {
        Self { floor, wall }
    }
}
