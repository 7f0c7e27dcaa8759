//! Sparse dungeon grid (floor and wall layers)
//!
//! The grid stores two disjoint layers keyed by coordinate. Floor is terminal
//! for the duration of a run: once a cell is floor it never becomes wall or
//! empty again. A wall is only ever written to an empty cell.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use alloc::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cell::{CellState, ThemeId};
use super::coord::Coord;
use super::room::Room;

/// Sink for generation output.
///
/// Renderers implement this to materialise a finished layout. The generator
/// only ever asks occupancy questions of a painter; it never reads back what
/// a cell looks like.
pub trait GridPainter {
    fn set_floor(&mut self, at: Coord, theme: ThemeId);
    fn set_wall(&mut self, at: Coord, theme: ThemeId);
    fn has_floor(&self, at: Coord) -> bool;
    fn has_wall(&self, at: Coord) -> bool;
    /// Reset before a run
    fn clear(&mut self);
}

/// The grid model owned by one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    #[serde(with = "coord_map")]
    floor: BTreeMap<Coord, ThemeId>,
    #[serde(with = "coord_map")]
    walls: BTreeMap<Coord, ThemeId>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, at: Coord) -> CellState {
        if self.floor.contains_key(&at) {
            CellState::Floor
        } else if self.walls.contains_key(&at) {
            CellState::Wall
        } else {
            CellState::Empty
        }
    }

    pub fn is_floor(&self, at: Coord) -> bool {
        self.floor.contains_key(&at)
    }

    pub fn is_wall(&self, at: Coord) -> bool {
        self.walls.contains_key(&at)
    }

    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.cell(at) == CellState::Empty
    }

    /// Theme a cell was painted with, if any
    pub fn theme(&self, at: Coord) -> Option<ThemeId> {
        self.floor
            .get(&at)
            .or_else(|| self.walls.get(&at))
            .copied()
    }

    /// Mark a cell as floor. The first floor write wins; later writes keep
    /// the original theme. A wall on the cell is evicted so the layers stay
    /// disjoint. Returns true if the cell was not floor before.
    pub fn set_floor(&mut self, at: Coord, theme: ThemeId) -> bool {
        if self.floor.contains_key(&at) {
            return false;
        }
        self.walls.remove(&at);
        self.floor.insert(at, theme);
        true
    }

    /// Mark a cell as wall if it is currently empty. Returns true if written.
    pub fn set_wall(&mut self, at: Coord, theme: ThemeId) -> bool {
        if !self.is_empty_at(at) {
            return false;
        }
        self.walls.insert(at, theme);
        true
    }

    /// Paint every cell of a room
    pub fn fill_room(&mut self, room: &Room, theme: ThemeId) -> usize {
        if room.is_sentinel() {
            return 0;
        }
        room.cells().filter(|&c| self.set_floor(c, theme)).count()
    }

    /// Floor cells in coordinate order
    pub fn floor_cells(&self) -> impl Iterator<Item = (Coord, ThemeId)> + '_ {
        self.floor.iter().map(|(c, t)| (*c, *t))
    }

    /// Wall cells in coordinate order
    pub fn wall_cells(&self) -> impl Iterator<Item = (Coord, ThemeId)> + '_ {
        self.walls.iter().map(|(c, t)| (*c, *t))
    }

    pub fn floor_count(&self) -> usize {
        self.floor.len()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn is_blank(&self) -> bool {
        self.floor.is_empty() && self.walls.is_empty()
    }

    pub fn clear(&mut self) {
        self.floor.clear();
        self.walls.clear();
    }

    /// Smallest rectangle covering every painted cell
    pub fn bounds(&self) -> Option<Room> {
        let mut cells = self.floor.keys().chain(self.walls.keys());
        let first = *cells.next()?;
        let (mut lx, mut ly, mut hx, mut hy) = (first.x, first.y, first.x, first.y);
        for c in cells {
            lx = lx.min(c.x);
            ly = ly.min(c.y);
            hx = hx.max(c.x);
            hy = hy.max(c.y);
        }
        Some(Room::new(lx, ly, hx - lx + 1, hy - ly + 1))
    }

    /// Text dump, highest row first so "up" reads as up
    pub fn render_ascii(&self) -> String {
        let Some(bounds) = self.bounds() else {
            return String::new();
        };
        let mut out = String::with_capacity(((bounds.width + 1) * bounds.height) as usize);
        for y in (bounds.y..bounds.y_max()).rev() {
            let row: String = (bounds.x..bounds.x_max())
                .map(|x| self.cell(Coord::new(x, y)).symbol())
                .collect();
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }

    /// Replay the finished layout onto an external painter
    pub fn paint_onto<P: GridPainter + ?Sized>(&self, painter: &mut P) {
        painter.clear();
        for (at, theme) in self.floor_cells() {
            painter.set_floor(at, theme);
        }
        for (at, theme) in self.wall_cells() {
            if !painter.has_floor(at) && !painter.has_wall(at) {
                painter.set_wall(at, theme);
            }
        }
    }
}

impl GridPainter for Grid {
    fn set_floor(&mut self, at: Coord, theme: ThemeId) {
        Grid::set_floor(self, at, theme);
    }

    fn set_wall(&mut self, at: Coord, theme: ThemeId) {
        Grid::set_wall(self, at, theme);
    }

    fn has_floor(&self, at: Coord) -> bool {
        self.is_floor(at)
    }

    fn has_wall(&self, at: Coord) -> bool {
        self.is_wall(at)
    }

    fn clear(&mut self) {
        Grid::clear(self);
    }
}

/// Coordinate-keyed maps serialize as `[coord, theme]` pairs, since JSON
/// object keys must be strings.
mod coord_map {
    #[cfg(not(feature = "std"))]
    use crate::compat::*;

    use alloc::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Coord, ThemeId};

    pub fn serialize<S>(map: &BTreeMap<Coord, ThemeId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Coord, ThemeId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(Coord, ThemeId)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_is_terminal() {
        let mut grid = Grid::new();
        let at = Coord::new(1, 1);
        assert!(grid.set_floor(at, ThemeId(3)));
        assert!(!grid.set_wall(at, ThemeId::WALL));
        assert!(!grid.set_floor(at, ThemeId(9)));
        assert_eq!(grid.cell(at), CellState::Floor);
        assert_eq!(grid.theme(at), Some(ThemeId(3)));
    }

    #[test]
    fn test_wall_only_on_empty() {
        let mut grid = Grid::new();
        let at = Coord::new(0, 0);
        assert!(grid.set_wall(at, ThemeId::WALL));
        assert!(!grid.set_wall(at, ThemeId(7)));
        assert_eq!(grid.theme(at), Some(ThemeId::WALL));
    }

    #[test]
    fn test_floor_evicts_wall() {
        let mut grid = Grid::new();
        let at = Coord::new(2, -2);
        grid.set_wall(at, ThemeId::WALL);
        grid.set_floor(at, ThemeId::ROOM_FLOOR);
        assert!(grid.is_floor(at));
        assert!(!grid.is_wall(at));
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_fill_room_skips_sentinel() {
        let mut grid = Grid::new();
        assert_eq!(grid.fill_room(&Room::SENTINEL, ThemeId::ROOM_FLOOR), 0);
        assert!(grid.is_blank());
        assert_eq!(grid.fill_room(&Room::new(0, 0, 3, 2), ThemeId::ROOM_FLOOR), 6);
    }

    #[test]
    fn test_bounds_and_ascii() {
        let mut grid = Grid::new();
        grid.fill_room(&Room::new(0, 0, 2, 1), ThemeId::ROOM_FLOOR);
        grid.set_wall(Coord::new(0, 1), ThemeId::WALL);
        assert_eq!(grid.bounds(), Some(Room::new(0, 0, 2, 2)));
        assert_eq!(grid.render_ascii(), "#\n..\n");
        assert_eq!(Grid::new().bounds(), None);
    }

    #[test]
    fn test_paint_onto_copies_layers() {
        let mut grid = Grid::new();
        grid.fill_room(&Room::new(0, 0, 2, 2), ThemeId::ROOM_FLOOR);
        grid.set_wall(Coord::new(-1, 0), ThemeId::WALL);

        let mut copy = Grid::new();
        copy.set_floor(Coord::new(50, 50), ThemeId(5));
        grid.paint_onto(&mut copy);
        assert_eq!(copy, grid);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut grid = Grid::new();
        grid.fill_room(&Room::new(-1, -1, 2, 2), ThemeId(4));
        grid.set_wall(Coord::new(3, 3), ThemeId::WALL);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
