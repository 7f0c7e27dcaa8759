//! Wall derivation from the floor layer
//!
//! One pass over every floor cell; each empty neighbor selected by the
//! policy becomes wall. Floor never turns into wall, so the two layers stay
//! disjoint no matter which floor cell is visited first.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::config::WallPolicy;

use super::cell::ThemeId;
use super::coord::Coord;
use super::grid::Grid;
use super::region::RegionLookup;

/// Two-thick backdrop above, one cell below, left and right
const DIRECTIONAL: [(i32, i32); 5] = [(0, 1), (0, 2), (0, -1), (-1, 0), (1, 0)];

const RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Neighbor offsets a floor cell walls off under `policy`
pub const fn offsets(policy: WallPolicy) -> &'static [(i32, i32)] {
    match policy {
        WallPolicy::Directional => &DIRECTIONAL,
        WallPolicy::Ring => &RING,
    }
}

/// Paint the wall layer. Wall themes come from the region holding the wall
/// cell, else `default_wall`. Returns the number of wall cells written.
pub fn derive_walls(
    grid: &mut Grid,
    policy: WallPolicy,
    default_wall: ThemeId,
    regions: Option<&dyn RegionLookup>,
) -> usize {
    let floor: Vec<Coord> = grid.floor_cells().map(|(at, _)| at).collect();
    let mut written = 0;

    for cell in floor {
        for &offset in offsets(policy) {
            let at = cell + offset;
            // Checked at write time: set_wall refuses floor and existing walls
            if grid.is_floor(at) {
                continue;
            }
            let theme = regions
                .and_then(|r| r.theme_at(at))
                .map_or(default_wall, |t| t.wall);
            if grid.set_wall(at, theme) {
                written += 1;
            }
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::cell::{CellState, Theme};
    use crate::dungeon::region::{Region, RegionCatalog};
    use crate::dungeon::room::Room;

    fn single_floor() -> Grid {
        let mut grid = Grid::new();
        grid.set_floor(Coord::ORIGIN, ThemeId::ROOM_FLOOR);
        grid
    }

    #[test]
    fn test_ring_walls_all_eight() {
        let mut grid = single_floor();
        let written = derive_walls(&mut grid, WallPolicy::Ring, ThemeId::WALL, None);
        assert_eq!(written, 8);
        for n in Coord::ORIGIN.ring() {
            assert_eq!(grid.cell(n), CellState::Wall);
        }
    }

    #[test]
    fn test_directional_walls_selected_offsets() {
        let mut grid = single_floor();
        let written = derive_walls(&mut grid, WallPolicy::Directional, ThemeId::WALL, None);
        assert_eq!(written, 5);
        for (dx, dy) in [(0, 1), (0, 2), (0, -1), (-1, 0), (1, 0)] {
            assert!(grid.is_wall(Coord::new(dx, dy)), "({dx}, {dy})");
        }
        for (dx, dy) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
            assert_eq!(grid.cell(Coord::new(dx, dy)), CellState::Empty);
        }
    }

    #[test]
    fn test_walls_never_cover_floor() {
        let mut grid = Grid::new();
        grid.fill_room(&Room::new(0, 0, 4, 3), ThemeId::ROOM_FLOOR);
        grid.fill_room(&Room::new(4, 1, 6, 1), ThemeId::CORRIDOR_FLOOR);
        for policy in [WallPolicy::Directional, WallPolicy::Ring] {
            let mut g = grid.clone();
            derive_walls(&mut g, policy, ThemeId::WALL, None);
            assert_eq!(g.floor_count(), grid.floor_count());
            for (at, _) in g.wall_cells() {
                assert!(!g.is_floor(at));
            }
        }
    }

    #[test]
    fn test_second_pass_adds_nothing() {
        let mut grid = Grid::new();
        grid.fill_room(&Room::new(0, 0, 3, 3), ThemeId::ROOM_FLOOR);
        assert!(derive_walls(&mut grid, WallPolicy::Ring, ThemeId::WALL, None) > 0);
        assert_eq!(derive_walls(&mut grid, WallPolicy::Ring, ThemeId::WALL, None), 0);
    }

    #[test]
    fn test_region_wall_theme() {
        let mut catalog = RegionCatalog::new();
        catalog.try_insert(Region {
            rect: Room::new(-5, 0, 10, 10),
            theme: Theme::new(ThemeId(40), ThemeId(41)),
        });
        let mut grid = single_floor();
        derive_walls(&mut grid, WallPolicy::Ring, ThemeId::WALL, Some(&catalog));
        assert_eq!(grid.theme(Coord::new(0, 1)), Some(ThemeId(41)));
        assert_eq!(grid.theme(Coord::new(0, -1)), Some(ThemeId::WALL));
    }
}
