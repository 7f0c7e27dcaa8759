//! Rooms: axis-aligned integer rectangles
//!
//! A room covers the half-open cell range `[x, x + width) × [y, y + height)`.
//! A room with zero width or height is the sentinel produced by a failed
//! placement; it is never painted, linked, or compared by center.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// A rectangular room on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Room {
    /// Left x coordinate
    pub x: i32,
    /// Bottom y coordinate
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    /// The failed-placement marker
    pub const SENTINEL: Room = Room {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Room of the given size whose center lands on `center`
    pub const fn centered_at(center: Coord, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    /// True for the failed-placement marker
    pub const fn is_sentinel(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Exclusive right edge
    pub const fn x_max(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive top edge
    pub const fn y_max(&self) -> i32 {
        self.y + self.height
    }

    /// Center cell, derived with integer division
    pub const fn center(&self) -> Coord {
        Coord::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub const fn area(&self) -> i64 {
        if self.is_sentinel() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// Grow the rectangle by `margin` cells on every side, saturating at the
    /// `i32` limits
    pub const fn inflate(&self, margin: i32) -> Room {
        let grow = margin.saturating_mul(2);
        Room::new(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            self.width.saturating_add(grow),
            self.height.saturating_add(grow),
        )
    }

    /// Half-open rectangle intersection; rooms that only share an edge do
    /// not overlap. Sentinels overlap nothing.
    pub fn overlaps(&self, other: &Room) -> bool {
        if self.is_sentinel() || other.is_sentinel() {
            return false;
        }
        self.x < other.x_max()
            && self.x_max() > other.x
            && self.y < other.y_max()
            && self.y_max() > other.y
    }

    /// Overlap test after inflating both rooms by `padding`
    pub fn overlaps_padded(&self, other: &Room, padding: i32) -> bool {
        if self.is_sentinel() || other.is_sentinel() {
            return false;
        }
        // Widened so no padding an i32 can hold overflows the edges
        let p = i64::from(padding.max(0));
        let (ax, ay) = (i64::from(self.x), i64::from(self.y));
        let (bx, by) = (i64::from(other.x), i64::from(other.y));
        let (ax_max, ay_max) = (ax + i64::from(self.width), ay + i64::from(self.height));
        let (bx_max, by_max) = (bx + i64::from(other.width), by + i64::from(other.height));
        ax - p < bx_max + p && ax_max + p > bx - p && ay - p < by_max + p && ay_max + p > by - p
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.x >= self.x && at.x < self.x_max() && at.y >= self.y && at.y < self.y_max()
    }

    /// Every cell of the room, column by column
    pub fn cells(&self) -> impl Iterator<Item = Coord> + use<> {
        let Room {
            x,
            y,
            width,
            height,
        } = *self;
        let (width, height) = (width.max(0), height.max(0));
        (x..x + width).flat_map(move |cx| (y..y + height).map(move |cy| Coord::new(cx, cy)))
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_uses_integer_division() {
        assert_eq!(Room::new(0, 0, 5, 5).center(), Coord::new(2, 2));
        assert_eq!(Room::new(10, 4, 6, 3).center(), Coord::new(13, 5));
    }

    #[test]
    fn test_centered_at_round_trips_center() {
        for (w, h) in [(5, 5), (6, 7), (1, 1), (10, 2)] {
            let c = Coord::new(-3, 8);
            assert_eq!(Room::centered_at(c, w, h).center(), c);
        }
    }

    #[test]
    fn test_sentinel() {
        assert!(Room::SENTINEL.is_sentinel());
        assert!(Room::new(4, 4, 0, 3).is_sentinel());
        assert!(Room::new(4, 4, 3, 0).is_sentinel());
        assert!(!Room::new(4, 4, 1, 1).is_sentinel());
        assert_eq!(Room::SENTINEL.cells().count(), 0);
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = Room::new(0, 0, 5, 5);
        let touching = Room::new(5, 0, 5, 5);
        let crossing = Room::new(4, 4, 5, 5);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
    }

    #[test]
    fn test_padding_inflates_both() {
        let a = Room::new(0, 0, 5, 5);
        // Gap of two cells between a and b
        let b = Room::new(7, 0, 5, 5);
        assert!(!a.overlaps_padded(&b, 0));
        assert!(!a.overlaps_padded(&b, 1));
        assert!(a.overlaps_padded(&b, 2));
        assert!(!a.overlaps_padded(&b, -3));
    }

    #[test]
    fn test_huge_padding_does_not_overflow() {
        let a = Room::new(0, 0, 5, 5);
        let far = Room::new(90, 90, 3, 3);
        assert!(a.overlaps_padded(&far, 1_500_000_000));
        assert!(a.overlaps_padded(&far, i32::MAX));
        let corner = Room::new(i32::MAX - 10, i32::MIN, 5, 5);
        assert!(corner.overlaps_padded(&a, i32::MAX));
        assert!(!corner.overlaps_padded(&a, 0));

        let grown = a.inflate(i32::MAX);
        assert_eq!(grown.x, -i32::MAX);
        assert_eq!(grown.width, i32::MAX);
    }

    #[test]
    fn test_sentinel_never_overlaps() {
        let a = Room::new(0, 0, 5, 5);
        assert!(!a.overlaps(&Room::SENTINEL));
        assert!(!Room::SENTINEL.overlaps(&a));
    }

    #[test]
    fn test_cells_cover_area() {
        let r = Room::new(-2, 3, 4, 3);
        let cells: Vec<Coord> = r.cells().collect();
        assert_eq!(cells.len() as i64, r.area());
        assert!(cells.iter().all(|&c| r.contains(c)));
        assert!(!r.contains(Coord::new(2, 3)));
    }
}
