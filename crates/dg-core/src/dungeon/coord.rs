//! Integer grid coordinates

use core::fmt;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A point on the dungeon grid.
///
/// Ordering is x ascending, then y ascending; corridor canonicalization
/// relies on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. Exact for integer points, so comparing
    /// squared distances picks the same nearest point as comparing distances.
    /// Saturates at `i64::MAX` for points more than about 2^31 apart.
    pub fn distance_squared(self, other: Coord) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Cells in the 8-neighborhood, row by row
    pub fn ring(self) -> [Coord; 8] {
        [
            self + (-1, -1),
            self + (0, -1),
            self + (1, -1),
            self + (-1, 0),
            self + (1, 0),
            self + (-1, 1),
            self + (0, 1),
            self + (1, 1),
        ]
    }
}

impl Add<(i32, i32)> for Coord {
    type Output = Coord;

    fn add(self, (dx, dy): (i32, i32)) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_x_then_y() {
        assert!(Coord::new(1, 9) < Coord::new(2, 0));
        assert!(Coord::new(2, 0) < Coord::new(2, 1));
        assert_eq!(Coord::new(3, 3).cmp(&Coord::new(3, 3)), core::cmp::Ordering::Equal);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Coord::new(0, 0).distance_squared(Coord::new(3, 4)), 25);
        assert_eq!(Coord::new(-2, 5).distance_squared(Coord::new(-2, 5)), 0);
    }

    #[test]
    fn test_distance_squared_far_apart() {
        let a = Coord::new(0, 0);
        let b = Coord::new(i32::MIN, 0);
        assert_eq!(a.distance_squared(b), 1i64 << 62);
        assert_eq!(
            Coord::new(i32::MIN, i32::MIN).distance_squared(Coord::new(i32::MAX, i32::MAX)),
            i64::MAX
        );
    }

    #[test]
    fn test_ring_excludes_center() {
        let c = Coord::new(4, -1);
        let ring = c.ring();
        assert!(!ring.contains(&c));
        for n in ring {
            assert!((n.x - c.x).abs() <= 1 && (n.y - c.y).abs() <= 1);
        }
    }
}
