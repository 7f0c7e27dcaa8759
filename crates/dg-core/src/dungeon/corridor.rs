//! Corridors: routing, deduplication and connectivity
//!
//! A corridor joins two rooms with an L-shaped path: one horizontal leg and
//! one vertical leg meeting at an elbow. The leg order is drawn per corridor.
//! A corridor's identity is its canonical endpoint pair, and the
//! deduplicator additionally refuses a second corridor between the same two
//! rooms running in the same direction.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use alloc::collections::BTreeSet;
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::rng::RandomSource;

use super::coord::Coord;
use super::room::Room;

/// Orientation of a corridor, fixed when it is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Vertical iff both ends share a column; diagonal pairs count as
    /// horizontal.
    pub fn between(start: Coord, end: Coord) -> Self {
        if start.x == end.x {
            Direction::Vertical
        } else {
            Direction::Horizontal
        }
    }
}

/// A connection between two grid points.
///
/// Equality, ordering and hashing all go through [`Corridor::key`], so a
/// corridor equals its own reversal. The direction is derived from the
/// endpoints on construction, including when deserializing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "CorridorEnds")]
pub struct Corridor {
    start: Coord,
    end: Coord,
    direction: Direction,
}

#[derive(Deserialize)]
struct CorridorEnds {
    start: Coord,
    end: Coord,
}

impl From<CorridorEnds> for Corridor {
    fn from(ends: CorridorEnds) -> Self {
        Corridor::new(ends.start, ends.end)
    }
}

impl Corridor {
    pub fn new(start: Coord, end: Coord) -> Self {
        Self {
            start,
            end,
            direction: Direction::between(start, end),
        }
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Same corridor with `start <= end`
    pub fn canonical(&self) -> Corridor {
        if self.end < self.start {
            Corridor {
                start: self.end,
                end: self.start,
                direction: self.direction,
            }
        } else {
            *self
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.start <= self.end
    }

    /// Canonical `(start, end)` tuple
    pub fn key(&self) -> (Coord, Coord) {
        let c = self.canonical();
        (c.start, c.end)
    }
}

impl PartialEq for Corridor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Corridor {}

impl Hash for Corridor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Corridor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Corridor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Cells painted for one corridor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub horizontal_first: bool,
    /// Where the two legs meet
    pub elbow: Coord,
    pub cells: BTreeSet<Coord>,
}

/// Lay out an L-shaped path from `start` to `end`.
///
/// Each step along a leg paints a strip of `width / 2` cells on either side
/// of the path, so even widths come out one cell wider than asked.
pub fn route(start: Coord, end: Coord, width: i32, rng: &mut impl RandomSource) -> Route {
    let horizontal_first = rng.coin_flip();
    let half = (width / 2).max(0);
    let mut cells = BTreeSet::new();

    let elbow = if horizontal_first {
        paint_horizontal(&mut cells, start.x, end.x, start.y, half);
        paint_vertical(&mut cells, start.y, end.y, end.x, half);
        Coord::new(end.x, start.y)
    } else {
        paint_vertical(&mut cells, start.y, end.y, start.x, half);
        paint_horizontal(&mut cells, start.x, end.x, end.y, half);
        Coord::new(start.x, end.y)
    };

    Route {
        horizontal_first,
        elbow,
        cells,
    }
}

fn paint_horizontal(cells: &mut BTreeSet<Coord>, x_from: i32, x_to: i32, y: i32, half: i32) {
    for x in x_from.min(x_to)..=x_from.max(x_to) {
        for dy in -half..=half {
            cells.insert(Coord::new(x, y + dy));
        }
    }
}

fn paint_vertical(cells: &mut BTreeSet<Coord>, y_from: i32, y_to: i32, x: i32, half: i32) {
    for y in y_from.min(y_to)..=y_from.max(y_to) {
        for dx in -half..=half {
            cells.insert(Coord::new(x + dx, y));
        }
    }
}

/// An accepted corridor and the rooms it joins
#[derive(Debug, Clone, Copy)]
struct Link {
    corridor: Corridor,
    /// Room centers, smaller first
    rooms: (Coord, Coord),
}

fn room_pair(a: &Room, b: &Room) -> (Coord, Coord) {
    let (ca, cb) = (a.center(), b.center());
    if ca <= cb { (ca, cb) } else { (cb, ca) }
}

/// Tracks accepted corridors and rejects redundant ones.
///
/// Each check scans every accepted corridor, which is fine for the tens of
/// rooms a layout holds.
#[derive(Debug, Clone, Default)]
pub struct CorridorDeduplicator {
    accepted: BTreeSet<Corridor>,
    links: Vec<Link>,
}

impl CorridorDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `candidate` joining `room_a` and `room_b` unless it repeats an
    /// accepted corridor, or an accepted corridor already joins the same two
    /// rooms in the same direction. Corridors touching a sentinel room are
    /// always refused. Rejection leaves the state untouched.
    pub fn accept(&mut self, candidate: Corridor, room_a: &Room, room_b: &Room) -> bool {
        if room_a.is_sentinel() || room_b.is_sentinel() {
            return false;
        }
        let canonical = candidate.canonical();
        if self.accepted.contains(&canonical) {
            return false;
        }
        let rooms = room_pair(room_a, room_b);
        if self
            .links
            .iter()
            .any(|link| link.rooms == rooms && link.corridor.direction == canonical.direction)
        {
            return false;
        }
        self.accepted.insert(canonical);
        self.links.push(Link {
            corridor: canonical,
            rooms,
        });
        true
    }

    pub fn contains(&self, corridor: &Corridor) -> bool {
        self.accepted.contains(corridor)
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Accepted corridors in canonical form
    pub fn corridors(&self) -> &BTreeSet<Corridor> {
        &self.accepted
    }

    pub fn into_corridors(self) -> BTreeSet<Corridor> {
        self.accepted
    }
}

/// Disjoint-set forest over room indices.
///
/// Union by size keeps every tree shallow, so lookups need no path
/// compression and can take `&self`.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl ConnectivityTracker {
    /// `rooms` singleton components
    pub fn new(rooms: usize) -> Self {
        Self {
            parent: (0..rooms).collect(),
            size: vec![1; rooms],
            components: rooms,
        }
    }

    /// Tracker with every `(a, b)` link already merged
    pub fn from_links(rooms: usize, links: &[(usize, usize)]) -> Self {
        let mut tracker = Self::new(rooms);
        for &(a, b) in links {
            tracker.merge(a, b);
        }
        tracker
    }

    fn root(&self, mut room: usize) -> usize {
        while self.parent[room] != room {
            room = self.parent[room];
        }
        room
    }

    /// Whether `a` and `b` share a component; out-of-range rooms never do
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        let n = self.parent.len();
        a < n && b < n && self.root(a) == self.root(b)
    }

    /// Join the components of `a` and `b`. Returns false when they were
    /// already joined or either index is out of range.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let n = self.parent.len();
        if a >= n || b >= n {
            return false;
        }
        let (ra, rb) = (self.root(a), self.root(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.components -= 1;
        true
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// True when at most one component remains
    pub fn all_connected(&self) -> bool {
        self.components <= 1
    }
}
