//! Room placement with padding backoff
//!
//! Each room gets a fixed budget of attempts. A candidate is accepted as soon
//! as it clears every existing room with `padding` cells to spare on both
//! sides. Once half the budget is spent, every further failure shrinks the
//! padding by one (never below zero) so crowded maps still fill up. When the
//! budget runs out the placer returns [`Room::SENTINEL`].

use serde::{Deserialize, Serialize};

use crate::config::{DungeonConfig, PlacementBounds, Size, SizeRange, StartPlacement};
use crate::rng::RandomSource;

use super::coord::Coord;
use super::room::Room;

/// Result of one placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    /// The accepted room, or [`Room::SENTINEL`]
    pub room: Room,
    /// Padding in effect when the room was accepted (or when the budget ran
    /// out)
    pub padding: i32,
    /// Attempts consumed
    pub attempts: u32,
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        !self.room.is_sentinel()
    }
}

/// Draws candidate rooms and validates them against the rooms already placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomPlacer {
    pub size: SizeRange,
    pub bounds: PlacementBounds,
    pub padding: i32,
    pub max_attempts: u32,
}

impl RoomPlacer {
    pub fn new(size: SizeRange, bounds: PlacementBounds, padding: i32, max_attempts: u32) -> Self {
        Self {
            size,
            bounds,
            padding,
            max_attempts,
        }
    }

    pub fn from_config(config: &DungeonConfig) -> Self {
        Self::new(
            config.room_size,
            config.bounds,
            config.room_padding,
            config.max_attempts,
        )
    }

    /// Place the first room. It is never checked for overlap.
    pub fn place_start(
        &self,
        placement: StartPlacement,
        center: Coord,
        size: Option<Size>,
        rng: &mut impl RandomSource,
    ) -> PlacementOutcome {
        let size = size.unwrap_or_else(|| self.size.sample(rng));
        let room = match placement {
            StartPlacement::Fixed => Room::centered_at(center, size.width, size.height),
            StartPlacement::Random => {
                let origin = self.bounds.random_origin(size.width, size.height, rng);
                Room::new(origin.x, origin.y, size.width, size.height)
            }
        };
        PlacementOutcome {
            room,
            padding: self.padding.max(0),
            attempts: 1,
        }
    }

    /// Try to place a room clear of `existing`
    pub fn place(&self, existing: &[Room], rng: &mut impl RandomSource) -> PlacementOutcome {
        let mut padding = self.padding.max(0);
        let midpoint = self.max_attempts / 2;

        for attempt in 0..self.max_attempts {
            let size = self.size.sample(rng);
            let origin = self.bounds.random_origin(size.width, size.height, rng);
            let candidate = Room::new(origin.x, origin.y, size.width, size.height);

            if !existing
                .iter()
                .any(|room| candidate.overlaps_padded(room, padding))
            {
                return PlacementOutcome {
                    room: candidate,
                    padding,
                    attempts: attempt + 1,
                };
            }

            if attempt >= midpoint {
                padding = (padding - 1).max(0);
            }
        }

        PlacementOutcome {
            room: Room::SENTINEL,
            padding,
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn placer(padding: i32, attempts: u32) -> RoomPlacer {
        RoomPlacer::new(
            SizeRange::new(5, 5),
            PlacementBounds::from_size(10, 5),
            padding,
            attempts,
        )
    }

    #[test]
    fn test_first_attempt_accepted_when_empty() {
        let mut rng = GameRng::new(42);
        let outcome = placer(3, 10).place(&[], &mut rng);
        assert!(outcome.is_placed());
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.padding, 3);
    }

    #[test]
    fn test_exhausted_budget_returns_sentinel() {
        let blocker = Room::new(-50, -50, 200, 200);
        let mut rng = GameRng::new(42);
        let outcome = placer(10, 10).place(&[blocker], &mut rng);
        assert!(!outcome.is_placed());
        assert_eq!(outcome.room, Room::SENTINEL);
        assert_eq!(outcome.attempts, 10);
        // Failures at attempts 5..=9 each shrink the padding once
        assert_eq!(outcome.padding, 5);
    }

    #[test]
    fn test_padding_never_negative() {
        let blocker = Room::new(-50, -50, 200, 200);
        let mut rng = GameRng::new(1);
        let outcome = placer(1, 30).place(&[blocker], &mut rng);
        assert_eq!(outcome.padding, 0);
    }

    #[test]
    fn test_backoff_allows_tight_fit() {
        // Only x = 5 clears the blocker, and only with zero padding
        let blocker = Room::new(0, 0, 5, 5);
        for seed in 0..10 {
            let mut rng = GameRng::new(seed);
            let outcome = placer(1, 40).place(&[blocker], &mut rng);
            assert!(outcome.is_placed(), "seed {seed}");
            assert_eq!(outcome.padding, 0);
            assert_eq!(outcome.room, Room::new(5, 0, 5, 5));
            assert!(outcome.attempts > 20);
        }
    }

    #[test]
    fn test_placed_room_respects_padding_in_effect() {
        let p = RoomPlacer::new(
            SizeRange::new(3, 6),
            PlacementBounds::from_size(60, 60),
            2,
            20,
        );
        let mut rng = GameRng::new(77);
        let mut rooms = Vec::new();
        for _ in 0..15 {
            let outcome = p.place(&rooms, &mut rng);
            if outcome.is_placed() {
                for r in &rooms {
                    assert!(!outcome.room.overlaps_padded(r, outcome.padding));
                }
                rooms.push(outcome.room);
            }
        }
        assert!(rooms.len() >= 2);
    }

    #[test]
    fn test_start_room_fixed_center() {
        let mut rng = GameRng::new(3);
        let outcome = placer(1, 10).place_start(
            StartPlacement::Fixed,
            Coord::ORIGIN,
            Some(Size::new(7, 4)),
            &mut rng,
        );
        assert_eq!(outcome.room.center(), Coord::ORIGIN);
        assert_eq!(outcome.room.width, 7);
        assert_eq!(outcome.room.height, 4);
    }

    #[test]
    fn test_start_room_random_inside_bounds() {
        let p = placer(1, 10);
        let mut rng = GameRng::new(5);
        let outcome = p.place_start(StartPlacement::Random, Coord::ORIGIN, None, &mut rng);
        assert!(outcome.room.x >= 0 && outcome.room.x_max() <= 10);
        assert!(outcome.room.y >= 0 && outcome.room.y_max() <= 5);
    }
}
