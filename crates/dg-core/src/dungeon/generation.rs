//! Layout generation
//!
//! One run, start to finish:
//! 1. Draw theme regions, if configured
//! 2. Place the start room unconditionally
//! 3. Place the remaining rooms, linking each new room to an existing one
//! 4. Connect random extra room pairs, if configured
//! 5. Derive the wall layer
//!
//! Nothing is visible to the caller until the whole run has finished.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use alloc::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::error::ConfigError;
use crate::rng::{GameRng, RandomSource};

use super::cell::{Theme, ThemeId};
use super::connector::link_index;
use super::corridor::{route, ConnectivityTracker, Corridor, CorridorDeduplicator};
use super::coord::Coord;
use super::grid::{Grid, GridPainter};
use super::placer::{PlacementOutcome, RoomPlacer};
use super::region::{RegionCatalog, RegionLookup};
use super::room::Room;
use super::walls::derive_walls;

/// An accepted room and the padding that was in effect when it was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub room: Room,
    pub padding: i32,
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub seed: u64,
    /// Accepted rooms in placement order; never contains a sentinel
    pub rooms: Vec<PlacedRoom>,
    /// Accepted corridors in canonical form
    pub corridors: BTreeSet<Corridor>,
    /// Room index pairs joined by accepted corridors, in acceptance order
    pub links: Vec<(usize, usize)>,
    /// Rooms requested that ended up placed
    pub placed: usize,
    /// Rooms requested whose placement budget ran out
    pub failed: usize,
    /// Corridor candidates turned away as redundant
    pub rejected_corridors: usize,
    pub regions: RegionCatalog,
    pub grid: Grid,
}

impl GenerationResult {
    /// Accepted rooms without their placement padding
    pub fn room_list(&self) -> Vec<Room> {
        self.rooms.iter().map(|p| p.room).collect()
    }

    /// Whether every accepted room can be reached from every other
    pub fn is_connected(&self) -> bool {
        ConnectivityTracker::from_links(self.rooms.len(), &self.links).all_connected()
    }

    /// Replay the layout onto a renderer
    pub fn paint_onto<P: GridPainter + ?Sized>(&self, painter: &mut P) {
        self.grid.paint_onto(painter);
    }
}

/// Notified once after every completed run
pub trait RegenerationListener {
    fn on_regenerated(&mut self);
}

impl<F: FnMut()> RegenerationListener for F {
    fn on_regenerated(&mut self) {
        self()
    }
}

/// Run one generation from `config`, seeded with `config.seed`
pub fn generate(config: &DungeonConfig) -> Result<GenerationResult, ConfigError> {
    let mut rng = GameRng::new(config.seed);
    generate_with(config, &mut rng)
}

/// Run one generation drawing from `rng`
pub fn generate_with(
    config: &DungeonConfig,
    rng: &mut impl RandomSource,
) -> Result<GenerationResult, ConfigError> {
    config.validate()?;
    Ok(Run::new(config, rng).execute())
}

/// Owns a validated configuration and the listeners waiting on each run
pub struct DungeonGenerator {
    config: DungeonConfig,
    listeners: Vec<Box<dyn RegenerationListener + Send>>,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            listeners: Vec::new(),
        })
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Swap in a new configuration; the old one stays if validation fails
    pub fn set_config(&mut self, config: DungeonConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl RegenerationListener + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Generate with the configured seed
    pub fn generate(&mut self) -> GenerationResult {
        let mut rng = GameRng::new(self.config.seed);
        self.generate_with(&mut rng)
    }

    /// Store `seed` in the configuration and generate from scratch
    pub fn regenerate(&mut self, seed: u64) -> GenerationResult {
        self.config.seed = seed;
        self.generate()
    }

    /// Generate drawing from a caller-supplied random source
    pub fn generate_with(&mut self, rng: &mut impl RandomSource) -> GenerationResult {
        let result = Run::new(&self.config, rng).execute();
        for listener in &mut self.listeners {
            listener.on_regenerated();
        }
        result
    }
}

impl core::fmt::Debug for DungeonGenerator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DungeonGenerator")
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// State of a single run
struct Run<'a, R: RandomSource> {
    config: &'a DungeonConfig,
    rng: &'a mut R,
    regions: RegionCatalog,
    grid: Grid,
    rooms: Vec<PlacedRoom>,
    dedup: CorridorDeduplicator,
    links: Vec<(usize, usize)>,
    failed: usize,
    rejected: usize,
}

impl<'a, R: RandomSource> Run<'a, R> {
    fn new(config: &'a DungeonConfig, rng: &'a mut R) -> Self {
        Self {
            config,
            rng,
            regions: RegionCatalog::new(),
            grid: Grid::new(),
            rooms: Vec::new(),
            dedup: CorridorDeduplicator::new(),
            links: Vec::new(),
            failed: 0,
            rejected: 0,
        }
    }

    fn execute(mut self) -> GenerationResult {
        let config = self.config;

        if let Some(region_config) = &config.regions {
            self.regions = RegionCatalog::generate(region_config, &config.bounds, self.rng);
        }

        let placer = RoomPlacer::from_config(config);
        let start = placer.place_start(
            config.start_placement,
            config.start_center,
            config.start_size,
            self.rng,
        );
        self.accept_room(start);

        for _ in 1..config.room_count {
            let outcome = placer.place(&self.room_rects(), self.rng);
            if !outcome.is_placed() {
                self.failed += 1;
                log::warn!(
                    "room placement gave up after {} attempts (padding {})",
                    outcome.attempts,
                    outcome.padding
                );
                continue;
            }
            let target = link_index(config.link, &outcome.room, &self.room_rects(), self.rng);
            let index = self.accept_room(outcome);
            self.connect(target, index);
        }

        let count = self.rooms.len();
        if count >= 2 {
            for _ in 0..config.extra_corridors {
                let a = self.rng.index(count);
                let mut b = self.rng.index(count - 1);
                if b >= a {
                    b += 1;
                }
                self.connect(a, b);
            }
        }

        let lookup: Option<&dyn RegionLookup> = if self.regions.is_empty() {
            None
        } else {
            Some(&self.regions)
        };
        let walls = derive_walls(&mut self.grid, config.wall_policy, config.themes.wall, lookup);

        log::info!(
            "generated {} rooms ({} failed), {} corridors ({} rejected), {} walls, seed {}",
            self.rooms.len(),
            self.failed,
            self.dedup.len(),
            self.rejected,
            walls,
            config.seed
        );

        GenerationResult {
            seed: config.seed,
            placed: self.rooms.len(),
            rooms: self.rooms,
            corridors: self.dedup.into_corridors(),
            links: self.links,
            failed: self.failed,
            rejected_corridors: self.rejected,
            regions: self.regions,
            grid: self.grid,
        }
    }

    fn room_rects(&self) -> Vec<Room> {
        self.rooms.iter().map(|p| p.room).collect()
    }

    fn floor_theme(&self, at: Coord, fallback: Theme) -> ThemeId {
        self.regions.theme_or(at, fallback).floor
    }

    /// Paint a placed room and record it; returns its index
    fn accept_room(&mut self, outcome: PlacementOutcome) -> usize {
        let room = outcome.room;
        let fallback = self.config.themes.room();
        for at in room.cells() {
            let theme = self.floor_theme(at, fallback);
            self.grid.set_floor(at, theme);
        }
        self.rooms.push(PlacedRoom {
            room,
            padding: outcome.padding,
        });
        self.rooms.len() - 1
    }

    /// Corridor from room `from` to room `to`, if the deduplicator allows it
    fn connect(&mut self, from: usize, to: usize) -> bool {
        let a = self.rooms[from].room;
        let b = self.rooms[to].room;
        let corridor = Corridor::new(a.center(), b.center());

        if !self.dedup.accept(corridor, &a, &b) {
            self.rejected += 1;
            log::debug!(
                "rejected {} corridor {} -> {} between rooms {from} and {to}",
                corridor.direction(),
                corridor.start(),
                corridor.end()
            );
            return false;
        }

        let path = route(corridor.start(), corridor.end(), self.config.corridor_width, self.rng);
        let fallback = self.config.themes.corridor();
        for at in path.cells {
            let theme = self.floor_theme(at, fallback);
            self.grid.set_floor(at, theme);
        }
        self.links.push((from, to));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlacementBounds, SizeRange};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn roomy() -> DungeonConfig {
        DungeonConfig {
            bounds: PlacementBounds::from_size(200, 200),
            room_size: SizeRange::new(5, 10),
            room_count: 5,
            max_attempts: 50,
            ..DungeonConfig::default()
        }
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = DungeonConfig {
            max_attempts: 0,
            ..DungeonConfig::default()
        };
        assert_eq!(generate(&config), Err(ConfigError::NoAttempts));
        assert!(DungeonGenerator::new(config).is_err());
    }

    #[test]
    fn test_start_room_first_and_painted() {
        let result = generate(&roomy().with_seed(4)).unwrap();
        let start = result.rooms[0].room;
        assert_eq!(start.center(), Coord::ORIGIN);
        assert!(start.cells().all(|c| result.grid.is_floor(c)));
    }

    #[test]
    fn test_corridor_does_not_retheme_earlier_room() {
        let result = generate(&roomy().with_seed(2)).unwrap();
        // The first two rooms are painted before any corridor exists
        for placed in result.rooms.iter().take(2) {
            for c in placed.room.cells() {
                assert_eq!(result.grid.theme(c), Some(ThemeId::ROOM_FLOOR));
            }
        }
        assert!(
            result
                .grid
                .floor_cells()
                .any(|(_, theme)| theme == ThemeId::CORRIDOR_FLOOR)
        );
    }

    #[test]
    fn test_links_match_corridors() {
        let config = DungeonConfig {
            extra_corridors: 6,
            ..roomy()
        };
        let result = generate(&config.with_seed(10)).unwrap();
        assert_eq!(result.links.len(), result.corridors.len());
        for &(a, b) in &result.links {
            let corridor = Corridor::new(result.rooms[a].room.center(), result.rooms[b].room.center());
            assert!(result.corridors.contains(&corridor));
        }
        assert!(result.is_connected());
    }

    #[test]
    fn test_listeners_fire_once_per_run() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut generator = DungeonGenerator::new(roomy()).unwrap();
        let seen = Arc::clone(&count);
        generator.subscribe(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        generator.generate();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        generator.regenerate(99);
        generator.regenerate(100);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(generator.config().seed, 100);
    }

    #[test]
    fn test_regenerate_discards_previous_state() {
        let mut generator = DungeonGenerator::new(roomy()).unwrap();
        let first = generator.regenerate(1);
        let again = generator.regenerate(1);
        assert_eq!(first, again);
    }

    #[test]
    fn test_set_config_keeps_old_on_error() {
        let mut generator = DungeonGenerator::new(roomy()).unwrap();
        let bad = DungeonConfig {
            room_count: 0,
            ..roomy()
        };
        assert_eq!(generator.set_config(bad), Err(ConfigError::NoRooms));
        assert_eq!(generator.config().room_count, 5);
    }

    #[test]
    fn test_single_room_has_no_corridors() {
        let config = DungeonConfig {
            room_count: 1,
            extra_corridors: 5,
            ..roomy()
        };
        let result = generate(&config).unwrap();
        assert_eq!(result.rooms.len(), 1);
        assert!(result.corridors.is_empty());
        assert!(result.is_connected());
        assert!(result.grid.wall_count() > 0);
    }
}
