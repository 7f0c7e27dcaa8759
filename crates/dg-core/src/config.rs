//! Generation configuration
//!
//! Every knob of a run lives in [`DungeonConfig`]. All structs deserialize
//! with defaults, so a partial JSON document only overrides what it names.
//! The three historic generator flavours (fixed or random start room, with
//! or without theme regions, directional or ring walls) are all expressed as
//! settings here rather than as separate code paths.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::dungeon::{Coord, Theme, ThemeId};
use crate::error::ConfigError;
use crate::rng::RandomSource;

/// Largest coordinate magnitude, room side and padding a configuration may
/// name. Keeps every edge and inflated rectangle well inside `i32`.
pub const MAX_EXTENT: i32 = 1 << 16;

/// Widest corridor a configuration may ask for
pub const MAX_CORRIDOR_WIDTH: i32 = 255;

fn within(what: &'static str, value: i32, limit: i32) -> Result<(), ConfigError> {
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { what, value, limit })
    }
}

/// Width and height of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Inclusive range of side lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: i32,
    pub max: i32,
}

impl SizeRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }

    /// Draw a width and a height independently
    pub fn sample(&self, rng: &mut impl RandomSource) -> Size {
        let width = rng.uniform_int(self.min, self.max);
        let height = rng.uniform_int(self.min, self.max);
        Size::new(width, height)
    }

    fn check(&self, what: &'static str) -> Result<(), ConfigError> {
        if self.is_valid() {
            within(what, self.max, MAX_EXTENT)
        } else {
            Err(ConfigError::InvalidSizeRange {
                what,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Half-open area `[min.x, max.x) × [min.y, max.y)` that room positions are
/// drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementBounds {
    pub min: Coord,
    pub max: Coord,
}

impl PlacementBounds {
    pub const fn new(min: Coord, max: Coord) -> Self {
        Self { min, max }
    }

    /// Bounds `[0, width) × [0, height)`
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(Coord::ORIGIN, Coord::new(width, height))
    }

    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Shift an origin so a `width × height` rectangle stays inside the
    /// bounds. When the rectangle is larger than the bounds it is pinned to
    /// the minimum corner.
    pub fn clamp_origin(&self, origin: Coord, width: i32, height: i32) -> Coord {
        let hi_x = (self.max.x - width).max(self.min.x);
        let hi_y = (self.max.y - height).max(self.min.y);
        Coord::new(
            origin.x.clamp(self.min.x, hi_x),
            origin.y.clamp(self.min.y, hi_y),
        )
    }

    /// Uniform position in the bounds, then clamped to fit the rectangle
    pub fn random_origin(&self, width: i32, height: i32, rng: &mut impl RandomSource) -> Coord {
        let x = rng.uniform_int(self.min.x, self.max.x - 1);
        let y = rng.uniform_int(self.min.y, self.max.y - 1);
        self.clamp_origin(Coord::new(x, y), width, height)
    }
}

/// Where the first room goes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StartPlacement {
    /// Centered on [`DungeonConfig::start_center`]
    #[default]
    Fixed,
    /// Anywhere in the placement bounds
    Random,
}

/// Which neighbors of a floor cell become wall
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WallPolicy {
    /// Two cells above, one cell below, left and right
    #[default]
    Directional,
    /// All eight neighbors
    Ring,
}

/// How a newly placed room picks the room it connects to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LinkStrategy {
    /// Closest existing room, center to center
    #[default]
    Nearest,
    /// Uniformly random existing room
    Random,
}

/// Default themes used outside every region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub room_floor: ThemeId,
    pub corridor_floor: ThemeId,
    pub wall: ThemeId,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            room_floor: ThemeId::ROOM_FLOOR,
            corridor_floor: ThemeId::CORRIDOR_FLOOR,
            wall: ThemeId::WALL,
        }
    }
}

impl ThemeConfig {
    pub const fn room(&self) -> Theme {
        Theme::new(self.room_floor, self.wall)
    }

    pub const fn corridor(&self) -> Theme {
        Theme::new(self.corridor_floor, self.wall)
    }
}

/// Theme region setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Number of candidate regions drawn; overlapping ones are dropped
    pub count: u32,
    pub size: SizeRange,
    /// Themes a region may be assigned
    pub palette: Vec<Theme>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            count: 4,
            size: SizeRange::new(8, 16),
            palette: vec![
                Theme::new(ThemeId(10), ThemeId(11)),
                Theme::new(ThemeId(20), ThemeId(21)),
                Theme::new(ThemeId(30), ThemeId(31)),
            ],
        }
    }
}

/// Full description of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Area room positions are drawn from
    pub bounds: PlacementBounds,
    pub start_placement: StartPlacement,
    /// Center of the first room for [`StartPlacement::Fixed`]
    pub start_center: Coord,
    /// Size of the first room; drawn from `room_size` when unset
    pub start_size: Option<Size>,
    pub room_size: SizeRange,
    /// Rooms requested, including the start room
    pub room_count: u32,
    pub corridor_width: i32,
    /// Empty margin kept around rooms at the start of each placement
    pub room_padding: i32,
    /// Placement attempts per room before giving up
    pub max_attempts: u32,
    pub regions: Option<RegionConfig>,
    pub wall_policy: WallPolicy,
    pub link: LinkStrategy,
    /// Random extra room pairs to connect after placement
    pub extra_corridors: u32,
    pub themes: ThemeConfig,
    pub seed: u64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            bounds: PlacementBounds::from_size(30, 30),
            start_placement: StartPlacement::Fixed,
            start_center: Coord::ORIGIN,
            start_size: None,
            room_size: SizeRange::new(5, 9),
            room_count: 10,
            corridor_width: 1,
            room_padding: 1,
            max_attempts: 10,
            regions: None,
            wall_policy: WallPolicy::Directional,
            link: LinkStrategy::Nearest,
            extra_corridors: 0,
            themes: ThemeConfig::default(),
            seed: 0,
        }
    }
}

impl DungeonConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the configuration describes a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.is_empty() {
            return Err(ConfigError::EmptyBounds {
                min_x: self.bounds.min.x,
                min_y: self.bounds.min.y,
                max_x: self.bounds.max.x,
                max_y: self.bounds.max.y,
            });
        }
        within("bounds min x", self.bounds.min.x, MAX_EXTENT)?;
        within("bounds min y", self.bounds.min.y, MAX_EXTENT)?;
        within("bounds max x", self.bounds.max.x, MAX_EXTENT)?;
        within("bounds max y", self.bounds.max.y, MAX_EXTENT)?;
        within("start center x", self.start_center.x, MAX_EXTENT)?;
        within("start center y", self.start_center.y, MAX_EXTENT)?;
        self.room_size.check("room")?;
        if let Some(size) = self.start_size {
            if size.width < 1 || size.height < 1 {
                return Err(ConfigError::InvalidStartRoom {
                    width: size.width,
                    height: size.height,
                });
            }
            within("start room width", size.width, MAX_EXTENT)?;
            within("start room height", size.height, MAX_EXTENT)?;
        }
        if self.room_count == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.corridor_width < 1 {
            return Err(ConfigError::InvalidCorridorWidth(self.corridor_width));
        }
        within("corridor width", self.corridor_width, MAX_CORRIDOR_WIDTH)?;
        if self.room_padding < 0 {
            return Err(ConfigError::NegativePadding(self.room_padding));
        }
        within("room padding", self.room_padding, MAX_EXTENT)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        if let Some(regions) = &self.regions {
            regions.size.check("region")?;
            if regions.palette.is_empty() {
                return Err(ConfigError::EmptyPalette);
            }
        }
        Ok(())
    }
}
