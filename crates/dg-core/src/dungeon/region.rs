//! Theme regions
//!
//! Regions partition part of the map into non-overlapping zones, each with a
//! floor and wall theme. Painting code asks the catalog which theme owns a
//! coordinate and falls back to the configured defaults outside every region.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use crate::config::{PlacementBounds, RegionConfig};
use crate::rng::RandomSource;

use super::cell::Theme;
use super::coord::Coord;
use super::room::Room;

/// Theme lookup consumed by the painting steps
pub trait RegionLookup {
    /// Theme of the region containing `at`, if any
    fn theme_at(&self, at: Coord) -> Option<Theme>;

    /// Theme at `at`, or `fallback` outside every region
    fn theme_or(&self, at: Coord, fallback: Theme) -> Theme {
        self.theme_at(at).unwrap_or(fallback)
    }
}

/// A themed zone of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub rect: Room,
    pub theme: Theme,
}

/// Set of pairwise non-overlapping regions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `config.count` candidate regions inside `bounds`; candidates that
    /// overlap an accepted region are dropped.
    pub fn generate(
        config: &RegionConfig,
        bounds: &PlacementBounds,
        rng: &mut impl RandomSource,
    ) -> Self {
        let mut catalog = Self::new();
        if config.palette.is_empty() {
            return catalog;
        }
        for _ in 0..config.count {
            let size = config.size.sample(rng);
            let origin = bounds.random_origin(size.width, size.height, rng);
            let theme = config.palette[rng.index(config.palette.len())];
            let region = Region {
                rect: Room::new(origin.x, origin.y, size.width, size.height),
                theme,
            };
            if !catalog.try_insert(region) {
                log::debug!("discarded region {} overlapping an existing one", region.rect);
            }
        }
        catalog
    }

    /// Accept a region unless it overlaps one already present
    pub fn try_insert(&mut self, region: Region) -> bool {
        if region.rect.is_sentinel() || self.regions.iter().any(|r| r.rect.overlaps(&region.rect))
        {
            return false;
        }
        self.regions.push(region);
        true
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl RegionLookup for RegionCatalog {
    fn theme_at(&self, at: Coord) -> Option<Theme> {
        self.regions
            .iter()
            .find(|r| r.rect.contains(at))
            .map(|r| r.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SizeRange;
    use crate::dungeon::cell::ThemeId;
    use crate::rng::GameRng;

    fn theme(n: u16) -> Theme {
        Theme::new(ThemeId(n), ThemeId(n + 100))
    }

    #[test]
    fn test_overlapping_region_discarded() {
        let mut catalog = RegionCatalog::new();
        assert!(catalog.try_insert(Region {
            rect: Room::new(0, 0, 10, 10),
            theme: theme(1),
        }));
        assert!(!catalog.try_insert(Region {
            rect: Room::new(5, 5, 10, 10),
            theme: theme(2),
        }));
        assert!(catalog.try_insert(Region {
            rect: Room::new(10, 0, 10, 10),
            theme: theme(3),
        }));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_theme_lookup_and_fallback() {
        let mut catalog = RegionCatalog::new();
        catalog.try_insert(Region {
            rect: Room::new(0, 0, 4, 4),
            theme: theme(7),
        });
        assert_eq!(catalog.theme_at(Coord::new(3, 3)), Some(theme(7)));
        assert_eq!(catalog.theme_at(Coord::new(4, 3)), None);
        assert_eq!(catalog.theme_or(Coord::new(-1, 0), theme(0)), theme(0));
    }

    #[test]
    fn test_generated_regions_never_overlap() {
        let config = RegionConfig {
            count: 40,
            size: SizeRange::new(3, 12),
            palette: vec![theme(1), theme(2), theme(3)],
        };
        let bounds = PlacementBounds::new(Coord::new(0, 0), Coord::new(40, 40));
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let catalog = RegionCatalog::generate(&config, &bounds, &mut rng);
            assert!(!catalog.is_empty());
            assert!(catalog.len() <= 40);
            let regions = catalog.regions();
            for (i, a) in regions.iter().enumerate() {
                for b in &regions[i + 1..] {
                    assert!(!a.rect.overlaps(&b.rect), "seed {seed}: {} vs {}", a.rect, b.rect);
                }
                assert!(config.palette.contains(&a.theme));
            }
        }
    }
}
