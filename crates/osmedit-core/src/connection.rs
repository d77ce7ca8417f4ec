//! Which parts of the map have been loaded from the remote source.

use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;

use osmedit_model::{Extent, Loc};

/// Zoom level at which data tiles are requested.
pub const TILE_ZOOM: u8 = 16;

pub trait DataSource: fmt::Debug {
    /// Whether the tile containing `loc` has finished loading.
    fn is_data_loaded(&self, loc: Loc) -> bool;
}

/// A slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl Tile {
    /// The tile at zoom `z` containing `loc`. Coordinates outside the
    /// mercator range are clamped to the edge tiles.
    pub fn containing(loc: Loc, z: u8) -> Self {
        let n = f64::from(1u32 << z);
        let lat = loc.lat.to_radians();
        let x = ((loc.lon + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor();
        let max = n - 1.0;
        Self {
            z,
            x: x.clamp(0.0, max) as u32,
            y: if y.is_nan() { 0 } else { y.clamp(0.0, max) as u32 },
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Loaded-tile bookkeeping for an in-memory data source.
#[derive(Debug, Clone, Default)]
pub struct TileCoverage {
    complete: bool,
    loaded: BTreeSet<Tile>,
}

impl TileCoverage {
    /// Nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everywhere counts as loaded; used for graphs read from a file.
    pub fn complete() -> Self {
        Self {
            complete: true,
            loaded: BTreeSet::new(),
        }
    }

    pub fn mark_loaded(&mut self, tile: Tile) {
        self.loaded.insert(tile);
    }

    /// Mark every tile overlapping `extent` as loaded.
    pub fn mark_extent_loaded(&mut self, extent: Extent) {
        let top_left = Tile::containing(Loc::new(extent.min.lon, extent.max.lat), TILE_ZOOM);
        let bottom_right = Tile::containing(Loc::new(extent.max.lon, extent.min.lat), TILE_ZOOM);
        for x in top_left.x..=bottom_right.x {
            for y in top_left.y..=bottom_right.y {
                self.loaded.insert(Tile { z: TILE_ZOOM, x, y });
            }
        }
    }

    pub fn loaded_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.loaded.iter()
    }
}

impl DataSource for TileCoverage {
    fn is_data_loaded(&self, loc: Loc) -> bool {
        self.complete || self.loaded.contains(&Tile::containing(loc, TILE_ZOOM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_tile_is_centered() {
        let tile = Tile::containing(Loc::new(0.0, 0.0), 1);
        assert_eq!(tile, Tile { z: 1, x: 1, y: 1 });
        assert_eq!(Tile::containing(Loc::new(-180.0, 85.0), 2).to_string(), "2/0/0");
    }

    #[test]
    fn coverage_tracks_loaded_tiles() {
        let mut coverage = TileCoverage::new();
        let here = Loc::new(8.54, 47.37);
        assert!(!coverage.is_data_loaded(here));

        coverage.mark_loaded(Tile::containing(here, TILE_ZOOM));
        assert!(coverage.is_data_loaded(here));
        assert!(!coverage.is_data_loaded(Loc::new(9.0, 47.37)));
    }

    #[test]
    fn extent_marking_covers_corners() {
        let mut coverage = TileCoverage::new();
        let extent = Extent::new(Loc::new(8.50, 47.35), Loc::new(8.52, 47.36));
        coverage.mark_extent_loaded(extent);
        assert!(coverage.is_data_loaded(extent.min));
        assert!(coverage.is_data_loaded(extent.max));
        assert!(coverage.is_data_loaded(extent.center()));
        assert!(coverage.loaded_tiles().count() > 1);
    }

    #[test]
    fn complete_coverage_loads_everything() {
        assert!(TileCoverage::complete().is_data_loaded(Loc::new(170.0, -40.0)));
    }
}
