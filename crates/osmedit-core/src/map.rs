//! The map viewport as seen by editing code.

use std::f64::consts::PI;
use std::fmt;

use osmedit_model::{Extent, Loc};
use tracing::debug;

/// Below this zoom the map is view-only.
pub const MIN_EDITABLE_ZOOM: f64 = 16.0;
pub const MAX_ZOOM: f64 = 20.0;

const TILE_SIZE: f64 = 256.0;
const HEADER_HEIGHT: f64 = 60.0;
const FOOTER_HEIGHT: f64 = 30.0;
const EDGE_PAD: f64 = 10.0;

pub trait MapView: fmt::Debug {
    /// Whether features can currently be edited.
    fn editable(&self) -> bool;

    /// Visible extent minus the area covered by interface chrome.
    fn trimmed_extent(&self) -> Extent;

    /// Move the map so `target` is in view at an editable zoom.
    fn zoom_to_ease(&mut self, target: Extent);
}

/// A web-mercator viewport of a given pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: Loc,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Loc::default(),
            zoom: 2.0,
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl Viewport {
    pub fn new(center: Loc, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    fn world_size(zoom: f64) -> f64 {
        TILE_SIZE * zoom.exp2()
    }

    fn project(loc: Loc, zoom: f64) -> (f64, f64) {
        let size = Self::world_size(zoom);
        let x = (loc.lon + 180.0) / 360.0 * size;
        let lat = loc.lat.to_radians();
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn unproject(x: f64, y: f64, zoom: f64) -> Loc {
        let size = Self::world_size(zoom);
        let lon = x / size * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
        Loc::new(lon, lat)
    }

    /// Location under screen pixel `(px, py)`.
    pub fn invert(&self, px: f64, py: f64) -> Loc {
        let (cx, cy) = Self::project(self.center, self.zoom);
        Self::unproject(
            cx + px - self.width / 2.0,
            cy + py - self.height / 2.0,
            self.zoom,
        )
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.invert(0.0, self.height), self.invert(self.width, 0.0))
    }

    /// Highest zoom at which `extent` fits inside the trimmed viewport.
    pub fn trimmed_extent_zoom(&self, extent: Extent) -> f64 {
        let (x0, y0) = Self::project(extent.min, 0.0);
        let (x1, y1) = Self::project(extent.max, 0.0);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let available_w = self.width - 2.0 * EDGE_PAD;
        let available_h = self.height - HEADER_HEIGHT - FOOTER_HEIGHT - 2.0 * EDGE_PAD;
        let scale = (available_w / dx).min(available_h / dy);
        if scale.is_finite() {
            scale.log2()
        } else {
            f64::INFINITY
        }
    }
}

impl MapView for Viewport {
    fn editable(&self) -> bool {
        self.zoom >= MIN_EDITABLE_ZOOM
    }

    fn trimmed_extent(&self) -> Extent {
        Extent::new(
            self.invert(EDGE_PAD, self.height - FOOTER_HEIGHT - EDGE_PAD),
            self.invert(self.width - EDGE_PAD, HEADER_HEIGHT + EDGE_PAD),
        )
    }

    fn zoom_to_ease(&mut self, target: Extent) {
        let zoom = self
            .trimmed_extent_zoom(target)
            .clamp(MIN_EDITABLE_ZOOM, MAX_ZOOM);
        self.center = target.center();
        self.zoom = zoom;
        debug!(lon = self.center.lon, lat = self.center.lat, zoom, "map moved");
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn projection_round_trips() {
        let loc = Loc::new(13.4, 52.5);
        let (x, y) = Viewport::project(loc, 16.0);
        let back = Viewport::unproject(x, y, 16.0);
        assert!((back.lon - loc.lon).abs() < 1e-9);
        assert!((back.lat - loc.lat).abs() < 1e-9);
    }

    #[test]
    fn trimmed_extent_is_inside_full_extent() {
        let viewport = Viewport::new(Loc::new(10.0, 45.0), 17.0, 800.0, 600.0);
        let full = viewport.extent();
        let trimmed = viewport.trimmed_extent();
        assert!(full.contains(trimmed.min) && full.contains(trimmed.max));
        assert!(trimmed.contains(viewport.center));
    }

    #[test]
    fn easing_to_a_point_makes_it_visible_and_editable() {
        let mut viewport = Viewport::default();
        assert!(!viewport.editable());
        let target = Loc::new(-0.1, 51.5);
        viewport.zoom_to_ease(Extent::from_loc(target));
        assert!(viewport.editable());
        assert_eq!(viewport.zoom, MAX_ZOOM);
        assert!(viewport.trimmed_extent().contains(target));
    }

    proptest! {
        #[test]
        fn easing_always_lands_in_the_editable_range(
            lon in -179.0f64..179.0,
            lat in -80.0f64..80.0,
            span in 0.0f64..0.01,
        ) {
            let mut viewport = Viewport::default();
            let target = Extent::new(Loc::new(lon, lat), Loc::new(lon + span, lat + span));
            viewport.zoom_to_ease(target);
            prop_assert!(viewport.editable());
            prop_assert!(viewport.zoom <= MAX_ZOOM);
            prop_assert!(viewport.trimmed_extent().contains(target.center()));
        }
    }
}
