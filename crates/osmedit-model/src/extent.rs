use serde::{Deserialize, Serialize};

use crate::entity::Loc;

/// An axis-aligned lon/lat bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: Loc,
    pub max: Loc,
}

impl Extent {
    /// Build an extent from any two opposite corners.
    pub fn new(a: Loc, b: Loc) -> Self {
        Self {
            min: Loc::new(a.lon.min(b.lon), a.lat.min(b.lat)),
            max: Loc::new(a.lon.max(b.lon), a.lat.max(b.lat)),
        }
    }

    pub fn from_loc(loc: Loc) -> Self {
        Self { min: loc, max: loc }
    }

    /// Edges are inclusive.
    pub fn contains(&self, loc: Loc) -> bool {
        loc.lon >= self.min.lon
            && loc.lon <= self.max.lon
            && loc.lat >= self.min.lat
            && loc.lat <= self.max.lat
    }

    #[must_use]
    pub fn extend(&self, loc: Loc) -> Self {
        Self {
            min: Loc::new(self.min.lon.min(loc.lon), self.min.lat.min(loc.lat)),
            max: Loc::new(self.max.lon.max(loc.lon), self.max.lat.max(loc.lat)),
        }
    }

    pub fn center(&self) -> Loc {
        Loc::new(
            (self.min.lon + self.max.lon) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let extent = Extent::new(Loc::new(1.0, 1.0), Loc::new(0.0, 0.0));
        assert!(extent.contains(Loc::new(0.0, 0.0)));
        assert!(extent.contains(Loc::new(0.5, 1.0)));
        assert!(!extent.contains(Loc::new(1.1, 0.5)));
    }

    #[test]
    fn extend_grows_bounds() {
        let extent = Extent::from_loc(Loc::new(0.0, 0.0)).extend(Loc::new(-2.0, 3.0));
        assert_eq!(extent.min, Loc::new(-2.0, 0.0));
        assert_eq!(extent.max, Loc::new(0.0, 3.0));
        assert_eq!(extent.center(), Loc::new(-1.0, 1.5));
    }
}
