//! Planar geometry over lat/lng pairs.
//!
//! Coordinates are treated as plain (lat, lng) points; shapes crossing the
//! antimeridian are not special-cased.

use polymap_core::Coordinate;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Bounds of `points`, or `None` when there are none.
    pub fn from_coordinates(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        for p in rest {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: Coordinate) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lng: (self.min_lng + self.max_lng) / 2.0,
        }
    }

    pub fn contains(&self, p: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&p.lat)
            && (self.min_lng..=self.max_lng).contains(&p.lng)
    }
}

/// Where a polygon's label is placed: the center of its bounding box.
///
/// This is not the centroid; for concave shapes the anchor may fall outside
/// the polygon.
pub fn label_anchor(points: &[Coordinate]) -> Option<Coordinate> {
    Bounds::from_coordinates(points).map(|b| b.center())
}
