use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Geographic coordinate in degrees.
///
/// Serialized as `{ "lat": .., "lng": .. }`, the shape the map widget emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// (0, 0), used while geolocation is unresolved.
    pub const ORIGIN: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        let coord = Self { lat, lng };
        coord.validate()?;
        Ok(coord)
    }

    /// Checks that both components are finite and within range.
    ///
    /// Deserialized coordinates bypass [`Coordinate::new`], so callers that
    /// accept external data run this before trusting a vertex.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.lat.is_finite() {
            return Err(CoordinateError::NotFinite { component: "lat" });
        }
        if !self.lng.is_finite() {
            return Err(CoordinateError::NotFinite { component: "lng" });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoordinateError::LatitudeOutOfRange { value: self.lat });
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(CoordinateError::LongitudeOutOfRange { value: self.lng });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
