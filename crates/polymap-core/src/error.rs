//! Error handling for polymap
//!
//! Provides the error types shared by every layer:
//! - Coordinate errors (non-finite or out-of-range lat/lng)
//! - Validation errors (save form rejected before reaching the store)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Coordinate error type
///
/// Raised when a latitude/longitude pair cannot be represented on the map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// One of the components is NaN or infinite
    #[error("Coordinate component '{component}' is not finite")]
    NotFinite {
        /// Either "lat" or "lng".
        component: &'static str,
    },

    /// Latitude outside [-90, 90]
    #[error("Latitude {value} out of range [-90, 90]")]
    LatitudeOutOfRange {
        /// The rejected latitude.
        value: f64,
    },

    /// Longitude outside [-180, 180]
    #[error("Longitude {value} out of range [-180, 180]")]
    LongitudeOutOfRange {
        /// The rejected longitude.
        value: f64,
    },
}

/// Validation error type
///
/// Represents a save or edit form that must not reach the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Fewer vertices than needed to close a polygon
    #[error("A polygon needs at least {required} points, got {actual}")]
    TooFewVertices {
        /// Minimum vertex count.
        required: usize,
        /// Vertices actually supplied.
        actual: usize,
    },

    /// Name is empty or whitespace
    #[error("Polygon name must not be empty")]
    EmptyName,

    /// Price is zero, negative, or not a number
    #[error("Polygon price must be a positive number, got {price}")]
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },

    /// Color is not a `#RRGGBB` value
    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// A vertex is not a valid coordinate
    #[error("Invalid vertex {index}: {source}")]
    InvalidVertex {
        /// Position of the vertex in the path.
        index: usize,
        /// The underlying coordinate error.
        #[source]
        source: CoordinateError,
    },
}
