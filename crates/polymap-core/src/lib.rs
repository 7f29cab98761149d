//! # Polymap Core
//!
//! Core types, traits, and utilities for polymap.
//! Provides the value types shared by every crate (coordinates, polygon
//! records, colors), the error taxonomy, price formatting, and the event
//! bus used to notify views of store changes.

pub mod currency;
pub mod data;
pub mod error;
pub mod event_bus;
pub mod types;

pub use currency::{format_price, CurrencyFormat};

pub use data::{
    validate_label, validate_name, Color, Coordinate, PolygonDraft, PolygonId, PolygonRecord,
    PresetColor, MIN_POLYGON_VERTICES, PRESET_COLORS,
};

pub use error::{CoordinateError, ValidationError};

// Re-export event bus for convenience
pub use event_bus::{
    AppEvent, DrawingEvent, EventBus, EventBusError, EventCategory, EventFilter,
    StoreEvent, SubscriptionId,
};

pub use types::{shared, Shared};
