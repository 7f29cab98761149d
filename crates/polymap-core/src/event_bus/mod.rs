//! # Event Bus Module
//!
//! Publish/subscribe notification between the polygon store, drawing
//! sessions, and the views that render them.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Callback subscribers run synchronously on the publishing thread
//! - Channel subscribers poll a broadcast receiver on their next render
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polymap_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Store]),
//!     |event| tracing::info!("store changed: {}", event.description()),
//! );
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
