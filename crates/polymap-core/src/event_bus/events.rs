//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::data::{Coordinate, PolygonId};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Polygon collection changes
    Store(StoreEvent),
    /// Drawing session progress
    Drawing(DrawingEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Store(_) => EventCategory::Store,
            AppEvent::Drawing(_) => EventCategory::Drawing,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Store(e) => e.description(),
            AppEvent::Drawing(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Polygon store mutations.
    Store,
    /// Drawing session transitions.
    Drawing,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Store => write!(f, "Store"),
            EventCategory::Drawing => write!(f, "Drawing"),
        }
    }
}

/// Polygon store mutation events.
///
/// Every variant carries the store revision reached by the mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A record was appended
    Saved {
        revision: u64,
        id: PolygonId,
        name: String,
    },
    /// The whole collection was replaced
    Replaced { revision: u64, count: usize },
    /// The collection was emptied
    Cleared { revision: u64, removed: usize },
    /// Records were removed by name or id
    Deleted {
        revision: u64,
        key: String,
        removed: usize,
    },
    /// The collection was re-read from durable storage
    Reloaded { revision: u64, count: usize },
}

impl StoreEvent {
    pub fn revision(&self) -> u64 {
        match self {
            StoreEvent::Saved { revision, .. }
            | StoreEvent::Replaced { revision, .. }
            | StoreEvent::Cleared { revision, .. }
            | StoreEvent::Deleted { revision, .. }
            | StoreEvent::Reloaded { revision, .. } => *revision,
        }
    }

    pub fn description(&self) -> String {
        match self {
            StoreEvent::Saved { id, name, .. } => format!("Saved polygon '{}' ({})", name, id),
            StoreEvent::Replaced { count, .. } => format!("Replaced collection ({} polygons)", count),
            StoreEvent::Cleared { removed, .. } => format!("Cleared {} polygons", removed),
            StoreEvent::Deleted { key, removed, .. } => {
                format!("Deleted {} polygon(s) matching '{}'", removed, key)
            }
            StoreEvent::Reloaded { count, .. } => format!("Reloaded {} polygons", count),
        }
    }
}

/// Drawing session transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawingEvent {
    /// First vertex placed
    Started { at: Coordinate },
    /// A vertex was appended
    VertexAdded { index: usize, at: Coordinate },
    /// The last vertex was undone
    VertexRemoved { remaining: usize },
    /// The shape was finalized
    Completed { vertices: usize },
    /// The in-progress shape was abandoned
    Cancelled { discarded: usize },
    /// Drawing mode was re-enabled
    Rearmed,
}

impl DrawingEvent {
    pub fn description(&self) -> String {
        match self {
            DrawingEvent::Started { at } => format!("Drawing started at {}", at),
            DrawingEvent::VertexAdded { index, at } => format!("Vertex {} at {}", index, at),
            DrawingEvent::VertexRemoved { remaining } => {
                format!("Vertex removed, {} remaining", remaining)
            }
            DrawingEvent::Completed { vertices } => {
                format!("Drawing completed with {} vertices", vertices)
            }
            DrawingEvent::Cancelled { discarded } => {
                format!("Drawing cancelled, {} vertices discarded", discarded)
            }
            DrawingEvent::Rearmed => "Drawing mode re-armed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category() {
        let event = AppEvent::Store(StoreEvent::Cleared {
            revision: 3,
            removed: 2,
        });
        assert_eq!(event.category(), EventCategory::Store);
        assert_eq!(event.description(), "Cleared 2 polygons");

        let event = AppEvent::Drawing(DrawingEvent::Rearmed);
        assert_eq!(event.category(), EventCategory::Drawing);
    }

    #[test]
    fn test_revision() {
        let event = StoreEvent::Deleted {
            revision: 7,
            key: "Lot 4".to_string(),
            removed: 2,
        };
        assert_eq!(event.revision(), 7);
        assert_eq!(event.description(), "Deleted 2 polygon(s) matching 'Lot 4'");
    }
}
