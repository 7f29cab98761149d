//! Polygon drawing session.
//!
//! Turns map clicks into an ordered vertex list:
//!
//! ```text
//! Idle --click--> Drawing --click--> Drawing --complete--> Complete
//!  ^                                                           |
//!  +------------------------- arm() / cancel() ----------------+
//! ```
//!
//! A completed shape is emitted exactly once. The session then ignores map
//! input until it is re-armed.

use polymap_core::{AppEvent, Color, Coordinate, DrawingEvent, EventBus, Shared};
use std::sync::Arc;

use crate::surface::{MapSurface, OverlayId, PolygonStyle};

/// Input forwarded from the map widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Click(Coordinate),
    /// The widget's shape-completion gesture.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    /// Armed, nothing drawn yet.
    Idle,
    /// At least one vertex placed.
    Drawing,
    /// Shape finalized; map input is ignored until re-armed.
    Complete,
}

pub struct DrawingSession<S: MapSurface> {
    surface: Shared<S>,
    state: DrawingState,
    vertices: Vec<Coordinate>,
    overlay: Option<OverlayId>,
    style: PolygonStyle,
    bus: Option<Arc<EventBus>>,
}

impl<S: MapSurface> DrawingSession<S> {
    /// Starts an armed session drawing with `style`.
    pub fn new(surface: Shared<S>, style: PolygonStyle) -> Self {
        surface.borrow_mut().set_drawing_mode(true);
        Self {
            surface,
            state: DrawingState::Idle,
            vertices: Vec::new(),
            overlay: None,
            style: PolygonStyle {
                editable: true,
                ..style
            },
            bus: None,
        }
    }

    /// Publishes drawing transitions on `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Feeds one widget event. Returns the finished vertex list on the
    /// completion that ends a drawing, and `None` otherwise.
    pub fn handle(&mut self, event: MapEvent) -> Option<Vec<Coordinate>> {
        match (self.state, event) {
            (DrawingState::Idle, MapEvent::Click(at)) => {
                self.vertices.push(at);
                let id = self
                    .surface
                    .borrow_mut()
                    .add_polygon(&self.vertices, &self.style);
                self.overlay = Some(id);
                self.state = DrawingState::Drawing;
                self.publish(DrawingEvent::Started { at });
                None
            }
            (DrawingState::Drawing, MapEvent::Click(at)) => {
                self.vertices.push(at);
                self.sync_overlay();
                self.publish(DrawingEvent::VertexAdded {
                    index: self.vertices.len() - 1,
                    at,
                });
                None
            }
            (DrawingState::Drawing, MapEvent::Complete) => {
                self.state = DrawingState::Complete;
                self.surface.borrow_mut().set_drawing_mode(false);
                tracing::debug!("Shape completed with {} vertices", self.vertices.len());
                self.publish(DrawingEvent::Completed {
                    vertices: self.vertices.len(),
                });
                Some(self.vertices.clone())
            }
            (DrawingState::Idle, MapEvent::Complete) => {
                tracing::trace!("Ignoring completion with nothing drawn");
                None
            }
            (DrawingState::Complete, _) => {
                tracing::trace!("Ignoring {:?} until the session is re-armed", event);
                None
            }
        }
    }

    /// Removes the most recent vertex while drawing.
    ///
    /// Undoing the only vertex drops the in-progress shape and returns the
    /// session to `Idle`.
    pub fn undo_last_vertex(&mut self) -> Option<Coordinate> {
        if self.state != DrawingState::Drawing {
            return None;
        }
        let removed = self.vertices.pop()?;
        if self.vertices.is_empty() {
            self.remove_overlay();
            self.state = DrawingState::Idle;
        } else {
            self.sync_overlay();
        }
        self.publish(DrawingEvent::VertexRemoved {
            remaining: self.vertices.len(),
        });
        Some(removed)
    }

    /// Abandons the current shape: its overlay is removed and its vertices
    /// discarded. The session is armed again afterwards.
    pub fn cancel(&mut self) {
        let discarded = self.vertices.len();
        self.reset();
        tracing::debug!("Drawing cancelled, {} vertices discarded", discarded);
        self.publish(DrawingEvent::Cancelled { discarded });
    }

    /// Clears a completed shape and accepts a new drawing.
    pub fn arm(&mut self) {
        self.reset();
        self.publish(DrawingEvent::Rearmed);
    }

    /// Restyles the in-progress shape with `color`.
    pub fn set_color(&mut self, color: Color) {
        self.style = self.style.with_color(color);
        if let Some(id) = self.overlay {
            if let Err(e) = self.surface.borrow_mut().set_polygon_style(id, &self.style) {
                tracing::warn!("Failed to restyle drawing overlay: {}", e);
            }
        }
    }

    pub fn state(&self) -> DrawingState {
        self.state
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    pub fn style(&self) -> &PolygonStyle {
        &self.style
    }

    fn reset(&mut self) {
        self.remove_overlay();
        self.vertices.clear();
        self.state = DrawingState::Idle;
        self.surface.borrow_mut().set_drawing_mode(true);
    }

    fn sync_overlay(&mut self) {
        if let Some(id) = self.overlay {
            if let Err(e) = self.surface.borrow_mut().set_polygon_path(id, &self.vertices) {
                tracing::warn!("Failed to update drawing overlay: {}", e);
            }
        }
    }

    fn remove_overlay(&mut self) {
        if let Some(id) = self.overlay.take() {
            self.surface.borrow_mut().remove_overlay(id);
        }
    }

    fn publish(&self, event: DrawingEvent) {
        if let Some(bus) = &self.bus {
            let _ = bus.publish(AppEvent::Drawing(event));
        }
    }
}

impl<S: MapSurface> Drop for DrawingSession<S> {
    fn drop(&mut self) {
        if let Ok(mut surface) = self.surface.try_borrow_mut() {
            if let Some(id) = self.overlay.take() {
                surface.remove_overlay(id);
            }
            surface.set_drawing_mode(false);
        }
    }
}
