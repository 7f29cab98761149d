//! The add-polygon screen: draw a shape, label it, save it.

use polymap_core::{Color, Coordinate, PolygonDraft, PolygonRecord, Shared};
use polymap_settings::DrawingSettings;
use polymap_store::PolygonStore;
use std::sync::Arc;

use crate::error::{DesignerError, DesignerResult};
use crate::session::{DrawingSession, DrawingState, MapEvent};
use crate::surface::{MapSurface, PolygonStyle};

/// Drawing session plus the save form opened when a shape completes.
pub struct AddPolygonFlow<S: MapSurface> {
    store: Arc<PolygonStore>,
    session: DrawingSession<S>,
    draft: Option<PolygonDraft>,
    default_color: Color,
}

impl<S: MapSurface> AddPolygonFlow<S> {
    pub fn new(store: Arc<PolygonStore>, surface: Shared<S>, settings: &DrawingSettings) -> Self {
        let style = PolygonStyle::from_settings(settings, settings.default_color.clone());
        Self {
            session: DrawingSession::new(surface, style)
                .with_event_bus(Arc::clone(store.event_bus())),
            store,
            draft: None,
            default_color: settings.default_color.clone(),
        }
    }

    /// Forwards a map event. Returns true when it opened the save form.
    pub fn handle(&mut self, event: MapEvent) -> bool {
        match self.session.handle(event) {
            Some(coordinates) => {
                self.draft = Some(PolygonDraft {
                    color: self.default_color.clone(),
                    ..PolygonDraft::for_coordinates(coordinates)
                });
                true
            }
            None => false,
        }
    }

    pub fn undo_last_vertex(&mut self) -> Option<Coordinate> {
        self.session.undo_last_vertex()
    }

    /// The open save form, if a shape is waiting for its label.
    pub fn draft(&self) -> Option<&PolygonDraft> {
        self.draft.as_ref()
    }

    /// Picks a color in the open form and previews it on the shape.
    pub fn set_color(&mut self, color: Color) {
        if let Some(draft) = &mut self.draft {
            draft.color = color.clone();
        }
        self.session.set_color(color);
    }

    /// Validates the form and saves the polygon.
    ///
    /// A rejected form stays open and nothing reaches the store. On success
    /// the drawn preview is cleared and the session re-armed.
    pub fn submit(&mut self, name: &str, price: f64, color: Color) -> DesignerResult<PolygonRecord> {
        let draft = self.draft.as_mut().ok_or(DesignerError::NoPendingShape)?;
        draft.name = name.to_string();
        draft.price = price;
        draft.color = color;

        let record = draft.validate()?;
        self.store.save(record.clone());
        tracing::info!("Saved polygon '{}' ({} vertices)", record.name, record.vertex_count());

        self.draft = None;
        self.session.arm();
        Ok(record)
    }

    /// Closes the form and removes the drawn shape from the map.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.session.cancel();
    }

    pub fn state(&self) -> DrawingState {
        self.session.state()
    }

    pub fn session(&self) -> &DrawingSession<S> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;
    use polymap_core::{shared, ValidationError};

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    fn flow() -> (
        Arc<PolygonStore>,
        Shared<HeadlessSurface>,
        AddPolygonFlow<HeadlessSurface>,
    ) {
        let store = Arc::new(PolygonStore::in_memory());
        let surface = shared(HeadlessSurface::new());
        let flow = AddPolygonFlow::new(store.clone(), surface.clone(), &DrawingSettings::default());
        (store, surface, flow)
    }

    fn draw(flow: &mut AddPolygonFlow<HeadlessSurface>, points: &[Coordinate]) -> bool {
        for p in points {
            flow.handle(MapEvent::Click(*p));
        }
        flow.handle(MapEvent::Complete)
    }

    #[test]
    fn test_completion_opens_draft_with_default_color() {
        let (_, _, mut flow) = flow();
        assert!(draw(&mut flow, &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]));

        let draft = flow.draft().unwrap();
        assert_eq!(draft.coordinates.len(), 3);
        assert_eq!(draft.color, Color::default());
        assert!(!draft.can_submit());
    }

    #[test]
    fn test_submit_saves_and_rearms() {
        let (store, surface, mut flow) = flow();
        draw(&mut flow, &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);

        let color = Color::parse("#FFB6C1").unwrap();
        let record = flow.submit("Orchard", 1500.0, color.clone()).unwrap();
        assert_eq!(store.polygons(), vec![record.clone()]);
        assert_eq!(record.color, color);
        assert!(flow.draft().is_none());
        assert_eq!(flow.state(), DrawingState::Idle);
        assert_eq!(surface.borrow().overlay_count(), 0);
    }

    #[test]
    fn test_invalid_form_never_reaches_store() {
        let (store, _, mut flow) = flow();
        draw(&mut flow, &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);

        assert_eq!(
            flow.submit("  ", 10.0, Color::default()),
            Err(DesignerError::Validation(ValidationError::EmptyName))
        );
        assert!(flow.submit("Lot", 0.0, Color::default()).is_err());
        assert!(store.is_empty());
        assert!(flow.draft().is_some());
    }

    #[test]
    fn test_two_vertex_shape_is_rejected() {
        let (store, _, mut flow) = flow();
        draw(&mut flow, &[c(0.0, 0.0), c(0.0, 1.0)]);
        assert!(matches!(
            flow.submit("Line", 10.0, Color::default()),
            Err(DesignerError::Validation(ValidationError::TooFewVertices { actual: 2, .. }))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_without_shape() {
        let (_, _, mut flow) = flow();
        assert_eq!(
            flow.submit("Lot", 10.0, Color::default()),
            Err(DesignerError::NoPendingShape)
        );
    }

    #[test]
    fn test_cancel_discards_everything() {
        let (store, surface, mut flow) = flow();
        draw(&mut flow, &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
        flow.cancel();

        assert!(flow.draft().is_none());
        assert!(store.is_empty());
        assert_eq!(surface.borrow().overlay_count(), 0);
    }

    #[test]
    fn test_color_change_previews_on_shape() {
        let (_, surface, mut flow) = flow();
        draw(&mut flow, &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
        let color = Color::parse("#F5DEB3").unwrap();
        flow.set_color(color.clone());

        assert_eq!(flow.draft().unwrap().color, color);
        assert_eq!(surface.borrow().polygons()[0].1.fill_color, color);
    }
}
