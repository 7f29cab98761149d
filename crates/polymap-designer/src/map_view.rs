//! Home map: every stored polygon drawn with its label.
//!
//! The view listens to the store through a broadcast receiver and rebuilds
//! its overlays on the next [`MapView::render`] after any change.

use polymap_core::{AppEvent, CurrencyFormat, PolygonId, PolygonRecord, Shared};
use polymap_settings::Config;
use polymap_store::PolygonStore;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};

use crate::overlay::PolygonOverlay;
use crate::surface::{MapSurface, PolygonStyle};

type SharedClickHandler = Rc<dyn Fn(PolygonRecord)>;

pub struct MapView<S: MapSurface> {
    store: Arc<PolygonStore>,
    surface: Shared<S>,
    receiver: Receiver<AppEvent>,
    overlays: Vec<PolygonOverlay<S>>,
    style: PolygonStyle,
    currency: CurrencyFormat,
    on_click: Option<SharedClickHandler>,
    dirty: bool,
}

impl<S: MapSurface> MapView<S> {
    pub fn new(store: Arc<PolygonStore>, surface: Shared<S>, config: &Config) -> Self {
        let receiver = store.receiver();
        Self {
            style: PolygonStyle::from_settings(&config.drawing, config.drawing.default_color.clone()),
            currency: config.labels.currency.clone(),
            store,
            surface,
            receiver,
            overlays: Vec::new(),
            on_click: None,
            dirty: true,
        }
    }

    /// Handler receiving the clicked polygon's record, for the details panel.
    pub fn set_on_polygon_click<F>(&mut self, handler: F)
    where
        F: Fn(PolygonRecord) + 'static,
    {
        self.on_click = Some(Rc::new(handler));
        self.dirty = true;
    }

    /// Redraws if the store changed since the last render.
    ///
    /// Returns true when the overlays were rebuilt.
    pub fn render(&mut self) -> bool {
        self.drain_events();
        if !self.dirty {
            return false;
        }

        self.overlays.clear();
        let polygons = self.store.polygons();
        tracing::debug!("Rendering {} polygons", polygons.len());

        self.overlays = polygons
            .into_iter()
            .map(|record| {
                let mut overlay = PolygonOverlay::new(
                    self.surface.clone(),
                    record,
                    &self.style,
                    self.currency.clone(),
                );
                if let Some(handler) = &self.on_click {
                    let handler = Rc::clone(handler);
                    overlay.set_on_click(move |record| handler(record));
                }
                overlay
            })
            .collect();
        self.dirty = false;
        true
    }

    /// Simulates a click on the overlay of `id`.
    pub fn click(&self, id: &PolygonId) -> bool {
        self.overlays
            .iter()
            .find(|o| &o.record().id == id)
            .is_some_and(|o| o.click())
    }

    pub fn overlays(&self) -> &[PolygonOverlay<S>] {
        &self.overlays
    }

    pub fn overlay_mut(&mut self, id: &PolygonId) -> Option<&mut PolygonOverlay<S>> {
        self.overlays.iter_mut().find(|o| &o.record().id == id)
    }

    fn drain_events(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(AppEvent::Store(_)) => self.dirty = true,
                Ok(AppEvent::Drawing(_)) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Map view skipped {} events", skipped);
                    self.dirty = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;
    use polymap_core::{shared, Color, Coordinate};
    use std::cell::RefCell;

    fn record(name: &str) -> PolygonRecord {
        PolygonRecord::new(
            name,
            100.0,
            vec![
                Coordinate { lat: 0.0, lng: 0.0 },
                Coordinate { lat: 0.0, lng: 1.0 },
                Coordinate { lat: 1.0, lng: 1.0 },
            ],
            Color::default(),
        )
    }

    fn view() -> (Arc<PolygonStore>, Shared<HeadlessSurface>, MapView<HeadlessSurface>) {
        let store = Arc::new(PolygonStore::in_memory());
        let surface = shared(HeadlessSurface::new());
        let view = MapView::new(store.clone(), surface.clone(), &Config::default());
        (store, surface, view)
    }

    #[test]
    fn test_renders_after_store_changes() {
        let (store, surface, mut view) = view();
        assert!(view.render());
        assert!(!view.render());

        store.save(record("a"));
        store.save(record("b"));
        assert!(view.render());
        assert_eq!(view.overlays().len(), 2);
        assert_eq!(surface.borrow().polygons().len(), 2);
        assert_eq!(surface.borrow().labels().len(), 2);

        store.clear_all();
        assert!(view.render());
        assert_eq!(surface.borrow().overlay_count(), 0);
    }

    #[test]
    fn test_click_delivers_record() {
        let (store, _surface, mut view) = view();
        let a = record("a");
        store.save(a.clone());

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = clicked.clone();
        view.set_on_polygon_click(move |r| sink.borrow_mut().push(r));
        view.render();

        assert!(view.click(&a.id));
        assert!(!view.click(&PolygonId::from("missing")));
        assert_eq!(*clicked.borrow(), vec![a]);
    }

    #[test]
    fn test_drop_removes_overlays() {
        let (store, surface, mut view) = view();
        store.save(record("a"));
        view.render();
        drop(view);
        assert_eq!(surface.borrow().overlay_count(), 0);
    }
}
