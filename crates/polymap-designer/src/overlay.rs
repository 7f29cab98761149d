//! A saved polygon rendered on a map: its shape plus its label.

use polymap_core::{Coordinate, CurrencyFormat, PolygonRecord, Shared};

use crate::error::DesignerResult;
use crate::label::{LabelContent, PolygonLabel};
use crate::path::{EditablePath, PathChange};
use crate::surface::{MapSurface, OverlayId, PolygonStyle};

type ClickHandler = Box<dyn Fn(PolygonRecord)>;

/// Shape and label overlays of one record.
///
/// Both overlays are removed from the surface when this value is dropped.
/// Vertex edits move the drawn shape only; the captured record is unchanged.
pub struct PolygonOverlay<S: MapSurface> {
    surface: Shared<S>,
    record: PolygonRecord,
    path: EditablePath,
    polygon: OverlayId,
    label: PolygonLabel,
    currency: CurrencyFormat,
    on_click: Option<ClickHandler>,
}

impl<S: MapSurface> PolygonOverlay<S> {
    /// Draws `record` with `style` (its color replaced by the record's).
    pub fn new(
        surface: Shared<S>,
        record: PolygonRecord,
        style: &PolygonStyle,
        currency: CurrencyFormat,
    ) -> Self {
        let style = style.with_color(record.color.clone());
        let path = EditablePath::new(record.coordinates.clone());
        let mut label = PolygonLabel::new(LabelContent::for_polygon(
            &record.name,
            Some(record.price),
            &currency,
        ));

        let polygon = {
            let mut surface = surface.borrow_mut();
            let polygon = surface.add_polygon(path.vertices(), &style);
            label.refresh(&mut *surface, path.vertices());
            polygon
        };

        Self {
            surface,
            record,
            path,
            polygon,
            label,
            currency,
            on_click: None,
        }
    }

    /// Sets the handler receiving this overlay's record on click.
    pub fn set_on_click<F>(&mut self, handler: F)
    where
        F: Fn(PolygonRecord) + 'static,
    {
        self.on_click = Some(Box::new(handler));
    }

    /// Delivers a click. Returns false when no handler is set.
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler(self.record.clone());
                true
            }
            None => false,
        }
    }

    pub fn record(&self) -> &PolygonRecord {
        &self.record
    }

    pub fn path(&self) -> &[Coordinate] {
        self.path.vertices()
    }

    pub fn polygon_id(&self) -> OverlayId {
        self.polygon
    }

    pub fn label_id(&self) -> Option<OverlayId> {
        self.label.overlay()
    }

    pub fn label(&self) -> &LabelContent {
        self.label.content()
    }

    pub fn set_at(&mut self, index: usize, at: Coordinate) -> DesignerResult<PathChange> {
        let change = self.path.set_at(index, at)?;
        self.sync_path()?;
        Ok(change)
    }

    pub fn insert_at(&mut self, index: usize, at: Coordinate) -> DesignerResult<PathChange> {
        let change = self.path.insert_at(index, at)?;
        self.sync_path()?;
        Ok(change)
    }

    pub fn remove_at(&mut self, index: usize) -> DesignerResult<PathChange> {
        let change = self.path.remove_at(index)?;
        self.sync_path()?;
        Ok(change)
    }

    /// Replaces the label text, keeping its anchor.
    pub fn set_label(&mut self, name: &str, price: Option<f64>) {
        self.label
            .set_content(LabelContent::for_polygon(name, price, &self.currency));
        let mut surface = self.surface.borrow_mut();
        self.label.refresh(&mut *surface, self.path.vertices());
    }

    fn sync_path(&mut self) -> DesignerResult<()> {
        let mut surface = self.surface.borrow_mut();
        surface.set_polygon_path(self.polygon, self.path.vertices())?;
        self.label.refresh(&mut *surface, self.path.vertices());
        Ok(())
    }
}

impl<S: MapSurface> Drop for PolygonOverlay<S> {
    fn drop(&mut self) {
        // Skipped while the surface is borrowed elsewhere.
        if let Ok(mut surface) = self.surface.try_borrow_mut() {
            self.label.remove(&mut *surface);
            surface.remove_overlay(self.polygon);
        }
    }
}

impl<S: MapSurface> std::fmt::Debug for PolygonOverlay<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonOverlay")
            .field("id", &self.record.id)
            .field("polygon", &self.polygon)
            .field("label", &self.label.overlay())
            .finish()
    }
}
