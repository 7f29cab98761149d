//! Name and price labels drawn over polygons.

use polymap_core::{Coordinate, CurrencyFormat};

use crate::geometry::label_anchor;
use crate::surface::{MapSurface, OverlayId};

/// Text shown in a polygon label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    pub title: String,
    pub price: String,
}

impl LabelContent {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
        }
    }

    /// Label for a polygon named `name` priced at `price`.
    pub fn for_polygon(name: &str, price: Option<f64>, currency: &CurrencyFormat) -> Self {
        Self::new(name, currency.format(price))
    }

    /// Two-line rendering: name, then formatted price.
    pub fn text(&self) -> String {
        format!("{}\n{}", self.title, self.price)
    }
}

/// A label overlay that follows its polygon's vertices.
///
/// The label is never moved in place: [`PolygonLabel::refresh`] removes the
/// old overlay and creates a new one at the recomputed anchor.
#[derive(Debug, Clone)]
pub struct PolygonLabel {
    content: LabelContent,
    overlay: Option<OverlayId>,
}

impl PolygonLabel {
    pub fn new(content: LabelContent) -> Self {
        Self {
            content,
            overlay: None,
        }
    }

    pub fn content(&self) -> &LabelContent {
        &self.content
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    pub fn set_content(&mut self, content: LabelContent) {
        self.content = content;
    }

    /// Recreates the label for `path`. An empty path leaves no label.
    pub fn refresh<S: MapSurface + ?Sized>(&mut self, surface: &mut S, path: &[Coordinate]) {
        self.remove(surface);
        if let Some(anchor) = label_anchor(path) {
            self.overlay = Some(surface.add_label(anchor, &self.content));
        }
    }

    pub fn remove<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(id) = self.overlay.take() {
            surface.remove_overlay(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;

    #[test]
    fn test_content_formats_price() {
        let content = LabelContent::for_polygon("Lot 7", Some(1500.0), &CurrencyFormat::default());
        assert_eq!(content.text(), "Lot 7\n$1,500");

        let content = LabelContent::for_polygon("Lot 8", None, &CurrencyFormat::default());
        assert_eq!(content.price, "$0");
    }

    #[test]
    fn test_refresh_replaces_overlay() {
        let mut surface = HeadlessSurface::new();
        let mut label = PolygonLabel::new(LabelContent::new("a", "$1"));
        let path = [Coordinate { lat: 0.0, lng: 0.0 }, Coordinate { lat: 2.0, lng: 4.0 }];

        label.refresh(&mut surface, &path);
        let first = label.overlay().unwrap();
        label.refresh(&mut surface, &path);
        let second = label.overlay().unwrap();

        assert_ne!(first, second);
        assert_eq!(surface.labels().len(), 1);
        assert_eq!(surface.labels()[0].0, Coordinate { lat: 1.0, lng: 2.0 });
        assert_eq!(surface.labels_created(), 2);
    }

    #[test]
    fn test_refresh_on_empty_path_removes_label() {
        let mut surface = HeadlessSurface::new();
        let mut label = PolygonLabel::new(LabelContent::new("a", "$1"));
        label.refresh(&mut surface, &[Coordinate::ORIGIN]);
        label.refresh(&mut surface, &[]);
        assert_eq!(label.overlay(), None);
        assert_eq!(surface.overlay_count(), 0);
    }
}
