//! Map widget boundary.
//!
//! [`MapSurface`] is the small set of calls the designer makes into a map
//! widget. [`HeadlessSurface`] implements it in-process by recording every
//! overlay, which is what the CLI and the tests render into.

use polymap_core::{Color, Coordinate};
use polymap_settings::DrawingSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DesignerError, DesignerResult};
use crate::label::LabelContent;

/// Handle of an overlay placed on a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Fill and stroke of a polygon overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub fill_opacity: f64,
    pub stroke_weight: f64,
    /// Whether the widget lets the user drag vertices.
    pub editable: bool,
}

impl PolygonStyle {
    /// Style for `color` using the configured opacity and stroke.
    pub fn from_settings(settings: &DrawingSettings, color: Color) -> Self {
        Self {
            fill_color: color.clone(),
            stroke_color: color,
            fill_opacity: settings.fill_opacity,
            stroke_weight: settings.stroke_weight,
            editable: false,
        }
    }

    /// Same style with fill and stroke set to `color`.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            fill_color: color.clone(),
            stroke_color: color,
            ..self.clone()
        }
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self::from_settings(&DrawingSettings::default(), Color::default())
    }
}

/// Operations the designer needs from a map widget.
pub trait MapSurface {
    /// Draws a polygon and returns its handle.
    fn add_polygon(&mut self, path: &[Coordinate], style: &PolygonStyle) -> OverlayId;

    /// Replaces the vertices of an existing polygon.
    fn set_polygon_path(&mut self, id: OverlayId, path: &[Coordinate]) -> DesignerResult<()>;

    /// Restyles an existing polygon.
    fn set_polygon_style(&mut self, id: OverlayId, style: &PolygonStyle) -> DesignerResult<()>;

    /// Places a text label and returns its handle.
    fn add_label(&mut self, at: Coordinate, content: &LabelContent) -> OverlayId;

    /// Removes any overlay. Returns false if it was already gone.
    fn remove_overlay(&mut self, id: OverlayId) -> bool;

    /// Enables or disables the widget's polygon drawing tool.
    fn set_drawing_mode(&mut self, enabled: bool);
}

/// An overlay recorded by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Polygon {
        path: Vec<Coordinate>,
        style: PolygonStyle,
    },
    Label {
        at: Coordinate,
        content: LabelContent,
    },
}

/// In-process map surface that keeps overlays in memory.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    overlays: BTreeMap<OverlayId, Overlay>,
    next_id: u64,
    drawing_enabled: bool,
    labels_created: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Polygons currently drawn, in creation order.
    pub fn polygons(&self) -> Vec<(&[Coordinate], &PolygonStyle)> {
        self.overlays
            .values()
            .filter_map(|o| match o {
                Overlay::Polygon { path, style } => Some((path.as_slice(), style)),
                Overlay::Label { .. } => None,
            })
            .collect()
    }

    /// Labels currently placed, in creation order.
    pub fn labels(&self) -> Vec<(Coordinate, &LabelContent)> {
        self.overlays
            .values()
            .filter_map(|o| match o {
                Overlay::Label { at, content } => Some((*at, content)),
                Overlay::Polygon { .. } => None,
            })
            .collect()
    }

    /// Total labels ever created, including removed ones.
    pub fn labels_created(&self) -> usize {
        self.labels_created
    }

    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    fn insert(&mut self, overlay: Overlay) -> OverlayId {
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.overlays.insert(id, overlay);
        id
    }

    fn polygon_mut(&mut self, id: OverlayId) -> DesignerResult<(&mut Vec<Coordinate>, &mut PolygonStyle)> {
        match self.overlays.get_mut(&id) {
            Some(Overlay::Polygon { path, style }) => Ok((path, style)),
            _ => Err(DesignerError::UnknownOverlay(id)),
        }
    }
}

impl MapSurface for HeadlessSurface {
    fn add_polygon(&mut self, path: &[Coordinate], style: &PolygonStyle) -> OverlayId {
        self.insert(Overlay::Polygon {
            path: path.to_vec(),
            style: style.clone(),
        })
    }

    fn set_polygon_path(&mut self, id: OverlayId, path: &[Coordinate]) -> DesignerResult<()> {
        let (current, _) = self.polygon_mut(id)?;
        *current = path.to_vec();
        Ok(())
    }

    fn set_polygon_style(&mut self, id: OverlayId, style: &PolygonStyle) -> DesignerResult<()> {
        let (_, current) = self.polygon_mut(id)?;
        *current = style.clone();
        Ok(())
    }

    fn add_label(&mut self, at: Coordinate, content: &LabelContent) -> OverlayId {
        self.labels_created += 1;
        self.insert(Overlay::Label {
            at,
            content: content.clone(),
        })
    }

    fn remove_overlay(&mut self, id: OverlayId) -> bool {
        self.overlays.remove(&id).is_some()
    }

    fn set_drawing_mode(&mut self, enabled: bool) {
        self.drawing_enabled = enabled;
    }
}
