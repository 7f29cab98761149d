//! # Polymap Designer
//!
//! Interactive side of polymap: turning map clicks into polygons, labelling
//! them, and keeping the map in sync with the polygon store.
//!
//! ## Architecture
//!
//! ```text
//! MapSurface (widget boundary, HeadlessSurface in-process)
//!   ├── DrawingSession (Idle -> Drawing -> Complete)
//!   │     └── AddPolygonFlow (save form, validation, store.save)
//!   └── MapView (one PolygonOverlay per stored record)
//!         └── PolygonOverlay (shape + PolygonLabel at the bbox center)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polymap_designer::{AddPolygonFlow, HeadlessSurface, MapEvent};
//!
//! let surface = shared(HeadlessSurface::new());
//! let mut flow = AddPolygonFlow::new(store, surface, &config.drawing);
//! flow.handle(MapEvent::Click(a));
//! flow.handle(MapEvent::Click(b));
//! flow.handle(MapEvent::Click(c));
//! flow.handle(MapEvent::Complete);
//! flow.submit("North field", 1500.0, Color::default())?;
//! ```

pub mod error;
pub mod flow;
pub mod geometry;
pub mod label;
pub mod location;
pub mod map_view;
pub mod overlay;
pub mod path;
pub mod session;
pub mod surface;

pub use error::{DesignerError, DesignerResult};
pub use flow::AddPolygonFlow;
pub use geometry::{label_anchor, Bounds};
pub use label::{LabelContent, PolygonLabel};
pub use location::{
    initial_camera, initial_center, FixedLocation, GeolocationProvider, GeolocationState,
    MapCamera,
};
pub use map_view::MapView;
pub use overlay::PolygonOverlay;
pub use path::{EditablePath, PathChange};
pub use session::{DrawingSession, DrawingState, MapEvent};
pub use surface::{HeadlessSurface, MapSurface, Overlay, OverlayId, PolygonStyle};
