//! Error types for the designer crate.

use polymap_core::ValidationError;
use thiserror::Error;

use crate::surface::OverlayId;

/// Errors raised by drawing sessions, overlays, and flows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// The map surface has no overlay with this id.
    #[error("Unknown overlay {0}")]
    UnknownOverlay(OverlayId),

    /// A path edit addressed a vertex that does not exist.
    #[error("Vertex index {index} out of range for path of {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },

    /// Submit was called with no completed shape awaiting a label.
    #[error("No completed shape is waiting to be saved")]
    NoPendingShape,

    /// The save form was rejected.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for designer operations.
pub type DesignerResult<T> = Result<T, DesignerError>;
