//! Type aliases for commonly used shared-state types.
//!
//! Map surfaces live on the UI thread and are shared between the drawing
//! session, overlays, and views with `Rc<RefCell<T>>`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polymap_core::types::*;
//!
//! let surface: Shared<HeadlessSurface> = shared(HeadlessSurface::new());
//! surface.borrow_mut().remove_overlay(id);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Used for map surfaces and view state owned by the UI thread.
pub type Shared<T> = Rc<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
