//! Type system utilities and aliases.
//!
//! - [`aliases`]: The `Rc<RefCell<T>>` alias used for UI-thread state.

pub mod aliases;

pub use aliases::*;
