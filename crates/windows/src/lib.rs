//! Window bookkeeping for the desktop shell: stacking order, the active
//! window, and which surface currently owns keyboard input.

pub mod focus;
pub mod store;

pub use focus::InputFocus;
pub use store::{Geometry, WindowRecord, WindowStore};
