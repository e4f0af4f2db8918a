//! Browser-free core of the site header widget.
//!
//! Everything here is plain state logic: the menu state machine, viewport
//! mode, scroll tracking and the focusable-element predicate. The frontend
//! crate binds these to the real DOM; this crate never touches `web-sys`
//! and is tested on the host target.

pub mod focus;
pub mod menu;
pub mod scroll;
pub mod viewport;

pub use menu::{DebugSnapshot, Effect, EffectSet, HeaderMachine, Interactivity};
pub use scroll::ScrollTracker;
pub use viewport::ViewportMode;
