pub mod controller;
pub mod dom;
pub mod focus;
pub mod timers;

pub use controller::HeaderController;
pub use dom::InitError;
