//! Selection state and the control surface driving it.

/// The chart application and its event handlers.
pub mod app;
/// Continent selector and filter stage.
pub mod filter;
/// Year-index state machine.
pub mod frame;
/// Control events and scripted sessions.
pub mod script;
/// Virtual-time repeating timer.
pub mod timer;
