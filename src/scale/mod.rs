//! Scales mapping raw statistics to visual channels.

/// Encoding registry and axes.
pub mod encoding;
/// Linear scale.
pub mod linear;
/// Logarithmic scale.
pub mod log;
/// Ordinal (categorical) scale.
pub mod ordinal;
/// Tick generation and formatting.
pub mod ticks;
