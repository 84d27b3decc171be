//! Retained scene, transitions and frame output.

/// SVG rasterization.
pub mod raster;
/// Keyed marks and reconciliation.
pub mod scene;
/// SVG document construction.
pub mod svg;
/// Hover text for marks.
pub mod tooltip;
/// Easing and attribute tweens.
pub mod transition;
