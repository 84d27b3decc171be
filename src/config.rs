use std::f64::consts::PI;
use std::path::Path;

use crate::foundation::core::{Canvas, FIRST_YEAR, Margins, Rgba8};
use crate::foundation::error::{GapminderError, GapminderResult};
use crate::render::transition::Ease;

/// d3 `schemePastel1`.
pub const PASTEL1: [Rgba8; 9] = [
    Rgba8::rgb(0xfb, 0xb4, 0xae),
    Rgba8::rgb(0xb3, 0xcd, 0xe3),
    Rgba8::rgb(0xcc, 0xeb, 0xc5),
    Rgba8::rgb(0xde, 0xcb, 0xe4),
    Rgba8::rgb(0xfe, 0xd9, 0xa6),
    Rgba8::rgb(0xff, 0xff, 0xcc),
    Rgba8::rgb(0xe5, 0xd8, 0xbd),
    Rgba8::rgb(0xfd, 0xda, 0xec),
    Rgba8::rgb(0xf2, 0xf2, 0xf2),
];

/// Chart layout, scale constants and playback timing.
///
/// Every field has a default matching the classic Gapminder layout, so a config file only needs
/// the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Margins around the plot area.
    pub margins: Margins,
    /// Calendar year of snapshot index 0.
    pub first_year: u16,
    /// Duration of each mark transition.
    pub transition_ms: u64,
    /// Period of the play timer.
    pub tick_ms: u64,
    /// Easing applied to mark transitions.
    pub ease: Ease,
    /// Income domain of the log-scaled x axis.
    pub x_domain: [f64; 2],
    /// Life expectancy domain of the y axis.
    pub y_domain: [f64; 2],
    /// Population domain of the area scale.
    pub area_domain: [f64; 2],
    /// Area range (square pixels) of the area scale.
    pub area_range: [f64; 2],
    /// Explicit x axis tick values.
    pub x_tick_values: Vec<f64>,
    /// Approximate number of y axis ticks.
    pub y_tick_count: usize,
    /// Categorical palette for continents.
    pub palette: Vec<Rgba8>,
    /// Canvas background colour.
    pub background: Rgba8,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            margins: Margins::default(),
            first_year: FIRST_YEAR,
            transition_ms: 100,
            tick_ms: 100,
            ease: Ease::InOutCubic,
            x_domain: [142.0, 150_000.0],
            y_domain: [0.0, 90.0],
            area_domain: [2000.0, 1_400_000_000.0],
            area_range: [25.0 * PI, 1500.0 * PI],
            x_tick_values: vec![400.0, 4000.0, 40_000.0],
            y_tick_count: 5,
            palette: PASTEL1.to_vec(),
            background: Rgba8::rgb(0xff, 0xff, 0xff),
        }
    }
}

impl ChartConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> GapminderResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GapminderError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            GapminderError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check static invariants that the scales and timers rely on.
    pub fn validate(&self) -> GapminderResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(GapminderError::validation("canvas width/height must be > 0"));
        }
        self.canvas.plot_area(self.margins)?;

        if self.transition_ms == 0 {
            return Err(GapminderError::validation("transition_ms must be > 0"));
        }
        if self.tick_ms == 0 {
            return Err(GapminderError::validation("tick_ms must be > 0"));
        }

        let [x0, x1] = self.x_domain;
        if !(x0.is_finite() && x1.is_finite() && x0 > 0.0 && x1 > 0.0) {
            return Err(GapminderError::validation(
                "x_domain must be finite and strictly positive (log scale)",
            ));
        }
        for (name, [a, b]) in [
            ("x_domain", self.x_domain),
            ("y_domain", self.y_domain),
            ("area_domain", self.area_domain),
        ] {
            if !(a.is_finite() && b.is_finite()) || a == b {
                return Err(GapminderError::validation(format!(
                    "{name} must be finite with distinct endpoints"
                )));
            }
        }
        if !self.area_range.iter().all(|v| v.is_finite()) {
            return Err(GapminderError::validation("area_range must be finite"));
        }

        if self.x_tick_values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(GapminderError::validation(
                "x_tick_values must be finite and positive",
            ));
        }
        if self.palette.is_empty() {
            return Err(GapminderError::validation("palette must not be empty"));
        }
        Ok(())
    }
}
