//! Gapminder is an animated bubble chart of 215 years of country statistics.
//!
//! Each country is a circle: income on a log x axis, life expectancy on the y axis, population as
//! circle area and continent as colour. The API mirrors the interactive chart:
//!
//! - Load a [`Dataset`] and build an [`App`] with a [`ChartConfig`]
//! - Drive it with [`ControlEvent`]s (play/pause, reset, continent filter, year slider) on a
//!   virtual clock
//! - Render single frames as SVG or pixels, or record a [`Script`] into a [`FrameSink`] with an
//!   [`ExportSession`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Chart configuration.
pub mod config;
/// Selection state, timers and the control surface.
pub mod control;
/// Dataset model and loader.
pub mod data;
/// Frame sinks.
pub mod encode;
/// Retained scene, transitions and frame output.
pub mod render;
/// Scales and axes.
pub mod scale;
/// Scripted export of a playing chart.
pub mod session;

pub use crate::foundation::core::{
    Canvas, FIRST_YEAR, Fps, Margins, Millis, PlotArea, Point, Rect, Rgba8, Vec2, YearIndex,
};
pub use crate::foundation::error::{GapminderError, GapminderResult};

pub use crate::config::ChartConfig;
pub use crate::control::app::{App, PlayLabel, UiState};
pub use crate::control::filter::{ContinentFilter, filter};
pub use crate::control::frame::FrameSelector;
pub use crate::control::script::{ControlEvent, Script, ScriptEntry};
pub use crate::control::timer::PlayTimer;
pub use crate::data::loader::{from_json_str, from_reader, load_path};
pub use crate::data::model::{Continent, CountryRecord, Dataset, LoadStats, YearSnapshot};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::raster::{FrameRGBA, Rasterizer};
pub use crate::render::scene::{Mark, MarkSample, ReconcileStats, Scene, TransitionOpts};
pub use crate::render::svg::{FrameView, build_document};
pub use crate::render::transition::{Ease, MarkAttrs, Transition};
pub use crate::scale::encoding::{Axis, AxisOrient, Encoded, Encodings, Tick};
pub use crate::session::{ExportOpts, ExportSession, ExportStats, RenderThreading};
