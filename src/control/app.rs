use std::fmt;
use std::sync::Arc;

use crate::config::ChartConfig;
use crate::control::filter::{ContinentFilter, filter};
use crate::control::frame::FrameSelector;
use crate::control::script::ControlEvent;
use crate::control::timer::PlayTimer;
use crate::data::model::{CountryRecord, Dataset};
use crate::foundation::core::{Millis, Point, Vec2, YearIndex};
use crate::foundation::error::GapminderResult;
use crate::render::scene::{ReconcileStats, Scene, TransitionOpts};
use crate::render::svg::{FrameView, build_document};
use crate::scale::encoding::Encodings;

/// Text on the play/pause button; names the action a press performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayLabel {
    /// Stopped; pressing starts playback.
    Play,
    /// Playing; pressing pauses.
    Pause,
}

impl fmt::Display for PlayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
        })
    }
}

/// Control widgets as last rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    /// Play/pause button text.
    pub play_label: PlayLabel,
    /// Year slider position (calendar year).
    pub slider_year: u32,
    /// Year label drawn in the plot.
    pub time_label: String,
}

/// The chart application: dataset, scales, selection state, retained scene and play timer.
///
/// Every handler takes the current virtual time. Timer ticks that fall due before an event are
/// fired first, so state changes happen in timestamp order. Time never runs backwards; an
/// earlier `now` is treated as the latest time seen.
#[derive(Debug)]
pub struct App {
    dataset: Arc<Dataset>,
    config: ChartConfig,
    encodings: Encodings,
    frame: FrameSelector,
    continent: ContinentFilter,
    scene: Scene,
    timer: PlayTimer,
    ui: UiState,
    now: Millis,
    steps: u64,
    renders: u64,
    last_reconcile: ReconcileStats,
}

impl App {
    /// Build the app and render the first year.
    pub fn new(dataset: Arc<Dataset>, config: ChartConfig, now: Millis) -> GapminderResult<Self> {
        let encodings = Encodings::from_config(&config)?;
        let frame = FrameSelector::new(dataset.last_index());
        let first_year = dataset.calendar_year(YearIndex(0));
        let mut app = Self {
            timer: PlayTimer::new(config.tick_ms),
            dataset,
            config,
            encodings,
            frame,
            continent: ContinentFilter::All,
            scene: Scene::new(),
            ui: UiState {
                play_label: PlayLabel::Play,
                slider_year: first_year,
                time_label: first_year.to_string(),
            },
            now,
            steps: 0,
            renders: 0,
            last_reconcile: ReconcileStats::default(),
        };
        app.render(now);
        Ok(app)
    }

    fn clamp_now(&self, now: Millis) -> Millis {
        now.max(self.now)
    }

    /// Re-bind the current year, narrowed by the continent selector, and sync the labels.
    pub fn render(&mut self, now: Millis) -> ReconcileStats {
        let now = self.clamp_now(now);
        let records: Vec<&CountryRecord> = match self.dataset.snapshot(self.frame.index()) {
            Some(snapshot) => filter(snapshot, self.continent),
            None => Vec::new(),
        };
        let opts = TransitionOpts {
            duration_ms: self.config.transition_ms,
            ease: self.config.ease,
        };
        let stats = self.scene.reconcile(&records, &self.encodings, now, opts);

        let year = self.calendar_year();
        self.ui.time_label = year.to_string();
        self.ui.slider_year = year;
        self.renders += 1;
        self.last_reconcile = stats;
        self.now = now;
        stats
    }

    /// Fire every play-timer tick due at or before `now`; returns how many fired.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        let now = self.clamp_now(now);
        let mut fired = 0;
        while let Some(due) = self.timer.poll(now) {
            self.frame.step();
            self.steps += 1;
            self.render(due);
            fired += 1;
        }
        self.now = now;
        fired
    }

    /// Press the play/pause button.
    pub fn toggle_play(&mut self, now: Millis) {
        self.advance_to(now);
        let now = self.now;
        match self.ui.play_label {
            PlayLabel::Play => {
                self.ui.play_label = PlayLabel::Pause;
                self.timer.start(now);
                tracing::debug!(at = now.0, "playback started");
            }
            PlayLabel::Pause => {
                self.ui.play_label = PlayLabel::Play;
                self.timer.stop();
                tracing::debug!(at = now.0, "playback paused");
            }
        }
    }

    /// Start playback unless already playing.
    pub fn play(&mut self, now: Millis) {
        if self.ui.play_label == PlayLabel::Play {
            self.toggle_play(now);
        } else {
            self.advance_to(now);
        }
    }

    /// Pause playback unless already paused.
    pub fn pause(&mut self, now: Millis) {
        if self.ui.play_label == PlayLabel::Pause {
            self.toggle_play(now);
        } else {
            self.advance_to(now);
        }
    }

    /// Jump back to the first year; the play state is left alone.
    pub fn reset(&mut self, now: Millis) {
        self.advance_to(now);
        self.frame.reset();
        self.render(now);
    }

    /// Change the continent selector and re-render the current year.
    pub fn select_continent(&mut self, continent: ContinentFilter, now: Millis) {
        self.advance_to(now);
        self.continent = continent;
        self.render(now);
    }

    /// Drag the slider to a calendar year and render it immediately.
    pub fn seek(&mut self, year: u32, now: Millis) {
        self.advance_to(now);
        self.frame.seek_year(year, self.dataset.first_year());
        self.render(now);
    }

    /// Dispatch a control event.
    pub fn handle(&mut self, event: &ControlEvent, now: Millis) {
        tracing::debug!(?event, at = now.0, "control event");
        match event {
            ControlEvent::TogglePlay => self.toggle_play(now),
            ControlEvent::Play => self.play(now),
            ControlEvent::Pause => self.pause(now),
            ControlEvent::Reset => self.reset(now),
            ControlEvent::SelectContinent { continent } => self.select_continent(*continent, now),
            ControlEvent::Seek { year } => self.seek(*year, now),
        }
    }

    /// SVG document of the scene as it looks at `now`.
    pub fn frame_document(&self, now: Millis) -> String {
        let marks = self.scene.sample(now);
        build_document(&FrameView {
            config: &self.config,
            encodings: &self.encodings,
            time_label: &self.ui.time_label,
            marks: &marks,
        })
    }

    /// Tooltip of the mark under a canvas-space pointer, if any.
    pub fn hover(&self, pointer: Point, now: Millis) -> Option<&str> {
        let m = self.config.margins;
        let p = pointer - Vec2::new(f64::from(m.left), f64::from(m.top));
        self.scene
            .hit_test(p, self.clamp_now(now))
            .map(|mark| mark.tooltip())
    }

    /// Time at which transitions started so far have all completed.
    pub fn settled_at(&self) -> Millis {
        self.now.saturating_add(self.config.transition_ms)
    }

    /// Records currently bound to the scene (current year, filtered).
    pub fn visible_records(&self) -> Vec<&CountryRecord> {
        match self.dataset.snapshot(self.frame.index()) {
            Some(snapshot) => filter(snapshot, self.continent),
            None => Vec::new(),
        }
    }

    /// Current year index.
    pub fn year_index(&self) -> YearIndex {
        self.frame.index()
    }

    /// Current calendar year.
    pub fn calendar_year(&self) -> u32 {
        self.frame.year(self.dataset.first_year())
    }

    /// Current continent selector.
    pub fn continent(&self) -> ContinentFilter {
        self.continent
    }

    /// `true` while the play timer is running.
    pub fn is_playing(&self) -> bool {
        self.timer.is_active()
    }

    /// Control widget state.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Retained marks.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The play timer.
    pub fn timer(&self) -> &PlayTimer {
        &self.timer
    }

    /// Scale registry.
    pub fn encodings(&self) -> &Encodings {
        &self.encodings
    }

    /// Active configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Loaded dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Latest virtual time the app has been driven to.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Automatic steps taken by the play timer.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Render passes so far (including the initial one).
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Outcome of the most recent render.
    pub fn last_reconcile(&self) -> ReconcileStats {
        self.last_reconcile
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/app.rs"]
mod tests;
