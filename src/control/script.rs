use std::path::Path;

use crate::control::filter::ContinentFilter;
use crate::foundation::core::Millis;
use crate::foundation::error::{GapminderError, GapminderResult};

/// A user action on the control surface.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    /// Press the play/pause button.
    TogglePlay,
    /// Press the button only if it currently reads "Play".
    Play,
    /// Press the button only if it currently reads "Pause".
    Pause,
    /// Press the reset button.
    Reset,
    /// Change the continent selector.
    SelectContinent {
        /// New selector value.
        continent: ContinentFilter,
    },
    /// Drag the year slider to a calendar year.
    Seek {
        /// Calendar year (clamped to the dataset).
        year: u32,
    },
}

/// One scheduled event.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEntry {
    /// Virtual time at which the event fires.
    pub at_ms: u64,
    /// The event.
    pub event: ControlEvent,
}

/// Time-ordered list of control events, used to record scripted sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    entries: Vec<ScriptEntry>,
}

impl Script {
    /// Build a script; entries are stably sorted by time.
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by_key(|e| e.at_ms);
        Self { entries }
    }

    /// The default session: press play at time zero.
    pub fn autoplay() -> Self {
        Self::new(vec![ScriptEntry {
            at_ms: 0,
            event: ControlEvent::Play,
        }])
    }

    /// Read a JSON array of `{ "at_ms": .., "event": { "type": .. } }` entries.
    pub fn from_path(path: &Path) -> GapminderResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GapminderError::validation(format!("read script '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a JSON script.
    pub fn from_json_str(json: &str) -> GapminderResult<Self> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(json)
            .map_err(|e| GapminderError::serde(format!("parse script: {e}")))?;
        Ok(Self::new(entries))
    }

    /// Entries in firing order.
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    /// Cursor for replaying the script against advancing time.
    pub fn cursor(&self) -> ScriptCursor<'_> {
        ScriptCursor {
            entries: &self.entries,
            next: 0,
        }
    }
}

/// Replay position within a [`Script`].
#[derive(Clone, Debug)]
pub struct ScriptCursor<'a> {
    entries: &'a [ScriptEntry],
    next: usize,
}

impl<'a> ScriptCursor<'a> {
    /// Pop the next entry due at or before `now`.
    pub fn next_due(&mut self, now: Millis) -> Option<&'a ScriptEntry> {
        let entry = self.entries.get(self.next)?;
        if entry.at_ms > now.0 {
            return None;
        }
        self.next += 1;
        Some(entry)
    }

    /// `true` once every entry has fired.
    pub fn is_done(&self) -> bool {
        self.next >= self.entries.len()
    }
}
