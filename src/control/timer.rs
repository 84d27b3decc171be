use crate::foundation::core::Millis;

/// Repeating timer driven by virtual time.
///
/// At most one interval is ever active: [`PlayTimer::start`] cancels whatever was running before
/// scheduling a new one, so a second start can never leak a timer. Ticks fall at
/// `started_at + k * period` for `k >= 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayTimer {
    period_ms: u64,
    active: Option<Interval>,
    starts: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Interval {
    next_due: Millis,
}

impl PlayTimer {
    /// Stopped timer with the given period (clamped to at least 1 ms).
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            active: None,
            starts: 0,
        }
    }

    /// Tick period.
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Start ticking from `now`, replacing any running interval.
    pub fn start(&mut self, now: Millis) {
        if self.active.take().is_some() {
            tracing::debug!("replacing running play timer");
        }
        self.active = Some(Interval {
            next_due: now.saturating_add(self.period_ms),
        });
        self.starts += 1;
    }

    /// Cancel the running interval; returns `false` when nothing was running.
    pub fn stop(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// `true` while an interval is scheduled.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Time of the next tick, if running.
    pub fn next_due(&self) -> Option<Millis> {
        self.active.map(|i| i.next_due)
    }

    /// How many times the timer has been started.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    /// Pop the earliest tick due at or before `now`, returning its scheduled time.
    ///
    /// Call repeatedly to drain every overdue tick in order. A tick whose successor would fall
    /// past the end of the clock is the last one; the timer stops after it.
    pub fn poll(&mut self, now: Millis) -> Option<Millis> {
        let due = self.active?.next_due;
        if due > now {
            return None;
        }
        self.active = due.0.checked_add(self.period_ms).map(|next| Interval {
            next_due: Millis(next),
        });
        if self.active.is_none() {
            tracing::debug!(at = due.0, "play timer reached the end of the clock");
        }
        Some(due)
    }
}
