use crate::foundation::core::Millis;
use crate::foundation::math::lerp;

/// Timing curve of a mark transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Symmetric cubic; d3's default for transitions.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Eased progress for linear progress `t` (clamped to `0..=1`).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutCubic => {
                let u = t * 2.0;
                if u <= 1.0 {
                    u * u * u / 2.0
                } else {
                    let v = u - 2.0;
                    (v * v * v + 2.0) / 2.0
                }
            }
        }
    }
}

/// Animated circle geometry in plot pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarkAttrs {
    /// Centre x.
    pub cx: f64,
    /// Centre y.
    pub cy: f64,
    /// Radius.
    pub r: f64,
}

impl MarkAttrs {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            cx: lerp(a.cx, b.cx, t),
            cy: lerp(a.cy, b.cy, t),
            r: lerp(a.r, b.r, t),
        }
    }
}

/// A single scheduled attribute tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: MarkAttrs,
    to: MarkAttrs,
    start: Millis,
    duration_ms: u64,
    ease: Ease,
}

impl Transition {
    /// Tween from `from` to `to` starting at `start`.
    pub fn new(
        from: MarkAttrs,
        to: MarkAttrs,
        start: Millis,
        duration_ms: u64,
        ease: Ease,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration_ms,
            ease,
        }
    }

    /// Normalized progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Millis) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (now.since(self.start) as f64 / self.duration_ms as f64).min(1.0)
    }

    /// Interpolated attributes at `now`; before `start` this is `from`.
    pub fn sample(&self, now: Millis) -> MarkAttrs {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        MarkAttrs::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    /// `true` once the tween has reached its target.
    pub fn is_finished(&self, now: Millis) -> bool {
        self.progress(now) >= 1.0
    }

    /// Target attributes.
    pub fn target(&self) -> MarkAttrs {
        self.to
    }
}
