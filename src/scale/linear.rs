use crate::foundation::error::{GapminderError, GapminderResult};
use crate::foundation::math::lerp;
use crate::scale::ticks::ticks;

/// Continuous linear mapping from `domain` to `range`.
///
/// Values outside the domain extrapolate; nothing is clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    /// Build a scale; the domain endpoints must be finite and distinct.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> GapminderResult<Self> {
        let [d0, d1] = domain;
        if !(d0.is_finite() && d1.is_finite()) || d0 == d1 {
            return Err(GapminderError::validation(format!(
                "linear scale domain must be finite with distinct endpoints, got [{d0}, {d1}]"
            )));
        }
        if !range.iter().all(|v| v.is_finite()) {
            return Err(GapminderError::validation("linear scale range must be finite"));
        }
        Ok(Self { domain, range })
    }

    /// Map a domain value into the range.
    pub fn map(&self, x: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        lerp(r0, r1, (x - d0) / (d1 - d0))
    }

    /// Range endpoints.
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Nice tick values across the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain[0], self.domain[1], count)
    }
}
