use crate::foundation::error::{GapminderError, GapminderResult};
use crate::foundation::math::lerp;

/// Logarithmic mapping: linear in `log_base(x)`.
///
/// Non-positive inputs map to NaN; values outside the domain extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
    base: f64,
    domain: [f64; 2],
    range: [f64; 2],
}

impl LogScale {
    /// Build a scale; the domain must be strictly positive with distinct endpoints.
    pub fn new(base: f64, domain: [f64; 2], range: [f64; 2]) -> GapminderResult<Self> {
        let [d0, d1] = domain;
        if !(base.is_finite() && base > 1.0) {
            return Err(GapminderError::validation("log scale base must be > 1"));
        }
        if !(d0.is_finite() && d1.is_finite() && d0 > 0.0 && d1 > 0.0) || d0 == d1 {
            return Err(GapminderError::validation(format!(
                "log scale domain must be positive with distinct endpoints, got [{d0}, {d1}]"
            )));
        }
        if !range.iter().all(|v| v.is_finite()) {
            return Err(GapminderError::validation("log scale range must be finite"));
        }
        Ok(Self {
            base,
            domain,
            range,
        })
    }

    fn log(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    /// Map a domain value into the range.
    pub fn map(&self, x: f64) -> f64 {
        if !(x > 0.0) {
            return f64::NAN;
        }
        let l0 = self.log(self.domain[0]);
        let l1 = self.log(self.domain[1]);
        lerp(self.range[0], self.range[1], (self.log(x) - l0) / (l1 - l0))
    }

    /// Range endpoints.
    pub fn range(&self) -> [f64; 2] {
        self.range
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/scales.rs"]
mod tests;
