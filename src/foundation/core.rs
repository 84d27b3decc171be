use crate::foundation::error::{GapminderError, GapminderResult};

pub use kurbo::{Point, Rect, Vec2};

/// Calendar year of the first snapshot in the canonical dataset.
pub const FIRST_YEAR: u16 = 1800;

/// 0-based index into the dataset's year snapshots (index 0 is [`FIRST_YEAR`]).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct YearIndex(pub usize);

impl YearIndex {
    /// Calendar year for this index given the dataset's first year.
    pub fn calendar_year(self, first_year: u16) -> u32 {
        u32::from(first_year) + self.0 as u32
    }

    /// Index for a calendar year; years before `first_year` map to index 0.
    pub fn from_calendar_year(year: u32, first_year: u16) -> Self {
        Self(year.saturating_sub(u32::from(first_year)) as usize)
    }
}

/// Virtual time in milliseconds.
///
/// Timers and transitions never read a wall clock; callers pass the current `Millis` in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Add a duration using saturating arithmetic.
    pub fn saturating_add(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (0 when `earlier` is in the future).
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> GapminderResult<Self> {
        if den == 0 {
            return Err(GapminderError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(GapminderError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Virtual timestamp of output frame `frame`, rounded down to whole milliseconds.
    pub fn frame_to_millis(self, frame: u64) -> Millis {
        let ms = u128::from(frame) * 1000 * u128::from(self.den) / u128::from(self.num);
        Millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }

    /// Number of output frames covering `duration_ms` (rounded up).
    pub fn frames_for_millis(self, duration_ms: u64) -> u64 {
        let num = u128::from(duration_ms) * u128::from(self.num);
        let den = 1000 * u128::from(self.den);
        u64::try_from(num.div_ceil(den)).unwrap_or(u64::MAX)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Space reserved around the plot for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    /// Top margin in pixels.
    pub top: u32,
    /// Bottom margin in pixels.
    pub bottom: u32,
    /// Left margin in pixels.
    pub left: u32,
    /// Right margin in pixels.
    pub right: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10,
            bottom: 100,
            left: 100,
            right: 100,
        }
    }
}

/// Inner plot size (canvas minus margins).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    /// Plot width in pixels.
    pub width: f64,
    /// Plot height in pixels.
    pub height: f64,
}

impl Canvas {
    /// Compute the plot area left after subtracting `margins`.
    pub fn plot_area(self, margins: Margins) -> GapminderResult<PlotArea> {
        let horiz = u64::from(margins.left) + u64::from(margins.right);
        let vert = u64::from(margins.top) + u64::from(margins.bottom);
        if horiz >= u64::from(self.width) || vert >= u64::from(self.height) {
            return Err(GapminderError::validation(format!(
                "margins ({horiz}px horizontal, {vert}px vertical) leave no plot area on a {}x{} canvas",
                self.width, self.height
            )));
        }
        Ok(PlotArea {
            width: (u64::from(self.width) - horiz) as f64,
            height: (u64::from(self.height) - vert) as f64,
        })
    }
}

/// Straight-alpha sRGB colour, serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` / `#RRGGBBAA` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> GapminderResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> GapminderResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| GapminderError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(GapminderError::validation("hex colour must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(GapminderError::validation(
                "hex colour must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// Lowercase `#rrggbb` form (alpha is emitted separately as an opacity attribute).
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `0..=1` opacity.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.a == 255 {
            serializer.serialize_str(&self.to_hex_rgb())
        } else {
            serializer.serialize_str(&format!("{}{:02x}", self.to_hex_rgb(), self.a))
        }
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
