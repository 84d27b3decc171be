use std::fmt;
use std::str::FromStr;

use crate::data::model::{Continent, CountryRecord, YearSnapshot};
use crate::foundation::error::GapminderError;

/// Continent selector: every record, or one continent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContinentFilter {
    /// The `all` sentinel.
    #[default]
    All,
    /// Only records from this continent.
    Only(Continent),
}

impl ContinentFilter {
    /// Selector options in menu order.
    pub const OPTIONS: [ContinentFilter; 5] = [
        ContinentFilter::All,
        ContinentFilter::Only(Continent::Europe),
        ContinentFilter::Only(Continent::Asia),
        ContinentFilter::Only(Continent::Americas),
        ContinentFilter::Only(Continent::Africa),
    ];

    /// `true` when `record` passes the selector.
    pub fn matches(self, record: &CountryRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => record.continent == c,
        }
    }
}

impl fmt::Display for ContinentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for ContinentFilter {
    type Err = GapminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Continent>().map(Self::Only)
    }
}

impl serde::Serialize for ContinentFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ContinentFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Narrow a snapshot to the records passing `selector`, preserving source order.
pub fn filter(snapshot: &YearSnapshot, selector: ContinentFilter) -> Vec<&CountryRecord> {
    snapshot.iter().filter(|r| selector.matches(r)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/control/filter.rs"]
mod tests;
