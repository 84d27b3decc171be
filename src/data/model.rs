use std::fmt;
use std::str::FromStr;

use crate::foundation::core::YearIndex;
use crate::foundation::error::GapminderError;

/// Continent category carried by every country record.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Continent {
    /// `europe`
    Europe,
    /// `asia`
    Asia,
    /// `americas`
    Americas,
    /// `africa`
    Africa,
}

impl Continent {
    /// All continents in legend order.
    pub const ALL: [Continent; 4] = [
        Continent::Europe,
        Continent::Asia,
        Continent::Americas,
        Continent::Africa,
    ];

    /// Lowercase label as it appears in the dataset.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Europe => "europe",
            Self::Asia => "asia",
            Self::Americas => "americas",
            Self::Africa => "africa",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Continent {
    type Err = GapminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GapminderError::validation(format!("unknown continent \"{s}\"")))
    }
}

/// One country's statistics for one year.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CountryRecord {
    /// Country name; unique within a snapshot and used as the mark key.
    pub country: String,
    /// Continent category.
    pub continent: Continent,
    /// GDP per capita in dollars.
    pub income: f64,
    /// Life expectancy in years.
    pub life_exp: f64,
    /// Head count (0 when the source omitted it).
    pub population: u64,
}

/// All retained country records for one calendar year, in source order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct YearSnapshot {
    /// Position of this snapshot in the dataset.
    pub index: YearIndex,
    /// Records in source order.
    pub records: Vec<CountryRecord>,
}

impl YearSnapshot {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when no country in this year had complete data.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, CountryRecord> {
        self.records.iter()
    }

    /// Look up a record by country key.
    pub fn get(&self, country: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.country == country)
    }
}

/// Counters reported by the loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoadStats {
    /// Number of year entries.
    pub years: usize,
    /// Records kept across all years.
    pub retained: usize,
    /// Records dropped because income or life expectancy was missing or zero.
    pub dropped_incomplete: usize,
    /// Records dropped because their country key repeated within a year.
    pub dropped_duplicate: usize,
}

/// The loaded, immutable year-by-year dataset.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Dataset {
    first_year: u16,
    snapshots: Vec<YearSnapshot>,
    stats: LoadStats,
}

impl Dataset {
    pub(crate) fn new(first_year: u16, snapshots: Vec<YearSnapshot>, stats: LoadStats) -> Self {
        Self {
            first_year,
            snapshots,
            stats,
        }
    }

    /// Calendar year of snapshot 0.
    pub fn first_year(&self) -> u16 {
        self.first_year
    }

    /// Number of year snapshots (always >= 1).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false` for a loaded dataset; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Highest valid year index.
    pub fn last_index(&self) -> YearIndex {
        YearIndex(self.snapshots.len().saturating_sub(1))
    }

    /// Snapshot for `index`, if in range.
    pub fn snapshot(&self, index: YearIndex) -> Option<&YearSnapshot> {
        self.snapshots.get(index.0)
    }

    /// Iterate snapshots in year order.
    pub fn iter(&self) -> std::slice::Iter<'_, YearSnapshot> {
        self.snapshots.iter()
    }

    /// Calendar year of `index`.
    pub fn calendar_year(&self, index: YearIndex) -> u32 {
        index.calendar_year(self.first_year)
    }

    /// Loader counters.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}
