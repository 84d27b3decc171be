use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data::model::{Continent, CountryRecord, Dataset, LoadStats, YearSnapshot};
use crate::foundation::core::YearIndex;
use crate::foundation::error::{GapminderError, GapminderResult};

#[derive(serde::Deserialize)]
struct RawYear {
    countries: Vec<RawCountry>,
}

#[derive(serde::Deserialize)]
struct RawCountry {
    country: String,
    #[serde(default)]
    continent: Option<String>,
    #[serde(default)]
    income: Option<RawNumber>,
    #[serde(default)]
    life_exp: Option<RawNumber>,
    #[serde(default)]
    population: Option<RawNumber>,
}

/// Statistic fields arrive either as JSON numbers or as numeric strings.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
}

impl RawNumber {
    fn coerce(&self) -> f64 {
        match self {
            Self::Num(v) => *v,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

/// Coerce a statistic that must be present: `None` for null, missing, zero, empty or non-numeric.
fn present(v: Option<&RawNumber>) -> Option<f64> {
    let v = v?.coerce();
    (v.is_finite() && v != 0.0).then_some(v)
}

fn population(v: Option<&RawNumber>) -> u64 {
    match v.map(RawNumber::coerce) {
        Some(p) if p.is_finite() && p > 0.0 => p.round() as u64,
        _ => 0,
    }
}

/// Load the dataset from a JSON file on disk.
#[tracing::instrument]
pub fn load_path(path: &Path, first_year: u16) -> GapminderResult<Dataset> {
    let f = File::open(path)
        .map_err(|e| GapminderError::load(format!("open dataset '{}': {e}", path.display())))?;
    from_reader(BufReader::new(f), first_year)
}

/// Load the dataset from any JSON byte stream.
pub fn from_reader<R: Read>(reader: R, first_year: u16) -> GapminderResult<Dataset> {
    let raw: Vec<RawYear> = serde_json::from_reader(reader)
        .map_err(|e| GapminderError::load(format!("parse dataset JSON: {e}")))?;
    normalize(raw, first_year)
}

/// Load the dataset from an in-memory JSON document.
pub fn from_json_str(json: &str, first_year: u16) -> GapminderResult<Dataset> {
    let raw: Vec<RawYear> = serde_json::from_str(json)
        .map_err(|e| GapminderError::load(format!("parse dataset JSON: {e}")))?;
    normalize(raw, first_year)
}

fn normalize(raw: Vec<RawYear>, first_year: u16) -> GapminderResult<Dataset> {
    if raw.is_empty() {
        return Err(GapminderError::load("dataset contains no year entries"));
    }

    let mut stats = LoadStats {
        years: raw.len(),
        ..LoadStats::default()
    };
    let mut snapshots = Vec::with_capacity(raw.len());

    for (i, year) in raw.into_iter().enumerate() {
        let index = YearIndex(i);
        let calendar_year = index.calendar_year(first_year);
        let mut seen: HashSet<String> = HashSet::with_capacity(year.countries.len());
        let mut records = Vec::with_capacity(year.countries.len());

        for c in year.countries {
            let (Some(income), Some(life_exp)) =
                (present(c.income.as_ref()), present(c.life_exp.as_ref()))
            else {
                tracing::trace!(
                    year = calendar_year,
                    country = %c.country,
                    "dropping incomplete record"
                );
                stats.dropped_incomplete += 1;
                continue;
            };

            let continent: Continent = c
                .continent
                .as_deref()
                .ok_or_else(|| {
                    GapminderError::load(format!(
                        "year {calendar_year}: country '{}' has no continent",
                        c.country
                    ))
                })?
                .parse()
                .map_err(|e| {
                    GapminderError::load(format!(
                        "year {calendar_year}: country '{}': {e}",
                        c.country
                    ))
                })?;

            if !seen.insert(c.country.clone()) {
                tracing::warn!(
                    year = calendar_year,
                    country = %c.country,
                    "duplicate country key, keeping first"
                );
                stats.dropped_duplicate += 1;
                continue;
            }

            records.push(CountryRecord {
                population: population(c.population.as_ref()),
                country: c.country,
                continent,
                income,
                life_exp,
            });
        }

        stats.retained += records.len();
        snapshots.push(YearSnapshot { index, records });
    }

    tracing::info!(
        years = stats.years,
        retained = stats.retained,
        dropped_incomplete = stats.dropped_incomplete,
        dropped_duplicate = stats.dropped_duplicate,
        "dataset loaded"
    );

    Ok(Dataset::new(first_year, snapshots, stats))
}

#[cfg(test)]
#[path = "../../tests/unit/data/loader.rs"]
mod tests;
