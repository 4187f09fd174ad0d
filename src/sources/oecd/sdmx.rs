//! SDMX-JSON decoding for the OECD Economic Outlook
//!
//! Series are addressed by `"areaIdx:measIdx[:...]"` keys and observations by
//! a time index; every index points into the matching dimension value list.
//! Entries are walked in document order, so when two series resolve to the
//! same measure, country and year the later one wins.
//! Decoding resolves those indices into an annual [`YearTable`], which
//! [`combine`] then reduces to one observation per indicator and country.

use crate::catalog::{Country, Indicator};
use crate::error::{AppError, Result};
use crate::sources::types::{CombinedResult, Observation};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SdmxMessage {
    pub data: SdmxData,
}

#[derive(Debug, Deserialize)]
pub struct SdmxData {
    #[serde(default)]
    pub structures: Vec<SdmxStructure>,
    #[serde(rename = "dataSets", default)]
    pub data_sets: Vec<SdmxDataSet>,
}

#[derive(Debug, Deserialize)]
pub struct SdmxStructure {
    pub dimensions: SdmxDimensions,
}

#[derive(Debug, Deserialize)]
pub struct SdmxDimensions {
    #[serde(default)]
    pub series: Vec<SdmxDimension>,
    #[serde(default)]
    pub observation: Vec<SdmxDimension>,
}

#[derive(Debug, Deserialize)]
pub struct SdmxDimension {
    #[serde(default)]
    pub values: Vec<SdmxDimensionValue>,
}

#[derive(Debug, Deserialize)]
pub struct SdmxDimensionValue {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SdmxDataSet {
    /// Series key -> series, in document order
    #[serde(default, deserialize_with = "ordered_entries")]
    pub series: Vec<(String, SdmxSeries)>,
}

#[derive(Debug, Deserialize)]
pub struct SdmxSeries {
    /// Time index -> `[value, attribute indices...]`, in document order
    #[serde(default, deserialize_with = "ordered_entries")]
    pub observations: Vec<(String, Option<Vec<Value>>)>,
}

/// Deserialize a JSON object into its entries, keeping document order
fn ordered_entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
    map.into_iter()
        .map(|(key, value)| {
            serde_json::from_value(value)
                .map(|entry| (key, entry))
                .map_err(de::Error::custom)
        })
        .collect()
}

// ============================================================================
// Intermediate table
// ============================================================================

/// measure -> country -> year -> value, annual periods only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearTable {
    rows: BTreeMap<String, BTreeMap<Country, BTreeMap<String, f64>>>,
}

impl YearTable {
    pub fn insert(&mut self, measure: &str, country: Country, year: &str, value: f64) {
        self.rows
            .entry(measure.to_string())
            .or_default()
            .entry(country)
            .or_default()
            .insert(year.to_string(), value);
    }

    /// Year -> value for one measure and country, ascending by year
    pub fn years(&self, measure: &str, country: Country) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(measure).and_then(|countries| countries.get(&country))
    }

    /// Measures seen in the payload
    pub fn measures(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }
}

/// Bounds-checked lookup of a coded index in a dimension value list
fn dimension_value<'a>(dimension: &'a SdmxDimension, raw_index: &str, what: &str) -> Result<&'a str> {
    let index: usize = raw_index.parse().map_err(|_| {
        AppError::MalformedUpstreamData(format!("{} index '{}' is not a number", what, raw_index))
    })?;

    dimension
        .values
        .get(index)
        .map(|v| v.id.as_str())
        .ok_or_else(|| {
            AppError::MalformedUpstreamData(format!(
                "{} index {} out of range ({} values)",
                what,
                index,
                dimension.values.len()
            ))
        })
}

/// Sub-annual periods carry a separator, e.g. `2024-Q1`
fn is_annual(period: &str) -> bool {
    !period.contains('-')
}

/// Decode an SDMX-JSON message into the annual year table
pub fn decode(message: &SdmxMessage) -> Result<YearTable> {
    let structure = message.data.structures.first().ok_or_else(|| {
        AppError::MalformedUpstreamData("response has no structures".to_string())
    })?;
    let data_set = message.data.data_sets.first().ok_or_else(|| {
        AppError::MalformedUpstreamData("response has no dataSets".to_string())
    })?;

    let dims = &structure.dimensions;
    let (area_dim, measure_dim) = match dims.series.as_slice() {
        [area, measure, ..] => (area, measure),
        other => {
            return Err(AppError::MalformedUpstreamData(format!(
                "expected 2 series dimensions, found {}",
                other.len()
            )))
        }
    };
    let time_dim = dims.observation.first().ok_or_else(|| {
        AppError::MalformedUpstreamData("response has no observation dimension".to_string())
    })?;

    let mut table = YearTable::default();

    for (key, series) in &data_set.series {
        let mut parts = key.split(':');
        let (area_idx, measure_idx) = match (parts.next(), parts.next()) {
            (Some(a), Some(m)) => (a, m),
            _ => {
                return Err(AppError::MalformedUpstreamData(format!(
                    "series key '{}' has fewer than 2 dimensions",
                    key
                )))
            }
        };

        let area = dimension_value(area_dim, area_idx, "area")?;
        let measure = dimension_value(measure_dim, measure_idx, "measure")?;

        let Some(country) = Country::from_oecd_area(area) else {
            debug!("Skipping series {} for unmapped area {}", key, area);
            continue;
        };

        for (time_idx, obs) in &series.observations {
            let Some(value) = obs.as_ref().and_then(|o| o.first()).and_then(Value::as_f64) else {
                continue;
            };
            let period = dimension_value(time_dim, time_idx, "time")?;
            if !is_annual(period) {
                continue;
            }
            table.insert(measure, country, period, value);
        }
    }

    Ok(table)
}

/// Year-over-year percent change between the two most recent years
fn yoy_change(years: &BTreeMap<String, f64>) -> Observation {
    let mut recent = years.iter().rev();
    match (recent.next(), recent.next()) {
        (Some((latest_year, latest)), Some((_, prev))) => {
            Observation::new((latest / prev - 1.0) * 100.0, latest_year.as_str())
        }
        _ => Observation::missing(),
    }
}

/// Most recent year's raw value
fn latest_value(years: &BTreeMap<String, f64>) -> Observation {
    years
        .iter()
        .next_back()
        .map(|(year, value)| Observation::new(*value, year.as_str()))
        .unwrap_or_else(Observation::missing)
}

/// Reduce the year table to the combined dashboard document
pub fn combine(table: &YearTable) -> CombinedResult {
    let mut result = CombinedResult::empty();
    let no_years = BTreeMap::new();

    for indicator in Indicator::ALL {
        for country in Country::ALL {
            let years = table
                .years(indicator.oecd_measure(), country)
                .unwrap_or(&no_years);

            let observation = match indicator {
                Indicator::Inflation => yoy_change(years),
                _ => latest_value(years),
            };
            result.set(indicator, country, observation);
        }
    }

    result
}
