//! Common output types shared by all data sources

use crate::catalog::{Country, Indicator};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Latest known reading for one (indicator, country) pair
///
/// Absence is both fields `null`, never a missing key.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Observation {
    pub value: Option<f64>,
    pub year: Option<String>,
}

impl Observation {
    pub fn new(value: f64, year: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            year: Some(year.into()),
        }
    }

    /// The null observation
    pub fn missing() -> Self {
        Self {
            value: None,
            year: None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none() && self.year.is_none()
    }
}

impl Default for Observation {
    fn default() -> Self {
        Self::missing()
    }
}

/// Indicator ID -> country code -> observation
///
/// Stored as a fixed grid over [`Indicator::ALL`] x [`Country::ALL`], so
/// every one of the 30 entries always exists. Serializes as a nested JSON
/// object in catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedResult {
    grid: [[Observation; 6]; 5],
}

impl CombinedResult {
    /// All entries set to the null observation
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, indicator: Indicator, country: Country) -> &Observation {
        &self.grid[indicator.index()][country.index()]
    }

    pub fn set(&mut self, indicator: Indicator, country: Country, observation: Observation) {
        self.grid[indicator.index()][country.index()] = observation;
    }

    /// Iterate `(indicator, country, observation)` in output order
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, Country, &Observation)> + '_ {
        Indicator::ALL.into_iter().flat_map(move |indicator| {
            Country::ALL
                .into_iter()
                .map(move |country| (indicator, country, self.get(indicator, country)))
        })
    }

    /// Number of entries holding data
    pub fn populated(&self) -> usize {
        self.iter().filter(|(_, _, obs)| !obs.is_missing()).count()
    }
}

struct CountryRow<'a>(&'a [Observation; 6]);

impl Serialize for CountryRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Country::ALL.len()))?;
        for country in Country::ALL {
            map.serialize_entry(country.code(), &self.0[country.index()])?;
        }
        map.end()
    }
}

impl Serialize for CombinedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Indicator::ALL.len()))?;
        for indicator in Indicator::ALL {
            map.serialize_entry(indicator.wb_id(), &CountryRow(&self.grid[indicator.index()]))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_empty_result_has_thirty_null_entries() {
        let result = CombinedResult::empty();
        let value = serde_json::to_value(&result).unwrap();
        let indicators = value.as_object().unwrap();

        assert_eq!(indicators.len(), 5);
        for indicator in Indicator::ALL {
            let countries = indicators[indicator.wb_id()].as_object().unwrap();
            assert_eq!(countries.len(), 6);
            for country in Country::ALL {
                assert_eq!(countries[country.code()], json!({"value": null, "year": null}));
            }
        }
        assert_eq!(result.populated(), 0);
    }

    #[test]
    fn test_set_and_serialize_order() {
        let mut result = CombinedResult::empty();
        result.set(Indicator::Unemployment, Country::JP, Observation::new(2.5, "2024"));

        assert_eq!(result.populated(), 1);
        assert_eq!(
            result.get(Indicator::Unemployment, Country::JP),
            &Observation::new(2.5, "2024")
        );

        let text = serde_json::to_string(&result).unwrap();
        // Indicators and countries keep catalog order
        let gdp = text.find("NY.GDP.MKTP.KD.ZG").unwrap();
        let debt = text.find("GC.DOD.TOTL.GD.ZS").unwrap();
        assert!(gdp < debt);
        assert!(text.starts_with(r#"{"NY.GDP.MKTP.KD.ZG":{"US":{"value":null,"year":null},"CN""#));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["SL.UEM.TOTL.ZS"]["JP"], json!({"value": 2.5, "year": "2024"}));
    }

    #[test]
    fn test_non_finite_value_serializes_as_null() {
        let mut result = CombinedResult::empty();
        result.set(Indicator::Inflation, Country::IN, Observation::new(f64::INFINITY, "2023"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["FP.CPI.TOTL.ZG"]["IN"], json!({"value": null, "year": "2023"}));
    }
}
