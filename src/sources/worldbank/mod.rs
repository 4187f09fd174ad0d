//! World Bank indicators adapter
//!
//! Five independent requests, one per indicator, issued concurrently. A
//! failed indicator degrades to null observations without touching the
//! others, so this source never fails as a whole.

use crate::catalog::{worldbank_indicator_url, Country, Indicator};
use crate::error::{AppError, Result};
use crate::sources::types::{CombinedResult, Observation};
use crate::sources::MacroSource;
use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// One row of a World Bank indicator response
#[derive(Debug, Clone, Deserialize)]
pub struct WbObservation {
    #[serde(default)]
    pub country: Option<WbRef>,
    #[serde(default)]
    pub countryiso2code: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// `{id, value}` country reference; only the id is read
#[derive(Debug, Clone, Deserialize)]
pub struct WbRef {
    #[serde(default)]
    pub id: Option<String>,
}

type CountryCodeStrategy = fn(&WbObservation) -> Option<&str>;

/// Country code extraction strategies, tried in order; the first non-empty
/// code wins:
/// 1. top-level ISO-3166 alpha-2 field (`countryiso2code`)
/// 2. nested country reference (`country.id`)
const COUNTRY_CODE_STRATEGIES: [CountryCodeStrategy; 2] = [iso2_code, country_ref_id];

fn iso2_code(obs: &WbObservation) -> Option<&str> {
    obs.countryiso2code.as_deref()
}

fn country_ref_id(obs: &WbObservation) -> Option<&str> {
    obs.country.as_ref().and_then(|c| c.id.as_deref())
}

/// Resolve the dashboard country of an observation
pub fn resolve_country(obs: &WbObservation) -> Option<Country> {
    let code = COUNTRY_CODE_STRATEGIES
        .iter()
        .filter_map(|strategy| strategy(obs))
        .map(str::trim)
        .find(|code| !code.is_empty())?;

    Country::from_code(&code.to_uppercase())
}

/// Most recent non-null observation per tracked country
///
/// Recency is the lexicographic order of `date`. Only a strictly greater
/// date replaces the current pick, so among equal dates the first row
/// parsed is kept.
pub fn select_latest(rows: &[WbObservation]) -> HashMap<Country, Observation> {
    let mut best: HashMap<Country, &WbObservation> = HashMap::new();

    for row in rows {
        if row.value.is_none() {
            continue;
        }
        let Some(country) = resolve_country(row) else {
            continue;
        };

        let replace = best
            .get(&country)
            .map_or(true, |current| row.date > current.date);
        if replace {
            best.insert(country, row);
        }
    }

    best.into_iter()
        .filter_map(|(country, row)| {
            row.value
                .map(|value| (country, Observation::new(value, row.date.as_str())))
        })
        .collect()
}

/// Extract the observation rows from a `[metadata, rows]` payload
///
/// `[metadata, null]` is the upstream's "no data" answer and yields no rows.
/// Rows that do not fit [`WbObservation`] are skipped one by one.
pub fn parse_rows(payload: Value) -> Result<Vec<WbObservation>> {
    let Value::Array(mut parts) = payload else {
        return Err(AppError::MalformedUpstreamData(
            "World Bank response is not an array".to_string(),
        ));
    };

    if parts.len() < 2 {
        // Error answers come back as a single `[{"message": [...]}]` element
        let detail = parts
            .first()
            .map(|meta| meta.to_string())
            .unwrap_or_default();
        return Err(AppError::MalformedUpstreamData(format!(
            "World Bank response has no data element: {}",
            detail
        )));
    }

    match parts.swap_remove(1) {
        Value::Null => Ok(Vec::new()),
        Value::Array(rows) => Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<WbObservation>(row) {
                Ok(obs) => Some(obs),
                Err(e) => {
                    debug!("Skipping unreadable World Bank row: {}", e);
                    None
                }
            })
            .collect()),
        other => Err(AppError::MalformedUpstreamData(format!(
            "World Bank data element is not an array: {}",
            other
        ))),
    }
}

/// World Bank REST data source
pub struct WorldBankSource {
    client: Client,
    base_url: String,
}

impl WorldBankSource {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetch the rows of one indicator
    pub async fn fetch_indicator(&self, indicator: Indicator) -> Result<Vec<WbObservation>> {
        let url = worldbank_indicator_url(&self.base_url, indicator);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                source_name: format!("World Bank {}", indicator),
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let payload: Value = response.json().await?;
        parse_rows(payload)
    }

    /// Fetch one indicator, absorbing any failure into an empty row set
    async fn fetch_indicator_or_empty(&self, indicator: Indicator) -> Vec<WbObservation> {
        match self.fetch_indicator(indicator).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("World Bank fetch failed for {}: {}", indicator, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl MacroSource for WorldBankSource {
    fn id(&self) -> &'static str {
        "worldbank"
    }

    fn name(&self) -> &'static str {
        "World Bank Indicators"
    }

    async fn fetch_combined(&self) -> Result<CombinedResult> {
        let fetches = Indicator::ALL
            .into_iter()
            .map(|indicator| async move { (indicator, self.fetch_indicator_or_empty(indicator).await) });
        let responses = join_all(fetches).await;

        let mut result = CombinedResult::empty();
        for (indicator, rows) in responses {
            for (country, observation) in select_latest(&rows) {
                result.set(indicator, country, observation);
            }
        }

        info!("World Bank: {}/30 observations populated", result.populated());
        Ok(result)
    }
}
