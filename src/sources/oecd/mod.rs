//! OECD Economic Outlook adapter
//!
//! One request for all measures and countries, decoded from SDMX-JSON.
//! Any failure aborts the whole document.

pub mod sdmx;

use crate::catalog::oecd_data_url;
use crate::error::{AppError, Result};
use crate::sources::types::CombinedResult;
use crate::sources::MacroSource;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, info};

/// Upstream name used in error messages
const SOURCE_NAME: &str = "OECD EO";

/// Maximum characters of an error body kept in the error message
const ERROR_BODY_LIMIT: usize = 300;

/// OECD SDMX-JSON data source
pub struct OecdSource {
    client: Client,
    url: String,
}

impl OecdSource {
    /// Create a source querying the Economic Outlook under `base_url`
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            url: oecd_data_url(base_url),
        })
    }

    async fn fetch_message(&self) -> Result<sdmx::SdmxMessage> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable)".to_string());
            return Err(AppError::Upstream {
                source_name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// First `limit` characters of `text`
fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[async_trait]
impl MacroSource for OecdSource {
    fn id(&self) -> &'static str {
        "oecd"
    }

    fn name(&self) -> &'static str {
        "OECD Economic Outlook"
    }

    async fn fetch_combined(&self) -> Result<CombinedResult> {
        let message = self.fetch_message().await?;
        let table = sdmx::decode(&message)?;
        let result = sdmx::combine(&table);

        info!(
            "OECD: {} measures decoded, {}/30 observations populated",
            table.measures().count(),
            result.populated()
        );
        Ok(result)
    }
}
