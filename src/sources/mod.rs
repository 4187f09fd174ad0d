//! Macro data source adapters

pub mod types;
pub mod oecd;
pub mod worldbank;

use crate::config::ServerConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use types::CombinedResult;

/// Trait implemented by every upstream adapter
#[async_trait]
pub trait MacroSource: Send + Sync {
    /// Source ID used in routes (e.g., "oecd", "worldbank")
    fn id(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    /// Fetch upstream data and reshape it into the combined document
    async fn fetch_combined(&self) -> Result<CombinedResult>;
}

/// Source served when no source is named in the route
pub const DEFAULT_SOURCE: &str = "oecd";

/// Registry of the configured data sources
pub struct SourceRegistry {
    sources: BTreeMap<String, Arc<dyn MacroSource>>,
}

impl SourceRegistry {
    /// Create a registry with every supported source
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut registry = Self::empty();

        registry.register(Arc::new(oecd::OecdSource::new(
            &config.oecd_base_url,
            &config.user_agent,
        )?));
        registry.register(Arc::new(worldbank::WorldBankSource::new(
            &config.worldbank_base_url,
            &config.user_agent,
        )?));

        Ok(registry)
    }

    /// Registry without sources
    pub fn empty() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, source: Arc<dyn MacroSource>) {
        self.sources.insert(source.id().to_string(), source);
    }

    /// Get source by ID
    pub fn get(&self, id: &str) -> Option<Arc<dyn MacroSource>> {
        self.sources.get(id).cloned()
    }

    /// IDs of all registered sources
    pub fn ids(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }
}
