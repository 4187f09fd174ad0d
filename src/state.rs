//! Application state management

use crate::config::ServerConfig;
use crate::error::Result;
use crate::sources::SourceRegistry;
use std::sync::Arc;

/// State shared by all request handlers
///
/// Read-only after startup; requests never mutate it.
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// Upstream adapters
    pub sources: Arc<SourceRegistry>,
}

impl AppState {
    /// Create state with every supported source
    pub fn new(config: ServerConfig) -> Result<Self> {
        let sources = SourceRegistry::new(&config)?;
        Ok(Self::with_sources(config, sources))
    }

    /// Create state around an explicit registry
    pub fn with_sources(config: ServerConfig, sources: SourceRegistry) -> Self {
        Self {
            config: Arc::new(config),
            sources: Arc::new(sources),
        }
    }
}
