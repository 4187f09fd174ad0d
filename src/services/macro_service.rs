//! Macro Service
//!
//! Resolves a data source and runs it. Called by the REST handlers.

use crate::error::{AppError, Result};
use crate::sources::types::CombinedResult;
use crate::state::AppState;
use std::time::Instant;
use tracing::info;

/// Macro service for business logic
pub struct MacroService;

impl MacroService {
    /// Fetch the combined document from one source
    pub async fn get_combined(state: &AppState, source_id: &str) -> Result<CombinedResult> {
        let source = state.sources.get(source_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "Unknown source '{}' (available: {})",
                source_id,
                state.sources.ids().join(", ")
            ))
        })?;

        info!("MacroService::get_combined - {}", source.name());
        let started = Instant::now();

        let result = source.fetch_combined().await?;

        info!(
            "MacroService::get_combined - {} done in {}ms",
            source.id(),
            started.elapsed().as_millis()
        );
        Ok(result)
    }
}
