//! REST API module
//!
//! Provides:
//! - Combined macro documents (/api/macro, /api/macro/{source})
//! - Health check (/health)
//!
//! The dashboard fetches `/api/macro` (OECD Economic Outlook) or
//! `/api/macro/worldbank` and renders the returned
//! indicator -> country -> `{value, year}` document.

mod server;
pub mod handlers;
mod types;

pub use server::{router, ApiServer};
pub use types::{HealthResponse, CACHE_POLICY, JSON_CONTENT_TYPE};
