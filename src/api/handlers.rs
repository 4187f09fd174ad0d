//! REST API endpoint handlers
//!
//! Macro handlers are method-agnostic and ignore query and body. A success
//! carries the CORS and shared-cache headers; a failure is a JSON
//! `{error, stack}` body with the JSON content type only.

use crate::api::types::{HealthResponse, CACHE_POLICY, JSON_CONTENT_TYPE};
use crate::error::{AppError, ErrorResponse};
use crate::services::MacroService;
use crate::sources::types::CombinedResult;
use crate::sources::DEFAULT_SOURCE;
use crate::state::AppState;
use axum::{
    extract::{Json, Path, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint - GET /health or GET /
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sources = state.sources.ids().into_iter().map(String::from).collect();
    Json(HealthResponse::ok(sources))
}

// ============================================================================
// Macro data
// ============================================================================

/// Default macro document - ANY /api/macro
pub async fn default_macro(State(state): State<Arc<AppState>>) -> Response {
    serve_source(&state, DEFAULT_SOURCE).await
}

/// Macro document from a named source - ANY /api/macro/{source}
pub async fn source_macro(
    State(state): State<Arc<AppState>>,
    Path(source_id): Path<String>,
) -> Response {
    serve_source(&state, &source_id).await
}

async fn serve_source(state: &AppState, source_id: &str) -> Response {
    match MacroService::get_combined(state, source_id).await {
        Ok(result) => success_response(&result),
        Err(e) => error_response(&e),
    }
}

fn success_response(result: &CombinedResult) -> Response {
    let body = match serde_json::to_vec(result) {
        Ok(body) => body,
        Err(e) => return error_response(&AppError::from(e)),
    };

    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (CONTENT_TYPE, JSON_CONTENT_TYPE),
            (CACHE_CONTROL, CACHE_POLICY),
        ],
        body,
    )
        .into_response()
}

fn error_response(err: &AppError) -> Response {
    error!("macro handler error: {}", err.stack());

    (err.status_code(), Json(ErrorResponse::from(err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::router;
    use crate::config::ServerConfig;
    use crate::test_support::{fixtures, spawn_upstream};
    use axum::Router;
    use serde_json::Value;

    /// Serve the API against fake upstreams, returning its base URL
    async fn spawn_api(oecd: Router, worldbank: Router) -> String {
        let config = ServerConfig {
            oecd_base_url: spawn_upstream(oecd).await,
            worldbank_base_url: format!("{}/v2", spawn_upstream(worldbank).await),
            ..ServerConfig::default()
        };
        let state = Arc::new(AppState::new(config).unwrap());
        spawn_upstream(router(state)).await
    }

    fn oecd_ok() -> Router {
        let payload = fixtures::oecd_payload();
        Router::new().fallback(move || {
            let payload = payload.clone();
            async move { Json(payload) }
        })
    }

    fn worldbank_ok() -> Router {
        Router::new().route(
            "/v2/country/:countries/indicator/:id",
            axum::routing::get(|Path((_c, id)): Path<(String, String)>| async move {
                Json(fixtures::worldbank_payload(&id))
            }),
        )
    }

    fn assert_thirty_entries(body: &Value) {
        let indicators = body.as_object().unwrap();
        assert_eq!(indicators.len(), 5);
        for countries in indicators.values() {
            let countries = countries.as_object().unwrap();
            assert_eq!(countries.len(), 6);
            for obs in countries.values() {
                assert!(obs.get("value").is_some());
                assert!(obs.get("year").is_some());
            }
        }
    }

    #[tokio::test]
    async fn test_oecd_success_headers_and_body() {
        let api = spawn_api(oecd_ok(), worldbank_ok()).await;

        let response = reqwest::get(format!("{}/api/macro", api)).await.unwrap();
        assert_eq!(response.status(), 200);

        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(headers[CACHE_CONTROL], CACHE_POLICY);

        let body: Value = response.json().await.unwrap();
        assert_thirty_entries(&body);
        assert_eq!(body["FP.CPI.TOTL.ZG"]["US"]["year"], "2023");
        assert!(body.get("DE").is_none());
    }

    #[tokio::test]
    async fn test_oecd_upstream_503_returns_500() {
        let failing = Router::new().fallback(|| async {
            (StatusCode::SERVICE_UNAVAILABLE, "upstream maintenance")
        });
        let api = spawn_api(failing, worldbank_ok()).await;

        let response = reqwest::get(format!("{}/api/macro/oecd", api)).await.unwrap();
        assert_eq!(response.status(), 500);
        assert!(response.headers().get(CACHE_CONTROL).is_none());
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

        let body: Value = response.json().await.unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(!message.is_empty());
        assert!(message.contains("503"));
        assert!(body["stack"].as_str().unwrap().starts_with("UpstreamError"));
    }

    #[tokio::test]
    async fn test_worldbank_is_method_agnostic() {
        let api = spawn_api(oecd_ok(), worldbank_ok()).await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/macro/worldbank?ignored=1", api))
            .body("ignored")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()[CACHE_CONTROL], CACHE_POLICY);

        let body: Value = response.json().await.unwrap();
        assert_thirty_entries(&body);
        assert_eq!(body["NY.GDP.MKTP.KD.ZG"]["US"]["value"], 7.0);
    }

    #[tokio::test]
    async fn test_worldbank_all_upstreams_down_still_200() {
        let down = Router::new().fallback(|| async { StatusCode::BAD_GATEWAY });
        let api = spawn_api(oecd_ok(), down).await;

        let response = reqwest::get(format!("{}/api/macro/worldbank", api)).await.unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        assert_thirty_entries(&body);
        assert_eq!(body["SL.UEM.TOTL.ZS"]["GB"], serde_json::json!({"value": null, "year": null}));
    }

    #[tokio::test]
    async fn test_unknown_source_is_404() {
        let api = spawn_api(oecd_ok(), worldbank_ok()).await;

        let response = reqwest::get(format!("{}/api/macro/imf", api)).await.unwrap();
        assert_eq!(response.status(), 404);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("imf"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let api = spawn_api(oecd_ok(), worldbank_ok()).await;

        let body: Value = reqwest::get(format!("{}/health", api))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sources"], serde_json::json!(["oecd", "worldbank"]));
    }
}
