//! HTTP API
//!
//! Thin axum layer over the store and search engine. Handlers own limit
//! clamping, id parsing and the mapping of [`AppError`] onto status codes;
//! everything else is delegated to the core.

pub mod handlers;
pub mod responses;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::search::SearchEngine;
use anyhow::{Context, Result};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(engine: SearchEngine, config: ServerConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Request failed ({}): {}", self.error_code(), self);
        } else {
            debug!("Rejected request ({}): {}", self.error_code(), self);
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Build the API router.
///
/// CORS is fully open so that browser frontends on other origins can call
/// the API directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/health", get(handlers::handle_health))
        .route("/search", get(handlers::handle_search))
        .route("/politicians", get(handlers::handle_all_politicians))
        .route("/politicians/:id", get(handlers::handle_politician))
        .route("/politicians/:id/votes", get(handlers::handle_votes))
        .route("/politicians/:id/policies", get(handlers::handle_policies))
        .route("/politicians/:id/impact", get(handlers::handle_impact))
        .route("/compare", get(handlers::handle_compare))
        .route("/map/politicians", get(handlers::handle_map_politicians))
        .route("/map/national", get(handlers::handle_national))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Load the dataset, bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    let engine = config
        .build_engine()
        .with_context(|| format!("Failed to load politician data from {}", config.data_path.display()))?;
    let bind_addr = config.bind_addr;
    let app = router(AppState::new(engine, config));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Civic Lens API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResultCache;
    use crate::store::test_support::sample_store;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let engine = SearchEngine::new(Arc::new(sample_store()), ResultCache::default());
        router(AppState::new(engine, ServerConfig::default()))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["politicians"], 9);
        assert_eq!(body["cache"]["capacity"], 256);
    }

    #[tokio::test]
    async fn test_cross_origin_requests_allowed() {
        let request = Request::builder()
            .uri("/politicians")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );

        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/search?name=biden")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(preflight).await.unwrap();
        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["search"], "/search?name={name}&zip_code={zip}&limit={limit}");
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let (status, body) = get_json("/search?name=Biden&zip_code=").await;
        assert_eq!(status, StatusCode::OK);
        let results = body["politician_summaries"].as_array().unwrap();
        assert!(!results.is_empty());
        assert!(results[0]["name"].as_str().unwrap().contains("Biden"));
    }

    #[tokio::test]
    async fn test_search_case_insensitive_and_partial() {
        let (_, lower) = get_json("/search?name=biden").await;
        assert!(!lower["politician_summaries"].as_array().unwrap().is_empty());

        let (_, partial) = get_json("/search?name=Bid").await;
        assert!(!partial["politician_summaries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let (status, body) = get_json("/search?name=NonexistentPolitician&zip_code=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_search_limit_clamped() {
        let (status, body) = get_json("/search?name=a&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"].as_array().unwrap().len(), 2);

        let (status, body) = get_json("/search?name=a&limit=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"].as_array().unwrap().len(), 1);

        let (status, body) = get_json("/search?name=a&limit=-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"].as_array().unwrap().len(), 1);

        let (status, body) = get_json("/search?name=a&limit=500").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_search_requires_name() {
        let (status, body) = get_json("/search").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = get_json("/search?name=Biden&limit=lots").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_all_politicians() {
        let (status, body) = get_json("/politicians").await;
        assert_eq!(status, StatusCode::OK);
        let politicians = body.as_array().unwrap();
        assert_eq!(politicians.len(), 9);
        for politician in politicians {
            for field in ["id", "name", "party", "position"] {
                assert!(politician.get(field).is_some());
            }
        }
    }

    #[tokio::test]
    async fn test_politician_by_id() {
        let (status, body) = get_json("/politicians/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Joe Biden");

        let (status, body) = get_json("/politicians/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].is_string());

        let (status, _) = get_json("/politicians/abc").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_votes_policies_impact() {
        let (status, body) = get_json("/politicians/1/votes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_name"], "Joe Biden");
        let vote = &body["votes"][0];
        for field in ["bill_name", "vote", "date", "description"] {
            assert!(vote.get(field).is_some());
        }

        let (status, body) = get_json("/politicians/6/policies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["policies"][0]["category"], "Healthcare");

        let (status, body) = get_json("/politicians/1/impact?zip_code=19801").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_bills"][0]["status"], "In Progress");
        assert!(body["current_bills"][0].get("your_impact").is_some());
        assert!(body["summary"].as_str().unwrap().contains("2 bills"));

        for uri in ["/politicians/999/votes", "/politicians/999/policies", "/politicians/999/impact"] {
            let (status, _) = get_json(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_compare() {
        let (status, body) = get_json("/compare?ids=1,2,3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"].as_array().unwrap().len(), 3);

        let (status, body) = get_json("/compare?ids=1,%202,%203").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politician_summaries"].as_array().unwrap().len(), 3);

        let (status, _) = get_json("/compare?ids=1").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json("/compare?ids=1,999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("999"));

        let (status, _) = get_json("/compare?ids=1,abc").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_map_by_state() {
        let (status, body) = get_json("/map/politicians?state=CA").await;
        assert_eq!(status, StatusCode::OK);
        let politicians = body["politicians"].as_array().unwrap();
        assert_eq!(politicians.len(), 3);
        for politician in politicians {
            assert_eq!(politician["location"]["state"], "CA");
            assert!(politician["location"].get("center").is_some());
        }

        let (_, body) = get_json("/map/politicians?state=NY").await;
        let politicians = body["politicians"].as_array().unwrap();
        let adams = politicians.iter().find(|p| p["id"] == 9).unwrap();
        assert_eq!(adams["location"]["type"], "unknown");
    }

    #[tokio::test]
    async fn test_map_coordinates_only_is_empty() {
        let (status, body) = get_json("/map/politicians?lat=34.05&lng=-118.24").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["politicians"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_map_national() {
        let (status, body) = get_json("/map/national").await;
        assert_eq!(status, StatusCode::OK);
        let politicians = body["politicians"].as_array().unwrap();
        assert!(politicians.len() >= 2);
        for politician in politicians {
            assert_eq!(politician["location"]["type"], "national");
        }
    }
}
