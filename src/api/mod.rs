//! covidash HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - Single-page dashboard
//!
//! ## Regions
//! - `GET /api/v1/regions` - Region keys for the dropdown
//! - `GET /api/v1/regions/:key` - Chart and table data for one region
//!
//! ## Selection
//! - `POST /api/v1/selection` - Selection-changed event
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Selection events over a persistent connection
//!
//! # Example
//!
//! ```rust,ignore
//! use covidash::api::{serve, ApiConfig, AppState};
//! use covidash::source::DatasetSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(DatasetSource::default().load().await?);
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(dataset, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::source::DatasetSource;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let api_routes = Router::new()
        .route("/regions", get(routes::regions::list_regions))
        .route("/regions/:key", get(routes::regions::region_view))
        .route("/selection", post(routes::selection::select_region));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::dashboard))
        .route("/ws", get(websocket_handler))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy: any origin when none are configured
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Load the dataset once, then serve until shutdown
pub async fn run(source: &DatasetSource, config: ApiConfig) -> ApiResult<()> {
    let dataset = Arc::new(source.load().await?);

    if dataset.is_empty() {
        tracing::warn!("Dataset is empty, the dashboard will have no regions");
    }

    let state = AppState::new(dataset, config.clone());
    serve(state, &config).await
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> ApiResult<()> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("covidash listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("covidash shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Record};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let day = |d| NaiveDate::from_ymd_opt(2020, 3, d).unwrap();
        let dataset = Dataset::from_records(vec![
            Record::new("SP", day(1)).confirmed(10).deaths(0),
            Record::new("SP", day(2)).confirmed(15).deaths(1).latest(true),
            Record::new("AC", day(2)).confirmed(1).deaths(0).latest(true),
        ]);

        let state = AppState::new(Arc::new(dataset), ApiConfig::default());
        build_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Covid Data in Brazil"));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = create_test_app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_regions() {
        let (status, body) = get_json(create_test_app(), "/api/v1/regions").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regions"], serde_json::json!(["AC", "SP"]));
        assert_eq!(body["default"], "SP");
    }

    #[tokio::test]
    async fn test_region_view() {
        let (status, body) = get_json(create_test_app(), "/api/v1/regions/SP").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["region"], "SP");
        assert_eq!(body["title"], "Covid19 Graph in SP");
        assert_eq!(body["series"].as_array().unwrap().len(), 2);
        assert_eq!(body["series"][1]["confirmed"], 15);
        assert_eq!(body["snapshot"][0][0]["value"], "2020-03-02");
    }

    #[tokio::test]
    async fn test_unknown_region_is_empty_not_error() {
        let (status, body) = get_json(create_test_app(), "/api/v1/regions/RJ").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["series"], serde_json::json!([]));
        assert_eq!(body["snapshot"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_select_region() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/selection")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"region": "AC"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["region"], "AC");
        assert_eq!(body["snapshot"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_select_invalid_json() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/selection")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Validation error:"));
        assert!(body["request_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_select_missing_region_field() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/selection")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"state": "SP"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_websocket_requires_upgrade() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    fn app_with_origins(origins: &[&str]) -> Router {
        let config = ApiConfig {
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..Default::default()
        };
        let dataset = Dataset::from_records(Vec::new());
        build_router(AppState::new(Arc::new(dataset), config))
    }

    async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regions")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_cors_configured_origins() {
        // The invalid entry is skipped, the valid one still applies
        let origins = ["http://localhost:8050", "bad\norigin"];

        let allowed = allowed_origin(app_with_origins(&origins), "http://localhost:8050").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:8050"));

        let other = allowed_origin(app_with_origins(&origins), "http://evil.example").await;
        assert_eq!(other, None);
    }

    #[tokio::test]
    async fn test_cors_permissive_without_origins() {
        let allowed = allowed_origin(app_with_origins(&[]), "http://anywhere.example").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }
}
