mod dashboard;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use socialleaf_engine::Aggregator;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(dashboard::health))
        .route("/api/v1/metrics/unified", get(dashboard::unified_metrics))
        .route("/api/v1/metrics/trends", get(dashboard::engagement_trends))
        .route("/api/v1/connections", get(dashboard::connections))
        .route(
            "/api/v1/platforms/{platform}",
            get(dashboard::platform_snapshot),
        )
        .route("/api/v1/refresh", post(dashboard::refresh))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use socialleaf_api::SocialApiClient;
    use socialleaf_store::{ConnectionStore, SnapshotCache};
    use tower::ServiceExt;

    /// Builds the router over a fresh aggregator that has never refreshed.
    /// Nothing here touches the network, so the backend URL is a dead port.
    fn test_app() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = SocialApiClient::new("http://localhost:9", 5, "socialleaf-test/0.1")
            .expect("client construction should not fail");
        let store = ConnectionStore::new(dir.path());
        let cache = SnapshotCache::new(dir.path(), 300_000);
        let state = AppState {
            aggregator: Arc::new(Aggregator::new(client, store, cache)),
        };
        (build_app(state), dir)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[test]
    fn not_found_code_maps_to_404() {
        let err = ApiError::new("req-1", "not_found", "no such platform");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_code_maps_to_400() {
        let err = ApiError::new("req-1", "bad_request", "unknown platform");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_code_maps_to_500() {
        let err = ApiError::new("req-1", "mystery", "boom");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_loading_before_first_refresh() {
        let (app, _dir) = test_app();
        let response = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["loading"], true);
    }

    #[tokio::test]
    async fn caller_request_id_is_echoed_in_meta_and_header() {
        let (app, _dir) = test_app();
        let response = app
            .oneshot(
                Request::get("/api/v1/health")
                    .header("x-request-id", "req-test-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-test-1");
        let json = body_json(response).await;
        assert_eq!(json["meta"]["request_id"], "req-test-1");
    }

    #[tokio::test]
    async fn trends_always_have_seven_days() {
        let (app, _dir) = test_app();
        let response = app
            .oneshot(
                Request::get("/api/v1/metrics/trends")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let days = json["data"].as_array().expect("trend series is an array");
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["name"], "Mon");
        assert_eq!(days[6]["name"], "Sun");
    }

    #[tokio::test]
    async fn unknown_platform_is_bad_request() {
        let (app, _dir) = test_app();
        let response = app
            .oneshot(
                Request::get("/api/v1/platforms/myspace")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn missing_snapshot_is_not_found() {
        let (app, _dir) = test_app();
        let response = app
            .oneshot(
                Request::get("/api/v1/platforms/twitter")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }
}
