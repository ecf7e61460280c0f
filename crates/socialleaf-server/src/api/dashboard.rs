//! Read-only dashboard endpoints over the shared aggregator.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use socialleaf_core::Platform;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct HealthData {
    status: &'static str,
    loading: bool,
    last_fetch: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshData {
    last_fetch: Option<i64>,
}

pub(super) async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = HealthData {
        status: "ok",
        loading: state.aggregator.is_loading().await,
        last_fetch: state.aggregator.last_fetch().await,
    };
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn unified_metrics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = state.aggregator.unified_metrics().await;
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn engagement_trends(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = state.aggregator.engagement_trends().await;
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn connections(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let data = state.aggregator.connections().await;
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn platform_snapshot(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(platform): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let platform: Platform = platform
        .parse()
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", format!("{e}")))?;

    match state.aggregator.snapshot(platform).await {
        Some(snapshot) => Ok(Json(ApiResponse {
            data: snapshot,
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no snapshot for {platform}"),
        )),
    }
}

/// Triggers a full refresh plus the follow-up deep-fetch pass.
pub(super) async fn refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    state.aggregator.refresh_all().await;
    state.aggregator.ensure_deep_data().await;
    let data = RefreshData {
        last_fetch: state.aggregator.last_fetch().await,
    };
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
