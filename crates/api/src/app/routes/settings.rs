use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::app::{AppState, dto, errors};

pub async fn get_refresh_interval(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    let scheduler = state.scheduler().lock().await;
    Json(dto::RefreshSettingsResponse::new(
        scheduler.interval(),
        scheduler.state(),
    ))
    .into_response()
}

/// Clamp to the dashboard bounds, then re-arm the scheduler.
pub async fn set_refresh_interval(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<dto::SetRefreshIntervalRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let mut scheduler = state.scheduler().lock().await;
    if let Err(e) = scheduler.set_interval(body.clamped()) {
        return errors::refresh_error_to_response(e);
    }

    Json(dto::RefreshSettingsResponse::new(
        scheduler.interval(),
        scheduler.state(),
    ))
    .into_response()
}

pub async fn refresh_now(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let scheduler = state.scheduler().lock().await;
    if !scheduler.refresh_now() {
        return errors::json_error(
            StatusCode::CONFLICT,
            "scheduler_idle",
            "refresh scheduler is not running",
        );
    }

    (
        StatusCode::ACCEPTED,
        Json(json!({ "cycle": state.snapshot().cycle })),
    )
        .into_response()
}
