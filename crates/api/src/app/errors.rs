use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stocksense_infra::RefreshError;

pub fn refresh_error_to_response(err: RefreshError) -> axum::response::Response {
    match err {
        RefreshError::InvalidInterval => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        RefreshError::NoRuntime => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "scheduler_error", err.to_string())
        }
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
