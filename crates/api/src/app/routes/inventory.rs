use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::{AppState, errors};

/// Full consumer snapshot.
pub async fn snapshot(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let snapshot = state.snapshot();
    Json(&*snapshot).into_response()
}

pub async fn list_products(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let snapshot = state.snapshot();
    Json(&snapshot.products).into_response()
}

pub async fn get_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let snapshot = state.snapshot();
    match snapshot.product(&id) {
        Some(product) => Json(product).into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("no product with id {id}"),
        ),
    }
}

pub async fn insights(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let snapshot = state.snapshot();
    Json(&snapshot.category_insights).into_response()
}

pub async fn forecast(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let snapshot = state.snapshot();
    Json(&snapshot.forecast).into_response()
}

pub async fn summary(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    Json(state.snapshot().summary()).into_response()
}
