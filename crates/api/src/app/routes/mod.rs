use axum::{
    Router,
    routing::{get, post},
};

pub mod inventory;
pub mod settings;
pub mod system;

/// Router for every endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        .route("/snapshot", get(inventory::snapshot))
        .route("/summary", get(inventory::summary))
        .route("/insights", get(inventory::insights))
        .route("/forecast", get(inventory::forecast))
        .route("/products", get(inventory::list_products))
        .route("/products/:id", get(inventory::get_product))
        .route(
            "/settings/refresh-interval",
            get(settings::get_refresh_interval).put(settings::set_refresh_interval),
        )
        .route("/refresh", post(settings::refresh_now))
}
