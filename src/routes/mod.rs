use std::sync::Arc;

use agroplan_catalog::Catalog;
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

mod crops;
mod health;
mod plan;

pub use plan::PlanBody;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub catalog: Arc<Catalog>,
}

pub async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"})))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/crops", get(crops::list))
        .route("/crops/{crop}/products", get(crops::products))
        .route("/plan", post(plan::generate))
        .fallback(fallback)
        .with_state(app_state)
}
