use agroplan_treatment::PlanRequest;
use axum::{Json, extract::State};
use serde::Deserialize;

use crate::error::AppError;
use crate::render::RenderedPlan;
use crate::routes::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBody {
    #[serde(flatten)]
    pub request: PlanRequest,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// POST /plan
#[tracing::instrument(skip(app))]
pub async fn generate(
    State(app): State<AppState>,
    Json(body): Json<PlanBody>,
) -> Result<Json<RenderedPlan>, AppError> {
    let rendered = crate::plan_for_request(&app.config, &app.catalog, &body.request, body.seed)?;
    Ok(Json(rendered))
}
