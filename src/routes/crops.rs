use std::str::FromStr;

use agroplan_catalog::{Crop, PlotType, ProblemType};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::listing::{CropSummary, ProductListing, crop_summaries};
use crate::routes::AppState;

/// GET /crops
#[tracing::instrument(skip_all)]
pub async fn list(State(app): State<AppState>) -> Json<Vec<CropSummary>> {
    Json(crop_summaries(&app.catalog))
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub plot: PlotType,
    pub problem: ProblemType,
    /// Comma-separated control names
    #[serde(default)]
    pub filter: Option<String>,
}

/// GET /crops/{crop}/products?plot=&problem=&filter=
#[tracing::instrument(skip(app))]
pub async fn products(
    Path(crop): Path<String>,
    Query(query): Query<ProductsQuery>,
    State(app): State<AppState>,
) -> Result<Json<ProductListing>, AppError> {
    let crop = Crop::from_str(&crop).map_err(|_| AppError::UnknownCrop(crop.clone()))?;
    let crop_catalog = app
        .catalog
        .crop(crop)
        .ok_or(AppError::CropNotInCatalog(crop))?;

    let filters: Vec<String> = query.filter.into_iter().collect();
    let listing = ProductListing::build(crop_catalog, crop, query.plot, query.problem, &filters)?;

    Ok(Json(listing))
}
