use agroplan_catalog::{CatalogError, Crop};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("No catalog data for {0}")]
    CropNotInCatalog(Crop),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownCrop(_) | AppError::CropNotInCatalog(_) => StatusCode::NOT_FOUND,
            AppError::CatalogError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::UnknownCrop(_) | AppError::CropNotInCatalog(_) => self.to_string(),
            AppError::CatalogError(e) => {
                tracing::error!("Catalog error: {}", e);
                "Product catalog is unavailable.".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
