use std::path::PathBuf;

use thiserror::Error;

use crate::{Crop, ProductKey};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid catalog document for {crop}: {source}")]
    InvalidDocument {
        crop: Crop,
        source: serde_json::Error,
    },

    #[error("Unknown fungicide category: {0} (expected 1, 2 or 3)")]
    UnknownCategory(u8),

    #[error("Embedded catalog file {0} is missing or not valid UTF-8")]
    Embedded(String),

    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Duplicate product {key} in {crop} catalog")]
    DuplicateProduct { crop: Crop, key: ProductKey },
}
