//! Static catalog of crop-protection products registered in Ukraine.
//!
//! One JSON document per crop is embedded into the binary and parsed once per
//! process. The data is read-only afterwards.

mod catalog;
mod crop;
mod error;
mod product;

pub use catalog::{Catalog, CropCatalog};
pub use crop::{Crop, PlotType, ProblemType};
pub use error::CatalogError;
pub use product::{
    ApplicationTime, Fungicide, FungicideCategory, FungicideControl, FungicideControls, Herbicide,
    Insecticide, InsecticideControl, InsecticideControls, Product, ProductKey, Rated, WeedSpectrum,
};
