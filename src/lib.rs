pub mod cli;
pub mod config;
pub mod error;
pub mod listing;
pub mod observability;
pub mod render;
pub mod routes;

use std::sync::Arc;

use agroplan_catalog::{Catalog, CatalogError};
use agroplan_treatment::PlanRequest;

pub use config::Config;
pub use error::AppError;
pub use routes::AppState;

use crate::config::CatalogConfig;
use crate::render::RenderedPlan;

/// Loads the override directory when configured, the embedded catalog
/// otherwise.
pub fn load_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    match &config.dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading catalog from directory");
            Catalog::from_dir(dir)
        }
        None => Catalog::load_embedded(),
    }
}

/// Validates the season, generates a plan and renders it. A plan breaking a
/// scheduling invariant is logged, never returned as an error.
pub fn plan_for_request(
    config: &Config,
    catalog: &Catalog,
    request: &PlanRequest,
    seed: Option<u64>,
) -> Result<RenderedPlan, AppError> {
    config
        .planner
        .check_season(request.season_length_days)
        .map_err(AppError::ValidationError)?;

    if catalog.crop(request.crop).is_none() {
        return Err(AppError::CropNotInCatalog(request.crop));
    }

    let seed = seed.or(config.planner.seed);
    let mut rng = config.planner.rng(seed);
    let plan = request.generate_with_rng(catalog, &mut rng);

    if let Err(violation) = plan.validate(request.plot_type) {
        tracing::warn!(crop = %request.crop, %violation, "Generated plan breaks an invariant");
    }

    Ok(RenderedPlan::new(request, &plan, seed))
}

/// Create app router
///
/// Used by the `serve` command and by integration tests driving the router
/// without binding a socket.
pub fn create_app(config: Config, catalog: Catalog) -> axum::Router {
    let state = AppState {
        config,
        catalog: Arc::new(catalog),
    };

    routes::router(state).layer(tower_http::trace::TraceLayer::new_for_http())
}
