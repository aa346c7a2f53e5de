use agroplan_catalog::{Catalog, Crop, PlotType, ProblemType};
use agroplan_treatment::PlanRequest;
use anyhow::Result;

use crate::config::Config;
use crate::error::AppError;
use crate::listing::{ProductListing, crop_summaries};
use crate::render::OutputFormat;

/// Generates and renders one plan. Falls back to the configured default
/// season when `days` is not given.
#[tracing::instrument(skip(config, catalog))]
pub fn plan_command(
    config: &Config,
    catalog: &Catalog,
    crop: Crop,
    plot: PlotType,
    days: Option<u32>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<String> {
    let days = days.unwrap_or(config.planner.default_season_days);
    let request = PlanRequest::new(crop, days, plot);
    let rendered = crate::plan_for_request(config, catalog, &request, seed)?;

    Ok(rendered.render(format)?)
}

#[tracing::instrument(skip(catalog))]
pub fn products_command(
    catalog: &Catalog,
    crop: Crop,
    plot: PlotType,
    problem: ProblemType,
    filters: &[String],
    format: OutputFormat,
) -> Result<String> {
    let crop_catalog = catalog
        .crop(crop)
        .ok_or(AppError::CropNotInCatalog(crop))?;
    let listing = ProductListing::build(crop_catalog, crop, plot, problem, filters)?;

    Ok(match format {
        OutputFormat::Text => listing.render_text(),
        OutputFormat::Json => serde_json::to_string_pretty(&listing)?,
    })
}

#[tracing::instrument(skip(catalog))]
pub fn crops_command(catalog: &Catalog, format: OutputFormat) -> Result<String> {
    let summaries = crop_summaries(catalog);

    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(&summaries)?,
        OutputFormat::Text => summaries
            .iter()
            .map(|s| {
                let problems = s
                    .problems
                    .iter()
                    .map(|p| p.as_ref())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{:<10} {:<12} {problems}\n", s.crop.as_ref(), s.name)
            })
            .collect(),
    })
}
