//! Integrated treatment plan generator.
//!
//! Given a crop, a plot type and the length of the growing season, builds a
//! sequence of spray rounds where each round mixes up to four fungicides and
//! insecticides so that every disease and pest target is addressed, no product
//! is used more than twice per season, and consecutive rounds never repeat a
//! product.

pub mod algorithm;
pub mod error;
pub mod plan;
pub mod round;
pub mod rules;
pub mod target;
pub mod usage;

pub use algorithm::{PlanGenerator, treatment_count};
pub use error::PlanViolation;
pub use plan::{Plan, Treatment};
pub use round::RoundBuilder;
pub use target::{Target, TargetSet};
pub use usage::UsageLedger;

use agroplan_catalog::{Catalog, Crop, PlotType};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything needed to generate one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub crop: Crop,
    pub season_length_days: u32,
    pub plot_type: PlotType,
}

impl PlanRequest {
    pub fn new(crop: Crop, season_length_days: u32, plot_type: PlotType) -> Self {
        Self {
            crop,
            season_length_days,
            plot_type,
        }
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(&self, catalog: &Catalog, rng: &mut R) -> Plan {
        generate_plan_with_rng(
            catalog,
            self.crop,
            self.season_length_days,
            self.plot_type,
            rng,
        )
    }
}

/// Generates a plan with the thread-local RNG, so repeated calls differ.
pub fn generate_plan(catalog: &Catalog, crop: Crop, season_days: u32, plot: PlotType) -> Plan {
    generate_plan_with_rng(catalog, crop, season_days, plot, &mut rand::rng())
}

/// Generates a plan drawing tie-breaks from `rng`. The same seed and inputs
/// always give the same plan.
pub fn generate_plan_with_rng<R: Rng + ?Sized>(
    catalog: &Catalog,
    crop: Crop,
    season_days: u32,
    plot: PlotType,
    rng: &mut R,
) -> Plan {
    let generator = match catalog.crop(crop) {
        Some(crop_catalog) => PlanGenerator::new(crop_catalog, plot),
        None => {
            tracing::debug!(%crop, "crop missing from catalog");
            PlanGenerator::from_products(Vec::new())
        }
    };

    let plan = generator.generate(season_days, rng);

    tracing::info!(
        %crop,
        %plot,
        season_days,
        treatments = plan.len(),
        gaps = plan.iter().filter(|t| !t.uncovered_targets.is_empty()).count(),
        "treatment plan generated"
    );

    plan
}
