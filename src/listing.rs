//! Catalog browsing: crops with their supported problems and per-problem
//! product lists with control filters.

use std::fmt::Write as _;
use std::str::FromStr;

use agroplan_catalog::{
    Catalog, Crop, CropCatalog, Fungicide, FungicideControl, Herbicide, Insecticide,
    InsecticideControl, PlotType, ProblemType,
};
use serde::Serialize;
use strum::VariantArray;

use crate::error::AppError;
use crate::render::MISSING_RATE;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSummary {
    pub crop: Crop,
    pub name: &'static str,
    pub problems: Vec<ProblemType>,
}

pub fn crop_summaries(catalog: &Catalog) -> Vec<CropSummary> {
    catalog
        .crops()
        .map(|(crop, crop_catalog)| CropSummary {
            crop,
            name: crop.genitive_name(),
            problems: ProblemType::VARIANTS
                .iter()
                .copied()
                .filter(|p| crop_catalog.supports(*p))
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub crop: Crop,
    pub plot_type: PlotType,
    pub problem: ProblemType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub herbicides: Vec<Herbicide>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fungicides: Vec<Fungicide>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insecticides: Vec<Insecticide>,
}

impl ProductListing {
    /// Products of one crop for a problem type. Filters name controls
    /// (`phytophthora`, `aphids`, ...) and only apply to diseases and pests.
    pub fn build(
        catalog: &CropCatalog,
        crop: Crop,
        plot: PlotType,
        problem: ProblemType,
        filters: &[String],
    ) -> Result<Self, AppError> {
        let mut listing = Self {
            crop,
            plot_type: plot,
            problem,
            herbicides: Vec::new(),
            fungicides: Vec::new(),
            insecticides: Vec::new(),
        };

        match problem {
            ProblemType::Weeds | ProblemType::Integrated if !filters.is_empty() => {
                return Err(AppError::ValidationError(
                    "Filters apply to diseases or pests only".to_string(),
                ));
            }
            ProblemType::Weeds => {
                listing.herbicides = catalog.available_herbicides().to_vec();
            }
            ProblemType::Diseases => {
                let controls = parse_filters::<FungicideControl>(filters)?;
                listing.fungicides = catalog
                    .filter_fungicides(plot, &controls)
                    .into_iter()
                    .cloned()
                    .collect();
            }
            ProblemType::Pests => {
                let controls = parse_filters::<InsecticideControl>(filters)?;
                listing.insecticides = catalog
                    .filter_insecticides(plot, &controls)
                    .into_iter()
                    .cloned()
                    .collect();
            }
            ProblemType::Integrated => {
                listing.fungicides = catalog.available_fungicides(plot).cloned().collect();
                listing.insecticides = catalog.available_insecticides(plot).cloned().collect();
            }
        }

        Ok(listing)
    }

    pub fn is_empty(&self) -> bool {
        self.herbicides.is_empty() && self.fungicides.is_empty() && self.insecticides.is_empty()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({})",
            self.crop.genitive_name(),
            self.plot_type.label()
        );

        if self.is_empty() {
            out.push_str("Препаратів не знайдено\n");
            return out;
        }

        if !self.herbicides.is_empty() {
            out.push_str("\nГербіциди:\n");
            for h in &self.herbicides {
                let _ = writeln!(
                    out,
                    "  {} ({}), {}: {}",
                    h.product_name, h.active_ingredient, h.application_time, h.description
                );
            }
        }
        if !self.fungicides.is_empty() {
            out.push_str("\nФунгіциди:\n");
            for f in &self.fungicides {
                let rate = self.plot_type.rate_of(f).unwrap_or(MISSING_RATE);
                let _ = writeln!(
                    out,
                    "  {} ({}), категорія {}: {}",
                    f.product_name,
                    f.active_ingredient,
                    f.category.tag(),
                    rate
                );
            }
        }
        if !self.insecticides.is_empty() {
            out.push_str("\nІнсектициди:\n");
            for i in &self.insecticides {
                let rate = self.plot_type.rate_of(i).unwrap_or(MISSING_RATE);
                let _ = writeln!(out, "  {} ({}): {}", i.product_name, i.active_ingredient, rate);
            }
        }

        out
    }
}

/// Accepts repeated values as well as comma-separated lists.
fn parse_filters<T: FromStr>(filters: &[String]) -> Result<Vec<T>, AppError> {
    filters
        .iter()
        .flat_map(|f| f.split(','))
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| {
            T::from_str(f).map_err(|_| AppError::ValidationError(format!("Unknown filter: {f}")))
        })
        .collect()
}
