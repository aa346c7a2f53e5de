//! Plan output for the terminal and the JSON API.

use agroplan_catalog::{Crop, PlotType, Product};
use agroplan_treatment::{Plan, PlanRequest, Target, TargetSet, Treatment};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

pub const NO_RECOMMENDATIONS: &str = "Немає рекомендацій";
pub const MISSING_RATE: &str = "Див. інструкцію";
pub const EMPTY_PLAN_MESSAGE: &str = "Не вдалося згенерувати план. Можливо, замалий вегетаційний період або недостатньо даних по препаратах.";

const HEADERS: [&str; 5] = ["№", "Препарати", "Норма витрати", "Закриває", "Не закрито"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedProduct {
    pub product_name: String,
    pub active_ingredient: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u8>,
    pub rate: String,
}

impl RenderedProduct {
    pub fn new(product: &Product, plot: PlotType) -> Self {
        let kind = match product {
            Product::Fungicide(_) => "fungicide",
            Product::Insecticide(_) => "insecticide",
        };
        Self {
            product_name: product.product_name().to_owned(),
            active_ingredient: product.active_ingredient().to_owned(),
            kind,
            category: product.category().map(|c| c.tag()),
            rate: product.rate(plot).unwrap_or(MISSING_RATE).to_owned(),
        }
    }

    fn line(&self) -> String {
        format!("{} ({})", self.product_name, self.active_ingredient)
    }
}

/// One table row per treatment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRow {
    pub treatment_number: usize,
    pub products: Vec<RenderedProduct>,
    pub covered_targets: Vec<Target>,
    pub uncovered_targets: Vec<Target>,
}

impl PlanRow {
    pub fn new(treatment: &Treatment, plot: PlotType) -> Self {
        Self {
            treatment_number: treatment.treatment_number,
            products: treatment
                .products
                .iter()
                .map(|p| RenderedProduct::new(p, plot))
                .collect(),
            covered_targets: treatment.covered_targets().to_vec(),
            uncovered_targets: treatment.uncovered_targets.clone(),
        }
    }

    fn cells(&self) -> [Vec<String>; 5] {
        let (products, rates) = if self.products.is_empty() {
            (vec![NO_RECOMMENDATIONS.to_owned()], vec![String::new()])
        } else {
            (
                self.products.iter().map(RenderedProduct::line).collect(),
                self.products.iter().map(|p| p.rate.clone()).collect(),
            )
        };

        [
            vec![self.treatment_number.to_string()],
            products,
            rates,
            labels(&self.covered_targets),
            labels(&self.uncovered_targets),
        ]
    }
}

fn labels(targets: &[Target]) -> Vec<String> {
    if targets.is_empty() {
        return vec!["-".to_owned()];
    }
    let set: TargetSet = targets.iter().copied().collect();
    set.iter().map(|t| t.label().to_owned()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTable {
    #[serde(rename = "treatments")]
    pub rows: Vec<PlanRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PlanTable {
    pub fn new(plan: &Plan, plot: PlotType) -> Self {
        let rows: Vec<PlanRow> = plan.iter().map(|t| PlanRow::new(t, plot)).collect();
        let message = rows.is_empty().then(|| EMPTY_PLAN_MESSAGE.to_owned());
        Self { rows, message }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Aligned plain-text table. Multi-product cells span several lines.
    pub fn render_text(&self) -> String {
        if let Some(message) = &self.message {
            return format!("{message}\n");
        }

        let rows: Vec<[Vec<String>; 5]> = self.rows.iter().map(PlanRow::cells).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for cells in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                for line in cell {
                    *width = (*width).max(line.chars().count());
                }
            }
        }

        let separator = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        let mut out = String::new();
        push_line(&mut out, &HEADERS.map(str::to_owned), &widths);
        out.push_str(&separator);
        out.push('\n');

        for cells in &rows {
            let height = cells.iter().map(Vec::len).max().unwrap_or(1);
            for index in 0..height {
                let line = cells
                    .each_ref()
                    .map(|cell| cell.get(index).cloned().unwrap_or_default());
                push_line(&mut out, &line, &widths);
            }
            out.push_str(&separator);
            out.push('\n');
        }

        out
    }
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// A plan together with what it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPlan {
    pub crop: Crop,
    pub title: String,
    pub plot_type: PlotType,
    pub season_length_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(flatten)]
    pub table: PlanTable,
}

impl RenderedPlan {
    pub fn new(request: &PlanRequest, plan: &Plan, seed: Option<u64>) -> Self {
        Self {
            crop: request.crop,
            title: format!(
                "Інтегрована система захисту {}",
                request.crop.genitive_name()
            ),
            plot_type: request.plot_type,
            season_length_days: request.season_length_days,
            seed,
            table: PlanTable::new(plan, request.plot_type),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(format!(
                "{}\n{}, вегетаційний період {} днів\n\n{}",
                self.title,
                self.plot_type.label(),
                self.season_length_days,
                self.table.render_text()
            )),
        }
    }
}
