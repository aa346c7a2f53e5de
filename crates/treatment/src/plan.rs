use std::collections::{HashMap, HashSet};

use agroplan_catalog::{PlotType, Product, ProductKey, Rated};
use serde::{Deserialize, Serialize};

use crate::round::MAX_PRODUCTS_PER_ROUND;
use crate::usage::MAX_USES_PER_PLAN;
use crate::{PlanViolation, Target, TargetSet, rules};

/// One spray round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub treatment_number: usize,
    pub products: Vec<Product>,
    pub uncovered_targets: Vec<Target>,
}

impl Treatment {
    pub fn covered_targets(&self) -> TargetSet {
        self.products
            .iter()
            .fold(TargetSet::empty(), |acc, p| acc.union(Target::of(p)))
    }

    pub fn keys(&self) -> impl Iterator<Item = ProductKey> + '_ {
        self.products.iter().map(Product::key)
    }
}

/// Ordered spray rounds for one season. Empty when the season is too short.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub treatments: Vec<Treatment>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.treatments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treatments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Treatment> {
        self.treatments.iter()
    }

    /// Checks every scheduling invariant on a generated plan.
    pub fn validate(&self, plot: PlotType) -> Result<(), PlanViolation> {
        let mut uses: HashMap<ProductKey, usize> = HashMap::new();
        let mut previous: HashSet<ProductKey> = HashSet::new();

        for (position, treatment) in self.treatments.iter().enumerate() {
            let number = treatment.treatment_number;
            if number != position + 1 {
                return Err(PlanViolation::Numbering {
                    position: position + 1,
                    actual: number,
                });
            }

            if treatment.products.len() > MAX_PRODUCTS_PER_ROUND {
                return Err(PlanViolation::TooManyProducts {
                    treatment: number,
                    count: treatment.products.len(),
                });
            }

            let mut current = HashSet::new();
            for product in &treatment.products {
                let key = product.key();

                if !current.insert(key.clone()) {
                    return Err(PlanViolation::DuplicateProduct {
                        treatment: number,
                        key,
                    });
                }
                if previous.contains(&key) {
                    return Err(PlanViolation::ImmediateRepeat {
                        treatment: number - 1,
                        key,
                    });
                }
                if !rules::allowed_in_round(product, number) {
                    return Err(PlanViolation::ContactAfterCutoff {
                        treatment: number,
                        key,
                    });
                }
                if rules::is_excluded(product) {
                    return Err(PlanViolation::ExcludedProduct {
                        treatment: number,
                        key,
                    });
                }
                if !product.available_for(plot) {
                    return Err(PlanViolation::NotAvailableForPlot {
                        treatment: number,
                        key,
                        plot,
                    });
                }

                let count = uses.entry(key.clone()).or_insert(0);
                *count += 1;
                if *count > MAX_USES_PER_PLAN as usize {
                    return Err(PlanViolation::UsageCapExceeded { key, uses: *count });
                }
            }

            check_tank_mix(treatment)?;

            let expected = TargetSet::all()
                .difference(treatment.covered_targets())
                .to_vec();
            if expected != treatment.uncovered_targets {
                return Err(PlanViolation::UncoveredTargets {
                    treatment: number,
                    expected,
                    actual: treatment.uncovered_targets.clone(),
                });
            }

            previous = current;
        }

        Ok(())
    }
}

fn check_tank_mix(treatment: &Treatment) -> Result<(), PlanViolation> {
    let systemic = treatment
        .products
        .iter()
        .find(|p| p.product_name() == rules::TANK_MIX_SYSTEMIC);
    let contact = treatment
        .products
        .iter()
        .find(|p| rules::is_banned_contact(p));

    match (systemic, contact) {
        (Some(systemic), Some(contact)) => Err(PlanViolation::TankMix {
            treatment: treatment.treatment_number,
            systemic: systemic.key(),
            contact: contact.key(),
        }),
        _ => Ok(()),
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Treatment;
    type IntoIter = std::slice::Iter<'a, Treatment>;

    fn into_iter(self) -> Self::IntoIter {
        self.treatments.iter()
    }
}
