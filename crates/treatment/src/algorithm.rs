use agroplan_catalog::{CropCatalog, PlotType, Product};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::rules::{self, NameMatch, POST_CHECK_RULES, PostCheckRule};
use crate::{Plan, RoundBuilder, Target, Treatment, UsageLedger};

/// Rounds assembled by greedy scoring; later rounds switch to strict
/// per-target selection.
pub const GREEDY_ROUNDS: usize = 3;

/// Targets searched one by one in strict rounds. Bacteriosis is left to the
/// post-check.
pub const STRICT_TARGET_ORDER: [Target; 5] = [
    Target::Phytophthora,
    Target::Rots,
    Target::Lepidoptera,
    Target::Coleoptera,
    Target::Sucking,
];

const COVERAGE_WEIGHT: usize = 10;

/// Number of spray rounds that fit into a season: one per week after the
/// first 20 days.
pub fn treatment_count(season_days: u32) -> usize {
    let rounds = ((f64::from(season_days) - 20.0) / 7.0).round();
    if rounds <= 0.0 { 0 } else { rounds as usize }
}

/// Builds treatment plans from the products one crop offers on one plot type.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    products: Vec<Product>,
}

impl PlanGenerator {
    /// Fungicides first, then insecticides, keeping catalog order. Products
    /// without a rate for the plot and excluded soil insecticides are dropped.
    pub fn new(catalog: &CropCatalog, plot: PlotType) -> Self {
        let fungicides = catalog
            .available_fungicides(plot)
            .cloned()
            .map(Product::from);
        let insecticides = catalog
            .available_insecticides(plot)
            .cloned()
            .map(Product::from);

        Self::from_products(fungicides.chain(insecticides).collect())
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        let products = products
            .into_iter()
            .filter(|p| !rules::is_excluded(p))
            .collect();
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn generate<R: Rng + ?Sized>(&self, season_days: u32, rng: &mut R) -> Plan {
        let count = treatment_count(season_days);
        let mut ledger = UsageLedger::new();
        let mut treatments = Vec::with_capacity(count);

        for number in 1..=count {
            let treatment = self.generate_round(number, &mut ledger, rng);
            let names: Vec<&str> = treatment.products.iter().map(Product::product_name).collect();

            tracing::debug!(
                round = treatment.treatment_number,
                products = ?names,
                uncovered = ?treatment.uncovered_targets,
                "treatment round finalized"
            );

            treatments.push(treatment);
        }

        Plan { treatments }
    }

    fn generate_round<R: Rng + ?Sized>(
        &self,
        number: usize,
        ledger: &mut UsageLedger,
        rng: &mut R,
    ) -> Treatment {
        let pool = self.round_pool(number, ledger, rng);
        let mut round = RoundBuilder::new(number);

        if number <= GREEDY_ROUNDS {
            fill_greedy(&mut round, pool);
        } else {
            fill_strict(&mut round, &pool);
        }

        self.post_check_and_fix(&mut round, ledger);

        ledger.record_round(round.products());
        round.finish()
    }

    /// Eligible products for the round in random order.
    fn round_pool<R: Rng + ?Sized>(
        &self,
        number: usize,
        ledger: &UsageLedger,
        rng: &mut R,
    ) -> Vec<&Product> {
        let mut pool: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| ledger.can_use(&p.key()) && rules::allowed_in_round(p, number))
            .collect();
        pool.shuffle(rng);
        pool
    }

    /// Forces high-value targets that are still open. Scans the whole product
    /// list in priority order and ignores the redundancy rule.
    fn post_check_and_fix(&self, round: &mut RoundBuilder, ledger: &UsageLedger) {
        for rule in &POST_CHECK_RULES {
            if round.is_full() || !round.is_open(rule.target) {
                continue;
            }
            if let Some(product) = self.post_check_candidate(rule, round, ledger) {
                round.push(product.clone());
            }
        }
    }

    fn post_check_candidate(
        &self,
        rule: &PostCheckRule,
        round: &RoundBuilder,
        ledger: &UsageLedger,
    ) -> Option<&Product> {
        rule.candidates.iter().find_map(|name: &NameMatch| {
            self.products.iter().find(|p| {
                name.matches(p.product_name())
                    && rule.target.is_covered_by(p)
                    && !round.contains_name(p.product_name())
                    && ledger.can_use(&p.key())
                    && rules::allowed_in_round(p, round.number())
                    && round.admits(p)
            })
        })
    }
}

/// Rounds 1-3: repeatedly take the product closing the most open targets,
/// with a small bonus for curated products. Ties go to the earlier product
/// in the shuffled pool.
fn fill_greedy(round: &mut RoundBuilder, mut pool: Vec<&Product>) {
    while !round.is_covered() && !round.is_full() && !pool.is_empty() {
        let mut best: Option<(usize, usize)> = None;

        for (index, product) in pool.iter().enumerate() {
            if round.is_empty() && rules::is_biological_fungicide(product) {
                continue;
            }
            if round.is_redundant(product) || !round.admits(product) {
                continue;
            }

            let gain = round.coverage_gain(product);
            if gain == 0 {
                continue;
            }

            let score = gain * COVERAGE_WEIGHT + usize::from(rules::is_top_product(product));
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        let Some((index, _)) = best else {
            break;
        };
        let product = pool.remove(index);
        round.push(product.clone());
    }
}

/// Rounds 4+: one product per open target in fixed priority, preferring
/// curated products.
fn fill_strict(round: &mut RoundBuilder, pool: &[&Product]) {
    for target in STRICT_TARGET_ORDER {
        if round.is_full() || !round.is_open(target) {
            continue;
        }

        let candidates: Vec<&Product> = pool
            .iter()
            .copied()
            .filter(|p| target.is_covered_by(p) && round.admits(p) && !round.is_redundant(p))
            .collect();

        let pick = candidates
            .iter()
            .find(|p| rules::is_top_product(p))
            .or_else(|| candidates.first());

        if let Some(product) = pick {
            round.push((*product).clone());
        }
    }
}
