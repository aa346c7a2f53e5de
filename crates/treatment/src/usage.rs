use std::collections::{HashMap, HashSet};

use agroplan_catalog::{Product, ProductKey};

/// A product may appear in at most this many rounds of one plan.
pub const MAX_USES_PER_PLAN: u32 = 2;

/// Tracks how often each product was used in the plan so far and which
/// products went into the previous round.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    counts: HashMap<ProductKey, u32>,
    last_round: HashSet<ProductKey>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uses(&self, key: &ProductKey) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn used_last_round(&self, key: &ProductKey) -> bool {
        self.last_round.contains(key)
    }

    /// Below the usage cap and not sprayed in the previous round.
    pub fn can_use(&self, key: &ProductKey) -> bool {
        self.uses(key) < MAX_USES_PER_PLAN && !self.used_last_round(key)
    }

    /// Records a finished round. Its products become the new immediate-repeat
    /// set, replacing the previous one.
    pub fn record_round(&mut self, products: &[Product]) {
        self.last_round.clear();
        for product in products {
            let key = product.key();
            *self.counts.entry(key.clone()).or_insert(0) += 1;
            self.last_round.insert(key);
        }
    }
}
