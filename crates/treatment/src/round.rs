use agroplan_catalog::{Product, ProductKey};

use crate::{Target, TargetSet, Treatment, rules};

pub const MAX_PRODUCTS_PER_ROUND: usize = 4;

/// Products chosen so far for one spray round, plus the targets still open.
#[derive(Debug, Clone)]
pub struct RoundBuilder {
    number: usize,
    products: Vec<Product>,
    open: TargetSet,
}

impl RoundBuilder {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            products: Vec::with_capacity(MAX_PRODUCTS_PER_ROUND),
            open: TargetSet::all(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn open_targets(&self) -> TargetSet {
        self.open
    }

    pub fn is_open(&self, target: Target) -> bool {
        self.open.contains(target)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.products.len() >= MAX_PRODUCTS_PER_ROUND
    }

    pub fn is_covered(&self) -> bool {
        self.open.is_empty()
    }

    pub fn contains(&self, key: &ProductKey) -> bool {
        self.products.iter().any(|p| &p.key() == key)
    }

    pub fn contains_name(&self, product_name: &str) -> bool {
        self.products.iter().any(|p| p.product_name() == product_name)
    }

    /// Number of still-open targets the product would close.
    pub fn coverage_gain(&self, product: &Product) -> usize {
        Target::of(product).intersection(self.open).len()
    }

    pub fn violates_tank_mix(&self, product: &Product) -> bool {
        rules::violates_tank_mix(product, &self.products)
    }

    pub fn is_redundant(&self, product: &Product) -> bool {
        rules::is_redundant(product, &self.products)
    }

    /// Whether `product` can join the round without breaking the size, key
    /// uniqueness or tank-mix rules.
    pub fn admits(&self, product: &Product) -> bool {
        !self.is_full() && !self.contains(&product.key()) && !self.violates_tank_mix(product)
    }

    /// Adds the product if admitted; returns whether it was added.
    pub fn push(&mut self, product: Product) -> bool {
        if !self.admits(&product) {
            return false;
        }
        self.open = self.open.difference(Target::of(&product));
        self.products.push(product);
        true
    }

    pub fn finish(self) -> Treatment {
        Treatment {
            treatment_number: self.number,
            products: self.products,
            uncovered_targets: self.open.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agroplan_catalog::{
        Fungicide, FungicideCategory, FungicideControls, Insecticide, InsecticideControls,
    };

    fn create_test_insecticide(name: &str) -> Product {
        Product::from(Insecticide {
            active_ingredient: format!("{name} ai"),
            product_name: name.to_owned(),
            controls: InsecticideControls {
                thrips: true,
                lepidoptera: true,
                ..Default::default()
            },
            rate_home: None,
            rate_field: Some("0,3 л/га".to_owned()),
        })
    }

    #[test]
    fn test_push_closes_targets() {
        let mut round = RoundBuilder::new(1);
        let radiant = create_test_insecticide("Радіант");

        assert_eq!(round.coverage_gain(&radiant), 2);
        assert!(round.push(radiant.clone()));
        assert!(!round.is_open(Target::Lepidoptera));
        assert!(!round.is_open(Target::Sucking));
        assert_eq!(round.coverage_gain(&radiant), 0);
        assert!(!round.push(radiant), "duplicate key must be rejected");
    }

    #[test]
    fn test_round_holds_at_most_four_products() {
        let mut round = RoundBuilder::new(2);
        for name in ["A", "B", "C", "D"] {
            assert!(round.push(create_test_insecticide(name)));
        }
        assert!(round.is_full());
        assert!(!round.push(create_test_insecticide("E")));
        assert_eq!(round.products().len(), 4);
    }

    #[test]
    fn test_tank_mix_is_enforced_on_push() {
        let mut round = RoundBuilder::new(1);
        let ridomil = Product::from(Fungicide {
            active_ingredient: "металаксил-М + хлорокис міді".to_owned(),
            product_name: "Ридоміл Голд Р".to_owned(),
            category: FungicideCategory::Systemic,
            controls: FungicideControls {
                phytophthora: true,
                ..Default::default()
            },
            rate_home: None,
            rate_field: Some("5 кг/га".to_owned()),
        });
        let dithane = Product::from(Fungicide {
            active_ingredient: "манкоцеб".to_owned(),
            product_name: "Дітан М-45".to_owned(),
            category: FungicideCategory::Contact,
            controls: FungicideControls {
                rots: true,
                ..Default::default()
            },
            rate_home: None,
            rate_field: Some("2 кг/га".to_owned()),
        });

        assert!(round.push(ridomil));
        assert!(!round.push(dithane));
    }

    #[test]
    fn test_finish_reports_open_targets_in_order() {
        let mut round = RoundBuilder::new(3);
        round.push(create_test_insecticide("Проклейм"));
        let treatment = round.finish();

        assert_eq!(treatment.treatment_number, 3);
        assert_eq!(
            treatment.uncovered_targets,
            vec![
                Target::Phytophthora,
                Target::Rots,
                Target::Bacteriosis,
                Target::Coleoptera
            ]
        );
    }
}
