//! Hand-curated agronomic rules.

use agroplan_catalog::{FungicideCategory, Product};

use crate::{Target, TargetSet};

/// Soil-applied insecticides, unsuitable for a foliar schedule.
pub const EXCLUDED_INSECTICIDES: [&str; 2] = ["Регент", "Форс"];

pub const TOP_FUNGICIDES: [&str; 5] = [
    "Зорвек Інкантія",
    "Ридоміл Голд Р",
    "Сігнум",
    "Квадріс",
    "Медян Екстра",
];

pub const TOP_INSECTICIDES: [&str; 4] = ["Белт", "Радіант", "Проклейм", "Мовенто"];

/// Systemic fungicide that must not share a tank with copper or mancozeb.
pub const TANK_MIX_SYSTEMIC: &str = "Ридоміл Голд Р";

const BANNED_CONTACT_MARKERS: [&str; 2] = ["манкоцеб", "міді"];

/// Contact fungicides are only scheduled up to this round.
pub const LAST_CONTACT_ROUND: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Exact(&'static str),
    Prefix(&'static str),
}

impl NameMatch {
    pub fn matches(&self, product_name: &str) -> bool {
        match self {
            NameMatch::Exact(name) => product_name == *name,
            NameMatch::Prefix(prefix) => product_name.starts_with(prefix),
        }
    }
}

/// Priority list of products forced into a round when `target` is still open
/// after the main selection.
#[derive(Debug, Clone, Copy)]
pub struct PostCheckRule {
    pub target: Target,
    pub candidates: &'static [NameMatch],
}

pub const POST_CHECK_RULES: [PostCheckRule; 3] = [
    PostCheckRule {
        target: Target::Bacteriosis,
        candidates: &[NameMatch::Exact("Казумін 2Л"), NameMatch::Exact("Серенада")],
    },
    PostCheckRule {
        target: Target::Coleoptera,
        candidates: &[
            NameMatch::Exact("Моспілан"),
            NameMatch::Exact("Актара"),
            NameMatch::Prefix("Децис"),
            NameMatch::Exact("Карате Зеон"),
        ],
    },
    PostCheckRule {
        target: Target::Lepidoptera,
        candidates: &[
            NameMatch::Exact("Белт"),
            NameMatch::Exact("Радіант"),
            NameMatch::Exact("Проклейм"),
            NameMatch::Exact("Ампліго"),
            NameMatch::Exact("Кораген"),
        ],
    },
];

pub fn is_excluded(product: &Product) -> bool {
    product
        .as_insecticide()
        .is_some_and(|i| EXCLUDED_INSECTICIDES.contains(&i.product_name.as_str()))
}

pub fn is_top_product(product: &Product) -> bool {
    match product {
        Product::Fungicide(f) => TOP_FUNGICIDES.contains(&f.product_name.as_str()),
        Product::Insecticide(i) => TOP_INSECTICIDES.contains(&i.product_name.as_str()),
    }
}

pub fn is_contact_fungicide(product: &Product) -> bool {
    product.category() == Some(FungicideCategory::Contact)
}

pub fn is_biological_fungicide(product: &Product) -> bool {
    product.category() == Some(FungicideCategory::Biological)
}

/// Whether the product may be scheduled in the given round at all.
pub fn allowed_in_round(product: &Product, round: usize) -> bool {
    round <= LAST_CONTACT_ROUND || !is_contact_fungicide(product)
}

fn is_tank_mix_systemic(product: &Product) -> bool {
    product.product_name() == TANK_MIX_SYSTEMIC
}

/// Copper or mancozeb based product. The designated systemic fungicide
/// itself contains copper but never counts.
pub fn is_banned_contact(product: &Product) -> bool {
    if is_tank_mix_systemic(product) {
        return false;
    }
    let ingredient = product.active_ingredient().to_lowercase();
    BANNED_CONTACT_MARKERS
        .iter()
        .any(|marker| ingredient.contains(marker))
}

/// Adding `candidate` to a tank already holding `chosen` would pair the
/// designated systemic fungicide with a banned contact product.
pub fn violates_tank_mix(candidate: &Product, chosen: &[Product]) -> bool {
    (is_tank_mix_systemic(candidate) && chosen.iter().any(is_banned_contact))
        || (is_banned_contact(candidate) && chosen.iter().any(is_tank_mix_systemic))
}

/// Systemic fungicides and insecticides can be swapped for one another.
fn is_flexible(product: &Product) -> bool {
    match product {
        Product::Fungicide(f) => f.category == FungicideCategory::Systemic,
        Product::Insecticide(_) => true,
    }
}

fn same_class(a: &Product, b: &Product) -> bool {
    a.is_fungicide() == b.is_fungicide()
}

/// A flexible candidate is redundant when every target it covers is already
/// covered by flexible products of its own class in the round.
pub fn is_redundant(candidate: &Product, chosen: &[Product]) -> bool {
    if !is_flexible(candidate) {
        return false;
    }

    let targets = Target::of(candidate);
    let flexible: Vec<&Product> = chosen.iter().filter(|p| is_flexible(p)).collect();
    if flexible.is_empty() || targets.is_empty() {
        return false;
    }

    let covered = flexible
        .into_iter()
        .filter(|p| same_class(p, candidate))
        .fold(TargetSet::empty(), |acc, p| acc.union(Target::of(p)));

    targets.is_subset(&covered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agroplan_catalog::{
        Fungicide, FungicideControls, Insecticide, InsecticideControls,
    };

    fn create_test_fungicide(
        name: &str,
        ai: &str,
        category: FungicideCategory,
        controls: FungicideControls,
    ) -> Product {
        Product::from(Fungicide {
            active_ingredient: ai.to_owned(),
            product_name: name.to_owned(),
            category,
            controls,
            rate_home: Some("10 мл / 10 л".to_owned()),
            rate_field: Some("1 л/га".to_owned()),
        })
    }

    fn create_test_insecticide(name: &str, controls: InsecticideControls) -> Product {
        Product::from(Insecticide {
            active_ingredient: format!("{name} ai"),
            product_name: name.to_owned(),
            controls,
            rate_home: Some("1 мл / 10 л".to_owned()),
            rate_field: Some("0,1 л/га".to_owned()),
        })
    }

    fn ridomil() -> Product {
        create_test_fungicide(
            "Ридоміл Голд Р",
            "металаксил-М + хлорокис міді",
            FungicideCategory::Systemic,
            FungicideControls {
                phytophthora: true,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_designated_systemic_is_not_a_banned_contact() {
        assert!(!is_banned_contact(&ridomil()));
    }

    #[test]
    fn test_banned_contact_match_is_case_insensitive() {
        let dithane = create_test_fungicide(
            "Дітан",
            "МАНКОЦЕБ",
            FungicideCategory::Contact,
            FungicideControls::default(),
        );
        assert!(is_banned_contact(&dithane));
        assert!(violates_tank_mix(&dithane, &[ridomil()]));
        assert!(violates_tank_mix(&ridomil(), &[dithane]));
    }

    #[test]
    fn test_unrelated_products_mix_freely() {
        let signum = create_test_fungicide(
            "Сігнум",
            "боскалід + піраклостробін",
            FungicideCategory::Systemic,
            FungicideControls::default(),
        );
        assert!(!violates_tank_mix(&signum, &[ridomil()]));
        assert!(!violates_tank_mix(&ridomil(), &[signum]));
    }

    #[test]
    fn test_insecticide_redundant_against_same_class_only() {
        let broad = create_test_insecticide(
            "Енжіо",
            InsecticideControls {
                aphids: true,
                lepidoptera: true,
                ..Default::default()
            },
        );
        let narrow = create_test_insecticide(
            "Белт",
            InsecticideControls {
                lepidoptera: true,
                ..Default::default()
            },
        );
        let wider = create_test_insecticide(
            "Кораген",
            InsecticideControls {
                lepidoptera: true,
                coleoptera: true,
                ..Default::default()
            },
        );

        assert!(is_redundant(&narrow, std::slice::from_ref(&broad)));
        assert!(!is_redundant(&wider, std::slice::from_ref(&broad)));
        assert!(!is_redundant(&narrow, &[ridomil()]));
        assert!(!is_redundant(&narrow, &[]));
    }

    #[test]
    fn test_contact_and_biological_fungicides_are_never_redundant() {
        let contact = create_test_fungicide(
            "Курзат Р",
            "цимоксаніл + хлорокис міді",
            FungicideCategory::Contact,
            FungicideControls {
                phytophthora: true,
                ..Default::default()
            },
        );
        assert!(!is_redundant(&contact, &[ridomil()]));
        assert!(is_redundant(
            &create_test_fungicide(
                "Ревус",
                "мандипропамід",
                FungicideCategory::Systemic,
                FungicideControls {
                    phytophthora: true,
                    ..Default::default()
                },
            ),
            &[ridomil()]
        ));
    }

    #[test]
    fn test_excluded_and_top_lists() {
        let regent = create_test_insecticide("Регент", InsecticideControls::default());
        assert!(is_excluded(&regent));
        assert!(is_top_product(&ridomil()));
        assert!(!is_top_product(&regent));
    }

    #[test]
    fn test_contact_cutoff_after_round_three() {
        let contact = create_test_fungicide(
            "Браво",
            "хлороталоніл",
            FungicideCategory::Contact,
            FungicideControls::default(),
        );
        assert!(allowed_in_round(&contact, 3));
        assert!(!allowed_in_round(&contact, 4));
        assert!(allowed_in_round(&ridomil(), 10));
    }

    #[test]
    fn test_decis_family_matches_by_prefix() {
        let rule = POST_CHECK_RULES
            .iter()
            .find(|r| r.target == Target::Coleoptera)
            .unwrap();
        assert!(rule.candidates.iter().any(|c| c.matches("Децис f-Люкс")));
        assert!(!rule.candidates.iter().any(|c| c.matches("Моспілан Екстра")));
    }
}
