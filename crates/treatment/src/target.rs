use std::fmt;

use agroplan_catalog::Product;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// A disease or pest group every spray round should address.
///
/// Variant order is the canonical reporting order.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Target {
    Phytophthora,
    Rots,
    Bacteriosis,
    Lepidoptera,
    Coleoptera,
    Sucking,
}

impl Target {
    pub fn label(&self) -> &'static str {
        match self {
            Target::Phytophthora => "Пероноспороз/Фітофтороз",
            Target::Rots => "Гнилі",
            Target::Bacteriosis => "Бактеріози",
            Target::Lepidoptera => "Лускокрилі",
            Target::Coleoptera => "Твердокрилі",
            Target::Sucking => "Сисні",
        }
    }

    /// Targets a product satisfies. Disease targets only come from
    /// fungicides, pest targets only from insecticides; root rots are not a
    /// round target.
    pub fn of(product: &Product) -> TargetSet {
        let mut set = TargetSet::empty();
        match product {
            Product::Fungicide(f) => {
                if f.controls.phytophthora {
                    set.insert(Target::Phytophthora);
                }
                if f.controls.rots {
                    set.insert(Target::Rots);
                }
                if f.controls.bacteriosis {
                    set.insert(Target::Bacteriosis);
                }
            }
            Product::Insecticide(i) => {
                if i.controls.lepidoptera {
                    set.insert(Target::Lepidoptera);
                }
                if i.controls.coleoptera {
                    set.insert(Target::Coleoptera);
                }
                if i.controls.sucking() {
                    set.insert(Target::Sucking);
                }
            }
        }
        set
    }

    pub fn is_covered_by(&self, product: &Product) -> bool {
        Target::of(product).contains(*self)
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Small bit set over [`Target`], iterated in canonical order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TargetSet(u8);

impl TargetSet {
    pub const fn empty() -> Self {
        TargetSet(0)
    }

    pub fn all() -> Self {
        Target::VARIANTS.iter().copied().collect()
    }

    pub fn contains(&self, target: Target) -> bool {
        self.0 & target.bit() != 0
    }

    pub fn insert(&mut self, target: Target) {
        self.0 |= target.bit();
    }

    pub fn remove(&mut self, target: Target) {
        self.0 &= !target.bit();
    }

    pub fn union(self, other: TargetSet) -> TargetSet {
        TargetSet(self.0 | other.0)
    }

    pub fn intersection(self, other: TargetSet) -> TargetSet {
        TargetSet(self.0 & other.0)
    }

    pub fn difference(self, other: TargetSet) -> TargetSet {
        TargetSet(self.0 & !other.0)
    }

    pub fn is_subset(&self, other: &TargetSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Target> + '_ {
        Target::VARIANTS.iter().copied().filter(|t| self.contains(*t))
    }

    pub fn to_vec(&self) -> Vec<Target> {
        self.iter().collect()
    }
}

impl FromIterator<Target> for TargetSet {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut set = TargetSet::empty();
        for target in iter {
            set.insert(target);
        }
        set
    }
}

impl fmt::Debug for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
