use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{CatalogError, PlotType};

/// Anything with per-plot application rates.
pub trait Rated {
    fn rate_home(&self) -> Option<&str>;
    fn rate_field(&self) -> Option<&str>;

    fn available_for(&self, plot: PlotType) -> bool {
        plot.rate_of(self).is_some()
    }
}

/// Unique identity of a product. Two catalog entries may share a trade name
/// with different active ingredients, so the pair is the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductKey {
    pub product_name: String,
    pub active_ingredient: String,
}

impl ProductKey {
    pub fn new(product_name: impl Into<String>, active_ingredient: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            active_ingredient: active_ingredient.into(),
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.product_name, self.active_ingredient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FungicideCategory {
    Contact,
    Systemic,
    Biological,
}

impl FungicideCategory {
    pub fn tag(&self) -> u8 {
        match self {
            FungicideCategory::Contact => 1,
            FungicideCategory::Systemic => 2,
            FungicideCategory::Biological => 3,
        }
    }
}

impl TryFrom<u8> for FungicideCategory {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FungicideCategory::Contact),
            2 => Ok(FungicideCategory::Systemic),
            3 => Ok(FungicideCategory::Biological),
            other => Err(CatalogError::UnknownCategory(other)),
        }
    }
}

impl From<FungicideCategory> for u8 {
    fn from(value: FungicideCategory) -> Self {
        value.tag()
    }
}

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum FungicideControl {
    Bacteriosis,
    Phytophthora,
    Rots,
    RootRots,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FungicideControls {
    pub bacteriosis: bool,
    pub phytophthora: bool,
    pub rots: bool,
    pub root_rots: bool,
}

impl FungicideControls {
    pub fn has(&self, control: FungicideControl) -> bool {
        match control {
            FungicideControl::Bacteriosis => self.bacteriosis,
            FungicideControl::Phytophthora => self.phytophthora,
            FungicideControl::Rots => self.rots,
            FungicideControl::RootRots => self.root_rots,
        }
    }
}

#[derive(
    EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum InsecticideControl {
    Aphids,
    Thrips,
    Whiteflies,
    Mites,
    Lepidoptera,
    Coleoptera,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsecticideControls {
    pub aphids: bool,
    pub thrips: bool,
    pub whiteflies: bool,
    pub mites: bool,
    pub lepidoptera: bool,
    pub coleoptera: bool,
}

impl InsecticideControls {
    pub fn has(&self, control: InsecticideControl) -> bool {
        match control {
            InsecticideControl::Aphids => self.aphids,
            InsecticideControl::Thrips => self.thrips,
            InsecticideControl::Whiteflies => self.whiteflies,
            InsecticideControl::Mites => self.mites,
            InsecticideControl::Lepidoptera => self.lepidoptera,
            InsecticideControl::Coleoptera => self.coleoptera,
        }
    }

    /// Any of the sap-sucking pests.
    pub fn sucking(&self) -> bool {
        self.aphids || self.thrips || self.whiteflies || self.mites
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fungicide {
    pub active_ingredient: String,
    pub product_name: String,
    pub category: FungicideCategory,
    pub controls: FungicideControls,
    pub rate_home: Option<String>,
    pub rate_field: Option<String>,
}

impl Fungicide {
    pub fn key(&self) -> ProductKey {
        ProductKey::new(&self.product_name, &self.active_ingredient)
    }
}

impl Rated for Fungicide {
    fn rate_home(&self) -> Option<&str> {
        self.rate_home.as_deref()
    }

    fn rate_field(&self) -> Option<&str> {
        self.rate_field.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insecticide {
    pub active_ingredient: String,
    pub product_name: String,
    pub controls: InsecticideControls,
    pub rate_home: Option<String>,
    pub rate_field: Option<String>,
}

impl Insecticide {
    pub fn key(&self) -> ProductKey {
        ProductKey::new(&self.product_name, &self.active_ingredient)
    }
}

impl Rated for Insecticide {
    fn rate_home(&self) -> Option<&str> {
        self.rate_home.as_deref()
    }

    fn rate_field(&self) -> Option<&str> {
        self.rate_field.as_deref()
    }
}

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum ApplicationTime {
    #[strum(serialize = "до")]
    #[serde(rename = "до")]
    PreEmergence,
    #[strum(serialize = "після")]
    #[serde(rename = "після")]
    PostEmergence,
    #[strum(serialize = "до/після")]
    #[serde(rename = "до/після")]
    PreOrPostEmergence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeedSpectrum {
    pub sensitive: Vec<String>,
    pub moderately_sensitive: Vec<String>,
    pub resistant: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Herbicide {
    pub active_ingredient: String,
    pub product_name: String,
    pub application_time: ApplicationTime,
    #[serde(rename = "registrationUA")]
    pub registration_ua: String,
    pub registration_world: String,
    pub description: String,
    pub spectrum: WeedSpectrum,
    pub application_info: String,
}

/// A product the treatment generator can schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Product {
    Fungicide(Fungicide),
    Insecticide(Insecticide),
}

impl Product {
    pub fn key(&self) -> ProductKey {
        match self {
            Product::Fungicide(f) => f.key(),
            Product::Insecticide(i) => i.key(),
        }
    }

    pub fn product_name(&self) -> &str {
        match self {
            Product::Fungicide(f) => &f.product_name,
            Product::Insecticide(i) => &i.product_name,
        }
    }

    pub fn active_ingredient(&self) -> &str {
        match self {
            Product::Fungicide(f) => &f.active_ingredient,
            Product::Insecticide(i) => &i.active_ingredient,
        }
    }

    pub fn rate(&self, plot: PlotType) -> Option<&str> {
        plot.rate_of(self)
    }

    pub fn as_fungicide(&self) -> Option<&Fungicide> {
        match self {
            Product::Fungicide(f) => Some(f),
            Product::Insecticide(_) => None,
        }
    }

    pub fn as_insecticide(&self) -> Option<&Insecticide> {
        match self {
            Product::Insecticide(i) => Some(i),
            Product::Fungicide(_) => None,
        }
    }

    /// Fungicide category, `None` for insecticides.
    pub fn category(&self) -> Option<FungicideCategory> {
        self.as_fungicide().map(|f| f.category)
    }

    pub fn is_fungicide(&self) -> bool {
        matches!(self, Product::Fungicide(_))
    }
}

impl Rated for Product {
    fn rate_home(&self) -> Option<&str> {
        match self {
            Product::Fungicide(f) => f.rate_home(),
            Product::Insecticide(i) => i.rate_home(),
        }
    }

    fn rate_field(&self) -> Option<&str> {
        match self {
            Product::Fungicide(f) => f.rate_field(),
            Product::Insecticide(i) => i.rate_field(),
        }
    }
}

impl From<Fungicide> for Product {
    fn from(value: Fungicide) -> Self {
        Product::Fungicide(value)
    }
}

impl From<Insecticide> for Product {
    fn from(value: Insecticide) -> Self {
        Product::Insecticide(value)
    }
}
