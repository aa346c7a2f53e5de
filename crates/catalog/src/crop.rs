use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

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
#[strum(ascii_case_insensitive)]
pub enum Crop {
    Tomato,
    Pepper,
    Cabbage,
    Onion,
    Carrot,
    Pumpkin,
    Eggplant,
    Beet,
    Celery,
    Leek,
    Daikon,
    Garlic,
}

impl Crop {
    /// Ukrainian genitive form, as in "Захист томатів".
    pub fn genitive_name(&self) -> &'static str {
        match self {
            Crop::Tomato => "томатів",
            Crop::Pepper => "перцю",
            Crop::Cabbage => "капусти",
            Crop::Onion => "цибулі",
            Crop::Carrot => "моркви",
            Crop::Pumpkin => "гарбузових",
            Crop::Eggplant => "баклажанів",
            Crop::Beet => "буряків",
            Crop::Celery => "селери",
            Crop::Leek => "цибулі-порей",
            Crop::Daikon => "дайкону",
            Crop::Garlic => "часнику",
        }
    }

    /// File name of the crop's catalog document.
    pub fn document_name(&self) -> String {
        format!("{}.json", self.as_ref().to_lowercase())
    }
}

/// Where the products are applied. Each plot type has its own rate column and
/// a product without a rate for it is not offered at all.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    #[default]
    Home,
    Field,
}

impl PlotType {
    pub fn label(&self) -> &'static str {
        match self {
            PlotType::Home => "Присадибна ділянка",
            PlotType::Field => "Поле",
        }
    }

    pub fn rate_of<'a, P: crate::Rated + ?Sized>(&self, product: &'a P) -> Option<&'a str> {
        match self {
            PlotType::Home => product.rate_home(),
            PlotType::Field => product.rate_field(),
        }
    }
}

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
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Weeds,
    Diseases,
    Pests,
    Integrated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn crop_parses_case_insensitively() {
        assert_eq!(Crop::from_str("tomato").unwrap(), Crop::Tomato);
        assert_eq!(Crop::from_str("LEEK").unwrap(), Crop::Leek);
        assert!(Crop::from_str("potato").is_err());
    }

    #[test]
    fn every_crop_has_a_document_and_genitive_name() {
        assert_eq!(Crop::VARIANTS.len(), 12);
        for crop in Crop::VARIANTS {
            assert!(crop.document_name().ends_with(".json"));
            assert!(!crop.genitive_name().is_empty());
        }
        assert_eq!(Crop::Eggplant.document_name(), "eggplant.json");
    }

    #[test]
    fn plot_type_round_trips_lowercase() {
        assert_eq!(PlotType::Field.to_string(), "field");
        assert_eq!(PlotType::from_str("Home").unwrap(), PlotType::Home);
        assert_eq!(serde_json::to_string(&PlotType::Field).unwrap(), "\"field\"");
    }
}
