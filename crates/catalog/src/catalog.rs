use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{
    CatalogError, Crop, Fungicide, FungicideControl, Herbicide, Insecticide, InsecticideControl,
    PlotType, ProblemType, Product, ProductKey, Rated,
};

#[derive(RustEmbed)]
#[folder = "data/"]
struct CatalogData;

static EMBEDDED: OnceLock<Catalog> = OnceLock::new();

/// Products registered for one crop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropCatalog {
    pub herbicides: Vec<Herbicide>,
    pub fungicides: Vec<Fungicide>,
    pub insecticides: Vec<Insecticide>,
}

impl CropCatalog {
    pub fn available_fungicides(&self, plot: PlotType) -> impl Iterator<Item = &Fungicide> + '_ {
        self.fungicides.iter().filter(move |f| f.available_for(plot))
    }

    pub fn available_insecticides(
        &self,
        plot: PlotType,
    ) -> impl Iterator<Item = &Insecticide> + '_ {
        self.insecticides.iter().filter(move |i| i.available_for(plot))
    }

    /// Herbicides carry no rates and are offered for every plot type.
    pub fn available_herbicides(&self) -> &[Herbicide] {
        &self.herbicides
    }

    pub fn supports(&self, problem: ProblemType) -> bool {
        match problem {
            ProblemType::Weeds => !self.herbicides.is_empty(),
            ProblemType::Diseases => !self.fungicides.is_empty(),
            ProblemType::Pests => !self.insecticides.is_empty(),
            ProblemType::Integrated => !self.fungicides.is_empty() || !self.insecticides.is_empty(),
        }
    }

    pub fn find(&self, key: &ProductKey) -> Option<Product> {
        self.fungicides
            .iter()
            .find(|f| f.product_name == key.product_name && f.active_ingredient == key.active_ingredient)
            .cloned()
            .map(Product::from)
            .or_else(|| {
                self.insecticides
                    .iter()
                    .find(|i| {
                        i.product_name == key.product_name
                            && i.active_ingredient == key.active_ingredient
                    })
                    .cloned()
                    .map(Product::from)
            })
    }

    /// Fungicides available for the plot that control every requested disease.
    pub fn filter_fungicides(
        &self,
        plot: PlotType,
        filters: &[FungicideControl],
    ) -> Vec<&Fungicide> {
        self.available_fungicides(plot)
            .filter(|f| filters.iter().all(|c| f.controls.has(*c)))
            .collect()
    }

    /// Insecticides available for the plot that control every requested pest.
    pub fn filter_insecticides(
        &self,
        plot: PlotType,
        filters: &[InsecticideControl],
    ) -> Vec<&Insecticide> {
        self.available_insecticides(plot)
            .filter(|i| filters.iter().all(|c| i.controls.has(*c)))
            .collect()
    }

    fn check_unique_keys(&self, crop: Crop) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        let keys = self
            .fungicides
            .iter()
            .map(Fungicide::key)
            .chain(self.insecticides.iter().map(Insecticide::key));

        for key in keys {
            if !seen.insert(key.clone()) {
                return Err(CatalogError::DuplicateProduct { crop, key });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    crops: BTreeMap<Crop, CropCatalog>,
}

impl Catalog {
    /// The catalog compiled into the binary, parsed on first use.
    ///
    /// Call [`Catalog::load_embedded`] at startup to surface data errors; if
    /// the embedded data is broken this accessor degrades to an empty catalog.
    pub fn embedded() -> &'static Catalog {
        EMBEDDED.get_or_init(|| {
            Self::load_embedded().unwrap_or_else(|err| {
                tracing::error!(error = %err, "embedded catalog is invalid");
                Catalog::default()
            })
        })
    }

    pub fn load_embedded() -> Result<Catalog, CatalogError> {
        let mut documents = Vec::with_capacity(Crop::VARIANTS.len());

        for crop in Crop::VARIANTS {
            let name = crop.document_name();
            let Some(file) = CatalogData::get(&name) else {
                tracing::debug!(%crop, "no embedded catalog document");
                continue;
            };
            let text =
                String::from_utf8(file.data.into_owned()).map_err(|_| CatalogError::Embedded(name))?;
            documents.push((*crop, text));
        }

        Self::from_json_documents(documents.iter().map(|(crop, text)| (*crop, text.as_str())))
    }

    /// Reads `<crop>.json` documents from a directory. Crops without a file
    /// are simply absent from the catalog.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        let dir = dir.as_ref();
        let mut documents = Vec::new();

        for crop in Crop::VARIANTS {
            let path = dir.join(crop.document_name());
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .map_err(|source| CatalogError::Io { path, source })?;
            documents.push((*crop, text));
        }

        Self::from_json_documents(documents.iter().map(|(crop, text)| (*crop, text.as_str())))
    }

    pub fn from_json_documents<'a, I>(documents: I) -> Result<Catalog, CatalogError>
    where
        I: IntoIterator<Item = (Crop, &'a str)>,
    {
        let mut crops = BTreeMap::new();

        for (crop, text) in documents {
            let catalog: CropCatalog = serde_json::from_str(text)
                .map_err(|source| CatalogError::InvalidDocument { crop, source })?;
            catalog.check_unique_keys(crop)?;
            crops.insert(crop, catalog);
        }

        tracing::debug!(crops = crops.len(), "catalog loaded");

        Ok(Catalog { crops })
    }

    pub fn crop(&self, crop: Crop) -> Option<&CropCatalog> {
        self.crops.get(&crop)
    }

    pub fn crops(&self) -> impl Iterator<Item = (Crop, &CropCatalog)> + '_ {
        self.crops.iter().map(|(crop, catalog)| (*crop, catalog))
    }

    pub fn insert(&mut self, crop: Crop, catalog: CropCatalog) -> Result<(), CatalogError> {
        catalog.check_unique_keys(crop)?;
        self.crops.insert(crop, catalog);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "herbicides": [],
        "fungicides": [
            {
                "activeIngredient": "металаксил-М + хлорокис міді",
                "productName": "Ридоміл Голд Р",
                "category": 2,
                "controls": {"bacteriosis": true, "phytophthora": true},
                "rateHome": "50 г / 10 л води",
                "rateField": "5,0 кг/га"
            },
            {
                "activeIngredient": "флуопірам + піриметаніл",
                "productName": "Луна Транквіліті",
                "category": 2,
                "controls": {"rots": true},
                "rateHome": null,
                "rateField": "1,0 л/га"
            }
        ],
        "insecticides": [
            {
                "activeIngredient": "спіротетрамат",
                "productName": "Мовенто",
                "controls": {"aphids": true, "whiteflies": true, "mites": true},
                "rateHome": "8 мл / 10 л води",
                "rateField": "0,75 л/га"
            }
        ]
    }"#;

    fn create_test_catalog() -> Catalog {
        Catalog::from_json_documents([(Crop::Tomato, DOC)]).unwrap()
    }

    #[test]
    fn embedded_catalog_covers_every_crop() {
        let catalog = Catalog::load_embedded().unwrap();
        for crop in Crop::VARIANTS {
            let crop_catalog = catalog.crop(*crop).unwrap();
            assert!(crop_catalog.supports(ProblemType::Integrated), "{crop}");
        }
        assert_eq!(Catalog::embedded(), &catalog);
    }

    #[test]
    fn null_rate_gates_plot_type() {
        let catalog = create_test_catalog();
        let tomato = catalog.crop(Crop::Tomato).unwrap();

        let home: Vec<_> = tomato.available_fungicides(PlotType::Home).collect();
        let field: Vec<_> = tomato.available_fungicides(PlotType::Field).collect();
        assert_eq!(home.len(), 1);
        assert_eq!(field.len(), 2);
        assert_eq!(tomato.available_insecticides(PlotType::Home).count(), 1);
    }

    #[test]
    fn missing_crop_is_a_silent_miss() {
        let catalog = create_test_catalog();
        assert!(catalog.crop(Crop::Garlic).is_none());
    }

    #[test]
    fn find_uses_the_composite_key() {
        let catalog = create_test_catalog();
        let tomato = catalog.crop(Crop::Tomato).unwrap();

        let found = tomato
            .find(&ProductKey::new("Мовенто", "спіротетрамат"))
            .unwrap();
        assert_eq!(found.product_name(), "Мовенто");
        assert!(tomato.find(&ProductKey::new("Мовенто", "інше")).is_none());
    }

    #[test]
    fn filters_require_every_control() {
        let catalog = create_test_catalog();
        let tomato = catalog.crop(Crop::Tomato).unwrap();

        assert_eq!(tomato.filter_fungicides(PlotType::Field, &[]).len(), 2);
        let both = tomato.filter_fungicides(
            PlotType::Field,
            &[FungicideControl::Bacteriosis, FungicideControl::Phytophthora],
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].product_name, "Ридоміл Голд Р");
        assert!(
            tomato
                .filter_fungicides(
                    PlotType::Field,
                    &[FungicideControl::Bacteriosis, FungicideControl::Rots]
                )
                .is_empty()
        );
        assert!(
            tomato
                .filter_insecticides(PlotType::Home, &[InsecticideControl::Thrips])
                .is_empty()
        );
    }

    #[test]
    fn supports_reflects_available_lists() {
        let catalog = create_test_catalog();
        let tomato = catalog.crop(Crop::Tomato).unwrap();
        assert!(!tomato.supports(ProblemType::Weeds));
        assert!(tomato.supports(ProblemType::Diseases));
        assert!(tomato.supports(ProblemType::Pests));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let catalog = create_test_catalog();
        let mut tomato = catalog.crop(Crop::Tomato).unwrap().clone();
        tomato.fungicides.push(tomato.fungicides[0].clone());

        let mut catalog = Catalog::default();
        let err = catalog.insert(Crop::Tomato, tomato).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct { .. }));
    }

    #[test]
    fn malformed_document_names_the_crop() {
        let err = Catalog::from_json_documents([(Crop::Beet, "{\"fungicides\": 3}")]).unwrap_err();
        assert!(err.to_string().contains("Beet"));
    }
}
