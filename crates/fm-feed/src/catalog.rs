//! Built-in raw material and enzyme catalog.
//!
//! Nutrient densities and prices for the master list a new formulation starts
//! from. Entries with a non-zero default inclusion form the starter mix.

use crate::enzyme::Enzyme;
use crate::ingredient::{Ingredient, IngredientCategory, NutrientProfile};
use crate::nutrient::Nutrient;
use fm_core::IngredientId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientCatalogEntry {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub category: IngredientCategory,
    pub default_inclusion_pct: f64,
    pub price_usd_per_ton: f64,
    /// Densities in [`Nutrient::ALL`] order.
    pub nutrients: [f64; Nutrient::COUNT],
}

impl IngredientCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    pub fn to_ingredient(&self) -> Ingredient {
        Ingredient {
            id: IngredientId::from_index(self.id.saturating_sub(1)),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            inclusion_pct: self.default_inclusion_pct,
            price_usd_per_ton: self.price_usd_per_ton,
            nutrients: NutrientProfile::from_values(self.nutrients),
        }
    }
}

const fn row(
    id: u32,
    name: &'static str,
    description: &'static str,
    category: IngredientCategory,
    default_inclusion_pct: f64,
    price_usd_per_ton: f64,
    nutrients: [f64; Nutrient::COUNT],
) -> IngredientCatalogEntry {
    IngredientCatalogEntry {
        id,
        name,
        description,
        category,
        default_inclusion_pct,
        price_usd_per_ton,
        nutrients,
    }
}

// Columns: CP, ME, Ca, avP, Na, K, Cl, Lys, TSAA, Thr, Val, Ile, Leu, Arg, Try,
// Starch, CF, NDF, ADF, Ash, Choline.
const INGREDIENT_CATALOG: [IngredientCatalogEntry; 34] = [
    row(1, "Yellow corn", "Primary energy source, rich in starch.", IngredientCategory::Energy, 60.0, 325.0, [7.8, 3350.0, 0.02, 0.05, 0.02, 0.3, 0.05, 0.21, 0.29, 0.28, 0.34, 0.26, 0.91, 0.36, 0.06, 62.0, 2.2, 9.5, 2.8, 1.5, 550.0]),
    row(25, "Wheat", "Energy and protein source with good starch content.", IngredientCategory::Energy, 0.0, 350.0, [13.0, 3150.0, 0.05, 0.17, 0.02, 0.45, 0.07, 0.32, 0.42, 0.36, 0.5, 0.4, 0.85, 0.6, 0.15, 60.0, 3.0, 11.0, 4.0, 1.8, 1000.0]),
    row(23, "Barley", "Alternative energy source, higher fibre than corn.", IngredientCategory::Energy, 0.0, 350.0, [11.5, 2650.0, 0.06, 0.16, 0.02, 0.5, 0.1, 0.38, 0.4, 0.35, 0.55, 0.38, 0.75, 0.5, 0.14, 55.0, 5.5, 18.0, 7.0, 2.5, 900.0]),
    row(24, "Wheat bran", "Fibre- and protein-rich by-product that supports digestion.", IngredientCategory::Energy, 0.0, 220.0, [15.5, 1400.0, 0.13, 0.35, 0.05, 1.2, 0.1, 0.65, 0.45, 0.5, 0.75, 0.55, 1.0, 1.0, 0.2, 20.0, 11.0, 40.0, 13.0, 6.0, 1200.0]),
    row(3, "Soybean oil", "Concentrated high-fat energy source used to raise energy density.", IngredientCategory::Energy, 4.0, 1500.0, [0.0, 8800.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(26, "Molasses", "Sugar by-product used as an energy source and palatability enhancer.", IngredientCategory::Energy, 0.0, 180.0, [4.0, 2500.0, 0.9, 0.08, 0.1, 3.5, 1.2, 0.15, 0.06, 0.1, 0.2, 0.1, 0.3, 0.2, 0.02, 0.0, 0.0, 0.0, 0.0, 9.0, 600.0]),
    row(2, "Soybean meal 44%", "Primary plant protein source, rich in amino acids.", IngredientCategory::Protein, 30.0, 500.0, [44.0, 2230.0, 0.3, 0.28, 0.03, 2.0, 0.06, 2.52, 1.08, 1.52, 1.87, 1.79, 3.02, 3.0, 0.6, 5.0, 7.0, 12.0, 9.0, 6.0, 2800.0]),
    row(27, "Soybean meal 46%", "Dehulled high-concentration plant protein source.", IngredientCategory::Protein, 0.0, 520.0, [46.0, 2350.0, 0.32, 0.3, 0.03, 2.1, 0.06, 2.85, 1.35, 1.85, 2.2, 2.1, 3.6, 3.4, 0.65, 4.0, 6.0, 10.0, 8.0, 6.5, 2900.0]),
    row(12, "Dried yeast", "Protein and B-vitamin source that supports gut health.", IngredientCategory::Protein, 0.0, 2700.0, [45.0, 2800.0, 0.2, 1.2, 0.1, 2.2, 0.2, 3.5, 1.2, 2.2, 2.5, 2.1, 3.2, 2.3, 0.5, 8.0, 3.0, 7.0, 4.0, 8.0, 4000.0]),
    row(8, "DL-Methionine", "Synthetic amino acid used to balance dietary protein.", IngredientCategory::AminoAcids, 0.35, 3600.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 99.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(9, "L-Lysine HCl", "Synthetic amino acid, first limiting amino acid for poultry.", IngredientCategory::AminoAcids, 0.25, 2000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 75.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(10, "L-Threonine", "Synthetic amino acid supporting growth and feathering.", IngredientCategory::AminoAcids, 0.05, 2350.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 96.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(20, "L-Arginine", "Essential amino acid.", IngredientCategory::AminoAcids, 0.0, 6500.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 96.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(21, "L-Valine", "Essential amino acid.", IngredientCategory::AminoAcids, 0.0, 5000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 96.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(22, "L-Isoleucine", "Essential amino acid.", IngredientCategory::AminoAcids, 0.0, 7000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 96.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    row(4, "Limestone", "Primary calcium source for bone formation.", IngredientCategory::MineralSupplements, 1.5, 40.0, [0.0, 0.0, 36.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 98.0, 0.0]),
    row(30, "Pure calcium carbonate", "High-purity calcium source.", IngredientCategory::MineralSupplements, 0.0, 65.0, [0.0, 0.0, 40.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 99.5, 0.0]),
    row(5, "Dicalcium phosphate", "Value is available phosphorus (about 85% of total P).", IngredientCategory::MineralSupplements, 1.5, 800.0, [0.0, 0.0, 22.0, 16.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 55.0, 0.0]),
    row(31, "Monocalcium phosphate", "Value is available phosphorus (about 95% of total P).", IngredientCategory::MineralSupplements, 0.0, 1600.0, [0.0, 0.0, 16.5, 20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 58.0, 0.0]),
    row(6, "Salt", "Sodium and chloride source for ionic balance.", IngredientCategory::MineralSupplements, 0.35, 100.0, [0.0, 0.0, 0.0, 0.0, 39.0, 0.0, 60.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 0.0]),
    row(17, "Sodium bicarbonate", "Sodium source and acid-base buffer.", IngredientCategory::MineralSupplements, 0.0, 750.0, [0.0, 0.0, 0.0, 0.0, 27.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 0.0]),
    row(16, "Sodium sulfate", "Sodium and sulphur source.", IngredientCategory::MineralSupplements, 0.0, 900.0, [0.0, 0.0, 0.0, 0.0, 32.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 0.0]),
    row(14, "Anti-inflammatory", "Medicated additive to control inflammatory responses.", IngredientCategory::Medicated, 0.0, 6250.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 40.0, 0.0]),
    row(15, "Anticoccidial", "Medicated additive to prevent coccidiosis.", IngredientCategory::Medicated, 0.0, 40000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 60.0, 0.0]),
    row(28, "Vitamin premix", "Concentrated blend of essential vitamins.", IngredientCategory::Other, 0.25, 10000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 50.0, 0.0]),
    row(29, "Mineral premix", "Concentrated blend of trace minerals.", IngredientCategory::Other, 0.25, 4000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 95.0, 0.0]),
    row(11, "Dried pomegranate peel", "Natural antioxidant-rich additive.", IngredientCategory::Other, 0.0, 350.0, [5.0, 1500.0, 0.4, 0.1, 0.05, 1.2, 0.1, 0.1, 0.08, 0.1, 0.15, 0.1, 0.2, 0.15, 0.05, 2.0, 18.0, 35.0, 25.0, 6.0, 300.0]),
    row(13, "Antioxidant", "Protects fats and vitamins in the feed from oxidation.", IngredientCategory::Other, 0.0, 5000.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 50.0, 0.0]),
    row(18, "Mold inhibitor", "Prevents fungal growth in stored feed.", IngredientCategory::Other, 0.0, 2250.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 55.0, 0.0]),
    row(19, "Mycotoxin binder", "Binds mycotoxins and blocks their absorption.", IngredientCategory::Other, 0.0, 2150.0, [0.0, 0.0, 0.0, 0.0, 0.1, 0.5, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 90.0, 0.0]),
    row(32, "Fat emulsifier", "Improves fat digestion and the energy value of the diet.", IngredientCategory::Other, 0.0, 4500.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 50.0, 0.0]),
    row(33, "Zeolite", "Natural anti-caking agent and mycotoxin binder.", IngredientCategory::Other, 0.0, 250.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 95.0, 0.0]),
    row(34, "Pellet binder", "Improves pellet quality and durability.", IngredientCategory::Other, 0.0, 600.0, [0.0, 500.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 60.0, 0.0]),
    row(35, "Choline chloride 60%", "Main choline source, 60% choline chloride on a plant carrier.", IngredientCategory::Other, 0.0, 1200.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 10.0, 7.0, 5.0, 447600.0]),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnzymeCatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub standard_dosage_g_per_ton: f64,
    pub price_usd_per_ton: f64,
    pub matrix: &'static [(Nutrient, f64)],
}

impl EnzymeCatalogEntry {
    /// Catalog enzymes start inactive (dosage 0).
    pub fn to_enzyme(&self) -> Enzyme {
        Enzyme {
            id: self.id.into(),
            name: self.name.to_string(),
            dosage_g_per_ton: 0.0,
            standard_dosage_g_per_ton: self.standard_dosage_g_per_ton,
            price_usd_per_ton: self.price_usd_per_ton,
            matrix: self.matrix.iter().copied().collect(),
        }
    }
}

const ENZYME_CATALOG: [EnzymeCatalogEntry; 3] = [
    EnzymeCatalogEntry {
        id: "phytase-standard",
        name: "Phytase (standard)",
        standard_dosage_g_per_ton: 100.0,
        price_usd_per_ton: 15_000.0,
        matrix: &[
            (Nutrient::AvailablePhosphorus, 0.12),
            (Nutrient::Calcium, 0.10),
            (Nutrient::MetabolizableEnergy, 50.0),
            (Nutrient::CrudeProtein, 0.4),
            (Nutrient::Lysine, 0.015),
            (Nutrient::MethionineCystine, 0.012),
        ],
    },
    EnzymeCatalogEntry {
        id: "xylanase-standard",
        name: "Xylanase (standard)",
        standard_dosage_g_per_ton: 50.0,
        price_usd_per_ton: 12_000.0,
        matrix: &[(Nutrient::MetabolizableEnergy, 75.0)],
    },
    EnzymeCatalogEntry {
        id: "protease-standard",
        name: "Protease (standard)",
        standard_dosage_g_per_ton: 200.0,
        price_usd_per_ton: 18_000.0,
        matrix: &[
            (Nutrient::CrudeProtein, 0.8),
            (Nutrient::Lysine, 0.03),
            (Nutrient::MethionineCystine, 0.02),
            (Nutrient::Threonine, 0.025),
        ],
    },
];

pub fn ingredient_catalog() -> &'static [IngredientCatalogEntry] {
    &INGREDIENT_CATALOG
}

pub fn enzyme_catalog() -> &'static [EnzymeCatalogEntry] {
    &ENZYME_CATALOG
}

pub fn find_ingredient(id: u32) -> Option<&'static IngredientCatalogEntry> {
    INGREDIENT_CATALOG.iter().find(|e| e.id == id)
}

pub fn search(query: &str) -> impl Iterator<Item = &'static IngredientCatalogEntry> + '_ {
    INGREDIENT_CATALOG.iter().filter(move |e| e.matches_query(query))
}

pub fn by_category(
    category: IngredientCategory,
) -> impl Iterator<Item = &'static IngredientCatalogEntry> {
    INGREDIENT_CATALOG
        .iter()
        .filter(move |e| e.category == category)
}

/// The starter mix: catalog ingredients with a non-zero default inclusion.
pub fn starter_mix() -> Vec<Ingredient> {
    INGREDIENT_CATALOG
        .iter()
        .filter(|e| e.default_inclusion_pct > 0.0)
        .map(|e| e.to_ingredient())
        .collect()
}

pub fn enzymes() -> Vec<Enzyme> {
    ENZYME_CATALOG.iter().map(|e| e.to_enzyme()).collect()
}
