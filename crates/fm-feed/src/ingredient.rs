//! Raw material records.

use crate::error::FeedError;
use crate::nutrient::Nutrient;
use core::fmt;
use core::str::FromStr;
use fm_core::IngredientId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouping used for filtering and display. The analyzer ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IngredientCategory {
    Energy,
    Protein,
    AminoAcids,
    MineralSupplements,
    Medicated,
    #[default]
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 6] = [
        IngredientCategory::Energy,
        IngredientCategory::Protein,
        IngredientCategory::AminoAcids,
        IngredientCategory::MineralSupplements,
        IngredientCategory::Medicated,
        IngredientCategory::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IngredientCategory::Energy => "Energy",
            IngredientCategory::Protein => "Protein",
            IngredientCategory::AminoAcids => "AminoAcids",
            IngredientCategory::MineralSupplements => "MineralSupplements",
            IngredientCategory::Medicated => "Medicated",
            IngredientCategory::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IngredientCategory::Energy => "Energy ingredients",
            IngredientCategory::Protein => "Protein ingredients",
            IngredientCategory::AminoAcids => "Amino acids",
            IngredientCategory::MineralSupplements => "Mineral supplements",
            IngredientCategory::Medicated => "Medicated supplements",
            IngredientCategory::Other => "Other supplements",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IngredientCategory {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FeedError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// Fixed set of nutrient densities, one slot per [`Nutrient`].
///
/// Serialized as a `key -> value` map; absent keys read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Nutrient, f64>", into = "BTreeMap<Nutrient, f64>")]
pub struct NutrientProfile {
    values: [f64; Nutrient::COUNT],
}

impl Default for NutrientProfile {
    fn default() -> Self {
        Self {
            values: [0.0; Nutrient::COUNT],
        }
    }
}

impl NutrientProfile {
    /// Values in [`Nutrient::ALL`] order.
    pub const fn from_values(values: [f64; Nutrient::COUNT]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.values[nutrient.index()]
    }

    #[inline]
    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        self.values[nutrient.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.into_iter().map(|n| (n, self.get(n)))
    }

    pub fn values(&self) -> &[f64; Nutrient::COUNT] {
        &self.values
    }
}

impl From<BTreeMap<Nutrient, f64>> for NutrientProfile {
    fn from(map: BTreeMap<Nutrient, f64>) -> Self {
        let mut profile = Self::default();
        for (n, v) in map {
            profile.set(n, v);
        }
        profile
    }
}

impl From<NutrientProfile> for BTreeMap<Nutrient, f64> {
    fn from(profile: NutrientProfile) -> Self {
        profile.iter().collect()
    }
}

/// One raw material in the active mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub category: IngredientCategory,
    /// Parts per 100 parts of total mix by weight.
    #[serde(default)]
    pub inclusion_pct: f64,
    #[serde(default)]
    pub price_usd_per_ton: f64,
    #[serde(default)]
    pub nutrients: NutrientProfile,
}

impl Ingredient {
    pub fn new(id: IngredientId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: IngredientCategory::default(),
            inclusion_pct: 0.0,
            price_usd_per_ton: 0.0,
            nutrients: NutrientProfile::default(),
        }
    }

    pub fn with_category(mut self, category: IngredientCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_inclusion(mut self, inclusion_pct: f64) -> Self {
        self.inclusion_pct = inclusion_pct;
        self
    }

    pub fn with_price(mut self, price_usd_per_ton: f64) -> Self {
        self.price_usd_per_ton = price_usd_per_ton;
        self
    }

    pub fn with_nutrient(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.nutrients.set(nutrient, value);
        self
    }

    #[inline]
    pub fn nutrient(&self, nutrient: Nutrient) -> f64 {
        self.nutrients.get(nutrient)
    }
}
