//! Enzyme additives and their nutrient matrices.

use crate::nutrient::Nutrient;
use fm_core::EnzymeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enzyme product added to the feed at a grams-per-ton dosage.
///
/// The matrix is the flat nutrient amount the enzyme adds to the finished mix
/// once it is included at all. Dosage only drives cost; contribution does not
/// scale with it, and `standard_dosage_g_per_ton` is reference data for the
/// dosage the matrix was measured at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enzyme {
    pub id: EnzymeId,
    pub name: String,
    /// Grams per ton of finished feed. 0 means not active.
    #[serde(default)]
    pub dosage_g_per_ton: f64,
    #[serde(default)]
    pub standard_dosage_g_per_ton: f64,
    #[serde(default)]
    pub price_usd_per_ton: f64,
    #[serde(default)]
    pub matrix: BTreeMap<Nutrient, f64>,
}

impl Enzyme {
    pub fn new(id: impl Into<EnzymeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dosage_g_per_ton: 0.0,
            standard_dosage_g_per_ton: 0.0,
            price_usd_per_ton: 0.0,
            matrix: BTreeMap::new(),
        }
    }

    pub fn with_dosage(mut self, dosage_g_per_ton: f64) -> Self {
        self.dosage_g_per_ton = dosage_g_per_ton;
        self
    }

    pub fn with_standard_dosage(mut self, g_per_ton: f64) -> Self {
        self.standard_dosage_g_per_ton = g_per_ton;
        self
    }

    pub fn with_price(mut self, price_usd_per_ton: f64) -> Self {
        self.price_usd_per_ton = price_usd_per_ton;
        self
    }

    pub fn with_matrix_value(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.matrix.insert(nutrient, value);
        self
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.dosage_g_per_ton > 0.0
    }

    /// Matrix value for `nutrient`, 0 when the matrix does not name it.
    pub fn matrix_value(&self, nutrient: Nutrient) -> f64 {
        self.matrix.get(&nutrient).copied().unwrap_or(0.0)
    }
}
