//! Mix report produced by the analyzer.

use fm_feed::{NutrientKey, ReportKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Blended nutrient profile and cost of a mix.
///
/// `nutrients` holds one concentration per ingredient nutrient field plus the
/// derived ratios. It is empty for a mix with no ingredients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixReport {
    /// Sum of inclusion percents. Expected near 100, never enforced.
    pub total_inclusion: f64,
    pub total_cost_per_ton: f64,
    pub total_cost_per_100kg: f64,
    pub nutrients: BTreeMap<NutrientKey, f64>,
}

impl MixReport {
    /// Report of a mix with no ingredients: zero totals, no nutrients.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty()
    }

    pub fn nutrient(&self, key: impl Into<NutrientKey>) -> Option<f64> {
        self.nutrients.get(&key.into()).copied()
    }

    pub fn value(&self, key: ReportKey) -> Option<f64> {
        match key {
            ReportKey::Nutrient(k) => self.nutrient(k),
            ReportKey::TotalCostPerTon => Some(self.total_cost_per_ton),
            ReportKey::TotalCostPer100kg => Some(self.total_cost_per_100kg),
        }
    }

    /// Lookup by flat report key (`nutrients.CP_pct`, `totalCostPerTon`).
    ///
    /// Unknown keys yield `None`.
    pub fn value_by_key(&self, key: &str) -> Option<f64> {
        key.parse::<ReportKey>().ok().and_then(|k| self.value(k))
    }

    /// Every value in the report under its flat report key.
    pub fn entries(&self) -> impl Iterator<Item = (ReportKey, f64)> + '_ {
        [
            (ReportKey::TotalCostPerTon, self.total_cost_per_ton),
            (ReportKey::TotalCostPer100kg, self.total_cost_per_100kg),
        ]
        .into_iter()
        .chain(
            self.nutrients
                .iter()
                .map(|(k, v)| (ReportKey::Nutrient(*k), *v)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_feed::{DerivedNutrient, Nutrient};

    fn sample() -> MixReport {
        let mut nutrients = BTreeMap::new();
        nutrients.insert(NutrientKey::Base(Nutrient::CrudeProtein), 18.0);
        nutrients.insert(NutrientKey::Derived(DerivedNutrient::ElectrolyteBalance), 250.0);
        MixReport {
            total_inclusion: 100.0,
            total_cost_per_ton: 400.0,
            total_cost_per_100kg: 40.0,
            nutrients,
        }
    }

    #[test]
    fn lookup_by_flat_key() {
        let report = sample();
        assert_eq!(report.value_by_key("nutrients.CP_pct"), Some(18.0));
        assert_eq!(report.value_by_key("nutrients.dEB"), Some(250.0));
        assert_eq!(report.value_by_key("totalCostPer100kg"), Some(40.0));
        assert_eq!(report.value_by_key("nutrients.Ca_pct"), None);
        assert_eq!(report.value_by_key("CP_pct"), None);
    }

    #[test]
    fn serializes_with_report_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalInclusion"], 100.0);
        assert_eq!(json["totalCostPer100kg"], 40.0);
        assert_eq!(json["nutrients"]["CP_pct"], 18.0);
        assert_eq!(json["nutrients"]["dEB"], 250.0);
    }

    #[test]
    fn entries_include_totals() {
        let keys: Vec<String> = sample().entries().map(|(k, _)| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "totalCostPerTon",
                "totalCostPer100kg",
                "nutrients.CP_pct",
                "nutrients.dEB"
            ]
        );
    }
}
