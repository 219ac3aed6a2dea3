//! Formulation file schema.

use fm_analysis::{InclusionMode, MixReport, analyze, normalize_inclusions};
use fm_core::IngredientId;
use fm_feed::{Enzyme, Ingredient, catalog};
use fm_recommend::{
    AssessmentRow, GrowthPhase, RecommendationOverrides, RecommendationProfile, UnitPreferences,
    assess, merge_overrides,
};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// A saved mix together with the settings it is evaluated under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Formulation {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub phase: GrowthPhase,
    #[serde(default)]
    pub inclusion_mode: InclusionMode,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub enzymes: Vec<Enzyme>,
    #[serde(default, skip_serializing_if = "RecommendationOverrides::is_empty")]
    pub overrides: RecommendationOverrides,
    #[serde(default, skip_serializing_if = "UnitPreferences::is_empty")]
    pub units: UnitPreferences,
}

impl Formulation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            phase: GrowthPhase::default(),
            inclusion_mode: InclusionMode::default(),
            ingredients: Vec::new(),
            enzymes: Vec::new(),
            overrides: RecommendationOverrides::new(),
            units: UnitPreferences::new(),
        }
    }

    /// Catalog starter mix with the standard enzymes listed but not dosed.
    pub fn starter(name: impl Into<String>) -> Self {
        Self {
            ingredients: catalog::starter_mix(),
            enzymes: catalog::enzymes(),
            ..Self::new(name)
        }
    }

    pub fn analyze(&self) -> MixReport {
        analyze(&self.ingredients, &self.enzymes)
    }

    /// Phase defaults with this formulation's overrides applied.
    pub fn profile(&self) -> RecommendationProfile {
        merge_overrides(&RecommendationProfile::for_phase(self.phase), &self.overrides)
    }

    pub fn assess(&self, report: &MixReport) -> Vec<AssessmentRow> {
        assess(
            report,
            &RecommendationProfile::for_phase(self.phase),
            &self.overrides,
            &self.units,
        )
    }

    /// Copy with inclusions scaled to sum to 100.
    pub fn normalized(&self) -> Self {
        Self {
            ingredients: normalize_inclusions(&self.ingredients),
            ..self.clone()
        }
    }

    /// A percent inclusion in this formulation's display mode, with its unit.
    pub fn display_inclusion(&self, pct: f64) -> (f64, &'static str) {
        (self.inclusion_mode.from_percent(pct), self.inclusion_mode.unit())
    }

    pub fn next_ingredient_id(&self) -> IngredientId {
        IngredientId::next_after(self.ingredients.iter().map(|i| i.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_takes_defaults() {
        let f: Formulation = serde_yaml::from_str("version: 1\nname: Empty\n").unwrap();
        assert_eq!(f, Formulation::new("Empty"));
        assert_eq!(f.phase, GrowthPhase::Starter);
        assert_eq!(f.inclusion_mode, InclusionMode::Percent);
    }

    #[test]
    fn empty_settings_are_not_written() {
        let yaml = serde_yaml::to_string(&Formulation::new("Empty")).unwrap();
        assert!(!yaml.contains("overrides"));
        assert!(!yaml.contains("units"));
        assert!(yaml.contains("phase: Starter"));
    }

    #[test]
    fn starter_ids_continue_after_catalog_ids() {
        let f = Formulation::starter("Starter");
        let max = f.ingredients.iter().map(|i| i.id.get()).max().unwrap();
        assert_eq!(f.next_ingredient_id().get(), max + 1);
        assert_eq!(Formulation::new("x").next_ingredient_id().get(), 1);
    }

    #[test]
    fn inclusion_display_follows_mode() {
        let mut f = Formulation::starter("Starter");
        let total = f.analyze().total_inclusion;
        assert_eq!(f.display_inclusion(total), (total, "%"));

        f.inclusion_mode = InclusionMode::KgPerTon;
        let (shown, unit) = f.display_inclusion(total);
        assert_eq!(unit, "kg/ton");
        assert!((shown - total * 10.0).abs() < 1e-9);
        assert_eq!(f.display_inclusion(100.0), (1000.0, "kg/ton"));
    }

    #[test]
    fn normalized_copy_sums_to_one_hundred() {
        let f = Formulation::starter("Starter");
        let total: f64 = f.normalized().ingredients.iter().map(|i| i.inclusion_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(f.normalized().name, f.name);
    }
}
