//! Display units per report key.
//!
//! Values are stored in the key's base unit. A display unit is a name plus a
//! multiplicative factor: `display = base * factor`.

use crate::error::{RecommendError, RecommendResult};
use fm_feed::{DerivedNutrient, Nutrient, NutrientKey, ReportKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// kcal per MJ.
const KCAL_PER_MJ: f64 = 239.006;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    pub base_unit: &'static str,
    /// `(unit, factor)` pairs, base unit first with factor 1.
    pub units: &'static [(&'static str, f64)],
}

impl UnitDefinition {
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.units
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|&(_, f)| f)
    }

    /// More than one unit to choose from.
    pub fn is_selectable(&self) -> bool {
        self.units.len() > 1
    }
}

const COST_PER_TON: UnitDefinition = UnitDefinition {
    base_unit: "$/ton",
    units: &[("$/ton", 1.0), ("$/kg", 0.001)],
};

const COST_PER_100KG: UnitDefinition = UnitDefinition {
    base_unit: "$/100kg",
    units: &[("$/100kg", 1.0), ("$/kg", 0.01)],
};

const PERCENT: UnitDefinition = UnitDefinition {
    base_unit: "%",
    units: &[("%", 1.0), ("g/kg", 10.0)],
};

const ELECTROLYTE_PERCENT: UnitDefinition = UnitDefinition {
    base_unit: "%",
    units: &[("%", 1.0), ("g/kg", 10.0), ("ppm", 10_000.0)],
};

const ENERGY: UnitDefinition = UnitDefinition {
    base_unit: "kcal/kg",
    units: &[("kcal/kg", 1.0), ("MJ/kg", 1.0 / KCAL_PER_MJ)],
};

const RATIO: UnitDefinition = UnitDefinition {
    base_unit: "",
    units: &[("", 1.0)],
};

const BALANCE: UnitDefinition = UnitDefinition {
    base_unit: "mEq/kg",
    units: &[("mEq/kg", 1.0)],
};

const CHOLINE: UnitDefinition = UnitDefinition {
    base_unit: "mg/kg",
    units: &[("mg/kg", 1.0), ("g/kg", 0.001), ("%", 0.0001), ("ppm", 1.0)],
};

/// Unit table entry for `key`. Fiber fractions (NDF, ADF) have none.
pub fn unit_definition(key: ReportKey) -> Option<UnitDefinition> {
    let nutrient = match key {
        ReportKey::TotalCostPerTon => return Some(COST_PER_TON),
        ReportKey::TotalCostPer100kg => return Some(COST_PER_100KG),
        ReportKey::Nutrient(NutrientKey::Derived(d)) => {
            return Some(match d {
                DerivedNutrient::ElectrolyteBalance => BALANCE,
                _ => RATIO,
            });
        }
        ReportKey::Nutrient(NutrientKey::Base(n)) => n,
    };
    match nutrient {
        Nutrient::MetabolizableEnergy => Some(ENERGY),
        Nutrient::Choline => Some(CHOLINE),
        Nutrient::Sodium | Nutrient::Potassium | Nutrient::Chloride => Some(ELECTROLYTE_PERCENT),
        Nutrient::NeutralDetergentFiber | Nutrient::AcidDetergentFiber => None,
        _ => Some(PERCENT),
    }
}

/// Convert a base-unit value of `key` to `unit`.
///
/// Returns the converted value and the unit actually used. A key with no unit
/// table passes the value through with an empty unit; a unit the key does not
/// offer falls back to the base unit.
pub fn convert(value: f64, key: ReportKey, unit: &str) -> (f64, &'static str) {
    let Some(def) = unit_definition(key) else {
        return (value, "");
    };
    match def.units.iter().find(|(name, _)| *name == unit) {
        Some(&(name, factor)) => (value * factor, name),
        None => (value, def.base_unit),
    }
}

/// [`convert`] addressed by flat key string. Unknown keys pass through.
pub fn convert_key(value: f64, key: &str, unit: &str) -> (f64, &'static str) {
    match key.parse::<ReportKey>() {
        Ok(key) => convert(value, key, unit),
        Err(_) => (value, ""),
    }
}

/// Inverse of [`convert`]: a value displayed in `unit` back to the base unit.
pub fn convert_to_base(value: f64, key: ReportKey, unit: &str) -> f64 {
    match unit_definition(key).and_then(|def| def.factor(unit)) {
        Some(factor) if factor != 0.0 => value / factor,
        _ => value,
    }
}

/// Chosen display unit per key. Keys without a choice use the base unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPreferences {
    units: BTreeMap<ReportKey, String>,
}

impl UnitPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display unit for `key`.
    pub fn unit_for(&self, key: ReportKey) -> &str {
        if let Some(unit) = self.units.get(&key) {
            return unit;
        }
        unit_definition(key).map_or("", |def| def.base_unit)
    }

    /// Choose `unit` for `key`. Rejects units the key does not offer.
    pub fn set(&mut self, key: ReportKey, unit: &str) -> RecommendResult<()> {
        check_unit(key, unit)?;
        debug!(%key, unit, "display unit selected");
        self.units.insert(key, unit.to_string());
        Ok(())
    }

    pub fn reset(&mut self, key: ReportKey) {
        self.units.remove(&key);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReportKey, &str)> + '_ {
        self.units.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Check every stored choice against the unit table.
    pub fn validate(&self) -> RecommendResult<()> {
        self.iter().try_for_each(|(key, unit)| check_unit(key, unit))
    }
}

fn check_unit(key: ReportKey, unit: &str) -> RecommendResult<()> {
    if unit_definition(key).is_some_and(|def| def.factor(unit).is_some()) {
        return Ok(());
    }
    Err(RecommendError::UnknownUnit {
        key: key.to_string(),
        unit: unit.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: Nutrient) -> ReportKey {
        ReportKey::nutrient(n)
    }

    #[test]
    fn converts_with_factor() {
        assert_eq!(convert(22.5, key(Nutrient::CrudeProtein), "g/kg"), (225.0, "g/kg"));
        assert_eq!(convert(0.2, key(Nutrient::Sodium), "ppm"), (2000.0, "ppm"));
        assert_eq!(convert(1700.0, key(Nutrient::Choline), "g/kg").1, "g/kg");
        assert_eq!(convert(1000.0, ReportKey::TotalCostPerTon, "$/kg"), (1.0, "$/kg"));

        let (mj, unit) = convert(3000.0, key(Nutrient::MetabolizableEnergy), "MJ/kg");
        assert_eq!(unit, "MJ/kg");
        assert!((mj - 12.552).abs() < 1e-3);
    }

    #[test]
    fn unknown_unit_falls_back_to_base() {
        assert_eq!(convert(22.5, key(Nutrient::CrudeProtein), "ppm"), (22.5, "%"));
        assert_eq!(convert(3000.0, key(Nutrient::MetabolizableEnergy), ""), (3000.0, "kcal/kg"));
    }

    #[test]
    fn keys_without_a_table_pass_through() {
        assert_eq!(convert(12.0, key(Nutrient::NeutralDetergentFiber), "g/kg"), (12.0, ""));
        assert_eq!(convert_key(5.0, "nutrients.Fat_pct", "%"), (5.0, ""));
        assert_eq!(convert_key(5.0, "CP_pct", "g/kg"), (5.0, ""));
        assert_eq!(convert_key(5.0, "nutrients.CP_pct", "g/kg"), (50.0, "g/kg"));
    }

    #[test]
    fn ratios_and_balance() {
        let ratio = ReportKey::nutrient(DerivedNutrient::CalciumPhosphorusRatio);
        assert_eq!(convert(1.9, ratio, ""), (1.9, ""));
        assert!(!unit_definition(ratio).unwrap().is_selectable());
        let deb = ReportKey::nutrient(DerivedNutrient::ElectrolyteBalance);
        assert_eq!(unit_definition(deb).unwrap().base_unit, "mEq/kg");
    }

    #[test]
    fn base_unit_matches_key_table() {
        for k in NutrientKey::all() {
            let rk = ReportKey::Nutrient(k);
            if let Some(def) = unit_definition(rk) {
                assert_eq!(def.base_unit, rk.base_unit(), "{rk}");
                assert_eq!(def.units[0], (def.base_unit, 1.0), "{rk}");
            }
        }
    }

    #[test]
    fn preferences_default_to_base_and_reject_unknown_units() {
        let mut prefs = UnitPreferences::new();
        let ca = key(Nutrient::Calcium);
        assert_eq!(prefs.unit_for(ca), "%");
        prefs.set(ca, "g/kg").unwrap();
        assert_eq!(prefs.unit_for(ca), "g/kg");
        assert!(prefs.set(ca, "ppm").is_err());
        prefs.reset(ca);
        assert_eq!(prefs.unit_for(ca), "%");
        assert_eq!(prefs.unit_for(key(Nutrient::AcidDetergentFiber)), "");
    }

    #[test]
    fn preferences_validate_loaded_choices() {
        let prefs: UnitPreferences =
            serde_json::from_str(r#"{"nutrients.Na_pct": "ppm"}"#).unwrap();
        assert!(prefs.validate().is_ok());
        let bad: UnitPreferences =
            serde_json::from_str(r#"{"nutrients.ME_kcal_per_kg": "MJ"}"#).unwrap();
        assert!(bad.validate().is_err());
    }
}
