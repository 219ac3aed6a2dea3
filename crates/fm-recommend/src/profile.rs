//! Target ranges per growth phase and the override layer on top of them.
//!
//! Built-in profiles follow the Ross 308 broiler nutrient recommendations.
//! A `max` of `f64::INFINITY` marks a minimum-only (floor) target. On the wire
//! an unbounded `max` is simply omitted.

use crate::error::{RecommendError, RecommendResult};
use crate::phase::GrowthPhase;
use fm_feed::{DerivedNutrient, Nutrient, NutrientKey, ReportKey};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

fn unbounded() -> f64 {
    f64::INFINITY
}

fn is_unbounded(max: &f64) -> bool {
    *max == f64::INFINITY
}

fn de_upper_bound<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// Target range for one report key, in the key's base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub min: f64,
    #[serde(
        default = "unbounded",
        deserialize_with = "de_upper_bound",
        skip_serializing_if = "is_unbounded"
    )]
    pub max: f64,
    #[serde(default)]
    pub unit: String,
}

impl Recommendation {
    pub fn new(min: f64, max: f64, unit: impl Into<String>) -> Self {
        Self {
            min,
            max,
            unit: unit.into(),
        }
    }

    pub fn floor(min: f64, unit: impl Into<String>) -> Self {
        Self::new(min, f64::INFINITY, unit)
    }

    /// Minimum-only requirement.
    #[inline]
    pub fn is_floor(&self) -> bool {
        self.max == f64::INFINITY
    }
}

/// Map from report key to target range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationProfile {
    targets: BTreeMap<ReportKey, Recommendation>,
}

impl RecommendationProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults for `phase`.
    pub fn for_phase(phase: GrowthPhase) -> Self {
        let rows: &[Row] = match phase {
            GrowthPhase::Starter => &STARTER,
            GrowthPhase::Grower => &GROWER,
            GrowthPhase::Finisher1 => &FINISHER_1,
            GrowthPhase::Finisher2 => &FINISHER_2,
        };
        rows.iter()
            .map(|&(key, min, max)| (key, Recommendation::new(min, max, key.base_unit())))
            .collect()
    }

    pub fn get(&self, key: ReportKey) -> Option<&Recommendation> {
        self.targets.get(&key)
    }

    pub fn contains(&self, key: ReportKey) -> bool {
        self.targets.contains_key(&key)
    }

    pub fn insert(&mut self, key: ReportKey, rec: Recommendation) -> Option<Recommendation> {
        self.targets.insert(key, rec)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReportKey, &Recommendation)> + '_ {
        self.targets.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = ReportKey> + '_ {
        self.targets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<(ReportKey, Recommendation)> for RecommendationProfile {
    fn from_iter<T: IntoIterator<Item = (ReportKey, Recommendation)>>(iter: T) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

/// User replacement for the `min`/`max` of one key. The unit always stays the
/// default's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetOverride {
    pub min: f64,
    #[serde(
        default = "unbounded",
        deserialize_with = "de_upper_bound",
        skip_serializing_if = "is_unbounded"
    )]
    pub max: f64,
}

impl TargetOverride {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn floor(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Input check applied before an override is stored.
    ///
    /// `min` must be finite, `max` must be a number (infinity allowed) and
    /// `min <= max`.
    pub fn validate(&self, key: ReportKey) -> RecommendResult<()> {
        let invalid = |reason: String| RecommendError::InvalidOverride {
            key: key.to_string(),
            reason,
        };
        if !self.min.is_finite() {
            return Err(invalid(format!("min must be a finite number, got {}", self.min)));
        }
        if self.max.is_nan() {
            return Err(invalid("max must be a number".to_string()));
        }
        if self.min > self.max {
            return Err(invalid(format!("min {} > max {}", self.min, self.max)));
        }
        Ok(())
    }
}

/// Sparse patch layer over a profile, keyed like the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationOverrides {
    entries: BTreeMap<ReportKey, TargetOverride>,
}

impl RecommendationOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: ReportKey, value: TargetOverride) -> Option<TargetOverride> {
        self.entries.insert(key, value)
    }

    /// Drop the override for `key`, reverting it to the default.
    pub fn clear(&mut self, key: ReportKey) -> Option<TargetOverride> {
        self.entries.remove(&key)
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: ReportKey) -> Option<&TargetOverride> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: ReportKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReportKey, &TargetOverride)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate every entry, stopping at the first bad one.
    pub fn validate(&self) -> RecommendResult<()> {
        self.iter().try_for_each(|(key, ov)| ov.validate(key))
    }
}

/// Apply `overrides` over `defaults`, returning a new profile.
///
/// Only keys the defaults already have are patched; `min` and `max` are
/// replaced and the unit is kept. Overrides for other keys are ignored.
pub fn merge_overrides(
    defaults: &RecommendationProfile,
    overrides: &RecommendationOverrides,
) -> RecommendationProfile {
    let mut merged = defaults.clone();
    for (key, ov) in overrides.iter() {
        match merged.targets.get_mut(&key) {
            Some(rec) => {
                rec.min = ov.min;
                rec.max = ov.max;
            }
            None => warn!(%key, "override has no default recommendation; ignored"),
        }
    }
    merged
}

type Row = (ReportKey, f64, f64);

const fn n(nutrient: Nutrient) -> ReportKey {
    ReportKey::Nutrient(NutrientKey::Base(nutrient))
}

const CA_AVP: ReportKey =
    ReportKey::Nutrient(NutrientKey::Derived(DerivedNutrient::CalciumPhosphorusRatio));
const NO_MAX: f64 = f64::INFINITY;

const STARTER: [Row; 14] = [
    (n(Nutrient::MetabolizableEnergy), 2925.0, 3025.0),
    (n(Nutrient::CrudeProtein), 22.5, 23.5),
    (n(Nutrient::Lysine), 1.32, 1.34),
    (n(Nutrient::MethionineCystine), 1.00, 1.02),
    (n(Nutrient::Arginine), 1.40, 1.42),
    (n(Nutrient::Threonine), 0.88, 0.90),
    (n(Nutrient::Valine), 1.00, 1.02),
    (n(Nutrient::Isoleucine), 0.88, 0.90),
    (n(Nutrient::Calcium), 0.93, 0.97),
    (n(Nutrient::AvailablePhosphorus), 0.48, 0.52),
    (n(Nutrient::Sodium), 0.18, 0.23),
    (n(Nutrient::Ash), 5.0, 6.5),
    (n(Nutrient::Choline), 1700.0, NO_MAX),
    (CA_AVP, 1.8, 2.0),
];

const GROWER: [Row; 14] = [
    (n(Nutrient::MetabolizableEnergy), 3000.0, 3100.0),
    (n(Nutrient::CrudeProtein), 21.0, 22.0),
    (n(Nutrient::Lysine), 1.18, 1.20),
    (n(Nutrient::MethionineCystine), 0.92, 0.94),
    (n(Nutrient::Arginine), 1.27, 1.29),
    (n(Nutrient::Threonine), 0.79, 0.81),
    (n(Nutrient::Valine), 0.91, 0.93),
    (n(Nutrient::Isoleucine), 0.80, 0.82),
    (n(Nutrient::Calcium), 0.73, 0.77),
    (n(Nutrient::AvailablePhosphorus), 0.40, 0.44),
    (n(Nutrient::Sodium), 0.18, 0.23),
    (n(Nutrient::Ash), 5.0, 6.0),
    (n(Nutrient::Choline), 1600.0, NO_MAX),
    (CA_AVP, 1.7, 1.9),
];

const FINISHER_1: [Row; 14] = [
    (n(Nutrient::MetabolizableEnergy), 3050.0, 3150.0),
    (n(Nutrient::CrudeProtein), 19.0, 20.0),
    (n(Nutrient::Lysine), 1.08, 1.10),
    (n(Nutrient::MethionineCystine), 0.86, 0.88),
    (n(Nutrient::Arginine), 1.17, 1.19),
    (n(Nutrient::Threonine), 0.72, 0.74),
    (n(Nutrient::Valine), 0.84, 0.86),
    (n(Nutrient::Isoleucine), 0.75, 0.77),
    (n(Nutrient::Calcium), 0.68, 0.72),
    (n(Nutrient::AvailablePhosphorus), 0.38, 0.42),
    (n(Nutrient::Sodium), 0.16, 0.21),
    (n(Nutrient::Ash), 4.5, 5.5),
    (n(Nutrient::Choline), 1500.0, NO_MAX),
    (CA_AVP, 1.6, 1.8),
];

const FINISHER_2: [Row; 14] = [
    (n(Nutrient::MetabolizableEnergy), 3100.0, 3200.0),
    (n(Nutrient::CrudeProtein), 18.0, 19.0),
    (n(Nutrient::Lysine), 1.02, 1.04),
    (n(Nutrient::MethionineCystine), 0.82, 0.84),
    (n(Nutrient::Arginine), 1.12, 1.14),
    (n(Nutrient::Threonine), 0.68, 0.70),
    (n(Nutrient::Valine), 0.80, 0.82),
    (n(Nutrient::Isoleucine), 0.70, 0.72),
    (n(Nutrient::Calcium), 0.63, 0.67),
    (n(Nutrient::AvailablePhosphorus), 0.35, 0.39),
    (n(Nutrient::Sodium), 0.16, 0.21),
    (n(Nutrient::Ash), 4.5, 5.5),
    (n(Nutrient::Choline), 1400.0, NO_MAX),
    (CA_AVP, 1.6, 1.8),
];
