//! Whole-report comparison against a growth-phase profile.

use crate::deviation::{Direction, deviation, target};
use crate::profile::{Recommendation, RecommendationOverrides, RecommendationProfile, merge_overrides};
use crate::status::{Status, classify};
use crate::units::{UnitPreferences, convert};
use fm_analysis::MixReport;
use fm_feed::{DerivedNutrient, Nutrient, NutrientKey, ReportKey};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DisplayGroup {
    Performance,
    Minerals,
    AminoAcids,
    Other,
}

const fn n(nutrient: Nutrient) -> ReportKey {
    ReportKey::Nutrient(NutrientKey::Base(nutrient))
}

const PERFORMANCE_KEYS: [ReportKey; 2] = [n(Nutrient::MetabolizableEnergy), n(Nutrient::CrudeProtein)];

const MINERAL_KEYS: [ReportKey; 5] = [
    n(Nutrient::Calcium),
    n(Nutrient::AvailablePhosphorus),
    ReportKey::Nutrient(NutrientKey::Derived(DerivedNutrient::CalciumPhosphorusRatio)),
    n(Nutrient::Sodium),
    n(Nutrient::Ash),
];

const AMINO_ACID_KEYS: [ReportKey; 6] = [
    n(Nutrient::Lysine),
    n(Nutrient::MethionineCystine),
    n(Nutrient::Arginine),
    n(Nutrient::Threonine),
    n(Nutrient::Valine),
    n(Nutrient::Isoleucine),
];

const OTHER_KEYS: [ReportKey; 1] = [n(Nutrient::Choline)];

/// Keys plotted on the target-normalized chart, when the profile has them.
pub const CHART_KEYS: [ReportKey; 9] = [
    n(Nutrient::MetabolizableEnergy),
    n(Nutrient::Calcium),
    n(Nutrient::AvailablePhosphorus),
    n(Nutrient::Lysine),
    n(Nutrient::MethionineCystine),
    n(Nutrient::Threonine),
    n(Nutrient::Arginine),
    n(Nutrient::Valine),
    n(Nutrient::Isoleucine),
];

impl DisplayGroup {
    pub const ALL: [DisplayGroup; 4] = [
        DisplayGroup::Performance,
        DisplayGroup::Minerals,
        DisplayGroup::AminoAcids,
        DisplayGroup::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayGroup::Performance => "Key performance",
            DisplayGroup::Minerals => "Essential minerals",
            DisplayGroup::AminoAcids => "Essential amino acids",
            DisplayGroup::Other => "Other nutrients",
        }
    }

    /// Keys shown in this group, in display order.
    pub fn keys(self) -> &'static [ReportKey] {
        match self {
            DisplayGroup::Performance => &PERFORMANCE_KEYS,
            DisplayGroup::Minerals => &MINERAL_KEYS,
            DisplayGroup::AminoAcids => &AMINO_ACID_KEYS,
            DisplayGroup::Other => &OTHER_KEYS,
        }
    }

    /// Group `key` is shown in. Keys no group names go to `Other`.
    pub fn of(key: ReportKey) -> Self {
        Self::ALL
            .into_iter()
            .find(|g| g.keys().contains(&key))
            .unwrap_or(DisplayGroup::Other)
    }
}

/// One compared key, with values in base and display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRow {
    pub key: ReportKey,
    pub group: DisplayGroup,
    pub label: &'static str,
    /// Report value in the base unit; 0 when the report lacks the key.
    pub value: f64,
    /// Effective target after overrides, in the base unit.
    pub recommendation: Recommendation,
    pub overridden: bool,
    pub status: Status,
    pub status_label: &'static str,
    pub deviation: f64,
    pub direction: Direction,
    /// Unit the `display_*` fields are in.
    pub unit: &'static str,
    pub display_value: f64,
    pub display_min: f64,
    pub display_max: f64,
    pub display_deviation: f64,
}

/// Profile keys in display order: group by group, then any ungrouped keys.
fn ordered_keys(profile: &RecommendationProfile) -> Vec<ReportKey> {
    let mut keys: Vec<ReportKey> = DisplayGroup::ALL
        .into_iter()
        .flat_map(|g| g.keys().iter().copied())
        .filter(|k| profile.contains(*k))
        .collect();
    let ungrouped: Vec<ReportKey> = profile.keys().filter(|k| !keys.contains(k)).collect();
    keys.extend(ungrouped);
    keys
}

/// Compare `report` with `defaults` patched by `overrides`, one row per
/// profile key in display order.
pub fn assess(
    report: &MixReport,
    defaults: &RecommendationProfile,
    overrides: &RecommendationOverrides,
    units: &UnitPreferences,
) -> Vec<AssessmentRow> {
    let profile = merge_overrides(defaults, overrides);
    let rows: Vec<AssessmentRow> = ordered_keys(&profile)
        .into_iter()
        .filter_map(|key| {
            let rec = profile.get(key)?;
            let value = report.value(key).unwrap_or(0.0);
            Some(assess_one(key, value, rec, overrides.contains(key), units))
        })
        .collect();
    debug!(
        rows = rows.len(),
        out_of_range = rows.iter().filter(|r| r.status == Status::OutOfRange).count(),
        "report assessed"
    );
    rows
}

fn assess_one(
    key: ReportKey,
    value: f64,
    rec: &Recommendation,
    overridden: bool,
    units: &UnitPreferences,
) -> AssessmentRow {
    let status = classify(value, rec.min, rec.max);
    let dev = deviation(value, rec.min, rec.max);
    let wanted = units.unit_for(key);
    let (display_value, unit) = convert(value, key, wanted);

    AssessmentRow {
        key,
        group: DisplayGroup::of(key),
        label: key.display_name(),
        value,
        recommendation: rec.clone(),
        overridden,
        status,
        status_label: status.label(rec.is_floor()),
        deviation: dev,
        direction: Direction::of(dev),
        unit,
        display_value,
        display_min: convert(rec.min, key, unit).0,
        display_max: convert(rec.max, key, unit).0,
        display_deviation: convert(dev, key, unit).0,
    }
}

/// Keys whose report value lies strictly outside `[min, max]`.
///
/// Keys the report does not carry are skipped.
pub fn out_of_spec(report: &MixReport, profile: &RecommendationProfile) -> Vec<ReportKey> {
    ordered_keys(profile)
        .into_iter()
        .filter(|&key| {
            let (Some(value), Some(rec)) = (report.value(key), profile.get(key)) else {
                return false;
            };
            value < rec.min || value > rec.max
        })
        .collect()
}

/// Actual value and target range as percent of the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub key: ReportKey,
    pub label: &'static str,
    pub actual_pct: f64,
    pub min_pct: f64,
    pub max_pct: f64,
    pub actual: f64,
    pub recommendation: Recommendation,
}

/// Target-normalized points for the chart keys the profile covers.
///
/// The target is the midpoint, or `min` when `max` is unbounded or zero, and
/// 1 when that comes out as zero. Floors get a display max of
/// `max(min_pct * 1.5, actual_pct * 1.1)`.
pub fn chart_points(report: &MixReport, profile: &RecommendationProfile) -> Vec<ChartPoint> {
    CHART_KEYS
        .into_iter()
        .filter_map(|key| {
            let rec = profile.get(key)?;
            let actual = report.value(key).unwrap_or(0.0);

            let mut reference = if rec.max == 0.0 {
                rec.min
            } else {
                target(rec.min, rec.max)
            };
            if reference == 0.0 {
                reference = 1.0;
            }

            let actual_pct = actual / reference * 100.0;
            let min_pct = rec.min / reference * 100.0;
            let max_pct = if rec.is_floor() {
                (min_pct * 1.5).max(actual_pct * 1.1)
            } else {
                rec.max / reference * 100.0
            };

            Some(ChartPoint {
                key,
                label: key.display_name(),
                actual_pct,
                min_pct,
                max_pct,
                actual,
                recommendation: rec.clone(),
            })
        })
        .collect()
}
