//! Inclusion totals, normalization and display-mode conversion.
//!
//! None of this runs inside [`crate::analyze`]: the analyzer reports the mix
//! as specified and the caller decides whether to warn, normalize and re-run.

use fm_core::units::constants::BATCH_PARTS;
use fm_feed::Ingredient;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Distance from 100 % beyond which a mix should be offered normalization.
pub const INCLUSION_TOLERANCE: f64 = 0.1;

/// Slack allowed above 100 % when validating a single edit.
const EDIT_OVERFLOW_TOLERANCE: f64 = 0.001;

pub fn total_inclusion(ingredients: &[Ingredient]) -> f64 {
    ingredients.iter().map(|i| i.inclusion_pct).sum()
}

pub fn needs_normalization(total_inclusion: f64) -> bool {
    (BATCH_PARTS - total_inclusion).abs() > INCLUSION_TOLERANCE
}

/// Scale every inclusion by `100 / total` so the mix sums to 100.
///
/// Returns the list unchanged when the total is not positive.
pub fn normalize_inclusions(ingredients: &[Ingredient]) -> Vec<Ingredient> {
    let total = total_inclusion(ingredients);
    if total <= 0.0 {
        return ingredients.to_vec();
    }
    let factor = BATCH_PARTS / total;
    debug!(total, factor, "normalizing inclusions");
    ingredients
        .iter()
        .map(|ing| {
            let mut ing = ing.clone();
            ing.inclusion_pct *= factor;
            ing
        })
        .collect()
}

/// How inclusion rates are entered and displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionMode {
    #[default]
    Percent,
    KgPerTon,
}

impl InclusionMode {
    /// Largest value a single ingredient may take in this mode.
    pub fn max(self) -> f64 {
        match self {
            InclusionMode::Percent => 100.0,
            InclusionMode::KgPerTon => 1000.0,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            InclusionMode::Percent => "%",
            InclusionMode::KgPerTon => "kg/ton",
        }
    }

    pub fn to_percent(self, value: f64) -> f64 {
        match self {
            InclusionMode::Percent => value,
            InclusionMode::KgPerTon => value / 10.0,
        }
    }

    pub fn from_percent(self, pct: f64) -> f64 {
        match self {
            InclusionMode::Percent => pct,
            InclusionMode::KgPerTon => pct * 10.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InclusionError {
    #[error("Inclusion is not a number")]
    NotANumber,

    #[error("Inclusion cannot be negative: {value}")]
    Negative { value: f64 },

    #[error("Inclusion {value} exceeds the maximum of {max} {unit}")]
    AboveMaximum {
        value: f64,
        max: f64,
        unit: &'static str,
    },

    #[error("Total inclusion would reach {new_total:.2}%, above 100%")]
    TotalExceeded { new_total: f64 },
}

/// Validate a new inclusion for one ingredient, entered in `mode`.
///
/// `current_pct` is that ingredient's present inclusion and `total_pct` the
/// present mix total, both in percent. Returns the new inclusion in percent.
pub fn check_inclusion_edit(
    value: f64,
    mode: InclusionMode,
    current_pct: f64,
    total_pct: f64,
) -> Result<f64, InclusionError> {
    if value.is_nan() {
        return Err(InclusionError::NotANumber);
    }
    if value < 0.0 {
        return Err(InclusionError::Negative { value });
    }
    if value > mode.max() {
        return Err(InclusionError::AboveMaximum {
            value,
            max: mode.max(),
            unit: mode.unit(),
        });
    }

    let new_pct = mode.to_percent(value);
    let new_total = total_pct - current_pct + new_pct;
    if new_total > BATCH_PARTS + EDIT_OVERFLOW_TOLERANCE {
        return Err(InclusionError::TotalExceeded { new_total });
    }
    Ok(new_pct)
}

/// Clamp an entered value to `[0, mode.max()]` and convert it to percent.
/// NaN reads as 0.
pub fn sanitize_inclusion(value: f64, mode: InclusionMode) -> f64 {
    let clamped = if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value.min(mode.max())
    };
    mode.to_percent(clamped)
}
