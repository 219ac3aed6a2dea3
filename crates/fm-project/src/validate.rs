//! Formulation validation.
//!
//! The analyzer itself accepts anything and never fails. Files are held to a
//! stricter standard so that a saved mix always means what it says.

use crate::schema::{Formulation, LATEST_VERSION};
use fm_core::{FmError, ensure_finite, ensure_non_negative};
use fm_recommend::RecommendError;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value in {context}: {source}")]
    InvalidValue {
        context: String,
        #[source]
        source: FmError,
    },

    #[error("Invalid settings: {0}")]
    Settings(#[from] RecommendError),
}

pub fn validate_formulation(f: &Formulation) -> Result<(), ValidationError> {
    if f.version == 0 || f.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion { version: f.version });
    }

    let mut ingredient_ids = HashSet::new();
    for ing in &f.ingredients {
        if !ingredient_ids.insert(ing.id) {
            return Err(ValidationError::DuplicateId {
                id: ing.id.to_string(),
                context: "ingredients".to_string(),
            });
        }
        let context = || format!("ingredient {} ({})", ing.id, ing.name);
        check(ensure_non_negative(ing.inclusion_pct, "inclusion_pct"), context)?;
        check(ensure_non_negative(ing.price_usd_per_ton, "price_usd_per_ton"), context)?;
        for (nutrient, value) in ing.nutrients.iter() {
            check(ensure_finite(value, nutrient.key()), context)?;
        }
    }

    let mut enzyme_ids = HashSet::new();
    for enzyme in &f.enzymes {
        if !enzyme_ids.insert(&enzyme.id) {
            return Err(ValidationError::DuplicateId {
                id: enzyme.id.to_string(),
                context: "enzymes".to_string(),
            });
        }
        let context = || format!("enzyme {}", enzyme.id);
        check(ensure_non_negative(enzyme.dosage_g_per_ton, "dosage_g_per_ton"), context)?;
        check(
            ensure_non_negative(enzyme.standard_dosage_g_per_ton, "standard_dosage_g_per_ton"),
            context,
        )?;
        check(ensure_non_negative(enzyme.price_usd_per_ton, "price_usd_per_ton"), context)?;
        for (nutrient, &value) in &enzyme.matrix {
            check(ensure_finite(value, nutrient.key()), context)?;
        }
    }

    f.overrides.validate()?;
    f.units.validate()?;
    Ok(())
}

fn check<T>(
    result: Result<T, FmError>,
    context: impl FnOnce() -> String,
) -> Result<T, ValidationError> {
    result.map_err(|source| ValidationError::InvalidValue {
        context: context(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::IngredientId;
    use fm_feed::{Enzyme, Ingredient, Nutrient, ReportKey};
    use fm_recommend::TargetOverride;

    fn ing(id: u32) -> Ingredient {
        Ingredient::new(IngredientId::new(id).unwrap(), format!("ing-{id}")).with_inclusion(10.0)
    }

    #[test]
    fn starter_is_valid() {
        assert!(validate_formulation(&Formulation::starter("Starter")).is_ok());
    }

    #[test]
    fn version_bounds() {
        let mut f = Formulation::new("x");
        f.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_formulation(&f),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
        f.version = 0;
        assert!(validate_formulation(&f).is_err());
    }

    #[test]
    fn duplicate_ingredient_ids() {
        let mut f = Formulation::new("x");
        f.ingredients = vec![ing(1), ing(2), ing(1)];
        let err = validate_formulation(&f).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate ID: 1 in ingredients");
    }

    #[test]
    fn duplicate_enzyme_ids() {
        let mut f = Formulation::new("x");
        f.enzymes = vec![Enzyme::new("phytase", "A"), Enzyme::new("phytase", "B")];
        assert!(matches!(
            validate_formulation(&f),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn negative_or_non_finite_numbers() {
        let mut f = Formulation::new("x");
        f.ingredients = vec![ing(1).with_inclusion(-5.0)];
        let err = validate_formulation(&f).unwrap_err();
        assert!(err.to_string().contains("ingredient 1 (ing-1)"), "{err}");

        f.ingredients = vec![ing(1).with_nutrient(Nutrient::Lysine, f64::NAN)];
        assert!(validate_formulation(&f).is_err());

        f.ingredients = vec![ing(1)];
        f.enzymes = vec![Enzyme::new("xylanase", "X").with_dosage(f64::INFINITY)];
        assert!(validate_formulation(&f).is_err());
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut f = Formulation::new("x");
        f.overrides
            .set(ReportKey::nutrient(Nutrient::CrudeProtein), TargetOverride::new(23.0, 22.0));
        assert!(matches!(
            validate_formulation(&f),
            Err(ValidationError::Settings(RecommendError::InvalidOverride { .. }))
        ));
    }
}
