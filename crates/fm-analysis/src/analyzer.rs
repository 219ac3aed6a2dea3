//! Weighted nutrient summation, enzyme contribution and derived ratios.

use crate::cost::compute_cost;
use crate::inclusion::total_inclusion;
use crate::report::MixReport;
use fm_core::safe_div;
use fm_core::units::constants::BATCH_PARTS;
use fm_feed::{DerivedNutrient, Enzyme, Ingredient, Nutrient, NutrientKey, NutrientProfile};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// dEB factors converting Na, K and Cl mix percents to mEq/kg.
pub const DEB_SODIUM: f64 = 434.78;
pub const DEB_POTASSIUM: f64 = 256.4;
pub const DEB_CHLORIDE: f64 = 281.69;

/// Analyze a mix.
///
/// Nutrients are computed on a 100-part basis regardless of the actual
/// inclusion total; normalizing is the caller's decision. An empty ingredient
/// list yields [`MixReport::empty`]. Never panics and never divides by zero.
pub fn analyze(ingredients: &[Ingredient], enzymes: &[Enzyme]) -> MixReport {
    if ingredients.is_empty() {
        return MixReport::empty();
    }

    let total_inclusion = total_inclusion(ingredients);

    let mut totals = weighted_totals(ingredients);
    apply_enzymes(&mut totals, enzymes);

    let mut nutrients: BTreeMap<NutrientKey, f64> = totals
        .iter()
        .map(|(n, v)| (NutrientKey::Base(n), v))
        .collect();
    for derived in DerivedNutrient::ALL {
        nutrients.insert(NutrientKey::Derived(derived), derived_value(derived, &totals));
    }

    let cost = compute_cost(ingredients, enzymes, total_inclusion);

    debug!(
        ingredients = ingredients.len(),
        active_enzymes = enzymes.iter().filter(|e| e.is_active()).count(),
        total_inclusion,
        cost_per_ton = cost.total_cost_per_ton,
        "mix analyzed"
    );

    MixReport {
        total_inclusion,
        total_cost_per_ton: cost.total_cost_per_ton,
        total_cost_per_100kg: cost.total_cost_per_100kg,
        nutrients,
    }
}

/// `sum(inclusion_i * value_i) / 100` for every nutrient field.
pub fn weighted_totals(ingredients: &[Ingredient]) -> NutrientProfile {
    let mut totals = NutrientProfile::default();
    for nutrient in Nutrient::ALL {
        let sum: f64 = ingredients
            .iter()
            .map(|ing| ing.inclusion_pct * ing.nutrient(nutrient))
            .sum();
        totals.set(nutrient, sum / BATCH_PARTS);
    }
    totals
}

/// Add the full matrix of every active enzyme.
///
/// Contribution is a step function of dosage: any dosage above zero adds the
/// whole matrix value, whatever its magnitude.
pub fn apply_enzymes(totals: &mut NutrientProfile, enzymes: &[Enzyme]) {
    for enzyme in enzymes.iter().filter(|e| e.is_active()) {
        for (&nutrient, &value) in &enzyme.matrix {
            trace!(enzyme = %enzyme.id, %nutrient, value, "enzyme contribution");
            totals.set(nutrient, totals.get(nutrient) + value);
        }
    }
}

pub fn derived_value(derived: DerivedNutrient, totals: &NutrientProfile) -> f64 {
    let na = totals.get(Nutrient::Sodium);
    let k = totals.get(Nutrient::Potassium);
    let cl = totals.get(Nutrient::Chloride);
    match derived {
        DerivedNutrient::EnergyProteinRatio => safe_div(
            totals.get(Nutrient::MetabolizableEnergy),
            totals.get(Nutrient::CrudeProtein),
        ),
        DerivedNutrient::CalciumPhosphorusRatio => safe_div(
            totals.get(Nutrient::Calcium),
            totals.get(Nutrient::AvailablePhosphorus),
        ),
        DerivedNutrient::ElectrolyteRatio => safe_div(k + cl, na),
        DerivedNutrient::ElectrolyteBalance => {
            DEB_SODIUM * na + DEB_POTASSIUM * k - DEB_CHLORIDE * cl
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use fm_core::IngredientId;
    use fm_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_inclusion_is_plain_sum(
            rows in prop::collection::vec((0.0_f64..100.0, 0.0_f64..50.0), 1..12)
        ) {
            let ings: Vec<Ingredient> = rows
                .iter()
                .enumerate()
                .map(|(i, &(inc, cp))| {
                    Ingredient::new(IngredientId::from_index(i as u32), "x")
                        .with_inclusion(inc)
                        .with_nutrient(Nutrient::CrudeProtein, cp)
                })
                .collect();
            let report = analyze(&ings, &[]);
            let expected: f64 = rows.iter().map(|(inc, _)| inc).sum();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(report.total_inclusion, expected, tol));
            prop_assert!(report.nutrients.values().all(|v| v.is_finite()));
        }

        #[test]
        fn weighted_sum_scales_linearly_with_inclusion(
            inc in 0.0_f64..100.0,
            value in 0.0_f64..100.0,
            factor in 0.1_f64..10.0,
        ) {
            let base = [Ingredient::new(IngredientId::from_index(0), "x")
                .with_inclusion(inc)
                .with_nutrient(Nutrient::Lysine, value)];
            let scaled = [base[0].clone().with_inclusion(inc * factor)];
            let a = analyze(&base, &[]).nutrient(Nutrient::Lysine).unwrap();
            let b = analyze(&scaled, &[]).nutrient(Nutrient::Lysine).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(b, a * factor, tol));
        }
    }
}
