//! Mix cost per metric ton.

use fm_core::units::constants::KG_PER_TON;
use fm_core::{dosage_fraction, price_per_kg, safe_div};
use fm_feed::{Enzyme, Ingredient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub ingredient_cost_per_ton: f64,
    pub enzyme_cost_per_ton: f64,
    pub total_cost_per_ton: f64,
    pub total_cost_per_100kg: f64,
}

/// Cost of the mix normalized to one metric ton.
///
/// Inclusion percents are read as kilograms of a `total_inclusion`-kilogram
/// batch, so the ingredient cost is correct even when inclusions do not sum to
/// 100. Active enzymes are priced by their dosage as a fraction of a ton.
pub fn compute_cost(
    ingredients: &[Ingredient],
    enzymes: &[Enzyme],
    total_inclusion: f64,
) -> CostBreakdown {
    let batch_cost: f64 = ingredients
        .iter()
        .map(|ing| ing.inclusion_pct * price_per_kg(ing.price_usd_per_ton))
        .sum();
    let cost_per_kg = safe_div(batch_cost, total_inclusion);
    let ingredient_cost_per_ton = cost_per_kg * KG_PER_TON;

    let enzyme_cost_per_ton: f64 = enzymes
        .iter()
        .filter(|e| e.is_active())
        .map(|e| dosage_fraction(e.dosage_g_per_ton) * e.price_usd_per_ton)
        .sum();

    let total_cost_per_ton = ingredient_cost_per_ton + enzyme_cost_per_ton;
    CostBreakdown {
        ingredient_cost_per_ton,
        enzyme_cost_per_ton,
        total_cost_per_ton,
        total_cost_per_100kg: total_cost_per_ton / 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::IngredientId;
    use fm_core::numeric::{Tolerances, nearly_equal};

    fn ingredient(id: u32, inclusion: f64, price: f64) -> Ingredient {
        Ingredient::new(IngredientId::new(id).unwrap(), format!("ing-{id}"))
            .with_inclusion(inclusion)
            .with_price(price)
    }

    #[test]
    fn single_ingredient_cost_per_ton() {
        // 60 kg at 0.325 $/kg = 19.5 $ for a 100 kg batch -> 195 $/ton
        let ings = [ingredient(1, 60.0, 325.0), ingredient(2, 40.0, 0.0)];
        let cost = compute_cost(&ings, &[], 100.0);
        let tol = Tolerances::default();
        assert!(nearly_equal(cost.ingredient_cost_per_ton, 195.0, tol));
        assert!(nearly_equal(cost.total_cost_per_100kg, 19.5, tol));
    }

    #[test]
    fn cost_is_normalized_to_batch_size() {
        // Same proportions at half the parts cost the same per ton.
        let full = compute_cost(&[ingredient(1, 100.0, 400.0)], &[], 100.0);
        let half = compute_cost(&[ingredient(1, 50.0, 400.0)], &[], 50.0);
        let tol = Tolerances::default();
        assert!(nearly_equal(full.total_cost_per_ton, 400.0, tol));
        assert!(nearly_equal(half.total_cost_per_ton, 400.0, tol));
    }

    #[test]
    fn zero_total_inclusion_costs_nothing() {
        let cost = compute_cost(&[ingredient(1, 0.0, 400.0)], &[], 0.0);
        assert_eq!(cost.ingredient_cost_per_ton, 0.0);
        assert!(cost.total_cost_per_ton.is_finite());
    }

    #[test]
    fn enzyme_cost_uses_dosage_fraction() {
        // 100 g/ton of a 15 000 $/ton product = 1.5 $/ton
        let phytase = Enzyme::new("phytase", "Phytase")
            .with_dosage(100.0)
            .with_price(15_000.0);
        let idle = Enzyme::new("xylanase", "Xylanase").with_price(12_000.0);
        let cost = compute_cost(&[ingredient(1, 100.0, 0.0)], &[phytase, idle], 100.0);
        let tol = Tolerances::default();
        assert!(nearly_equal(cost.enzyme_cost_per_ton, 1.5, tol));
        assert!(nearly_equal(cost.total_cost_per_ton, 1.5, tol));
    }
}
