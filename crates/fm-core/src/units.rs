// fm-core/src/units.rs

use uom::si::f64::{Mass as UomMass, Ratio as UomRatio};

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;
/// Mass fraction (inclusion rates, nutrient percents, dosages).
pub type Fraction = UomRatio;

#[inline]
pub fn tons(v: f64) -> Mass {
    use uom::si::mass::ton;
    Mass::new::<ton>(v)
}

#[inline]
pub fn percent(v: f64) -> Fraction {
    use uom::si::ratio::percent;
    Fraction::new::<percent>(v)
}

#[inline]
pub fn ppm(v: f64) -> Fraction {
    use uom::si::ratio::part_per_million;
    Fraction::new::<part_per_million>(v)
}

/// Plain number for a fraction (1.0 = whole).
#[inline]
pub fn as_ratio(f: Fraction) -> f64 {
    use uom::si::ratio::ratio;
    f.get::<ratio>()
}

/// Enzyme dosage in grams per metric ton of feed, as a ton-per-ton fraction.
///
/// Grams per ton is parts per million by mass.
#[inline]
pub fn dosage_fraction(g_per_ton: f64) -> f64 {
    as_ratio(ppm(g_per_ton))
}

/// Price per kilogram from a price per metric ton.
#[inline]
pub fn price_per_kg(price_per_ton: f64) -> f64 {
    use uom::si::mass::kilogram;
    price_per_ton / tons(1.0).get::<kilogram>()
}

pub mod constants {
    pub const KG_PER_TON: f64 = 1_000.0;
    /// Ingredient inclusions are expressed against a 100-part batch.
    pub const BATCH_PARTS: f64 = 100.0;
}
