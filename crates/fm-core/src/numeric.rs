use crate::FmError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FmError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FmError::NonFinite { what, value: v })
    }
}

pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, FmError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(FmError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

/// `num / den` when `den > 0`, otherwise `0`.
///
/// Every ratio in the mix report goes through here so an empty or degenerate
/// mix yields zeros instead of NaN or infinity.
#[inline]
pub fn safe_div(num: Real, den: Real) -> Real {
    if den > 0.0 { num / den } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative_and_infinite() {
        assert_eq!(ensure_non_negative(0.0, "x"), Ok(0.0));
        assert!(matches!(
            ensure_non_negative(-1.0, "x"),
            Err(FmError::Negative { .. })
        ));
        assert!(matches!(
            ensure_non_negative(Real::INFINITY, "x"),
            Err(FmError::NonFinite { .. })
        ));
    }

    #[test]
    fn safe_div_guards_zero_and_negative_denominators() {
        assert_eq!(safe_div(3.0, 2.0), 1.5);
        assert_eq!(safe_div(3.0, 0.0), 0.0);
        assert_eq!(safe_div(3.0, -2.0), 0.0);
        assert_eq!(safe_div(0.0, 0.0), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn safe_div_is_always_finite(num in -1e9_f64..1e9, den in -1e9_f64..1e9) {
            prop_assert!(safe_div(num, den).is_finite());
        }
    }
}
