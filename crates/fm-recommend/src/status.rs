//! Status of a value against its target range.

use serde::{Deserialize, Serialize};

/// Relative band around a violated bound that still counts as near.
pub const STATUS_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    MeetsRange,
    NearBound,
    OutOfRange,
}

impl Status {
    /// Display label. Floor targets read differently from ranges.
    pub fn label(self, floor: bool) -> &'static str {
        match (self, floor) {
            (Status::MeetsRange, false) => "Within range",
            (Status::NearBound, false) => "Near bound",
            (Status::OutOfRange, false) => "Out of range",
            (Status::MeetsRange, true) => "Meets minimum",
            (Status::NearBound, true) => "Slightly below minimum",
            (Status::OutOfRange, true) => "Below minimum",
        }
    }
}

/// Classify `value` against `[min, max]`. `max = +inf` is a floor.
///
/// Both bounds are inclusive. Outside the range, the tolerance band is taken
/// relative to the bound that was violated. A NaN value is out of range.
pub fn classify(value: f64, min: f64, max: f64) -> Status {
    if max == f64::INFINITY {
        if value >= min {
            return Status::MeetsRange;
        }
        if value >= min * (1.0 - STATUS_TOLERANCE) {
            return Status::NearBound;
        }
        return Status::OutOfRange;
    }

    if value >= min && value <= max {
        return Status::MeetsRange;
    }
    let near_above = value > max && value <= max * (1.0 + STATUS_TOLERANCE);
    let near_below = value < min && value >= min * (1.0 - STATUS_TOLERANCE);
    if near_above || near_below {
        Status::NearBound
    } else {
        Status::OutOfRange
    }
}
