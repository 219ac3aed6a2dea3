//! Signed distance from the target value.

use serde::{Deserialize, Serialize};

/// Deviations within this band count as on target.
pub const DIRECTION_EPSILON: f64 = 0.0001;

/// Target value of a range: its midpoint, or `min` for a floor.
pub fn target(min: f64, max: f64) -> f64 {
    if max == f64::INFINITY {
        min
    } else {
        (min + max) / 2.0
    }
}

/// `value - target`. Positive means above target.
pub fn deviation(value: f64, min: f64, max: f64) -> f64 {
    value - target(min, max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Above,
    Below,
    OnTarget,
}

impl Direction {
    pub fn of(deviation: f64) -> Self {
        if deviation > DIRECTION_EPSILON {
            Direction::Above
        } else if deviation < -DIRECTION_EPSILON {
            Direction::Below
        } else {
            Direction::OnTarget
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Above => "▲",
            Direction::Below => "▼",
            Direction::OnTarget => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_midpoint_or_floor() {
        assert_eq!(target(22.5, 23.5), 23.0);
        assert_eq!(target(1700.0, f64::INFINITY), 1700.0);
    }

    #[test]
    fn deviation_sign() {
        assert_eq!(deviation(24.0, 22.5, 23.5), 1.0);
        assert_eq!(deviation(1500.0, 1700.0, f64::INFINITY), -200.0);
        assert_eq!(Direction::of(1.0), Direction::Above);
        assert_eq!(Direction::of(-1.0), Direction::Below);
        assert_eq!(Direction::of(0.00005), Direction::OnTarget);
        assert_eq!(Direction::of(-0.0001), Direction::OnTarget);
    }
}
