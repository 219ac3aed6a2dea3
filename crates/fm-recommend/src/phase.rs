//! Broiler growth phases.

use crate::error::RecommendError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthPhase {
    #[default]
    Starter,
    Grower,
    #[serde(rename = "Finisher 1")]
    Finisher1,
    #[serde(rename = "Finisher 2")]
    Finisher2,
}

impl GrowthPhase {
    pub const ALL: [GrowthPhase; 4] = [
        GrowthPhase::Starter,
        GrowthPhase::Grower,
        GrowthPhase::Finisher1,
        GrowthPhase::Finisher2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GrowthPhase::Starter => "Starter",
            GrowthPhase::Grower => "Grower",
            GrowthPhase::Finisher1 => "Finisher 1",
            GrowthPhase::Finisher2 => "Finisher 2",
        }
    }

    /// Bird age the phase covers.
    pub fn age_range(self) -> &'static str {
        match self {
            GrowthPhase::Starter => "0-10 days",
            GrowthPhase::Grower => "11-24 days",
            GrowthPhase::Finisher1 => "25-39 days",
            GrowthPhase::Finisher2 => "40+ days",
        }
    }
}

impl fmt::Display for GrowthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrowthPhase {
    type Err = RecommendError;

    /// Accepts the display name in any case, with or without the space
    /// (`finisher1`, `Finisher 1`) or with a dash (`finisher-1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        Self::ALL
            .into_iter()
            .find(|p| p.name().replace(' ', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| RecommendError::UnknownPhase {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("Starter".parse::<GrowthPhase>().unwrap(), GrowthPhase::Starter);
        assert_eq!("finisher 1".parse::<GrowthPhase>().unwrap(), GrowthPhase::Finisher1);
        assert_eq!("FINISHER-2".parse::<GrowthPhase>().unwrap(), GrowthPhase::Finisher2);
        assert_eq!("grower".parse::<GrowthPhase>().unwrap(), GrowthPhase::Grower);
        assert!("layer".parse::<GrowthPhase>().is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&GrowthPhase::Finisher1).unwrap();
        assert_eq!(json, "\"Finisher 1\"");
        let back: GrowthPhase = serde_json::from_str("\"Finisher 2\"").unwrap();
        assert_eq!(back, GrowthPhase::Finisher2);
    }

    #[test]
    fn age_ranges_follow_phase_order() {
        let ranges: Vec<&str> = GrowthPhase::ALL.iter().map(|p| p.age_range()).collect();
        assert_eq!(ranges, ["0-10 days", "11-24 days", "25-39 days", "40+ days"]);
    }
}
