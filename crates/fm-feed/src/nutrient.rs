//! Nutrient key table.
//!
//! Keys are flat strings on the wire (`CP_pct`, `dEB`, ...). Concentrations in
//! a mix report are namespaced under [`REPORT_NAMESPACE`] (`nutrients.CP_pct`)
//! so they never collide with report-level totals such as `totalCostPerTon`.
//! Recommendation profiles and unit tables are keyed by the same
//! [`ReportKey`] the analyzer produces.

use crate::error::FeedError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Prefix of nutrient concentration keys in a mix report.
pub const REPORT_NAMESPACE: &str = "nutrients";

/// Nutrient density fields carried by every ingredient.
///
/// Values are concentrations in the raw material (same unit regardless of
/// inclusion), never pre-weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nutrient {
    #[serde(rename = "CP_pct")]
    CrudeProtein,
    #[serde(rename = "ME_kcal_per_kg")]
    MetabolizableEnergy,
    #[serde(rename = "Ca_pct")]
    Calcium,
    #[serde(rename = "avP_pct")]
    AvailablePhosphorus,
    #[serde(rename = "Na_pct")]
    Sodium,
    #[serde(rename = "K_pct")]
    Potassium,
    #[serde(rename = "Cl_pct")]
    Chloride,
    #[serde(rename = "Lys_pct")]
    Lysine,
    #[serde(rename = "TSAA_pct")]
    MethionineCystine,
    #[serde(rename = "Thr_pct")]
    Threonine,
    #[serde(rename = "Val_pct")]
    Valine,
    #[serde(rename = "Ile_pct")]
    Isoleucine,
    #[serde(rename = "Leu_pct")]
    Leucine,
    #[serde(rename = "Arg_pct")]
    Arginine,
    #[serde(rename = "Try_pct")]
    Tryptophan,
    #[serde(rename = "Starch_pct")]
    Starch,
    #[serde(rename = "CF_pct")]
    CrudeFiber,
    #[serde(rename = "NDF_pct")]
    NeutralDetergentFiber,
    #[serde(rename = "ADF_pct")]
    AcidDetergentFiber,
    #[serde(rename = "Ash_pct")]
    Ash,
    #[serde(rename = "Choline_mg_per_kg")]
    Choline,
}

impl Nutrient {
    pub const COUNT: usize = 21;

    /// Every ingredient nutrient field, in table order.
    pub const ALL: [Nutrient; Self::COUNT] = [
        Nutrient::CrudeProtein,
        Nutrient::MetabolizableEnergy,
        Nutrient::Calcium,
        Nutrient::AvailablePhosphorus,
        Nutrient::Sodium,
        Nutrient::Potassium,
        Nutrient::Chloride,
        Nutrient::Lysine,
        Nutrient::MethionineCystine,
        Nutrient::Threonine,
        Nutrient::Valine,
        Nutrient::Isoleucine,
        Nutrient::Leucine,
        Nutrient::Arginine,
        Nutrient::Tryptophan,
        Nutrient::Starch,
        Nutrient::CrudeFiber,
        Nutrient::NeutralDetergentFiber,
        Nutrient::AcidDetergentFiber,
        Nutrient::Ash,
        Nutrient::Choline,
    ];

    /// Position in [`Nutrient::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Nutrient::CrudeProtein => "CP_pct",
            Nutrient::MetabolizableEnergy => "ME_kcal_per_kg",
            Nutrient::Calcium => "Ca_pct",
            Nutrient::AvailablePhosphorus => "avP_pct",
            Nutrient::Sodium => "Na_pct",
            Nutrient::Potassium => "K_pct",
            Nutrient::Chloride => "Cl_pct",
            Nutrient::Lysine => "Lys_pct",
            Nutrient::MethionineCystine => "TSAA_pct",
            Nutrient::Threonine => "Thr_pct",
            Nutrient::Valine => "Val_pct",
            Nutrient::Isoleucine => "Ile_pct",
            Nutrient::Leucine => "Leu_pct",
            Nutrient::Arginine => "Arg_pct",
            Nutrient::Tryptophan => "Try_pct",
            Nutrient::Starch => "Starch_pct",
            Nutrient::CrudeFiber => "CF_pct",
            Nutrient::NeutralDetergentFiber => "NDF_pct",
            Nutrient::AcidDetergentFiber => "ADF_pct",
            Nutrient::Ash => "Ash_pct",
            Nutrient::Choline => "Choline_mg_per_kg",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Nutrient::CrudeProtein => "Crude protein",
            Nutrient::MetabolizableEnergy => "Metabolizable energy",
            Nutrient::Calcium => "Calcium",
            Nutrient::AvailablePhosphorus => "Available phosphorus",
            Nutrient::Sodium => "Sodium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Chloride => "Chloride",
            Nutrient::Lysine => "Lysine",
            Nutrient::MethionineCystine => "Methionine + cystine",
            Nutrient::Threonine => "Threonine",
            Nutrient::Valine => "Valine",
            Nutrient::Isoleucine => "Isoleucine",
            Nutrient::Leucine => "Leucine",
            Nutrient::Arginine => "Arginine",
            Nutrient::Tryptophan => "Tryptophan",
            Nutrient::Starch => "Starch",
            Nutrient::CrudeFiber => "Crude fiber",
            Nutrient::NeutralDetergentFiber => "NDF",
            Nutrient::AcidDetergentFiber => "ADF",
            Nutrient::Ash => "Ash",
            Nutrient::Choline => "Choline",
        }
    }

    /// Unit the density value is stored in.
    pub fn base_unit(self) -> &'static str {
        match self {
            Nutrient::MetabolizableEnergy => "kcal/kg",
            Nutrient::Choline => "mg/kg",
            _ => "%",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.key() == key)
    }

    /// Case-insensitive variant of [`Nutrient::from_key`] for imported headers.
    pub fn from_key_ignore_case(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Nutrient {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| FeedError::UnknownNutrient { key: s.to_string() })
    }
}

/// Ratios and balances computed from the weighted nutrient totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DerivedNutrient {
    /// ME / CP
    #[serde(rename = "MECP_Ratio")]
    EnergyProteinRatio,
    /// Ca / available P
    #[serde(rename = "CaAvP_Ratio")]
    CalciumPhosphorusRatio,
    /// (K + Cl) / Na
    #[serde(rename = "K_Cl_Na_Ratio")]
    ElectrolyteRatio,
    /// Dietary electrolyte balance, mEq/kg.
    #[serde(rename = "dEB")]
    ElectrolyteBalance,
}

impl DerivedNutrient {
    pub const ALL: [DerivedNutrient; 4] = [
        DerivedNutrient::EnergyProteinRatio,
        DerivedNutrient::CalciumPhosphorusRatio,
        DerivedNutrient::ElectrolyteRatio,
        DerivedNutrient::ElectrolyteBalance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DerivedNutrient::EnergyProteinRatio => "MECP_Ratio",
            DerivedNutrient::CalciumPhosphorusRatio => "CaAvP_Ratio",
            DerivedNutrient::ElectrolyteRatio => "K_Cl_Na_Ratio",
            DerivedNutrient::ElectrolyteBalance => "dEB",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DerivedNutrient::EnergyProteinRatio => "Energy to protein ratio",
            DerivedNutrient::CalciumPhosphorusRatio => "Calcium to available phosphorus ratio",
            DerivedNutrient::ElectrolyteRatio => "(K+Cl)/Na",
            DerivedNutrient::ElectrolyteBalance => "dEB",
        }
    }

    pub fn base_unit(self) -> &'static str {
        match self {
            DerivedNutrient::ElectrolyteBalance => "mEq/kg",
            _ => "",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for DerivedNutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Any key of the `nutrients` mapping in a mix report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NutrientKey {
    Base(Nutrient),
    Derived(DerivedNutrient),
}

impl NutrientKey {
    pub fn key(self) -> &'static str {
        match self {
            NutrientKey::Base(n) => n.key(),
            NutrientKey::Derived(d) => d.key(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NutrientKey::Base(n) => n.display_name(),
            NutrientKey::Derived(d) => d.display_name(),
        }
    }

    pub fn base_unit(self) -> &'static str {
        match self {
            NutrientKey::Base(n) => n.base_unit(),
            NutrientKey::Derived(d) => d.base_unit(),
        }
    }

    /// Every key the analyzer can emit: the ingredient fields, then the derived values.
    pub fn all() -> impl Iterator<Item = NutrientKey> {
        Nutrient::ALL
            .into_iter()
            .map(NutrientKey::Base)
            .chain(DerivedNutrient::ALL.into_iter().map(NutrientKey::Derived))
    }
}

impl From<Nutrient> for NutrientKey {
    fn from(n: Nutrient) -> Self {
        NutrientKey::Base(n)
    }
}

impl From<DerivedNutrient> for NutrientKey {
    fn from(d: DerivedNutrient) -> Self {
        NutrientKey::Derived(d)
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NutrientKey {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(n) = Nutrient::from_key(s) {
            return Ok(NutrientKey::Base(n));
        }
        if let Some(d) = DerivedNutrient::from_key(s) {
            return Ok(NutrientKey::Derived(d));
        }
        Err(FeedError::UnknownNutrient { key: s.to_string() })
    }
}

impl From<NutrientKey> for String {
    fn from(k: NutrientKey) -> Self {
        k.key().to_string()
    }
}

impl TryFrom<String> for NutrientKey {
    type Error = FeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Flat key addressing one value of a mix report.
///
/// `nutrients.<key>` for concentrations, bare names for report-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ReportKey {
    Nutrient(NutrientKey),
    TotalCostPerTon,
    TotalCostPer100kg,
}

impl ReportKey {
    pub fn nutrient(key: impl Into<NutrientKey>) -> Self {
        ReportKey::Nutrient(key.into())
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ReportKey::Nutrient(k) => k.display_name(),
            ReportKey::TotalCostPerTon => "Total mix cost ($/ton)",
            ReportKey::TotalCostPer100kg => "Total mix cost ($/100kg)",
        }
    }

    pub fn base_unit(self) -> &'static str {
        match self {
            ReportKey::Nutrient(k) => k.base_unit(),
            ReportKey::TotalCostPerTon => "$/ton",
            ReportKey::TotalCostPer100kg => "$/100kg",
        }
    }
}

impl From<NutrientKey> for ReportKey {
    fn from(k: NutrientKey) -> Self {
        ReportKey::Nutrient(k)
    }
}

impl From<Nutrient> for ReportKey {
    fn from(n: Nutrient) -> Self {
        ReportKey::Nutrient(NutrientKey::Base(n))
    }
}

impl From<DerivedNutrient> for ReportKey {
    fn from(d: DerivedNutrient) -> Self {
        ReportKey::Nutrient(NutrientKey::Derived(d))
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKey::Nutrient(k) => write!(f, "{}.{}", REPORT_NAMESPACE, k.key()),
            ReportKey::TotalCostPerTon => f.write_str("totalCostPerTon"),
            ReportKey::TotalCostPer100kg => f.write_str("totalCostPer100kg"),
        }
    }
}

impl FromStr for ReportKey {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "totalCostPerTon" => return Ok(ReportKey::TotalCostPerTon),
            "totalCostPer100kg" => return Ok(ReportKey::TotalCostPer100kg),
            _ => {}
        }
        let unknown = || FeedError::UnknownReportKey { key: s.to_string() };
        let (namespace, key) = s.split_once('.').ok_or_else(unknown)?;
        if namespace != REPORT_NAMESPACE {
            return Err(unknown());
        }
        key.parse::<NutrientKey>()
            .map(ReportKey::Nutrient)
            .map_err(|_| unknown())
    }
}

impl From<ReportKey> for String {
    fn from(k: ReportKey) -> Self {
        k.to_string()
    }
}

impl TryFrom<String> for ReportKey {
    type Error = FeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_index() {
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(n.index(), i);
        }
    }

    #[test]
    fn keys_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for key in NutrientKey::all() {
            assert!(seen.insert(key.key()), "duplicate key {}", key.key());
            assert_eq!(key.key().parse::<NutrientKey>().unwrap(), key);
        }
        assert_eq!(seen.len(), Nutrient::COUNT + DerivedNutrient::ALL.len());
    }

    #[test]
    fn report_keys_are_namespaced() {
        let key = ReportKey::from(Nutrient::CrudeProtein);
        assert_eq!(key.to_string(), "nutrients.CP_pct");
        assert_eq!(
            "nutrients.dEB".parse::<ReportKey>().unwrap(),
            ReportKey::from(DerivedNutrient::ElectrolyteBalance)
        );
        assert_eq!(
            "totalCostPerTon".parse::<ReportKey>().unwrap(),
            ReportKey::TotalCostPerTon
        );
    }

    #[test]
    fn unknown_report_keys_are_rejected() {
        assert!("CP_pct".parse::<ReportKey>().is_err());
        assert!("totals.CP_pct".parse::<ReportKey>().is_err());
        assert!("nutrients.Fat_pct".parse::<ReportKey>().is_err());
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(
            Nutrient::from_key_ignore_case("avp_pct"),
            Some(Nutrient::AvailablePhosphorus)
        );
        assert_eq!(Nutrient::from_key("avp_pct"), None);
    }

    #[test]
    fn serde_uses_wire_keys() {
        let json = serde_json::to_string(&Nutrient::MethionineCystine).unwrap();
        assert_eq!(json, "\"TSAA_pct\"");
        let key: ReportKey = serde_json::from_str("\"nutrients.K_Cl_Na_Ratio\"").unwrap();
        assert_eq!(key, ReportKey::from(DerivedNutrient::ElectrolyteRatio));
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            "\"nutrients.K_Cl_Na_Ratio\""
        );
    }
}
