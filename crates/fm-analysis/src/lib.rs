//! fm-analysis: the mix analyzer.
//!
//! Turns a list of (ingredient, inclusion %) and (enzyme, dosage) records into
//! a [`MixReport`]: weighted nutrient concentrations, enzyme contributions,
//! derived ratios and cost. Pure and reentrant; call it on every edit.
//!
//! Inclusion normalization is a separate, caller-invoked transform in
//! [`inclusion`]. The analyzer always reports the mix as specified.

pub mod analyzer;
pub mod cost;
pub mod inclusion;
pub mod report;

pub use analyzer::analyze;
pub use cost::{CostBreakdown, compute_cost};
pub use inclusion::{
    INCLUSION_TOLERANCE, InclusionError, InclusionMode, check_inclusion_edit,
    needs_normalization, normalize_inclusions, sanitize_inclusion, total_inclusion,
};
pub use report::MixReport;
