//! fm-recommend: the recommendation evaluator.
//!
//! Compares a [`fm_analysis::MixReport`] against growth-phase nutrition
//! targets: status classification, deviation from target, unit conversion for
//! display, and the override layer users patch over the built-in profiles.
//!
//! Phase, overrides and unit preferences are owned by the caller and passed in
//! on every call. Nothing here holds state.

pub mod assess;
pub mod deviation;
pub mod error;
pub mod phase;
pub mod profile;
pub mod status;
pub mod units;

pub use assess::{AssessmentRow, ChartPoint, DisplayGroup, assess, chart_points, out_of_spec};
pub use deviation::{DIRECTION_EPSILON, Direction, deviation, target};
pub use error::{RecommendError, RecommendResult};
pub use phase::GrowthPhase;
pub use profile::{
    Recommendation, RecommendationOverrides, RecommendationProfile, TargetOverride,
    merge_overrides,
};
pub use status::{STATUS_TOLERANCE, Status, classify};
pub use units::{UnitDefinition, UnitPreferences, convert, convert_key, convert_to_base, unit_definition};
