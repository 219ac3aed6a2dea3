//! fm-feed: poultry feed data model.
//!
//! Nutrient key table, ingredients, enzymes and the built-in raw material
//! catalog. Everything the mix analyzer and the recommendation evaluator
//! agree on lives here.

pub mod catalog;
pub mod enzyme;
pub mod error;
pub mod fields;
pub mod ingredient;
pub mod nutrient;

pub use catalog::{EnzymeCatalogEntry, IngredientCatalogEntry};
pub use enzyme::Enzyme;
pub use error::{FeedError, FeedResult};
pub use fields::IngredientField;
pub use ingredient::{Ingredient, IngredientCategory, NutrientProfile};
pub use nutrient::{DerivedNutrient, Nutrient, NutrientKey, REPORT_NAMESPACE, ReportKey};
