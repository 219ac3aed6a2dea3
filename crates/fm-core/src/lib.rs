//! fm-core: stable foundation for feedmix.
//!
//! Contains:
//! - units (uom mass/ratio types + constructors for feed quantities)
//! - numeric (Real + tolerances + guarded float helpers)
//! - ids (stable compact IDs for ingredients and enzymes)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FmError, FmResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
