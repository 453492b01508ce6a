//! hf-core: stable foundation for heatflow.
//!
//! Contains:
//! - units (energy/temperature conversion constants and helpers)
//! - numeric (Real + finiteness/positivity guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HfError, HfResult};
pub use numeric::*;
pub use units::*;
