//! hf-models: fitted curve models for the heat-pump simulation engine.
//!
//! Everything here is a thin wrapper over one natural cubic spline
//! ([`CurveFit`]):
//! - [`Emitter`]: radiator output derated by emitter-to-room ΔT
//! - [`CopCurve`]: heat-pump COP against ambient or leaving-water temperature
//! - [`AmbientProfile`]: periodic outdoor temperature over one day
//!
//! plus [`TargetSchedule`], a plain hourly step function with no spline.

pub mod ambient;
pub mod cop;
pub mod emitter;
pub mod error;
pub mod schedule;
pub mod spline;

pub use ambient::AmbientProfile;
pub use cop::CopCurve;
pub use emitter::Emitter;
pub use error::{ModelError, ModelResult};
pub use schedule::TargetSchedule;
pub use spline::CurveFit;
