//! Iterative heating simulation solvers.
//!
//! Provides:
//! - Full-day thermostatic simulation with hysteresis control
//! - Single compressor on/off cycle at fixed ambient temperature
//! - Constant-flow-temperature daily simulation
//!
//! Each solver exposes one explicit step operation (`iterate`) that advances
//! a whole day or cycle and reports fixed-point convergence signals; looping
//! until converged is the caller's policy, not the solvers'.

pub mod constant_flow;
pub mod cycle;
pub mod daily;
pub mod error;

pub use constant_flow::{
    ConstantFlowOptions, ConstantFlowPass, ConstantFlowSeries, ConstantFlowSolver,
};
pub use cycle::{CycleOptions, CycleOutcome, CycleSeries, SingleCycleSolver};
pub use daily::{DailyCycleSolver, DailyOptions, DailyPass, DaySeries};
pub use error::{SimError, SimResult};
