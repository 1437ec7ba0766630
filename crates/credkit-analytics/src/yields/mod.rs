//! Yield solving for cash-flow schedules.
//!
//! - [`solve_yield`]: flat rate that prices a schedule at a target price
//! - [`xirr`]: annual internal rate of return over irregular dates

mod solver;
mod xirr;

pub use solver::{solve_yield, YieldResult, YieldSolverConfig};
pub use xirr::xirr;
