//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when a derivative is available
//! - [`newton_raphson_numerical`]: Newton with a central-difference derivative
//! - [`bisection`]: slow but guaranteed inside a sign-changing bracket
//! - [`newton_bisection`]: monitored Newton that falls back to bisection
//!
//! Convergence is always judged on the residual `|f(x)|`, never on the step
//! size alone, so a returned root is guaranteed to satisfy the tolerance.
//!
//! # Example: Loan Yield
//!
//! ```rust
//! use credkit_math::solvers::{newton_bisection, SolverConfig};
//!
//! // 12 monthly payments of 100 priced at 1150
//! let pv = |y: f64| (1..=12).map(|k| 100.0 / (1.0 + y / 12.0).powi(k)).sum::<f64>();
//! let f = |y: f64| pv(y) - 1150.0;
//! let df = |y: f64| (f(y + 1e-4) - f(y - 1e-4)) / 2e-4;
//!
//! let result = newton_bisection(f, df, 0.05, (-0.99, 10.0), &SolverConfig::default()).unwrap();
//! assert!(f(result.root).abs() < 1e-8);
//! ```

mod bisection;
mod hybrid;
mod newton;

pub use bisection::bisection;
pub use hybrid::newton_bisection;
pub use newton::{newton_raphson, newton_raphson_numerical};

use std::fmt;

/// Default tolerance on the residual `|f(x)|`.
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on the residual.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Which algorithm produced a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverMethod {
    /// Newton-Raphson iteration
    Newton,
    /// Interval bisection
    Bisection,
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMethod::Newton => write!(f, "Newton-Raphson"),
            SolverMethod::Bisection => write!(f, "Bisection"),
        }
    }
}

/// Result of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used (across all phases).
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
    /// Algorithm that produced the root.
    pub method: SolverMethod,
}
