//! # Credkit Math
//!
//! Numerical building blocks for the Credkit loan analytics library.
//!
//! - **Solvers**: Newton-Raphson, bisection, and a monitored Newton with
//!   bisection fallback for yield and curve calibration problems
//! - **Interpolation**: Linear interpolation with optional flat extrapolation
//!
//! All routines are pure functions over `f64`; nothing keeps state between
//! calls.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
    pub use crate::solvers::{
        bisection, newton_bisection, newton_raphson, SolverConfig, SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
