//! # Credkit Curves
//!
//! Discount curves for valuing loan cash flows.
//!
//! - **Curve Trait**: [`DiscountCurve`] maps dates to discount factors, spot
//!   rates and forward rates
//! - **Curve Types**: [`FlatDiscountCurve`], [`ZeroCurve`] and the
//!   [`ParallelShiftedCurve`] wrapper used for rate sensitivities
//! - **Bootstrap**: [`ZeroCurveBootstrapper`] builds a zero curve from
//!   deposits and par instruments
//!
//! ## Quick Start
//!
//! ```rust
//! use credkit_core::daycounts::DayCountConvention;
//! use credkit_core::{Compounding, Date};
//! use credkit_curves::prelude::*;
//!
//! let today = Date::from_ymd(2025, 1, 1).unwrap();
//! let curve = ZeroCurve::builder(today)
//!     .add_pivot(Date::from_ymd(2026, 1, 1).unwrap(), 0.040)
//!     .add_pivot(Date::from_ymd(2035, 1, 1).unwrap(), 0.050)
//!     .compounding(Compounding::Continuous)
//!     .day_count(DayCountConvention::Act365Fixed)
//!     .build()
//!     .unwrap();
//!
//! let d1 = Date::from_ymd(2027, 1, 1).unwrap();
//! let d2 = Date::from_ymd(2030, 1, 1).unwrap();
//! let fwd = curve.forward_rate(d1, d2).unwrap();
//! assert!(fwd > curve.spot_rate(d1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod curves;
pub mod error;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapInstrument, Deposit, ParInstrument, ZeroCurveBootstrapper};
    pub use crate::curves::{FlatDiscountCurve, ParallelShiftedCurve, ZeroCurve, ZeroCurveBuilder};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::traits::DiscountCurve;
}

pub use bootstrap::ZeroCurveBootstrapper;
pub use curves::{FlatDiscountCurve, ParallelShiftedCurve, ZeroCurve, ZeroCurveBuilder};
pub use error::{CurveError, CurveResult};
pub use traits::DiscountCurve;
