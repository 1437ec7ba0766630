//! # Credkit Analytics
//!
//! Valuation analytics for any cash-flow schedule against a discount curve.
//!
//! - **Pricing**: present value of a schedule
//! - **Yields**: flat yield for a price (Newton with bisection fallback), XIRR
//! - **Risk**: effective and Macaulay duration, effective convexity, DV01
//! - **Cash Flows**: weighted average life
//!
//! ## Architecture
//!
//! `credkit-analytics` only sees [`CashFlowSchedule`](credkit_core::CashFlowSchedule)
//! and [`DiscountCurve`](credkit_curves::DiscountCurve); it knows nothing about
//! loans. `credkit-loans` builds schedules and calls into this crate.
//!
//! ## Usage
//!
//! ```rust
//! use credkit_analytics::prelude::*;
//! use credkit_core::daycounts::DayCountConvention;
//! use credkit_core::{CashFlow, CashFlowSchedule, Compounding, Date, Money};
//! use credkit_curves::FlatDiscountCurve;
//! use rust_decimal_macros::dec;
//!
//! let today = Date::from_ymd(2025, 1, 1).unwrap();
//! let schedule = CashFlowSchedule::new(vec![
//!     CashFlow::interest(Date::from_ymd(2026, 1, 1).unwrap(), Money::usd(dec!(50))),
//!     CashFlow::principal(Date::from_ymd(2026, 1, 1).unwrap(), Money::usd(dec!(1000))),
//! ]);
//! let curve = FlatDiscountCurve::from_f64(
//!     0.05,
//!     today,
//!     Compounding::Annual,
//!     DayCountConvention::Act365Fixed,
//! )
//! .unwrap();
//!
//! let pv = present_value(&schedule, &curve).unwrap();
//! let duration = effective_duration(&schedule, &curve, DEFAULT_BUMP_SIZE).unwrap();
//! assert!((pv.to_f64() - 1000.0).abs() < 1e-6);
//! assert!(duration > 0.9 && duration < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod cashflows;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::weighted_average_life;
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::pricing::present_value;
    pub use crate::risk::{
        dv01, effective_convexity, effective_duration, macaulay_duration, DEFAULT_BUMP_SIZE,
    };
    pub use crate::yields::{solve_yield, xirr, YieldResult, YieldSolverConfig};
}

pub use cashflows::weighted_average_life;
pub use error::{AnalyticsError, AnalyticsResult};
pub use pricing::present_value;
pub use risk::{dv01, effective_convexity, effective_duration, macaulay_duration, DEFAULT_BUMP_SIZE};
pub use yields::{solve_yield, xirr, YieldResult, YieldSolverConfig};
