//! # Credkit
//!
//! Consumer loan cash-flow engine: amortization schedules, behavioral
//! prepayment and default adjustment, and valuation analytics.
//!
//! This crate re-exports the public API of the component crates:
//!
//! - [`core`]: dates, money, rates, day counts, calendars, cash flows
//! - [`math`]: root finders and interpolation
//! - [`curves`]: flat, zero, shifted and bootstrapped discount curves
//! - [`analytics`]: present value, yield, duration, convexity, WAL
//! - [`loans`]: loans, amortization, behavioral adjustment, configuration
//!
//! ```rust
//! use credkit::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let loan = Loan::mortgage(
//!     Money::usd(dec!(300000)),
//!     InterestRate::from_percent(dec!(6.5)),
//!     30,
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//! )
//! .unwrap();
//!
//! let curve = FlatDiscountCurve::from_f64(
//!     0.065,
//!     loan.origination_date(),
//!     Compounding::Monthly,
//!     DayCountConvention::Thirty360,
//! )
//! .unwrap();
//!
//! let pv = loan.present_value(&curve).unwrap();
//! assert!((pv.amount() - dec!(300000)).abs() < dec!(0.01));
//! ```

#![warn(missing_docs)]

pub use credkit_analytics as analytics;
pub use credkit_core as core;
pub use credkit_curves as curves;
pub use credkit_loans as loans;
pub use credkit_math as math;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use credkit_analytics::prelude::*;
    pub use credkit_core::prelude::*;
    pub use credkit_curves::prelude::*;
    pub use credkit_loans::prelude::*;
}
