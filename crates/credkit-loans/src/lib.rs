//! # Credkit Loans
//!
//! Loan amortization and behavioral cash-flow modeling.
//!
//! - **Loan**: validated terms, factories for mortgages, auto and personal
//!   loans, and a builder
//! - **Amortization**: level payment, level principal, interest-only and
//!   bullet schedules, payment dates, re-amortization
//! - **Behavior**: CPR/CDR speeds, PSA and vintage curves, loss given default
//! - **Adjustment**: lump-sum prepayments, defaults with lagged recovery,
//!   expected cash flows under prepayment and default curves
//! - **Analytics**: WAL, present value, yield, duration and convexity of a loan
//!
//! ## Usage
//!
//! ```rust
//! use credkit_core::{Date, InterestRate, Money};
//! use credkit_loans::prelude::*;
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
//! let schedule = loan.generate_schedule().unwrap();
//! let expected = loan
//!     .expected_cashflows(Some(&PrepaymentCurve::psa(150.0).unwrap()), None, None)
//!     .unwrap();
//!
//! assert!(expected.latest_date() <= schedule.latest_date());
//! assert!(loan.weighted_average_life(Some(&PrepaymentCurve::psa(150.0).unwrap()), None).unwrap() < 15.0);
//! ```
//!
//! All amounts carry full decimal precision; round with
//! [`Money::round_to_currency`](credkit_core::Money::round_to_currency) or
//! [`Loan::payment_rounded`] when presenting them.

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

pub mod adjust;
pub mod amortization;
pub mod analytics;
pub mod behavior;
pub mod config;
pub mod error;
pub mod loan;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adjust::{BehavioralAdjuster, DEFAULT_BALANCE_TOLERANCE};
    pub use crate::amortization::{
        amortize, calculate_payment, generate_payment_dates, reamortize, AmortizationEngine,
        AmortizationType, ReamortizationMethod,
    };
    pub use crate::analytics::{DurationKind, LoanRiskMetrics};
    pub use crate::behavior::{
        AnnualRate, DefaultCurve, DefaultRate, LossGivenDefault, PrepaymentCurve, PrepaymentRate,
    };
    pub use crate::config::EngineConfig;
    pub use crate::error::{LoanError, LoanResult};
    pub use crate::loan::{Loan, LoanBuilder};
}

pub use adjust::{BehavioralAdjuster, DEFAULT_BALANCE_TOLERANCE};
pub use amortization::{
    amortize, calculate_payment, generate_payment_dates, reamortize, AmortizationEngine,
    AmortizationType, ReamortizationMethod,
};
pub use analytics::{DurationKind, LoanRiskMetrics};
pub use behavior::{
    AnnualRate, DefaultCurve, DefaultRate, LossGivenDefault, PrepaymentCurve, PrepaymentRate,
    RateCurve,
};
pub use config::EngineConfig;
pub use error::{LoanError, LoanResult};
pub use loan::{Loan, LoanBuilder};
