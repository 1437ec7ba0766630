//! # Credkit Core
//!
//! Core value types for the Credkit consumer-loan analytics library.
//!
//! This crate provides the foundational building blocks used throughout Credkit:
//!
//! - **Types**: `Date`, `Currency`, `Money`, `InterestRate`, `Period`, `PaymentFrequency`
//! - **Cash Flows**: `CashFlow` and the immutable, date-ordered `CashFlowSchedule`
//! - **Day Count Conventions**: Year fraction calculations (ACT/360, ACT/365F, ACT/ACT, 30/360)
//! - **Business Day Calendars**: Weekend and holiday calendars with adjustment conventions
//!
//! ## Design Philosophy
//!
//! - **Currency Safety**: `Money` refuses to mix currencies
//! - **Full Precision**: Amounts stay unrounded until `Money::round_to_currency`
//! - **Immutable Values**: Every type is a validated, read-only value
//!
//! ## Example
//!
//! ```rust
//! use credkit_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let principal = Money::new(dec!(250000), Currency::USD);
//! let rate = InterestRate::from_percent(dec!(6.5));
//! assert_eq!(rate.periodic_rate(12), dec!(0.065) / dec!(12));
//! assert!(principal.is_positive());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CredkitError, CredkitResult, ErrorKind};
    pub use crate::types::{
        CashFlow, CashFlowSchedule, CashFlowType, Compounding, Currency, Date, InterestRate,
        Money, PaymentFrequency, Period, TimeUnit,
    };
}

// Re-export commonly used types at crate root
pub use error::{CredkitError, CredkitResult, ErrorKind};
pub use types::{
    CashFlow, CashFlowSchedule, CashFlowType, Compounding, Currency, Date, InterestRate, Money,
    PaymentFrequency, Period, TimeUnit,
};
