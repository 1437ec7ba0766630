//! Behavioral assumptions: prepayment and default speeds and loss severity.
//!
//! Speeds are annualized rates ([`PrepaymentRate`] as CPR, [`DefaultRate`]
//! as CDR) converted to per-period rates (SMM, MDR) when applied. Curves
//! give the speed by loan age in months.

mod curves;
mod lgd;
mod rates;

pub use curves::{DefaultCurve, PrepaymentCurve, RateCurve};
pub use lgd::LossGivenDefault;
pub use rates::{AnnualRate, DefaultRate, PrepaymentRate};
