//! Annual interest rates with compounding and day-count conventions.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Compounding;
use crate::daycounts::DayCountConvention;
use crate::error::{CredkitError, CredkitResult};

/// An annualized interest rate.
///
/// The rate is a decimal fraction (0.065 for 6.5%). Compounding determines
/// how the rate turns into discount factors; the day count determines how
/// dates turn into the year fractions fed to it.
///
/// # Example
///
/// ```rust
/// use credkit_core::types::{Compounding, InterestRate};
/// use rust_decimal_macros::dec;
///
/// let rate = InterestRate::from_percent(dec!(6));
/// assert_eq!(rate.compounding(), Compounding::Monthly);
/// assert!((rate.discount_factor(1.0) - 1.0 / 1.005_f64.powi(12)).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterestRate {
    rate: Decimal,
    #[serde(default)]
    compounding: Compounding,
    #[serde(default)]
    day_count: DayCountConvention,
}

impl InterestRate {
    /// Creates a rate from a decimal fraction.
    #[must_use]
    pub fn new(rate: Decimal, compounding: Compounding, day_count: DayCountConvention) -> Self {
        Self {
            rate,
            compounding,
            day_count,
        }
    }

    /// Creates a rate from a decimal fraction with default conventions
    /// (monthly compounding, ACT/365F).
    #[must_use]
    pub fn annual(rate: Decimal) -> Self {
        Self::new(rate, Compounding::default(), DayCountConvention::default())
    }

    /// Creates a rate from a percentage (6.5 for 6.5%).
    #[must_use]
    pub fn from_percent(percent: Decimal) -> Self {
        Self::annual(percent / Decimal::ONE_HUNDRED)
    }

    /// Creates a rate from basis points (650 for 6.5%).
    #[must_use]
    pub fn from_bps(bps: Decimal) -> Self {
        Self::annual(bps / Decimal::from(10_000))
    }

    /// Creates a rate from an `f64` fraction.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::InvalidInput` if the value is not finite.
    pub fn from_f64(
        rate: f64,
        compounding: Compounding,
        day_count: DayCountConvention,
    ) -> CredkitResult<Self> {
        let rate = Decimal::from_f64(rate)
            .ok_or_else(|| CredkitError::invalid_input("rate", format!("{rate} is not finite")))?;
        Ok(Self::new(rate, compounding, day_count))
    }

    /// Returns the rate as a decimal fraction.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the rate as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.rate.to_f64().unwrap_or(0.0)
    }

    /// Returns the rate in percent.
    #[must_use]
    pub fn to_percent(&self) -> Decimal {
        self.rate * Decimal::ONE_HUNDRED
    }

    /// Returns the compounding convention.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns a copy with a different compounding convention and the same
    /// nominal rate.
    #[must_use]
    pub fn with_compounding(self, compounding: Compounding) -> Self {
        Self {
            compounding,
            ..self
        }
    }

    /// Returns a copy with a different day count convention.
    #[must_use]
    pub fn with_day_count(self, day_count: DayCountConvention) -> Self {
        Self { day_count, ..self }
    }

    /// Returns true for a negative rate.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.rate < Decimal::ZERO
    }

    /// Nominal rate per payment period (`rate / periods_per_year`).
    ///
    /// Returns the full annual rate when `periods_per_year` is zero.
    #[must_use]
    pub fn periodic_rate(&self, periods_per_year: u32) -> Decimal {
        if periods_per_year == 0 {
            self.rate
        } else {
            self.rate / Decimal::from(periods_per_year)
        }
    }

    /// Discount factor over `t` years under this rate's compounding.
    #[must_use]
    pub fn discount_factor(&self, t: f64) -> f64 {
        self.compounding.discount_factor(self.as_f64(), t)
    }

    /// Growth factor over `t` years under this rate's compounding.
    #[must_use]
    pub fn compound_factor(&self, t: f64) -> f64 {
        self.compounding.compound_factor(self.as_f64(), t)
    }

    /// Returns the economically equivalent rate under another compounding
    /// convention, matched over a one-year horizon.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::InvalidInput` if the converted rate is not finite.
    pub fn convert_to(&self, compounding: Compounding) -> CredkitResult<Self> {
        let converted = self
            .compounding
            .convert_rate(self.as_f64(), compounding, 1.0);
        Self::from_f64(converted, compounding, self.day_count)
    }
}

impl Default for InterestRate {
    fn default() -> Self {
        Self::annual(Decimal::ZERO)
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3}% ({}, {})",
            self.to_percent(),
            self.compounding,
            self.day_count
        )
    }
}
