//! Flat discount curve.

use serde::{Deserialize, Serialize};

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{Compounding, Date, InterestRate};
use rust_decimal::Decimal;

use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// A curve with the same spot rate at every horizon.
///
/// Discount factors use the rate's own compounding and day count, so a flat
/// curve at a loan's note rate with matching conventions reprices the loan
/// at par.
///
/// # Example
///
/// ```rust
/// use credkit_core::daycounts::DayCountConvention;
/// use credkit_core::{Compounding, Date};
/// use credkit_curves::{DiscountCurve, FlatDiscountCurve};
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let curve = FlatDiscountCurve::from_f64(
///     0.05,
///     today,
///     Compounding::Annual,
///     DayCountConvention::Thirty360,
/// )
/// .unwrap();
///
/// let two_years = Date::from_ymd(2027, 1, 1).unwrap();
/// assert!((curve.discount_factor(two_years) - 1.0 / 1.05_f64.powi(2)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatDiscountCurve {
    rate: InterestRate,
    valuation_date: Date,
}

impl FlatDiscountCurve {
    /// Creates a flat curve at `rate` from `valuation_date`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidRate` if the rate is below -100%.
    pub fn new(rate: InterestRate, valuation_date: Date) -> CurveResult<Self> {
        if rate.rate() < -Decimal::ONE {
            return Err(CurveError::invalid_rate(
                rate.as_f64(),
                "rate must be >= -1",
            ));
        }
        Ok(Self {
            rate,
            valuation_date,
        })
    }

    /// Creates a flat curve from an `f64` rate and explicit conventions.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidRate` if the rate is non-finite or below -100%.
    pub fn from_f64(
        rate: f64,
        valuation_date: Date,
        compounding: Compounding,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if !rate.is_finite() {
            return Err(CurveError::invalid_rate(rate, "rate must be finite"));
        }
        let rate = InterestRate::from_f64(rate, compounding, day_count)?;
        Self::new(rate, valuation_date)
    }

    /// Returns the curve's rate.
    #[must_use]
    pub fn rate(&self) -> InterestRate {
        self.rate
    }
}

impl DiscountCurve for FlatDiscountCurve {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn compounding(&self) -> Compounding {
        self.rate.compounding()
    }

    fn day_count(&self) -> DayCountConvention {
        self.rate.day_count()
    }

    fn spot_rate(&self, _date: Date) -> f64 {
        self.rate.as_f64()
    }
}
