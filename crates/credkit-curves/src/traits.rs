//! The discounting contract shared by every curve.

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{Compounding, Date};

use crate::error::{CurveError, CurveResult};

/// A term structure of discount factors anchored at a valuation date.
///
/// Implementations supply the spot (zero) rate for a date; discount factors
/// and forward rates follow from the curve's compounding and day count.
///
/// # Required Methods
///
/// - [`valuation_date`](DiscountCurve::valuation_date)
/// - [`compounding`](DiscountCurve::compounding)
/// - [`day_count`](DiscountCurve::day_count)
/// - [`spot_rate`](DiscountCurve::spot_rate)
///
/// # Example
///
/// ```rust
/// use credkit_core::{Date, InterestRate};
/// use credkit_curves::{DiscountCurve, FlatDiscountCurve};
/// use rust_decimal_macros::dec;
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let curve = FlatDiscountCurve::new(InterestRate::from_percent(dec!(5)), today).unwrap();
///
/// let one_year = Date::from_ymd(2026, 1, 1).unwrap();
/// assert!(curve.discount_factor(one_year) < 1.0);
/// assert_eq!(curve.discount_factor(today), 1.0);
/// ```
pub trait DiscountCurve: Send + Sync {
    /// Returns the curve's valuation date.
    fn valuation_date(&self) -> Date;

    /// Returns the compounding convention of the curve's rates.
    fn compounding(&self) -> Compounding;

    /// Returns the day count used to turn dates into year fractions.
    fn day_count(&self) -> DayCountConvention;

    /// Returns the spot (zero) rate from the valuation date to `date`.
    fn spot_rate(&self, date: Date) -> f64;

    /// Year fraction from the valuation date to `date`.
    fn year_fraction(&self, date: Date) -> f64 {
        self.day_count()
            .year_fraction_f64(self.valuation_date(), date)
    }

    /// Discount factor for a cash flow on `date`.
    ///
    /// Returns 1.0 for dates on or before the valuation date.
    fn discount_factor(&self, date: Date) -> f64 {
        let t = self.year_fraction(date);
        if t <= 0.0 {
            return 1.0;
        }
        self.compounding().discount_factor(self.spot_rate(date), t)
    }

    /// Forward rate between `start` and `end` under the curve's compounding.
    ///
    /// Solves `DF(start) / DF(end) = compound_factor(fwd, t_end - t_start)`.
    /// Time before the valuation date carries no discounting.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidForwardPeriod` if `end <= start`.
    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        if end <= start {
            return Err(CurveError::InvalidForwardPeriod { start, end });
        }

        let tau = self.year_fraction(end) - self.year_fraction(start).max(0.0);
        let df_ratio = self.discount_factor(end) / self.discount_factor(start);
        Ok(self.compounding().zero_rate(df_ratio, tau))
    }
}

impl<C: DiscountCurve + ?Sized> DiscountCurve for &C {
    fn valuation_date(&self) -> Date {
        (**self).valuation_date()
    }

    fn compounding(&self) -> Compounding {
        (**self).compounding()
    }

    fn day_count(&self) -> DayCountConvention {
        (**self).day_count()
    }

    fn spot_rate(&self, date: Date) -> f64 {
        (**self).spot_rate(date)
    }

    fn year_fraction(&self, date: Date) -> f64 {
        (**self).year_fraction(date)
    }

    fn discount_factor(&self, date: Date) -> f64 {
        (**self).discount_factor(date)
    }

    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        (**self).forward_rate(start, end)
    }
}
