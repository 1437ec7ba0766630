//! Parallel-shifted curve wrapper.

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{Compounding, Date};

use crate::traits::DiscountCurve;

/// A curve wrapper that adds a constant to every spot rate.
///
/// The shift is applied in the base curve's own compounding:
/// `r_shifted(d) = r_base(d) + shift`. This is the bump used for effective
/// duration and convexity.
///
/// # Example
///
/// ```rust
/// use credkit_core::{Date, InterestRate};
/// use credkit_curves::{DiscountCurve, FlatDiscountCurve, ParallelShiftedCurve};
/// use rust_decimal_macros::dec;
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let base = FlatDiscountCurve::new(InterestRate::from_percent(dec!(5)), today).unwrap();
/// let up = ParallelShiftedCurve::new(&base, 0.0050);
///
/// let five_years = Date::from_ymd(2030, 1, 1).unwrap();
/// assert!(up.discount_factor(five_years) < base.discount_factor(five_years));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParallelShiftedCurve<'a, C: DiscountCurve + ?Sized> {
    base: &'a C,
    shift: f64,
}

impl<'a, C: DiscountCurve + ?Sized> ParallelShiftedCurve<'a, C> {
    /// Creates a shifted view of `base` (shift as a decimal, 0.0001 = 1bp).
    pub fn new(base: &'a C, shift: f64) -> Self {
        Self { base, shift }
    }

    /// Returns the shift applied to this curve.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Returns a reference to the base curve.
    pub fn base(&self) -> &C {
        self.base
    }
}

impl<C: DiscountCurve + ?Sized> DiscountCurve for ParallelShiftedCurve<'_, C> {
    fn valuation_date(&self) -> Date {
        self.base.valuation_date()
    }

    fn compounding(&self) -> Compounding {
        self.base.compounding()
    }

    fn day_count(&self) -> DayCountConvention {
        self.base.day_count()
    }

    fn spot_rate(&self, date: Date) -> f64 {
        self.base.spot_rate(date) + self.shift
    }

    fn year_fraction(&self, date: Date) -> f64 {
        self.base.year_fraction(date)
    }
}
