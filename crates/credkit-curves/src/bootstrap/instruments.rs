//! Instruments a zero curve can be bootstrapped from.

use credkit_core::{Date, PaymentFrequency};

use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// An instrument that pins down one pivot of a zero curve.
pub trait BootstrapInstrument: Send + Sync {
    /// The instrument's final payment date (the pivot it solves).
    fn maturity(&self) -> Date;

    /// The quoted rate, used as the solver's starting point.
    fn quote(&self) -> f64;

    /// Short human-readable label, e.g. "DEP 2025-07-01 @ 4.500%".
    fn description(&self) -> String;

    /// Model value minus market value per unit notional.
    ///
    /// Zero when the curve reprices the instrument.
    fn pricing_error(&self, curve: &dyn DiscountCurve) -> f64;
}

/// A zero-coupon deposit quoted as a simple rate.
///
/// Pays `1 + rate * tau` at maturity for 1 invested at `start`, with `tau`
/// measured in the curve's day count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    start: Date,
    maturity: Date,
    rate: f64,
}

impl Deposit {
    /// Creates a deposit.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidInstrument` if `maturity <= start` or the
    /// rate is not finite.
    pub fn new(start: Date, maturity: Date, rate: f64) -> CurveResult<Self> {
        if maturity <= start {
            return Err(CurveError::invalid_instrument(format!(
                "deposit maturity {maturity} must be after start {start}"
            )));
        }
        if !rate.is_finite() {
            return Err(CurveError::invalid_rate(rate, "deposit rate must be finite"));
        }
        Ok(Self {
            start,
            maturity,
            rate,
        })
    }
}

impl BootstrapInstrument for Deposit {
    fn maturity(&self) -> Date {
        self.maturity
    }

    fn quote(&self) -> f64 {
        self.rate
    }

    fn description(&self) -> String {
        format!("DEP {} @ {:.3}%", self.maturity, self.rate * 100.0)
    }

    fn pricing_error(&self, curve: &dyn DiscountCurve) -> f64 {
        let tau = curve.day_count().year_fraction_f64(self.start, self.maturity);
        let growth = curve.discount_factor(self.start) / curve.discount_factor(self.maturity);
        1.0 + self.rate * tau - growth
    }
}

/// A fixed-coupon instrument quoted at par.
///
/// Coupons of `coupon * accrual` fall on each period date from `start`, with
/// a final (possibly short) period ending at maturity, where the unit
/// principal is also repaid. At the par coupon its value equals 1 at start.
#[derive(Debug, Clone, PartialEq)]
pub struct ParInstrument {
    start: Date,
    maturity: Date,
    coupon: f64,
    frequency: PaymentFrequency,
    payment_dates: Vec<Date>,
}

impl ParInstrument {
    /// Creates a par instrument and lays out its payment dates.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidInstrument` if `maturity <= start`, the
    /// frequency is zero coupon, or the coupon is not finite.
    pub fn new(
        start: Date,
        maturity: Date,
        coupon: f64,
        frequency: PaymentFrequency,
    ) -> CurveResult<Self> {
        if maturity <= start {
            return Err(CurveError::invalid_instrument(format!(
                "par instrument maturity {maturity} must be after start {start}"
            )));
        }
        if !coupon.is_finite() {
            return Err(CurveError::invalid_rate(coupon, "coupon must be finite"));
        }
        let period = frequency.period().ok_or_else(|| {
            CurveError::invalid_instrument("par instrument needs a periodic coupon frequency")
        })?;

        let mut payment_dates = Vec::new();
        let mut k = 1;
        loop {
            let date = period.times(k).add_to_date(start)?;
            if date >= maturity {
                break;
            }
            payment_dates.push(date);
            k += 1;
        }
        payment_dates.push(maturity);

        Ok(Self {
            start,
            maturity,
            coupon,
            frequency,
            payment_dates,
        })
    }

    /// Returns the coupon payment dates, maturity last.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }
}

impl BootstrapInstrument for ParInstrument {
    fn maturity(&self) -> Date {
        self.maturity
    }

    fn quote(&self) -> f64 {
        self.coupon
    }

    fn description(&self) -> String {
        format!(
            "PAR {} {} @ {:.3}%",
            self.maturity,
            self.frequency,
            self.coupon * 100.0
        )
    }

    fn pricing_error(&self, curve: &dyn DiscountCurve) -> f64 {
        let day_count = curve.day_count();
        let df_start = curve.discount_factor(self.start);

        let mut value = 0.0;
        let mut prev = self.start;
        for &date in &self.payment_dates {
            let accrual = day_count.year_fraction_f64(prev, date);
            value += self.coupon * accrual * curve.discount_factor(date);
            prev = date;
        }
        value += curve.discount_factor(self.maturity);

        value / df_start - 1.0
    }
}
