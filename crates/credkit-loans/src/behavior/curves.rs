//! Step curves of prepayment and default speeds by loan age.

use serde::{Deserialize, Serialize};

use super::rates::{AnnualRate, DefaultRate, PrepaymentRate};
use crate::error::{LoanError, LoanResult};

/// Months over which the standard PSA ramp reaches its plateau.
const PSA_RAMP_MONTHS: u32 = 30;

/// CPR increment per month of the 100% PSA ramp.
const PSA_MONTHLY_STEP: f64 = 0.002;

/// A step function of annual rates by loan age in months.
///
/// The rate for month `m` is the rate of the greatest breakpoint whose
/// start month is `≤ m`; months before the first breakpoint use the first
/// breakpoint's rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "R: Serialize",
    deserialize = "R: Deserialize<'de> + AnnualRate"
))]
#[serde(try_from = "Vec<(u32, R)>", into = "Vec<(u32, R)>")]
pub struct RateCurve<R: AnnualRate> {
    breakpoints: Vec<(u32, R)>,
}

/// Prepayment speeds (CPR) by loan age.
pub type PrepaymentCurve = RateCurve<PrepaymentRate>;

/// Default speeds (CDR) by loan age.
pub type DefaultCurve = RateCurve<DefaultRate>;

impl<R: AnnualRate> RateCurve<R> {
    /// Creates a curve from `(start_month, rate)` breakpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a start month is zero, or the
    /// start months are not strictly increasing.
    pub fn from_breakpoints(breakpoints: Vec<(u32, R)>) -> LoanResult<Self> {
        if breakpoints.is_empty() {
            return Err(LoanError::invalid_assumption(format!(
                "{} curve needs at least one breakpoint",
                R::NAME
            )));
        }
        if breakpoints[0].0 == 0 {
            return Err(LoanError::invalid_assumption("start months begin at 1"));
        }
        if let Some(w) = breakpoints.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(LoanError::invalid_assumption(format!(
                "start months must be strictly increasing, got {} after {}",
                w[1].0, w[0].0
            )));
        }
        Ok(Self { breakpoints })
    }

    /// A single rate for every month.
    #[must_use]
    pub fn constant(rate: R) -> Self {
        Self {
            breakpoints: vec![(1, rate)],
        }
    }

    /// Rate in force at loan age `month` (1-based).
    #[must_use]
    pub fn rate_at_month(&self, month: u32) -> R {
        let idx = self.breakpoints.partition_point(|&(start, _)| start <= month);
        self.breakpoints[idx.saturating_sub(1)].1
    }

    /// Returns the breakpoints.
    #[must_use]
    pub fn breakpoints(&self) -> &[(u32, R)] {
        &self.breakpoints
    }

    /// Returns the curve with every rate scaled by `factor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the factor is negative or a scaled rate leaves `[0, 1]`.
    pub fn scaled(&self, factor: f64) -> LoanResult<Self> {
        let breakpoints = self
            .breakpoints
            .iter()
            .map(|&(month, rate)| rate.scaled(factor).map(|rate| (month, rate)))
            .collect::<LoanResult<Vec<_>>>()?;
        Ok(Self { breakpoints })
    }
}

impl<R: AnnualRate> TryFrom<Vec<(u32, R)>> for RateCurve<R> {
    type Error = LoanError;

    fn try_from(breakpoints: Vec<(u32, R)>) -> LoanResult<Self> {
        Self::from_breakpoints(breakpoints)
    }
}

impl<R: AnnualRate> From<RateCurve<R>> for Vec<(u32, R)> {
    fn from(curve: RateCurve<R>) -> Self {
        curve.breakpoints
    }
}

impl RateCurve<PrepaymentRate> {
    /// Constant CPR curve from an annual fraction.
    pub fn constant_cpr(cpr: f64) -> LoanResult<Self> {
        Ok(Self::constant(PrepaymentRate::new(cpr)?))
    }

    /// PSA benchmark at `speed` percent (100.0 for 100% PSA).
    ///
    /// CPR rises by 0.2% per month to 6% at month 30 and stays flat after,
    /// all scaled by `speed / 100`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use credkit_loans::behavior::{AnnualRate, PrepaymentCurve};
    ///
    /// let psa = PrepaymentCurve::psa(100.0).unwrap();
    /// assert!((psa.rate_at_month(1).annual_rate() - 0.002).abs() < 1e-12);
    /// assert!((psa.rate_at_month(30).annual_rate() - 0.06).abs() < 1e-12);
    /// assert_eq!(psa.rate_at_month(360), psa.rate_at_month(30));
    /// ```
    pub fn psa(speed: f64) -> LoanResult<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(LoanError::invalid_assumption(format!(
                "PSA speed must be non-negative, got {speed}"
            )));
        }
        let multiplier = speed / 100.0;
        let breakpoints = (1..=PSA_RAMP_MONTHS)
            .map(|month| {
                let cpr = PSA_MONTHLY_STEP * f64::from(month) * multiplier;
                PrepaymentRate::new(cpr).map(|rate| (month, rate))
            })
            .collect::<LoanResult<Vec<_>>>()?;
        Ok(Self { breakpoints })
    }
}

impl RateCurve<DefaultRate> {
    /// Constant CDR curve from an annual fraction.
    pub fn constant_cdr(cdr: f64) -> LoanResult<Self> {
        Ok(Self::constant(DefaultRate::new(cdr)?))
    }

    /// Seasoning curve: CDR ramps linearly to `peak_cdr` at `peak_month`,
    /// declines linearly to `steady_cdr` over the next `peak_month` months
    /// and stays there.
    pub fn vintage(peak_month: u32, peak_cdr: f64, steady_cdr: f64) -> LoanResult<Self> {
        if peak_month == 0 {
            return Err(LoanError::invalid_assumption("peak month must be at least 1"));
        }
        let peak = DefaultRate::new(peak_cdr)?;
        let steady = DefaultRate::new(steady_cdr)?;
        let span = f64::from(peak_month);

        let ramp = (1..=peak_month).map(|month| {
            let cdr = peak.annual_rate() * f64::from(month) / span;
            DefaultRate::new(cdr).map(|rate| (month, rate))
        });
        let decline = (1..peak_month).map(|step| {
            let weight = f64::from(step) / span;
            let cdr = peak.annual_rate() + (steady.annual_rate() - peak.annual_rate()) * weight;
            DefaultRate::new(cdr).map(|rate| (peak_month + step, rate))
        });
        let mut breakpoints = ramp.chain(decline).collect::<LoanResult<Vec<_>>>()?;
        breakpoints.push((2 * peak_month, steady));
        Ok(Self { breakpoints })
    }
}
