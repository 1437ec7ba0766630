//! Annualized prepayment (CPR) and default (CDR) rates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LoanError, LoanResult};

/// An annualized fraction of balance lost per year, convertible to the
/// equivalent per-period fraction.
pub trait AnnualRate: Copy + PartialOrd + fmt::Debug + Send + Sync {
    /// Short market name ("CPR", "CDR").
    const NAME: &'static str;

    /// Creates a rate from an annual fraction in `[0, 1]`.
    fn new(annual_rate: f64) -> LoanResult<Self>;

    /// Returns the annual fraction.
    fn annual_rate(&self) -> f64;

    /// Per-period fraction for `periods_per_year` periods:
    /// `1 − (1 − rate)^(1/periods_per_year)`.
    fn to_periodic(&self, periods_per_year: u32) -> f64 {
        if periods_per_year == 0 {
            return self.annual_rate();
        }
        1.0 - (1.0 - self.annual_rate()).powf(1.0 / f64::from(periods_per_year))
    }

    /// Returns a copy scaled by `factor`.
    fn scaled(&self, factor: f64) -> LoanResult<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(LoanError::invalid_assumption(format!(
                "scale factor must be non-negative, got {factor}"
            )));
        }
        Self::new(self.annual_rate() * factor)
    }
}

fn validate_annual(name: &str, annual_rate: f64) -> LoanResult<f64> {
    if annual_rate.is_finite() && (0.0..=1.0).contains(&annual_rate) {
        Ok(annual_rate)
    } else {
        Err(LoanError::invalid_assumption(format!(
            "{name} must be in [0, 1], got {annual_rate}"
        )))
    }
}

fn annual_from_monthly(name: &str, monthly: f64) -> LoanResult<f64> {
    if !monthly.is_finite() || !(0.0..=1.0).contains(&monthly) {
        return Err(LoanError::invalid_assumption(format!(
            "monthly {name} rate must be in [0, 1], got {monthly}"
        )));
    }
    Ok(1.0 - (1.0 - monthly).powi(12))
}

/// Conditional prepayment rate (CPR).
///
/// # Example
///
/// ```rust
/// use credkit_loans::behavior::{AnnualRate, PrepaymentRate};
///
/// let cpr = PrepaymentRate::from_percent(10.0).unwrap();
/// let smm = cpr.to_smm();
/// assert!(smm > 0.008 && smm < 0.009);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct PrepaymentRate(f64);

impl PrepaymentRate {
    /// Creates a rate from a percentage (10.0 for 10% CPR).
    pub fn from_percent(percent: f64) -> LoanResult<Self> {
        Self::new(percent / 100.0)
    }

    /// Creates a CPR from a single monthly mortality rate.
    pub fn from_smm(smm: f64) -> LoanResult<Self> {
        Self::new(annual_from_monthly(Self::NAME, smm)?)
    }

    /// Single monthly mortality: `1 − (1 − CPR)^(1/12)`.
    #[must_use]
    pub fn to_smm(&self) -> f64 {
        self.to_periodic(12)
    }

    /// Returns the rate in percent.
    #[must_use]
    pub fn to_percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Returns true for a zero rate.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl AnnualRate for PrepaymentRate {
    const NAME: &'static str = "CPR";

    fn new(annual_rate: f64) -> LoanResult<Self> {
        validate_annual(Self::NAME, annual_rate).map(Self)
    }

    fn annual_rate(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for PrepaymentRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% CPR", self.to_percent())
    }
}

/// Constant default rate (CDR).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct DefaultRate(f64);

impl DefaultRate {
    /// Creates a rate from a percentage (2.0 for 2% CDR).
    pub fn from_percent(percent: f64) -> LoanResult<Self> {
        Self::new(percent / 100.0)
    }

    /// Creates a CDR from a monthly default rate.
    pub fn from_mdr(mdr: f64) -> LoanResult<Self> {
        Self::new(annual_from_monthly(Self::NAME, mdr)?)
    }

    /// Monthly default rate: `1 − (1 − CDR)^(1/12)`.
    #[must_use]
    pub fn to_mdr(&self) -> f64 {
        self.to_periodic(12)
    }

    /// Returns the rate in percent.
    #[must_use]
    pub fn to_percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Returns true for a zero rate.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl AnnualRate for DefaultRate {
    const NAME: &'static str = "CDR";

    fn new(annual_rate: f64) -> LoanResult<Self> {
        validate_annual(Self::NAME, annual_rate).map(Self)
    }

    fn annual_rate(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for DefaultRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% CDR", self.to_percent())
    }
}
