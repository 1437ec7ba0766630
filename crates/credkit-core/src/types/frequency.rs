//! Payment frequency and compounding conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Period, TimeUnit};

/// How often a loan makes scheduled payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentFrequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year) - standard for consumer loans
    #[default]
    Monthly,
    /// Every two weeks (26 per year)
    BiWeekly,
    /// Weekly payments (52 per year)
    Weekly,
    /// Single payment at maturity
    ZeroCoupon,
}

impl PaymentFrequency {
    /// Returns the number of payments per year (0 for zero coupon).
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::ZeroCoupon => 0,
        }
    }

    /// Returns the length of one payment period, or `None` for zero coupon.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        match self {
            PaymentFrequency::Annual => Some(Period::new(1, TimeUnit::Years)),
            PaymentFrequency::SemiAnnual => Some(Period::new(6, TimeUnit::Months)),
            PaymentFrequency::Quarterly => Some(Period::new(3, TimeUnit::Months)),
            PaymentFrequency::Monthly => Some(Period::new(1, TimeUnit::Months)),
            PaymentFrequency::BiWeekly => Some(Period::new(2, TimeUnit::Weeks)),
            PaymentFrequency::Weekly => Some(Period::new(1, TimeUnit::Weeks)),
            PaymentFrequency::ZeroCoupon => None,
        }
    }

    /// Returns true if there are no periodic payments.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        matches!(self, PaymentFrequency::ZeroCoupon)
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentFrequency::Annual => "Annual",
            PaymentFrequency::SemiAnnual => "Semi-Annual",
            PaymentFrequency::Quarterly => "Quarterly",
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::BiWeekly => "Bi-Weekly",
            PaymentFrequency::Weekly => "Weekly",
            PaymentFrequency::ZeroCoupon => "Zero Coupon",
        };
        write!(f, "{name}")
    }
}

/// Interest compounding convention.
///
/// Every convention has a closed form for the compound factor over `t`
/// years and its inverse, so discount factors and zero rates convert
/// exactly in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest (no compounding)
    Simple,
    /// Annual compounding (1x per year)
    Annual,
    /// Semi-annual compounding (2x per year)
    SemiAnnual,
    /// Quarterly compounding (4x per year)
    Quarterly,
    /// Monthly compounding (12x per year)
    #[default]
    Monthly,
    /// Daily compounding (365x per year)
    Daily,
    /// Continuous compounding
    Continuous,
}

impl Compounding {
    /// Returns the number of compounding periods per year, or `None` for
    /// simple and continuous compounding.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Compounding::Simple | Compounding::Continuous => None,
            Compounding::Annual => Some(1),
            Compounding::SemiAnnual => Some(2),
            Compounding::Quarterly => Some(4),
            Compounding::Monthly => Some(12),
            Compounding::Daily => Some(365),
        }
    }

    /// Growth of one unit invested at `rate` for `t` years.
    #[must_use]
    pub fn compound_factor(&self, rate: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        match self.periods_per_year() {
            Some(m) => {
                let m = f64::from(m);
                (1.0 + rate / m).powf(m * t)
            }
            None if self.is_continuous() => (rate * t).exp(),
            None => 1.0 + rate * t,
        }
    }

    /// Present value of one unit paid in `t` years at `rate`.
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        1.0 / self.compound_factor(rate, t)
    }

    /// Rate that produces discount factor `df` over `t` years.
    ///
    /// Returns 0.0 for `t <= 0`, where no rate is implied.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        match self.periods_per_year() {
            Some(m) => {
                let m = f64::from(m);
                m * (df.powf(-1.0 / (m * t)) - 1.0)
            }
            None if self.is_continuous() => -df.ln() / t,
            None => (1.0 / df - 1.0) / t,
        }
    }

    /// Converts a rate quoted under `self` to the equivalent rate under `target`
    /// over a horizon of `t` years (the horizon only matters when simple
    /// interest is involved).
    #[must_use]
    pub fn convert_rate(&self, rate: f64, target: Compounding, t: f64) -> f64 {
        if *self == target {
            return rate;
        }
        let horizon = if t > 0.0 { t } else { 1.0 };
        target.zero_rate(self.discount_factor(rate, horizon), horizon)
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(self, Compounding::Continuous)
    }

    /// Returns true if this is simple interest (no compounding).
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(self, Compounding::Simple)
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "Simple",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
            Compounding::Daily => "Daily",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}
