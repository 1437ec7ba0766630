//! Loss given default: severity and recovery timing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use credkit_core::{Date, Money, Period};

use crate::error::{LoanError, LoanResult};

/// Fraction of a defaulted balance that is lost, and how long the
/// recovered remainder takes to arrive.
///
/// `recovery_rate = 1 − severity`. The default is a total loss with no lag.
///
/// # Example
///
/// ```rust
/// use credkit_core::{Money, Period};
/// use credkit_loans::behavior::LossGivenDefault;
/// use rust_decimal_macros::dec;
///
/// let lgd = LossGivenDefault::new(dec!(0.35), Some(Period::months(3))).unwrap();
/// let balance = Money::usd(dec!(10000));
/// assert_eq!(lgd.loss_amount(balance).amount(), dec!(3500));
/// assert_eq!(lgd.recovery_amount(balance).amount(), dec!(6500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LgdData", into = "LgdData")]
pub struct LossGivenDefault {
    severity: Decimal,
    recovery_lag: Option<Period>,
}

#[derive(Serialize, Deserialize)]
struct LgdData {
    severity: Decimal,
    #[serde(default)]
    recovery_lag: Option<Period>,
}

impl LossGivenDefault {
    /// Creates an LGD from a severity fraction in `[0, 1]`.
    pub fn new(severity: Decimal, recovery_lag: Option<Period>) -> LoanResult<Self> {
        if severity < Decimal::ZERO || severity > Decimal::ONE {
            return Err(LoanError::invalid_assumption(format!(
                "severity must be in [0, 1], got {severity}"
            )));
        }
        Ok(Self {
            severity,
            recovery_lag,
        })
    }

    /// Creates an LGD from a severity percentage (40 for 40%).
    pub fn from_percent(percent: Decimal, recovery_lag: Option<Period>) -> LoanResult<Self> {
        Self::new(percent / Decimal::ONE_HUNDRED, recovery_lag)
    }

    /// Creates an LGD from a recovery fraction.
    pub fn from_recovery_rate(
        recovery_rate: Decimal,
        recovery_lag: Option<Period>,
    ) -> LoanResult<Self> {
        Self::new(Decimal::ONE - recovery_rate, recovery_lag).map_err(|_| {
            LoanError::invalid_assumption(format!(
                "recovery rate must be in [0, 1], got {recovery_rate}"
            ))
        })
    }

    /// Everything is recovered.
    #[must_use]
    pub fn zero_loss() -> Self {
        Self {
            severity: Decimal::ZERO,
            recovery_lag: None,
        }
    }

    /// Nothing is recovered.
    #[must_use]
    pub fn total_loss() -> Self {
        Self {
            severity: Decimal::ONE,
            recovery_lag: None,
        }
    }

    /// Returns the severity fraction.
    #[must_use]
    pub fn severity(&self) -> Decimal {
        self.severity
    }

    /// Returns `1 − severity`.
    #[must_use]
    pub fn recovery_rate(&self) -> Decimal {
        Decimal::ONE - self.severity
    }

    /// Returns the recovery lag.
    #[must_use]
    pub fn recovery_lag(&self) -> Option<Period> {
        self.recovery_lag
    }

    /// Returns the severity in percent.
    #[must_use]
    pub fn to_percent(&self) -> Decimal {
        self.severity * Decimal::ONE_HUNDRED
    }

    /// Returns true if nothing is lost.
    #[must_use]
    pub fn is_zero_loss(&self) -> bool {
        self.severity.is_zero()
    }

    /// Returns true if nothing is recovered.
    #[must_use]
    pub fn is_total_loss(&self) -> bool {
        self.severity == Decimal::ONE
    }

    /// Loss on a defaulted balance.
    #[must_use]
    pub fn loss_amount(&self, defaulted: Money) -> Money {
        defaulted * self.severity
    }

    /// Recovery on a defaulted balance.
    #[must_use]
    pub fn recovery_amount(&self, defaulted: Money) -> Money {
        defaulted * self.recovery_rate()
    }

    /// Date the recovery on a default at `default_date` is received.
    pub fn recovery_date(&self, default_date: Date) -> LoanResult<Date> {
        match self.recovery_lag {
            Some(lag) => Ok(lag.add_to_date(default_date)?),
            None => Ok(default_date),
        }
    }
}

impl Default for LossGivenDefault {
    fn default() -> Self {
        Self::total_loss()
    }
}

impl TryFrom<LgdData> for LossGivenDefault {
    type Error = LoanError;

    fn try_from(data: LgdData) -> LoanResult<Self> {
        Self::new(data.severity, data.recovery_lag)
    }
}

impl From<LossGivenDefault> for LgdData {
    fn from(lgd: LossGivenDefault) -> Self {
        Self {
            severity: lgd.severity,
            recovery_lag: lgd.recovery_lag,
        }
    }
}

impl fmt::Display for LossGivenDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% severity", self.to_percent().normalize())?;
        if let Some(lag) = self.recovery_lag {
            write!(f, ", {lag} lag")?;
        }
        Ok(())
    }
}
