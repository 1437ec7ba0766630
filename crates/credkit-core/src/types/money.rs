//! Currency-tagged monetary amounts.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg};

use super::Currency;
use crate::error::{CredkitError, CredkitResult};

/// A monetary amount in a specific currency.
///
/// Amounts carry full `Decimal` precision. Nothing in Credkit rounds a
/// `Money` implicitly; [`Money::round_to_currency`] is the single place where
/// an amount is snapped to the currency's minor unit.
///
/// # Example
///
/// ```rust
/// use credkit_core::types::{Currency, Money};
/// use rust_decimal_macros::dec;
///
/// let payment = Money::new(dec!(1896.20393), Currency::USD);
/// assert_eq!(payment.round_to_currency().amount(), dec!(1896.20));
/// ```
///
/// Amounts are ordered only within one currency; comparing across
/// currencies yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a US dollar amount.
    #[must_use]
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::USD)
    }

    /// Creates an amount from a floating-point value.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::InvalidInput` if the value is NaN or infinite.
    pub fn from_f64(amount: f64, currency: Currency) -> CredkitResult<Self> {
        Decimal::from_f64(amount)
            .map(|amount| Self::new(amount, currency))
            .ok_or_else(|| CredkitError::invalid_input("amount", format!("{amount} is not finite")))
    }

    /// Returns a zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Returns the raw decimal amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount as `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or(0.0)
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns the absolute amount.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.currency)
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::CurrencyMismatch` if the currencies differ.
    pub fn checked_add(&self, other: &Money) -> CredkitResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Subtracts an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::CurrencyMismatch` if the currencies differ.
    pub fn checked_sub(&self, other: &Money) -> CredkitResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Returns `self / other` as a plain ratio.
    ///
    /// # Errors
    ///
    /// Returns an error on currency mismatch or a zero denominator.
    pub fn ratio(&self, other: &Money) -> CredkitResult<Decimal> {
        self.ensure_same_currency(other)?;
        if other.amount.is_zero() {
            return Err(CredkitError::math_error("ratio with zero denominator"));
        }
        Ok(self.amount / other.amount)
    }

    /// Rounds to the currency's minor unit using banker's rounding.
    #[must_use]
    pub fn round_to_currency(&self) -> Self {
        Self::new(
            self.amount.round_dp_with_strategy(
                self.currency.decimal_places(),
                RoundingStrategy::MidpointNearestEven,
            ),
            self.currency,
        )
    }

    fn ensure_same_currency(&self, other: &Money) -> CredkitResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CredkitError::CurrencyMismatch {
                left: self.currency.code(),
                right: other.currency.code(),
            })
        }
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            self.amount.partial_cmp(&other.amount)
        } else {
            None
        }
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self::new(self.amount * rhs, self.currency)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self::new(self.amount / rhs, self.currency)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_currency();
        write!(f, "{} {}", rounded.amount, self.currency.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::usd(dec!(100.25));
        let b = Money::usd(dec!(0.75));
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(101.00));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(99.50));
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::usd(dec!(1));
        let eur = Money::new(dec!(1), Currency::EUR);
        let err = usd.checked_add(&eur).unwrap_err();
        assert_eq!(err.to_string(), "Currency mismatch: USD vs EUR");
        assert!(usd.ratio(&eur).is_err());
    }

    #[test]
    fn test_round_to_currency() {
        assert_eq!(Money::usd(dec!(2.345)).round_to_currency().amount(), dec!(2.34));
        assert_eq!(Money::usd(dec!(2.355)).round_to_currency().amount(), dec!(2.36));
        let yen = Money::new(dec!(1234.5), Currency::JPY);
        assert_eq!(yen.round_to_currency().amount(), dec!(1234));
    }

    #[test]
    fn test_from_f64() {
        let m = Money::from_f64(1000.5, Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(1000.5));
        assert!(Money::from_f64(f64::NAN, Currency::USD).is_err());
    }

    #[test]
    fn test_scalar_ops_and_display() {
        let m = Money::usd(dec!(10));
        assert_eq!((m * dec!(0.35)).amount(), dec!(3.50));
        assert_eq!((m / dec!(4)).amount(), dec!(2.5));
        assert!((-m).is_negative());
        assert_eq!(Money::usd(dec!(1896.2039)).to_string(), "1896.20 USD");
    }

    #[test]
    fn test_ordering_within_currency_only() {
        let small = Money::usd(dec!(10));
        let large = Money::usd(dec!(10.01));
        assert!(small < large);
        assert!(large >= small);

        let eur = Money::new(dec!(5), Currency::EUR);
        assert_eq!(small.partial_cmp(&eur), None);
        assert!(!(small < eur) && !(small > eur));
    }

    #[test]
    fn test_ratio() {
        let npv = Money::usd(dec!(102000));
        let par = Money::usd(dec!(100000));
        assert_eq!(npv.ratio(&par).unwrap(), dec!(1.02));
        assert!(npv.ratio(&Money::usd(Decimal::ZERO)).is_err());
    }
}
