//! Payment calculation and the period-by-period amortization recurrence.

use rust_decimal::{Decimal, MathematicalOps};

use credkit_core::{CashFlow, CashFlowSchedule, Date, Money};

use super::AmortizationType;
use crate::error::{LoanError, LoanResult};
use crate::loan::Loan;

/// Generates scheduled payments and cash flows for loans.
pub struct AmortizationEngine;

impl AmortizationEngine {
    /// Scheduled payment of a loan; see [`calculate_payment`].
    pub fn payment(loan: &Loan) -> LoanResult<Money> {
        calculate_payment(
            loan.principal(),
            loan.periodic_rate(),
            loan.number_of_payments(),
            loan.amortization_type(),
        )
    }

    /// Unadjusted cash flow schedule of a loan over its payment dates.
    pub fn generate_schedule(loan: &Loan) -> LoanResult<CashFlowSchedule> {
        let dates = loan.payment_dates()?;
        amortize(
            loan.principal(),
            loan.periodic_rate(),
            loan.amortization_type(),
            &dates,
        )
    }
}

/// Scheduled payment for `balance` repaid over `periods` periods.
///
/// - Level payment: `B·r / (1 − (1+r)^−n)`, or `B/n` at a zero rate
/// - Interest only: `B·r`
/// - Bullet: the single payment at maturity, `B·(1+r)^n`
/// - Level principal: the first period's payment, `B/n + B·r`
///
/// The result is unrounded.
///
/// # Example
///
/// ```rust
/// use credkit_core::Money;
/// use credkit_loans::amortization::{calculate_payment, AmortizationType};
/// use rust_decimal_macros::dec;
///
/// let payment = calculate_payment(
///     Money::usd(dec!(300000)),
///     dec!(0.065) / dec!(12),
///     360,
///     AmortizationType::LevelPayment,
/// )
/// .unwrap();
/// assert_eq!(payment.round_to_currency().amount(), dec!(1896.20));
/// ```
pub fn calculate_payment(
    balance: Money,
    periodic_rate: Decimal,
    periods: u32,
    amortization_type: AmortizationType,
) -> LoanResult<Money> {
    validate_terms(balance, periodic_rate)?;
    if periods == 0 {
        return Err(LoanError::invalid_loan("term", "needs at least one period"));
    }

    let b = balance.amount();
    let amount = match amortization_type {
        AmortizationType::LevelPayment => level_payment(b, periodic_rate, periods)?,
        AmortizationType::InterestOnly => b * periodic_rate,
        AmortizationType::Bullet => b * growth(periodic_rate, periods)?,
        AmortizationType::LevelPrincipal => b / Decimal::from(periods) + b * periodic_rate,
    };
    Ok(Money::new(amount, balance.currency()))
}

/// Amortizes `balance` over `dates` at `periodic_rate`.
///
/// Each period emits PRINCIPAL then INTEREST on its date. The final period
/// repays the outstanding balance exactly, so the schedule's principal sums
/// to `balance`. Interest-only schedules emit principal only at maturity; a
/// bullet emits one PRINCIPAL and one compounded INTEREST flow (omitted at a
/// zero rate) on the last date.
pub fn amortize(
    balance: Money,
    periodic_rate: Decimal,
    amortization_type: AmortizationType,
    dates: &[Date],
) -> LoanResult<CashFlowSchedule> {
    run_recurrence(balance, periodic_rate, amortization_type, dates, None)
}

/// The amortization recurrence with an optional held installment: the
/// total payment for level-payment loans, the principal installment for
/// level-principal loans. Without one, the installment that exactly repays
/// `balance` over `dates` is used. Stops early once the balance is repaid.
pub(crate) fn run_recurrence(
    balance: Money,
    periodic_rate: Decimal,
    amortization_type: AmortizationType,
    dates: &[Date],
    installment: Option<Decimal>,
) -> LoanResult<CashFlowSchedule> {
    validate_terms(balance, periodic_rate)?;
    let (&maturity, _) = dates
        .split_last()
        .ok_or_else(|| LoanError::invalid_loan("term", "no payment dates"))?;
    let periods = u32::try_from(dates.len())
        .map_err(|_| LoanError::invalid_loan("term", "too many payment dates"))?;

    let currency = balance.currency();
    let money = |amount: Decimal| Money::new(amount, currency);
    let mut outstanding = balance.amount();

    if amortization_type == AmortizationType::Bullet {
        let interest = outstanding * (growth(periodic_rate, periods)? - Decimal::ONE);
        let mut flows = vec![CashFlow::principal(maturity, money(outstanding))];
        if !interest.is_zero() {
            flows.push(CashFlow::interest(maturity, money(interest)));
        }
        return Ok(CashFlowSchedule::new(flows));
    }

    let installment = match installment {
        Some(installment) => installment,
        None => match amortization_type {
            AmortizationType::LevelPayment => level_payment(outstanding, periodic_rate, periods)?,
            AmortizationType::LevelPrincipal => outstanding / Decimal::from(periods),
            AmortizationType::InterestOnly | AmortizationType::Bullet => Decimal::ZERO,
        },
    };

    let mut flows = Vec::with_capacity(dates.len() * 2);
    for (i, &date) in dates.iter().enumerate() {
        let is_final = i + 1 == dates.len();
        let interest = outstanding * periodic_rate;
        let principal = if is_final {
            outstanding
        } else {
            match amortization_type {
                AmortizationType::LevelPayment => (installment - interest).min(outstanding),
                AmortizationType::LevelPrincipal => installment.min(outstanding),
                AmortizationType::InterestOnly | AmortizationType::Bullet => Decimal::ZERO,
            }
        };
        if principal < Decimal::ZERO {
            return Err(LoanError::invalid_assumption(format!(
                "payment {} does not cover interest {} on {date}",
                money(installment),
                money(interest)
            )));
        }

        if amortization_type != AmortizationType::InterestOnly || is_final {
            flows.push(CashFlow::principal(date, money(principal)));
        }
        flows.push(CashFlow::interest(date, money(interest)));

        outstanding -= principal;
        if outstanding.is_zero() && !is_final {
            log::debug!("balance repaid on {date}, {} of {periods} periods", i + 1);
            break;
        }
    }

    Ok(CashFlowSchedule::new(flows))
}

pub(crate) fn level_payment(balance: Decimal, periodic_rate: Decimal, periods: u32) -> LoanResult<Decimal> {
    if periodic_rate.is_zero() {
        return Ok(balance / Decimal::from(periods));
    }
    let g = growth(periodic_rate, periods)?;
    Ok(balance * periodic_rate * g / (g - Decimal::ONE))
}

/// `(1 + r)^n`.
fn growth(periodic_rate: Decimal, periods: u32) -> LoanResult<Decimal> {
    (Decimal::ONE + periodic_rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| LoanError::invalid_loan("annual_rate", "compounded growth overflows"))
}

fn validate_terms(balance: Money, periodic_rate: Decimal) -> LoanResult<()> {
    if !balance.is_positive() {
        return Err(LoanError::invalid_loan(
            "principal",
            format!("balance must be positive, got {balance}"),
        ));
    }
    if periodic_rate < Decimal::ZERO {
        return Err(LoanError::invalid_loan(
            "annual_rate",
            format!("rate must not be negative, got {periodic_rate}"),
        ));
    }
    Ok(())
}
