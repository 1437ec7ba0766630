//! Lump-sum prepayment splicing.

use rust_decimal::Decimal;

use credkit_core::{CashFlow, CashFlowSchedule, CashFlowType, Date, Money};

use super::{check_event_date, BehavioralAdjuster};
use crate::amortization::{reamortize, AmortizationType, ReamortizationMethod};
use crate::error::{LoanError, LoanResult};
use crate::loan::Loan;

pub(super) fn apply(
    schedule: &CashFlowSchedule,
    loan: &Loan,
    prepayment_date: Date,
    amount: Money,
) -> LoanResult<CashFlowSchedule> {
    check_event_date("prepayment", prepayment_date, loan, false)?;

    let currency = loan.principal().currency();
    if amount.currency() != currency {
        return Err(LoanError::invalid_assumption(format!(
            "prepayment {amount} is not in the loan currency {currency}"
        )));
    }
    if !amount.is_positive() {
        return Err(LoanError::invalid_assumption(format!(
            "prepayment must be positive, got {amount}"
        )));
    }

    let balance = BehavioralAdjuster::outstanding_balance(schedule, loan, prepayment_date)?;
    if amount > balance {
        return Err(LoanError::PrepaymentExceedsBalance { amount, balance });
    }

    let mut flows: Vec<CashFlow> = schedule.before(prepayment_date).into();
    flows.push(CashFlow::new(prepayment_date, amount, CashFlowType::Prepayment));
    if loan.amortization_type() == AmortizationType::Bullet {
        let settled = bullet_accrued_interest(loan, amount, prepayment_date)?;
        if settled.is_positive() {
            flows.push(CashFlow::interest(prepayment_date, settled));
        }
    }

    let remaining = balance.checked_sub(&amount)?;
    if remaining.is_positive() {
        let tail = reamortize_tail(loan, remaining, prepayment_date)?;
        log::debug!(
            "prepayment of {amount} on {prepayment_date}: {} kept flows, {} re-amortized on {remaining}",
            flows.len() - 1,
            tail.len()
        );
        flows.extend(tail);
    } else {
        log::debug!("prepayment of {amount} on {prepayment_date} retires the loan");
    }

    Ok(CashFlowSchedule::new(flows))
}

/// Interest a bullet has accrued on `amount` through the payment dates on
/// or before `date`, compounded from origination.
fn bullet_accrued_interest(loan: &Loan, amount: Money, date: Date) -> LoanResult<Money> {
    let elapsed = loan.payment_dates()?.into_iter().filter(|&d| d <= date).count();
    let growth = Decimal::ONE + loan.periodic_rate();
    let factor = (0..elapsed).fold(Decimal::ONE, |acc, _| acc * growth);
    Ok(amount * (factor - Decimal::ONE))
}

/// Re-amortizes `remaining` over the loan's payment dates on or after
/// `from`, holding the original installment where the structure has one.
fn reamortize_tail(loan: &Loan, remaining: Money, from: Date) -> LoanResult<CashFlowSchedule> {
    let amortization_type = loan.amortization_type();
    let all_dates = loan.payment_dates()?;

    // A bullet accrues from origination, so it compounds over the full term.
    let dates: Vec<Date> = if amortization_type == AmortizationType::Bullet {
        all_dates
    } else {
        all_dates.into_iter().filter(|&d| d >= from).collect()
    };

    let method = match amortization_type {
        AmortizationType::LevelPayment => ReamortizationMethod::KeepPayment(loan.payment()?),
        AmortizationType::LevelPrincipal => ReamortizationMethod::KeepPayment(
            loan.principal() / Decimal::from(loan.number_of_payments()),
        ),
        AmortizationType::InterestOnly | AmortizationType::Bullet => {
            ReamortizationMethod::KeepMaturity
        }
    };

    reamortize(
        remaining,
        loan.periodic_rate(),
        amortization_type,
        &dates,
        method,
    )
}
