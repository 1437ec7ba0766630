//! Re-amortization of a remaining balance after a principal event.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use credkit_core::{CashFlowSchedule, Date, Money};

use super::engine::run_recurrence;
use super::AmortizationType;
use crate::error::{LoanError, LoanResult};

/// How a reduced balance is spread over the remaining periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReamortizationMethod {
    /// Recompute the installment so the balance is repaid on the last date.
    KeepMaturity,
    /// Hold the installment and shorten the term. The installment is the
    /// total payment for level-payment loans and the principal installment
    /// for level-principal loans.
    KeepPayment(Money),
}

/// Re-amortizes `balance` over at most `dates` at `periodic_rate`.
///
/// Interest-only and bullet loans keep their structure on the new balance
/// and only support [`ReamortizationMethod::KeepMaturity`].
///
/// # Errors
///
/// Returns an error for a non-positive balance, a negative rate, missing or
/// unordered dates, or a held payment that is non-positive, in another
/// currency, or does not cover the first period's interest.
pub fn reamortize(
    balance: Money,
    periodic_rate: Decimal,
    amortization_type: AmortizationType,
    dates: &[Date],
    method: ReamortizationMethod,
) -> LoanResult<CashFlowSchedule> {
    if dates.windows(2).any(|w| w[1] <= w[0]) {
        return Err(LoanError::invalid_loan(
            "payment_dates",
            "dates must be strictly increasing",
        ));
    }

    let installment = match method {
        ReamortizationMethod::KeepMaturity => None,
        ReamortizationMethod::KeepPayment(payment) => {
            if !amortization_type.is_amortizing() {
                return Err(LoanError::invalid_assumption(format!(
                    "{amortization_type} loans cannot hold a payment"
                )));
            }
            if payment.currency() != balance.currency() || !payment.is_positive() {
                return Err(LoanError::invalid_assumption(format!(
                    "held payment {payment} must be positive and in {}",
                    balance.currency()
                )));
            }
            Some(payment.amount())
        }
    };

    log::debug!(
        "re-amortizing {balance} over up to {} periods ({amortization_type}, {method:?})",
        dates.len()
    );
    run_recurrence(balance, periodic_rate, amortization_type, dates, installment)
}
