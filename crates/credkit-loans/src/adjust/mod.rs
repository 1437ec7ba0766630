//! Behavioral adjustment of loan schedules.
//!
//! Every operation takes a schedule or loan and returns a new schedule:
//!
//! - [`BehavioralAdjuster::apply_prepayment`]: a lump-sum prepayment, holding
//!   the scheduled payment and shortening the term
//! - [`BehavioralAdjuster::apply_default`]: a default with loss and lagged
//!   recovery
//! - [`BehavioralAdjuster::expected_cashflows`]: period-by-period simulation
//!   under prepayment and default curves

mod default;
mod expected;
mod prepayment;

use rust_decimal::Decimal;

use credkit_core::{CashFlowSchedule, Date, Money};

use crate::behavior::{DefaultCurve, LossGivenDefault, PrepaymentCurve};
use crate::error::{LoanError, LoanResult};
use crate::loan::Loan;

/// Default balance below which a simulated pool is treated as paid off.
pub const DEFAULT_BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Applies prepayment and default behavior to loan schedules.
pub struct BehavioralAdjuster;

impl BehavioralAdjuster {
    /// Splices a lump-sum prepayment into `schedule`.
    ///
    /// Flows strictly before `prepayment_date` are kept unchanged. A
    /// PREPAYMENT of `amount` is emitted on the date and the reduced balance
    /// is re-amortized over the remaining original payment dates at the
    /// original rate, holding the original scheduled installment; the tail
    /// shortens instead of the payment falling. Interest-only and bullet
    /// loans keep their structure on the reduced balance.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the date is not in
    /// `(origination, maturity]`, the amount is not positive or is in
    /// another currency, or it exceeds the outstanding balance.
    pub fn apply_prepayment(
        schedule: &CashFlowSchedule,
        loan: &Loan,
        prepayment_date: Date,
        amount: Money,
    ) -> LoanResult<CashFlowSchedule> {
        prepayment::apply(schedule, loan, prepayment_date, amount)
    }

    /// Replaces the flows at or after `default_date` with a default.
    ///
    /// Emits DEFAULT_LOSS of `severity × balance` on the default date and
    /// RECOVERY of `(1 − severity) × balance` after the recovery lag
    /// (omitted when zero). Returns the new schedule and the net loss,
    /// which is not reduced by the recovery.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a date outside
    /// `[origination, maturity]` and a domain error for a date at or after
    /// the schedule's last flow.
    pub fn apply_default(
        schedule: &CashFlowSchedule,
        loan: &Loan,
        default_date: Date,
        lgd: &LossGivenDefault,
    ) -> LoanResult<(CashFlowSchedule, Money)> {
        default::apply(schedule, loan, default_date, lgd)
    }

    /// Simulates expected cash flows under prepayment and default curves,
    /// with the [`DEFAULT_BALANCE_TOLERANCE`] payoff threshold.
    ///
    /// A missing prepayment or default curve means zero speed. Without an
    /// LGD, defaults are total losses with no recovery lag.
    pub fn expected_cashflows(
        loan: &Loan,
        prepayment_curve: Option<&PrepaymentCurve>,
        default_curve: Option<&DefaultCurve>,
        lgd: Option<&LossGivenDefault>,
    ) -> LoanResult<CashFlowSchedule> {
        expected::simulate(
            loan,
            prepayment_curve,
            default_curve,
            lgd,
            DEFAULT_BALANCE_TOLERANCE,
        )
    }

    /// [`expected_cashflows`](Self::expected_cashflows) with an explicit
    /// payoff threshold.
    pub fn expected_cashflows_with_tolerance(
        loan: &Loan,
        prepayment_curve: Option<&PrepaymentCurve>,
        default_curve: Option<&DefaultCurve>,
        lgd: Option<&LossGivenDefault>,
        tolerance: Decimal,
    ) -> LoanResult<CashFlowSchedule> {
        if tolerance < Decimal::ZERO {
            return Err(LoanError::invalid_assumption(format!(
                "balance tolerance must not be negative, got {tolerance}"
            )));
        }
        expected::simulate(loan, prepayment_curve, default_curve, lgd, tolerance)
    }

    /// Balance outstanding immediately before `date`: the loan principal
    /// less all principal and prepayment flows dated before it.
    pub fn outstanding_balance(
        schedule: &CashFlowSchedule,
        loan: &Loan,
        date: Date,
    ) -> LoanResult<Money> {
        let repaid = schedule
            .before(date)
            .principal_flows()
            .iter()
            .try_fold(Money::zero(loan.principal().currency()), |acc, cf| {
                acc.checked_add(&cf.amount())
            })?;
        Ok(loan.principal().checked_sub(&repaid)?)
    }
}

fn check_event_date(
    event: &'static str,
    date: Date,
    loan: &Loan,
    include_origination: bool,
) -> LoanResult<()> {
    let start = loan.origination_date();
    let end = loan.maturity_date();
    let after_start = if include_origination {
        date >= start
    } else {
        date > start
    };
    if after_start && date <= end {
        Ok(())
    } else {
        Err(LoanError::DateOutOfRange {
            event,
            date,
            start,
            end,
        })
    }
}
