//! Default with loss and lagged recovery.

use credkit_core::{CashFlow, CashFlowSchedule, CashFlowType, Date, Money};

use super::{check_event_date, BehavioralAdjuster};
use crate::behavior::LossGivenDefault;
use crate::error::{LoanError, LoanResult};
use crate::loan::Loan;

pub(super) fn apply(
    schedule: &CashFlowSchedule,
    loan: &Loan,
    default_date: Date,
    lgd: &LossGivenDefault,
) -> LoanResult<(CashFlowSchedule, Money)> {
    check_event_date("default", default_date, loan, true)?;

    match schedule.latest_date() {
        Some(last_flow) if default_date < last_flow => {}
        last_flow => {
            return Err(LoanError::NothingToAdjust {
                date: default_date,
                last_flow: last_flow.unwrap_or_else(|| loan.origination_date()),
            })
        }
    }

    let balance = BehavioralAdjuster::outstanding_balance(schedule, loan, default_date)?;
    let loss = lgd.loss_amount(balance);
    let recovery = lgd.recovery_amount(balance);

    let mut flows: Vec<CashFlow> = schedule.before(default_date).into();
    flows.push(CashFlow::new(default_date, loss, CashFlowType::DefaultLoss));
    if !recovery.is_zero() {
        let recovery_date = lgd.recovery_date(default_date)?;
        flows.push(CashFlow::new(recovery_date, recovery, CashFlowType::Recovery));
    }

    log::debug!("default on {default_date}: balance {balance}, loss {loss}, recovery {recovery}");
    Ok((CashFlowSchedule::new(flows), loss))
}
