//! Period-by-period cash-flow simulation under prepayment and default curves.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use credkit_core::{CashFlow, CashFlowSchedule, CashFlowType, Money};

use crate::amortization::{level_payment, AmortizationType};
use crate::behavior::{AnnualRate, DefaultCurve, LossGivenDefault, PrepaymentCurve, RateCurve};
use crate::error::{LoanError, LoanResult};
use crate::loan::Loan;

pub(super) fn simulate(
    loan: &Loan,
    prepayment_curve: Option<&PrepaymentCurve>,
    default_curve: Option<&DefaultCurve>,
    lgd: Option<&LossGivenDefault>,
    tolerance: Decimal,
) -> LoanResult<CashFlowSchedule> {
    let lgd = lgd.copied().unwrap_or_default();
    let dates = loan.payment_dates()?;
    let periods = dates.len();
    let periods_per_year = loan.payment_frequency().periods_per_year();
    let r = loan.periodic_rate();
    let amortization_type = loan.amortization_type();
    let currency = loan.principal().currency();
    let money = |amount: Decimal| Money::new(amount, currency);

    let mut balance = loan.principal().amount();
    // Unpaid bullet interest, compounding until maturity.
    let mut accrued = Decimal::ZERO;
    let mut flows = Vec::with_capacity(periods * 3);

    for (i, &date) in dates.iter().enumerate() {
        let is_final = i + 1 == periods;
        let remaining = u32::try_from(periods - i)
            .map_err(|_| LoanError::invalid_loan("term", "too many payment dates"))?;
        let age = age_in_months(i + 1, periods_per_year);
        let interest = balance * r;

        let (scheduled_principal, interest_paid) = if amortization_type == AmortizationType::Bullet {
            accrued += (balance + accrued) * r;
            if is_final {
                (balance, std::mem::take(&mut accrued))
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            }
        } else if is_final {
            (balance, interest)
        } else {
            let principal = match amortization_type {
                AmortizationType::LevelPayment => level_payment(balance, r, remaining)? - interest,
                AmortizationType::LevelPrincipal => balance / Decimal::from(remaining),
                AmortizationType::InterestOnly | AmortizationType::Bullet => Decimal::ZERO,
            };
            (principal.min(balance), interest)
        };

        if scheduled_principal > Decimal::ZERO {
            flows.push(CashFlow::principal(date, money(scheduled_principal)));
        }
        if interest_paid > Decimal::ZERO {
            flows.push(CashFlow::interest(date, money(interest_paid)));
        }
        if is_final {
            break;
        }

        let surviving = balance - scheduled_principal;
        let prepayment = match prepayment_curve {
            Some(curve) => surviving * periodic_speed(curve, age, periods_per_year)?,
            None => Decimal::ZERO,
        };
        let performing = surviving - prepayment;
        let defaulted = match default_curve {
            Some(curve) => performing * periodic_speed(curve, age, periods_per_year)?,
            None => Decimal::ZERO,
        };

        if prepayment > Decimal::ZERO {
            flows.push(CashFlow::new(date, money(prepayment), CashFlowType::Prepayment));
        }
        if defaulted > Decimal::ZERO {
            let defaulted = money(defaulted);
            flows.push(CashFlow::new(
                date,
                lgd.loss_amount(defaulted),
                CashFlowType::DefaultLoss,
            ));
            let recovery = lgd.recovery_amount(defaulted);
            if recovery.is_positive() {
                flows.push(CashFlow::new(
                    lgd.recovery_date(date)?,
                    recovery,
                    CashFlowType::Recovery,
                ));
            }
        }

        let next_balance = performing - defaulted;
        // Prepaid bullet principal settles its accrued interest; defaulted
        // principal forfeits it.
        if amortization_type == AmortizationType::Bullet && balance > Decimal::ZERO {
            let settled = accrued * prepayment / balance;
            if settled > Decimal::ZERO {
                flows.push(CashFlow::interest(date, money(settled)));
            }
            accrued = accrued * next_balance / balance;
        }

        log::trace!(
            "period {} on {date}: scheduled {scheduled_principal}, prepaid {prepayment}, defaulted {defaulted}, balance {next_balance}",
            i + 1
        );
        balance = next_balance;

        if balance <= tolerance {
            if balance > Decimal::ZERO {
                flows.push(CashFlow::principal(date, money(balance)));
            }
            if accrued > Decimal::ZERO {
                flows.push(CashFlow::interest(date, money(accrued)));
            }
            log::debug!(
                "pool paid down to {} on {date} after {} of {periods} periods",
                money(balance),
                i + 1
            );
            break;
        }
    }

    Ok(CashFlowSchedule::new(flows))
}

/// Loan age in whole months at the end of `period` (1-based), rounded up.
fn age_in_months(period: usize, periods_per_year: u32) -> u32 {
    let months = (period as u64 * 12).div_ceil(u64::from(periods_per_year.max(1)));
    u32::try_from(months.max(1)).unwrap_or(u32::MAX)
}

fn periodic_speed<R: AnnualRate>(
    curve: &RateCurve<R>,
    age: u32,
    periods_per_year: u32,
) -> LoanResult<Decimal> {
    let periodic = curve.rate_at_month(age).to_periodic(periods_per_year);
    Decimal::from_f64(periodic).ok_or_else(|| {
        LoanError::invalid_assumption(format!(
            "{} of {periodic} at month {age} is not representable",
            R::NAME
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjust::BehavioralAdjuster;
    use credkit_core::{Date, InterestRate, Period};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn mortgage() -> Loan {
        Loan::mortgage(
            Money::usd(dec!(200000)),
            InterestRate::from_percent(dec!(6)),
            30,
            date(2025, 1, 1),
        )
        .unwrap()
    }

    /// Principal repaid, recovered or written off.
    fn returned_principal(schedule: &CashFlowSchedule) -> Decimal {
        schedule
            .iter()
            .filter(|cf| {
                matches!(
                    cf.cf_type(),
                    CashFlowType::Principal
                        | CashFlowType::Prepayment
                        | CashFlowType::DefaultLoss
                        | CashFlowType::Recovery
                )
            })
            .map(|cf| cf.amount().amount())
            .sum()
    }

    #[test]
    fn test_zero_speeds_match_schedule() {
        let loan = mortgage();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.0).unwrap()),
            None,
            None,
        )
        .unwrap();
        let scheduled = loan.generate_schedule().unwrap();

        assert!(expected.filter_by_type(CashFlowType::Prepayment).is_empty());
        let diff = expected.total().unwrap().amount() - scheduled.total().unwrap().amount();
        assert!(diff.abs() < dec!(0.0001));
        assert_eq!(expected.latest_date(), Some(loan.maturity_date()));
    }

    #[test]
    fn test_prepayments_shorten_and_conserve() {
        let loan = mortgage();
        let scheduled = loan.generate_schedule().unwrap();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::psa(200.0).unwrap()),
            None,
            None,
        )
        .unwrap();

        assert!(!expected.filter_by_type(CashFlowType::Prepayment).is_empty());
        assert!(expected.total().unwrap() < scheduled.total().unwrap());
        assert!((returned_principal(&expected) - dec!(200000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_level_payment_tracks_surviving_pool() {
        let loan = mortgage();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.10).unwrap()),
            None,
            None,
        )
        .unwrap();

        let payments: Vec<Decimal> = expected
            .aggregate_by_date()
            .unwrap()
            .into_iter()
            .map(|(_, amount)| amount.amount())
            .collect();
        // Scheduled payment plus prepayment falls as the pool pays down.
        assert!(payments[100] < payments[10]);
    }

    #[test]
    fn test_defaults_with_severity_and_lag() {
        let loan = mortgage();
        let lgd = LossGivenDefault::new(dec!(0.4), Some(Period::months(6))).unwrap();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.05).unwrap()),
            Some(&DefaultCurve::constant_cdr(0.02).unwrap()),
            Some(&lgd),
        )
        .unwrap();

        let losses = expected.filter_by_type(CashFlowType::DefaultLoss);
        let recoveries = expected.filter_by_type(CashFlowType::Recovery);
        assert_eq!(losses.len(), recoveries.len());

        let first_loss = &losses.flows()[0];
        let first_recovery = &recoveries.flows()[0];
        assert_eq!(first_loss.date(), date(2025, 2, 1));
        assert_eq!(first_recovery.date(), date(2025, 8, 1));
        let ratio = first_recovery.amount().ratio(&first_loss.amount()).unwrap();
        assert!((ratio - dec!(1.5)).abs() < dec!(0.000000001));

        assert!((returned_principal(&expected) - dec!(200000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_default_without_lgd_is_total_loss() {
        let loan = mortgage();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.0).unwrap()),
            Some(&DefaultCurve::constant_cdr(0.03).unwrap()),
            None,
        )
        .unwrap();
        assert!(expected.filter_by_type(CashFlowType::Recovery).is_empty());
        assert!(!expected.filter_by_type(CashFlowType::DefaultLoss).is_empty());
    }

    #[test]
    fn test_defaults_without_prepayment_curve() {
        let loan = mortgage();
        let clean = BehavioralAdjuster::expected_cashflows(&loan, None, None, None).unwrap();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            None,
            Some(&DefaultCurve::constant_cdr(0.10).unwrap()),
            None,
        )
        .unwrap();

        assert!(expected.filter_by_type(CashFlowType::Prepayment).is_empty());
        let losses = expected.total_by_type(CashFlowType::DefaultLoss).unwrap();
        assert!(losses.is_positive());

        // Written-off principal is not cash: the pool pays back the
        // principal less its losses, and less cash overall.
        let principal_flows = expected.principal_flows();
        let cash_principal = principal_flows.iter().map(|cf| cf.amount().amount());
        let cash_principal: Decimal = cash_principal.sum();
        assert!((cash_principal + losses.amount() - dec!(200000)).abs() < dec!(0.000001));
        assert!(expected.total().unwrap() < clean.total().unwrap());
        let shortfall = clean.total().unwrap().checked_sub(&expected.total().unwrap()).unwrap();
        assert!(shortfall > losses);
    }

    #[test]
    fn test_bullet_prepayment_matches_lump_sum_interest() {
        let loan = Loan::builder()
            .principal(Money::usd(dec!(10000)))
            .annual_rate(InterestRate::from_percent(dec!(12)))
            .term(Period::months(12))
            .origination_date(date(2025, 1, 1))
            .amortization_type(AmortizationType::Bullet)
            .build()
            .unwrap();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.2).unwrap()),
            None,
            None,
        )
        .unwrap();

        let first_date = date(2025, 2, 1);
        let first = expected.filter_by_date_range(first_date, first_date);
        let prepaid = first.total_by_type(CashFlowType::Prepayment).unwrap();
        let settled = first.total_by_type(CashFlowType::Interest).unwrap();

        let lump = BehavioralAdjuster::apply_prepayment(
            &loan.generate_schedule().unwrap(),
            &loan,
            first_date,
            prepaid,
        )
        .unwrap();
        let lump_settled = lump
            .filter_by_date_range(first_date, first_date)
            .total_by_type(CashFlowType::Interest)
            .unwrap();
        assert!((settled.amount() - lump_settled.amount()).abs() < dec!(0.0000000001));
        assert!((settled.amount() - prepaid.amount() * dec!(0.01)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_full_prepayment_terminates_early() {
        let loan = mortgage();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(1.0).unwrap()),
            None,
            None,
        )
        .unwrap();
        assert_eq!(expected.latest_date(), Some(date(2025, 2, 1)));
        assert!((returned_principal(&expected) - dec!(200000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_bullet_interest_at_zero_speed() {
        let loan = Loan::builder()
            .principal(Money::usd(dec!(10000)))
            .annual_rate(InterestRate::from_percent(dec!(12)))
            .term(Period::months(12))
            .origination_date(date(2025, 1, 1))
            .amortization_type(AmortizationType::Bullet)
            .build()
            .unwrap();
        let expected = BehavioralAdjuster::expected_cashflows(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.0).unwrap()),
            None,
            None,
        )
        .unwrap();
        let scheduled = loan.generate_schedule().unwrap();

        assert_eq!(expected.len(), 2);
        let diff = expected.total().unwrap().amount() - scheduled.total().unwrap().amount();
        assert!(diff.abs() < dec!(0.000000001));
    }

    #[test]
    fn test_age_in_months() {
        assert_eq!(age_in_months(1, 12), 1);
        assert_eq!(age_in_months(30, 12), 30);
        assert_eq!(age_in_months(1, 4), 3);
        assert_eq!(age_in_months(1, 26), 1);
        assert_eq!(age_in_months(13, 26), 6);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let loan = mortgage();
        let result = BehavioralAdjuster::expected_cashflows_with_tolerance(
            &loan,
            Some(&PrepaymentCurve::constant_cpr(0.1).unwrap()),
            None,
            None,
            dec!(-1),
        );
        assert!(result.is_err());
    }
}
