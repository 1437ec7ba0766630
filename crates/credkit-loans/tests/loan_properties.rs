//! Property tests for amortization and behavioral adjustment invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use credkit_core::{CashFlowSchedule, CashFlowType, Date, InterestRate, Money, Period};
use credkit_loans::prelude::*;

fn origination() -> Date {
    Date::from_ymd(2025, 3, 1).unwrap()
}

fn loan(principal: u32, rate_bps: u32, months: u32, amortization_type: AmortizationType) -> Loan {
    Loan::builder()
        .principal(Money::usd(Decimal::from(principal)))
        .annual_rate(InterestRate::from_bps(Decimal::from(rate_bps)))
        .term(Period::months(months))
        .amortization_type(amortization_type)
        .origination_date(origination())
        .build()
        .unwrap()
}

/// Principal not yet repaid, written off or recovered, after each flow
/// that retires some.
fn balances(principal: Decimal, schedule: &CashFlowSchedule) -> Vec<Decimal> {
    schedule
        .iter()
        .filter(|cf| {
            cf.cf_type().is_principal()
                || matches!(cf.cf_type(), CashFlowType::DefaultLoss | CashFlowType::Recovery)
        })
        .scan(principal, |balance, cf| {
            *balance -= cf.amount().amount();
            Some(*balance)
        })
        .collect()
}

fn any_type() -> impl Strategy<Value = AmortizationType> {
    prop_oneof![
        Just(AmortizationType::LevelPayment),
        Just(AmortizationType::LevelPrincipal),
        Just(AmortizationType::InterestOnly),
        Just(AmortizationType::Bullet),
    ]
}

proptest! {
    #[test]
    fn prop_principal_is_conserved(
        principal in 1_000u32..2_000_000,
        rate_bps in 0u32..1_500,
        months in 1u32..=360,
        amortization_type in any_type(),
    ) {
        let loan = loan(principal, rate_bps, months, amortization_type);
        let schedule = loan.generate_schedule().unwrap();
        let repaid = schedule.total_by_type(CashFlowType::Principal).unwrap().amount();
        prop_assert!((repaid - Decimal::from(principal)).abs() < Decimal::new(1, 2));

        let path = balances(Decimal::from(principal), &schedule);
        prop_assert_eq!(path.last().copied(), Some(Decimal::ZERO));
    }

    #[test]
    fn prop_balance_never_increases(
        principal in 1_000u32..1_000_000,
        rate_bps in 0u32..1_500,
        months in 2u32..=360,
    ) {
        let loan = loan(principal, rate_bps, months, AmortizationType::LevelPayment);
        let path = balances(Decimal::from(principal), &loan.generate_schedule().unwrap());
        prop_assert!(path.iter().all(|b| *b >= Decimal::ZERO));
        prop_assert!(path.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn prop_expected_cashflows_conserve_principal(
        principal in 10_000u32..1_000_000,
        rate_bps in 100u32..1_200,
        months in 12u32..=360,
        cpr in 0.0f64..0.5,
        cdr in 0.0f64..0.1,
    ) {
        let loan = loan(principal, rate_bps, months, AmortizationType::LevelPayment);
        let expected = loan
            .expected_cashflows(
                Some(&PrepaymentCurve::constant_cpr(cpr).unwrap()),
                Some(&DefaultCurve::constant_cdr(cdr).unwrap()),
                Some(&LossGivenDefault::new(Decimal::new(3, 1), None).unwrap()),
            )
            .unwrap();

        let path = balances(Decimal::from(principal), &expected);
        prop_assert!(path.windows(2).all(|w| w[1] <= w[0]));
        let last = path.last().copied().unwrap_or(Decimal::ONE);
        prop_assert!(last.abs() < Decimal::new(1, 6));
    }

    #[test]
    fn prop_defaults_never_add_cash(
        principal in 10_000u32..1_000_000,
        rate_bps in 100u32..1_200,
        months in 12u32..=360,
        cpr in 0.0f64..0.3,
        cdr in 0.0f64..0.1,
        severity_pct in 0u32..=100,
    ) {
        let loan = loan(principal, rate_bps, months, AmortizationType::LevelPayment);
        let prepayment = PrepaymentCurve::constant_cpr(cpr).unwrap();
        let lgd = LossGivenDefault::new(Decimal::new(i64::from(severity_pct), 2), None).unwrap();
        let clean = loan.expected_cashflows(Some(&prepayment), None, None).unwrap();
        let defaulting = loan
            .expected_cashflows(
                Some(&prepayment),
                Some(&DefaultCurve::constant_cdr(cdr).unwrap()),
                Some(&lgd),
            )
            .unwrap();

        let clean_total = clean.total().unwrap().amount();
        let defaulting_total = defaulting.total().unwrap().amount();
        let losses = defaulting.total_by_type(CashFlowType::DefaultLoss).unwrap().amount();
        prop_assert!(defaulting_total <= clean_total + Decimal::new(1, 6));
        prop_assert!(clean_total - defaulting_total >= losses - Decimal::new(1, 6));
    }

    #[test]
    fn prop_prepayment_splice_keeps_history(
        months in 24u32..=360,
        offset in 1u32..24,
        fraction in 1u32..100,
    ) {
        let loan = loan(250_000, 600, months, AmortizationType::LevelPayment);
        let schedule = loan.generate_schedule().unwrap();
        let prepay_date = origination().add_days(i64::from(offset) * 30);
        let balance = BehavioralAdjuster::outstanding_balance(&schedule, &loan, prepay_date).unwrap();
        let amount = balance * (Decimal::from(fraction) / Decimal::ONE_HUNDRED);

        let adjusted = loan.apply_prepayment(prepay_date, amount).unwrap();
        let adjusted_before = adjusted.before(prepay_date);
        let schedule_before = schedule.before(prepay_date);
        prop_assert_eq!(adjusted_before.flows(), schedule_before.flows());

        let path = balances(Decimal::from(250_000u32), &adjusted);
        prop_assert!(path.windows(2).all(|w| w[1] <= w[0]));
        prop_assert!(path.last().copied().unwrap_or(Decimal::ONE).abs() < Decimal::new(1, 9));
    }
}
