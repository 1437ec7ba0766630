//! Integration tests for schedule analytics against flat and zero curves.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use credkit_analytics::prelude::*;
use credkit_core::daycounts::DayCountConvention;
use credkit_core::{CashFlow, CashFlowSchedule, Compounding, Date, Money};
use credkit_curves::{DiscountCurve, FlatDiscountCurve, ZeroCurve};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Level monthly annuity paying off `principal` at `annual_rate` over `n` months.
fn annuity(start: Date, principal: Decimal, annual_rate: Decimal, n: u32) -> CashFlowSchedule {
    let r = annual_rate / dec!(12);
    let payment = if r.is_zero() {
        principal / Decimal::from(n)
    } else {
        let growth = (Decimal::ONE + r).powu(u64::from(n));
        principal * r * growth / (growth - Decimal::ONE)
    };

    let mut balance = principal;
    let mut flows = Vec::new();
    for i in 1..=n {
        let pay_date = start.add_months(i as i32).unwrap();
        let interest = balance * r;
        let principal_paid = if i == n { balance } else { payment - interest };
        balance -= principal_paid;
        flows.push(CashFlow::principal(pay_date, Money::usd(principal_paid)));
        flows.push(CashFlow::interest(pay_date, Money::usd(interest)));
    }
    CashFlowSchedule::new(flows)
}

fn monthly_flat(rate: f64, today: Date) -> FlatDiscountCurve {
    FlatDiscountCurve::from_f64(rate, today, Compounding::Monthly, DayCountConvention::Thirty360)
        .unwrap()
}

#[test]
fn test_note_rate_curve_reprices_principal() {
    let today = date(2025, 1, 15);
    let schedule = annuity(today, dec!(300000), dec!(0.065), 360);
    let pv = present_value(&schedule, &monthly_flat(0.065, today)).unwrap();
    assert!((pv.to_f64() - 300_000.0).abs() < 0.01);
}

#[test]
fn test_solve_yield_at_par_returns_note_rate() {
    let today = date(2025, 1, 15);
    let schedule = annuity(today, dec!(25000), dec!(0.075), 60);
    let result = solve_yield(
        &schedule,
        Money::usd(dec!(25000)),
        today,
        &YieldSolverConfig::default(),
    )
    .unwrap();
    assert_relative_eq!(result.rate, 0.075, epsilon = 1e-6);
}

#[test]
fn test_discount_price_yields_above_note_rate() {
    let today = date(2025, 1, 15);
    let schedule = annuity(today, dec!(25000), dec!(0.075), 60);
    let result = solve_yield(
        &schedule,
        Money::usd(dec!(24000)),
        today,
        &YieldSolverConfig::default(),
    )
    .unwrap();
    assert!(result.rate > 0.075);
}

#[test]
fn test_risk_measures_against_zero_curve() {
    let today = date(2025, 1, 1);
    let curve = ZeroCurve::from_rates(
        today,
        &[(date(2026, 1, 1), 0.04), (date(2030, 1, 1), 0.05)],
        Compounding::Continuous,
        DayCountConvention::Act365Fixed,
    )
    .unwrap();
    let schedule = annuity(today, dec!(100000), dec!(0.06), 60);

    let duration = effective_duration(&schedule, &curve, DEFAULT_BUMP_SIZE).unwrap();
    let macaulay = macaulay_duration(&schedule, &curve).unwrap();
    let convexity = effective_convexity(&schedule, &curve, DEFAULT_BUMP_SIZE).unwrap();
    let wal = weighted_average_life(&schedule, today).unwrap();

    // Continuous compounding makes effective and Macaulay duration coincide
    assert_relative_eq!(duration, macaulay, epsilon = 1e-4);
    assert!(duration < wal);
    assert!(convexity > 0.0);

    let pv = present_value(&schedule, &curve).unwrap().to_f64();
    let dv01 = dv01(&schedule, &curve).unwrap().to_f64();
    assert_relative_eq!(dv01, duration * pv * DEFAULT_BUMP_SIZE, epsilon = 1e-3);
}

#[test]
fn test_flows_before_valuation_are_ignored() {
    let today = date(2025, 6, 1);
    let schedule = CashFlowSchedule::new(vec![
        CashFlow::principal(date(2025, 1, 1), Money::usd(dec!(999))),
        CashFlow::principal(date(2025, 6, 1), Money::usd(dec!(100))),
    ]);
    let pv = present_value(&schedule, &monthly_flat(0.05, today)).unwrap();
    assert_eq!(pv, Money::usd(dec!(100)));
}

#[test]
fn test_xirr_agrees_with_annual_yield() {
    let start = date(2025, 1, 1);
    let schedule = CashFlowSchedule::new(vec![
        CashFlow::principal(start, Money::usd(dec!(-1000))),
        CashFlow::interest(date(2026, 1, 1), Money::usd(dec!(80))),
        CashFlow::principal(date(2027, 1, 1), Money::usd(dec!(1000))),
        CashFlow::interest(date(2027, 1, 1), Money::usd(dec!(80))),
    ]);
    let rate = xirr(&schedule, 0.1).unwrap();

    // 2025 and 2026 are both 365-day years
    assert_relative_eq!(rate, 0.08, epsilon = 1e-8);
}

proptest! {
    #[test]
    fn prop_yield_solver_recovers_rate(rate_bps in 10u32..2000, months in 12u32..240) {
        let today = date(2025, 1, 15);
        let rate = f64::from(rate_bps) / 10_000.0;
        let schedule = annuity(today, dec!(100000), dec!(0.06), months);

        let curve = monthly_flat(rate, today);
        let price = present_value(&schedule, &curve).unwrap();
        let solved = solve_yield(&schedule, price, today, &YieldSolverConfig::default()).unwrap();
        prop_assert!((solved.rate - rate).abs() < 1e-6);
    }

    #[test]
    fn prop_pv_falls_as_rates_rise(rate in 0.0f64..0.15, shift in 0.0001f64..0.02) {
        let today = date(2025, 1, 15);
        let schedule = annuity(today, dec!(50000), Decimal::from_f64(rate).unwrap(), 120);
        let low = present_value(&schedule, &monthly_flat(rate, today)).unwrap();
        let high = present_value(&schedule, &monthly_flat(rate + shift, today)).unwrap();
        prop_assert!(high.amount() < low.amount());
        prop_assert!(monthly_flat(rate, today).discount_factor(today) == 1.0);
    }
}
