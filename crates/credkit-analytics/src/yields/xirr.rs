//! Internal rate of return over irregularly dated flows.

use credkit_core::daycounts::DayCountConvention;
use credkit_core::CashFlowSchedule;
use credkit_math::solvers::{newton_bisection, SolverConfig};
use credkit_math::MathError;

use crate::error::{AnalyticsError, AnalyticsResult};

const XIRR_BRACKET: (f64, f64) = (-0.99, 10.0);

/// Annual effective rate `r` with `Σ a_k / (1 + r)^t_k = 0`.
///
/// `t_k` is ACT/365 years from the earliest flow. Flows on the same date are
/// netted first. The schedule must contain both an outflow (negative amount)
/// and an inflow.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidInput` if the flows do not change sign,
/// and `AnalyticsError::YieldSolverFailed` if no rate in [-99%, 1000%]
/// solves the equation.
///
/// # Example
///
/// ```rust
/// use credkit_analytics::xirr;
/// use credkit_core::{CashFlow, CashFlowSchedule, Date, Money};
/// use rust_decimal_macros::dec;
///
/// let schedule = CashFlowSchedule::new(vec![
///     CashFlow::principal(Date::from_ymd(2025, 1, 1).unwrap(), Money::usd(dec!(-1000))),
///     CashFlow::principal(Date::from_ymd(2026, 1, 1).unwrap(), Money::usd(dec!(1100))),
/// ]);
/// let irr = xirr(&schedule, 0.05).unwrap();
/// assert!((irr - 0.10).abs() < 1e-8);
/// ```
pub fn xirr(schedule: &CashFlowSchedule, guess: f64) -> AnalyticsResult<f64> {
    let netted = schedule.aggregate_by_date()?;
    let Some(&(first_date, _)) = netted.first() else {
        return Err(AnalyticsError::invalid_input("xirr needs at least two flows"));
    };

    let flows: Vec<(f64, f64)> = netted
        .iter()
        .map(|(date, amount)| {
            let t = DayCountConvention::Act365Fixed.year_fraction_f64(first_date, *date);
            (t, amount.to_f64())
        })
        .collect();

    let has_outflow = flows.iter().any(|&(_, a)| a < 0.0);
    let has_inflow = flows.iter().any(|&(_, a)| a > 0.0);
    if !(has_outflow && has_inflow) {
        return Err(AnalyticsError::invalid_input(
            "xirr needs both negative and positive flows",
        ));
    }

    let npv = |r: f64| -> f64 { flows.iter().map(|&(t, a)| a * (1.0 + r).powf(-t)).sum() };
    let dnpv = |r: f64| -> f64 {
        flows
            .iter()
            .map(|&(t, a)| -t * a * (1.0 + r).powf(-t - 1.0))
            .sum()
    };

    let guess = guess.clamp(XIRR_BRACKET.0, XIRR_BRACKET.1);
    newton_bisection(npv, dnpv, guess, XIRR_BRACKET, &SolverConfig::default())
        .map(|result| result.root)
        .map_err(|err| AnalyticsError::YieldSolverFailed {
            iterations: match err {
                MathError::ConvergenceFailed { iterations, .. } => iterations,
                _ => 0,
            },
            reason: err.to_string(),
        })
}
