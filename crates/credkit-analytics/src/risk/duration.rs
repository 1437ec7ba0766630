//! Duration by parallel bumps and by time-weighting.

use credkit_core::CashFlowSchedule;
use credkit_curves::DiscountCurve;

use super::bumped_values;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Effective duration from a parallel shift of the curve's spot rates.
///
/// # Formula
///
/// ```text
/// D_eff = (PV(r - h) - PV(r + h)) / (2 × PV(r) × h)
/// ```
///
/// # Errors
///
/// Returns an error for a non-positive bump or a zero present value.
pub fn effective_duration<C: DiscountCurve + ?Sized>(
    schedule: &CashFlowSchedule,
    curve: &C,
    bump: f64,
) -> AnalyticsResult<f64> {
    let pv = bumped_values(schedule, curve, bump)?;
    Ok((pv.down - pv.up) / (2.0 * pv.base * bump))
}

/// Macaulay duration: PV-weighted average time to each flow, in years.
///
/// Times are the curve's year fractions; flows before the valuation date
/// are ignored.
///
/// # Errors
///
/// Returns `AnalyticsError::CalculationFailed` if the present value is zero.
pub fn macaulay_duration<C: DiscountCurve + ?Sized>(
    schedule: &CashFlowSchedule,
    curve: &C,
) -> AnalyticsResult<f64> {
    let valuation_date = curve.valuation_date();
    let (weighted, total) = schedule
        .cash_flows()
        .filter(|cf| cf.date() >= valuation_date)
        .fold((0.0, 0.0), |(weighted, total), cf| {
            let pv = cf.amount().to_f64() * curve.discount_factor(cf.date());
            (weighted + curve.year_fraction(cf.date()) * pv, total + pv)
        });

    if total.abs() < 1e-10 {
        return Err(AnalyticsError::calculation_failed(
            "present value is zero",
        ));
    }
    Ok(weighted / total)
}
