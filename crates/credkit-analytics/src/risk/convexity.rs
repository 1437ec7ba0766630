//! Effective convexity calculation using finite differences.

use credkit_core::CashFlowSchedule;
use credkit_curves::DiscountCurve;

use super::bumped_values;
use crate::error::AnalyticsResult;

/// Effective convexity from a parallel shift of the curve's spot rates.
///
/// # Formula
///
/// ```text
/// C_eff = (PV(r - h) - 2 × PV(r) + PV(r + h)) / (PV(r) × h²)
/// ```
///
/// # Errors
///
/// Returns an error for a non-positive bump or a zero present value.
pub fn effective_convexity<C: DiscountCurve + ?Sized>(
    schedule: &CashFlowSchedule,
    curve: &C,
    bump: f64,
) -> AnalyticsResult<f64> {
    let pv = bumped_values(schedule, curve, bump)?;
    Ok((pv.down - 2.0 * pv.base + pv.up) / (pv.base * bump * bump))
}
