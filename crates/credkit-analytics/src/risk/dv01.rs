//! DV01 (Dollar Value of 01) calculations.
//!
//! DV01 measures the money change in present value for a 1 basis point
//! parallel move in the curve.
//!
//! ## Formula
//!
//! ```text
//! DV01 = (PV(r - 1bp) - PV(r + 1bp)) / 2
//! ```

use rust_decimal::Decimal;

use credkit_core::{CashFlowSchedule, Money};
use credkit_curves::{DiscountCurve, ParallelShiftedCurve};

use super::DEFAULT_BUMP_SIZE;
use crate::error::AnalyticsResult;
use crate::pricing::present_value;

/// Money change in present value for a 1bp parallel move.
///
/// Positive for a long position in positive flows.
///
/// # Errors
///
/// Returns the errors of [`present_value`].
pub fn dv01<C: DiscountCurve + ?Sized>(
    schedule: &CashFlowSchedule,
    curve: &C,
) -> AnalyticsResult<Money> {
    let down = present_value(schedule, &ParallelShiftedCurve::new(curve, -DEFAULT_BUMP_SIZE))?;
    let up = present_value(schedule, &ParallelShiftedCurve::new(curve, DEFAULT_BUMP_SIZE))?;
    Ok(down.checked_sub(&up)? / Decimal::TWO)
}
