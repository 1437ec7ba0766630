//! Rate sensitivities of cash-flow schedules.
//!
//! - **Duration**: effective (parallel bump) and Macaulay
//! - **Convexity**: effective (parallel bump)
//! - **DV01**: money change for a 1bp parallel move

mod convexity;
mod duration;
mod dv01;

pub use convexity::effective_convexity;
pub use duration::{effective_duration, macaulay_duration};
pub use dv01::dv01;

use credkit_core::CashFlowSchedule;
use credkit_curves::{DiscountCurve, ParallelShiftedCurve};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::pv_f64;

/// Default parallel bump (1 basis point).
pub const DEFAULT_BUMP_SIZE: f64 = 0.0001;

/// Present values at `-bump`, base and `+bump`.
struct BumpedValues {
    down: f64,
    base: f64,
    up: f64,
}

fn bumped_values<C: DiscountCurve + ?Sized>(
    schedule: &CashFlowSchedule,
    curve: &C,
    bump: f64,
) -> AnalyticsResult<BumpedValues> {
    if !bump.is_finite() || bump <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "bump size must be positive, got {bump}"
        )));
    }

    let base = pv_f64(schedule, curve);
    if base.abs() < 1e-10 {
        return Err(AnalyticsError::calculation_failed(
            "present value is zero",
        ));
    }

    Ok(BumpedValues {
        down: pv_f64(schedule, &ParallelShiftedCurve::new(curve, -bump)),
        base,
        up: pv_f64(schedule, &ParallelShiftedCurve::new(curve, bump)),
    })
}
