//! Concrete discount curves.
//!
//! - [`FlatDiscountCurve`]: one rate for every horizon
//! - [`ZeroCurve`]: zero rates at pivot dates, linear in year fraction
//! - [`ParallelShiftedCurve`]: any curve with its spot rates moved in parallel

mod flat;
mod shifted;
mod zero;

pub use flat::FlatDiscountCurve;
pub use shifted::ParallelShiftedCurve;
pub use zero::{ZeroCurve, ZeroCurveBuilder};
