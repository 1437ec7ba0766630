//! Interpolation for curve construction.
//!
//! Zero curves store rates at pillar times and read intermediate values
//! through an [`Interpolator`]. Only linear interpolation is provided;
//! behaviour past the last pillar is chosen with [`Extrapolation`].

mod linear;

pub use linear::LinearInterpolator;

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// What an interpolator does outside its data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extrapolation {
    /// Queries outside the range are an error.
    #[default]
    None,
    /// The nearest end value is held constant.
    Flat,
}
