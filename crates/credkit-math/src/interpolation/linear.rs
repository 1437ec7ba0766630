//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{Extrapolation, Interpolator};

/// Linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use credkit_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0, 5.0], vec![0.03, 0.04, 0.05])
///     .unwrap()
///     .with_extrapolation(Extrapolation::Flat);
///
/// assert!((interp.interpolate(1.5).unwrap() - 0.035).abs() < 1e-12);
/// assert!((interp.interpolate(10.0).unwrap() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Sets the extrapolation behaviour.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Returns the extrapolation behaviour.
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Maps `x` into the data range, or fails if extrapolation is off.
    fn resolve(&self, x: f64) -> MathResult<f64> {
        if self.in_range(x) {
            return Ok(x);
        }
        match self.extrapolation {
            Extrapolation::Flat => Ok(x.clamp(self.min_x(), self.max_x())),
            Extrapolation::None => Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            }),
        }
    }

    /// Finds the index i such that xs[i] <= x <= xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&knot| knot <= x);
        upper.saturating_sub(1).min(self.xs.len() - 2)
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let x = self.resolve(x)?;
        let i = self.find_segment(x);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        if !self.in_range(x) {
            self.resolve(x)?;
            // Flat extrapolation has zero slope
            return Ok(0.0);
        }
        let i = self.find_segment(x);
        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_linear_interpolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]).unwrap();

        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 4.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 3.0, epsilon = 1e-10);
        assert_relative_eq!(interp.derivative(1.5).unwrap(), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_extrapolation_disabled() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 2.0]).unwrap();

        assert!(matches!(
            interp.interpolate(-0.5),
            Err(MathError::ExtrapolationNotAllowed { .. })
        ));
        assert!(interp.interpolate(2.5).is_err());
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.03, 0.05])
            .unwrap()
            .with_extrapolation(Extrapolation::Flat);

        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 0.03);
        assert_relative_eq!(interp.interpolate(30.0).unwrap(), 0.05);
        assert_eq!(interp.derivative(30.0).unwrap(), 0.0);
    }

    #[test]
    fn test_insufficient_points() {
        assert!(matches!(
            LinearInterpolator::new(vec![0.0], vec![1.0]),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_unsorted_error() {
        assert!(LinearInterpolator::new(vec![1.0, 0.0, 2.0], vec![1.0, 0.0, 2.0]).is_err());
        assert!(LinearInterpolator::new(vec![0.0, 1.0, 1.0], vec![1.0, 0.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn interpolated_value_stays_between_neighbours(x in 0.0_f64..10.0) {
            let interp = LinearInterpolator::new(
                vec![0.0, 2.5, 5.0, 10.0],
                vec![0.02, 0.035, 0.03, 0.045],
            ).unwrap();
            let y = interp.interpolate(x).unwrap();
            prop_assert!(y >= 0.02 - 1e-12 && y <= 0.045 + 1e-12);
        }
    }
}
