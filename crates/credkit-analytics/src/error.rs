//! Error types for schedule analytics.

use credkit_core::{CredkitError, Date, ErrorKind};
use credkit_curves::CurveError;
use credkit_math::MathError;
use thiserror::Error;

/// Error type for all analytics operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Yield solver failed to converge
    #[error("yield solver failed to converge after {iterations} iterations: {reason}")]
    YieldSolverFailed {
        /// Number of iterations before failure.
        iterations: u32,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Nothing left to value after the valuation date
    #[error("no cash flows on or after {valuation_date}")]
    NoFutureCashFlows {
        /// The valuation date.
        valuation_date: Date,
    },

    /// A ratio metric has a zero denominator (zero PV or zero principal)
    #[error("calculation failed: {0}")]
    CalculationFailed(String),

    /// Curve error
    #[error("curve error: {0}")]
    Curve(CurveError),

    /// Math error
    #[error("math error: {0}")]
    Math(MathError),

    /// Core type error
    #[error(transparent)]
    Core(CredkitError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Creates a calculation failure.
    #[must_use]
    pub fn calculation_failed(reason: impl Into<String>) -> Self {
        Self::CalculationFailed(reason.into())
    }

    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::YieldSolverFailed { .. } => ErrorKind::Convergence,
            Self::NoFutureCashFlows { .. } | Self::CalculationFailed(_) => ErrorKind::Domain,
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Curve(err) => err.kind(),
            Self::Math(err) if err.is_convergence_failure() => ErrorKind::Convergence,
            Self::Math(_) => ErrorKind::Validation,
            Self::Core(err) => err.kind(),
        }
    }
}

impl From<CredkitError> for AnalyticsError {
    fn from(err: CredkitError) -> Self {
        AnalyticsError::Core(err)
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        AnalyticsError::Math(err)
    }
}

impl From<CurveError> for AnalyticsError {
    fn from(err: CurveError) -> Self {
        AnalyticsError::Curve(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::YieldSolverFailed {
            iterations: 100,
            reason: "did not converge".to_string(),
        };
        assert!(err.to_string().contains("100 iterations"));
        assert_eq!(err.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn test_kind_passes_through() {
        let err = AnalyticsError::from(CredkitError::CurrencyMismatch {
            left: "USD",
            right: "EUR",
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            AnalyticsError::calculation_failed("zero PV").kind(),
            ErrorKind::Domain
        );
    }
}
