//! Error types for curve operations.

use credkit_core::{CredkitError, Date, ErrorKind};
use credkit_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve construction and queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough pivots to build the curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Pivot dates are not strictly increasing.
    #[error("Non-monotonic pivots at index {index}: {prev} >= {current}")]
    NonMonotonicPivots {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous pivot date.
        prev: Date,
        /// Current pivot date.
        current: Date,
    },

    /// A pivot lies before the curve's valuation date.
    #[error("Pivot {pivot} precedes valuation date {valuation_date}")]
    PivotBeforeValuation {
        /// The offending pivot date.
        pivot: Date,
        /// The curve's valuation date.
        valuation_date: Date,
    },

    /// A rate or discount factor is non-finite or out of range.
    #[error("Invalid rate {value}: {reason}")]
    InvalidRate {
        /// The rejected value.
        value: f64,
        /// Why it was rejected.
        reason: String,
    },

    /// Forward period with end on or before start.
    #[error("Invalid forward period: end {end} must be after start {start}")]
    InvalidForwardPeriod {
        /// Start of the forward period.
        start: Date,
        /// End of the forward period.
        end: Date,
    },

    /// Invalid calibration instrument.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of what's wrong with the instrument.
        reason: String,
    },

    /// Bootstrap could not solve a pivot.
    #[error("Bootstrap failed at {instrument}: {reason}")]
    BootstrapFailed {
        /// Description of the instrument being solved.
        instrument: String,
        /// Underlying failure.
        reason: String,
        /// Failure class of the underlying error.
        kind: ErrorKind,
    },

    /// Error from the math layer.
    #[error("Math error: {0}")]
    Math(MathError),

    /// Error from the core types.
    #[error(transparent)]
    Core(CredkitError),
}

impl CurveError {
    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            value,
            reason: reason.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates a bootstrap failure wrapping the underlying error.
    #[must_use]
    pub fn bootstrap_failed(instrument: impl Into<String>, source: &CurveError) -> Self {
        Self::BootstrapFailed {
            instrument: instrument.into(),
            reason: source.to_string(),
            kind: source.kind(),
        }
    }

    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BootstrapFailed { kind, .. } => *kind,
            Self::Math(err) if err.is_convergence_failure() => ErrorKind::Convergence,
            Self::Core(err) => err.kind(),
            Self::InsufficientPoints { .. }
            | Self::NonMonotonicPivots { .. }
            | Self::PivotBeforeValuation { .. }
            | Self::InvalidRate { .. }
            | Self::InvalidForwardPeriod { .. }
            | Self::InvalidInstrument { .. }
            | Self::Math(_) => ErrorKind::Validation,
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::Math(err)
    }
}

impl From<CredkitError> for CurveError {
    fn from(err: CredkitError) -> Self {
        Self::Core(err)
    }
}
