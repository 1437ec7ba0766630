//! Error types for the Credkit library.
//!
//! Every Credkit crate defines its own error enum, but all of them classify
//! into one of three [`ErrorKind`]s so callers can branch on the failure class
//! without matching individual variants.

use std::fmt;

use thiserror::Error;

/// A specialized Result type for Credkit core operations.
pub type CredkitResult<T> = Result<T, CredkitError>;

/// Broad failure class shared by all Credkit error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inputs violate a documented precondition.
    Validation,
    /// An iterative algorithm exhausted its iteration budget.
    Convergence,
    /// Inputs are individually valid but their combination is not meaningful.
    Domain,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Convergence => "convergence",
            ErrorKind::Domain => "domain",
        };
        write!(f, "{name}")
    }
}

/// The main error type for core Credkit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredkitError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// An argument failed validation.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending argument.
        field: &'static str,
        /// Reason for invalidity.
        reason: String,
    },

    /// Arithmetic between amounts in different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency code of the left operand.
        left: &'static str,
        /// Currency code of the right operand.
        right: &'static str,
    },

    /// A string could not be parsed into the requested type.
    #[error("Cannot parse '{input}' as {target}")]
    ParseError {
        /// The rejected input.
        input: String,
        /// Name of the target type.
        target: &'static str,
    },

    /// Numerical solver failed to converge.
    #[error("Convergence failed after {iterations} iterations (residual: {residual})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Mathematical error (overflow, non-finite value).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },

    /// Dates or values are in an order the operation cannot work with.
    #[error("Domain error: {reason}")]
    DomainError {
        /// Description of the violation.
        reason: String,
    },
}

impl CredkitError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error for the named field.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse_error(input: impl Into<String>, target: &'static str) -> Self {
        Self::ParseError {
            input: input.into(),
            target,
        }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain_error(reason: impl Into<String>) -> Self {
        Self::DomainError {
            reason: reason.into(),
        }
    }

    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConvergenceFailed { .. } => ErrorKind::Convergence,
            Self::DomainError { .. } => ErrorKind::Domain,
            Self::InvalidDate { .. }
            | Self::InvalidInput { .. }
            | Self::CurrencyMismatch { .. }
            | Self::ParseError { .. }
            | Self::MathError { .. } => ErrorKind::Validation,
        }
    }
}
