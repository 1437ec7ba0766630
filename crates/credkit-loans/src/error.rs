//! Error types for loan construction, amortization and behavioral adjustment.

use credkit_analytics::AnalyticsError;
use credkit_core::{CredkitError, Date, ErrorKind, Money};
use credkit_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for loan operations.
pub type LoanResult<T> = Result<T, LoanError>;

/// Errors that can occur during loan operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    /// Invalid loan terms.
    #[error("Invalid loan {field}: {reason}")]
    InvalidLoan {
        /// The offending loan attribute.
        field: &'static str,
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required builder field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// Invalid behavioral assumption (rate, curve breakpoints, severity).
    #[error("Invalid assumption: {reason}")]
    InvalidAssumption {
        /// Description of what's invalid.
        reason: String,
    },

    /// Prepayment larger than the outstanding balance.
    #[error("Prepayment of {amount} exceeds outstanding balance {balance}")]
    PrepaymentExceedsBalance {
        /// Requested prepayment.
        amount: Money,
        /// Balance outstanding before the prepayment date.
        balance: Money,
    },

    /// Event date outside the loan's life.
    #[error("{event} date {date} is outside [{start}, {end}]")]
    DateOutOfRange {
        /// Kind of event ("prepayment", "default").
        event: &'static str,
        /// The rejected date.
        date: Date,
        /// Origination date.
        start: Date,
        /// Maturity date.
        end: Date,
    },

    /// No scheduled flows left to adjust at the event date.
    #[error("Nothing to adjust on {date}: schedule ends {last_flow}")]
    NothingToAdjust {
        /// The event date.
        date: Date,
        /// Date of the schedule's last flow.
        last_flow: Date,
    },

    /// Invalid engine configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error.
    #[error(transparent)]
    Core(CredkitError),

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(CurveError),

    /// Analytics error.
    #[error("Analytics error: {0}")]
    Analytics(AnalyticsError),
}

impl LoanError {
    /// Creates an invalid loan error.
    #[must_use]
    pub fn invalid_loan(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidLoan {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid assumption error.
    #[must_use]
    pub fn invalid_assumption(reason: impl Into<String>) -> Self {
        Self::InvalidAssumption {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLoan { .. }
            | Self::MissingField { .. }
            | Self::InvalidAssumption { .. }
            | Self::PrepaymentExceedsBalance { .. }
            | Self::DateOutOfRange { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Validation,
            Self::NothingToAdjust { .. } => ErrorKind::Domain,
            Self::Core(err) => err.kind(),
            Self::Curve(err) => err.kind(),
            Self::Analytics(err) => err.kind(),
        }
    }
}

impl From<CredkitError> for LoanError {
    fn from(err: CredkitError) -> Self {
        LoanError::Core(err)
    }
}

impl From<CurveError> for LoanError {
    fn from(err: CurveError) -> Self {
        LoanError::Curve(err)
    }
}

impl From<AnalyticsError> for LoanError {
    fn from(err: AnalyticsError) -> Self {
        LoanError::Analytics(err)
    }
}
