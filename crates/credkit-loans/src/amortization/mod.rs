//! Amortization: payment calculation, payment dates and schedule generation.
//!
//! The amortization type is a closed set dispatched once when a schedule is
//! generated:
//!
//! - [`AmortizationType::LevelPayment`]: constant total payment (annuity)
//! - [`AmortizationType::LevelPrincipal`]: constant principal, declining interest
//! - [`AmortizationType::InterestOnly`]: interest each period, principal at maturity
//! - [`AmortizationType::Bullet`]: everything at maturity

mod dates;
mod engine;
mod reamortize;

pub use dates::generate_payment_dates;
pub use engine::{amortize, calculate_payment, AmortizationEngine};
pub(crate) use engine::level_payment;
pub(crate) use dates::offset_dates;
pub use reamortize::{reamortize, ReamortizationMethod};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal repayment structure of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AmortizationType {
    /// Level total payments (mortgage-style)
    #[default]
    LevelPayment,
    /// Interest each period, full principal at maturity
    InterestOnly,
    /// No payments until maturity
    Bullet,
    /// Level principal payments
    LevelPrincipal,
}

impl AmortizationType {
    /// Returns true if principal is repaid over the life of the loan.
    #[must_use]
    pub fn is_amortizing(&self) -> bool {
        matches!(
            self,
            AmortizationType::LevelPayment | AmortizationType::LevelPrincipal
        )
    }
}

impl fmt::Display for AmortizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AmortizationType::LevelPayment => "Level Payment",
            AmortizationType::InterestOnly => "Interest Only",
            AmortizationType::Bullet => "Bullet",
            AmortizationType::LevelPrincipal => "Level Principal",
        };
        write!(f, "{name}")
    }
}
