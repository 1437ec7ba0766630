//! Domain value types.

mod cashflow;
mod currency;
mod date;
mod frequency;
mod money;
mod period;
mod rate;

pub use cashflow::{CashFlow, CashFlowSchedule, CashFlowType};
pub use currency::Currency;
pub use date::Date;
pub use frequency::{Compounding, PaymentFrequency};
pub use money::Money;
pub use period::{Period, TimeUnit};
pub use rate::InterestRate;
