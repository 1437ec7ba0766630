//! Payment date generation.

use credkit_core::calendars::{BusinessDayConvention, Calendar};
use credkit_core::{Date, PaymentFrequency, Period};

use crate::error::{LoanError, LoanResult};

/// Generates `count` payment dates starting at `start`, one per period.
///
/// Dates are offsets from `start` (`start + i × period`, i = 0..count), so a
/// month-end start does not drift through short months. Each date is then
/// rolled with `convention` when a calendar is given.
///
/// # Errors
///
/// Returns an error for a zero-coupon frequency with a non-zero count, or
/// when a date falls outside the supported range.
///
/// # Example
///
/// ```rust
/// use credkit_core::calendars::BusinessDayConvention;
/// use credkit_core::{Date, PaymentFrequency};
/// use credkit_loans::amortization::generate_payment_dates;
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let dates = generate_payment_dates(
///     start,
///     PaymentFrequency::Monthly,
///     12,
///     None,
///     BusinessDayConvention::Unadjusted,
/// )
/// .unwrap();
/// assert_eq!(dates[0], start);
/// assert_eq!(dates[11], Date::from_ymd(2024, 12, 15).unwrap());
/// ```
pub fn generate_payment_dates(
    start: Date,
    frequency: PaymentFrequency,
    count: u32,
    calendar: Option<&dyn Calendar>,
    convention: BusinessDayConvention,
) -> LoanResult<Vec<Date>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let period = frequency.period().ok_or_else(|| {
        LoanError::invalid_loan("payment_frequency", "zero coupon has no payment dates")
    })?;

    let dates = offset_dates(start, period, 0..count)?;
    Ok(match calendar {
        Some(calendar) => dates
            .into_iter()
            .map(|date| calendar.adjust(date, convention))
            .collect(),
        None => dates,
    })
}

/// `anchor + i × period` for each `i` in `offsets`.
pub(crate) fn offset_dates(
    anchor: Date,
    period: Period,
    offsets: impl Iterator<Item = u32>,
) -> LoanResult<Vec<Date>> {
    offsets
        .map(|i| period.times(i).add_to_date(anchor).map_err(LoanError::from))
        .collect()
}
