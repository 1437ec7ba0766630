//! Business day calendars and conventions.
//!
//! Payment dates that land on weekends or holidays are rolled with a
//! [`BusinessDayConvention`] against a [`Calendar`].

use std::collections::BTreeSet;

mod conventions;

pub use conventions::{adjust, BusinessDayConvention};

use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A calendar with weekends plus an explicit list of holidays.
///
/// # Example
///
/// ```rust
/// use credkit_core::calendars::{Calendar, HolidayCalendar};
/// use credkit_core::types::Date;
///
/// let new_year = Date::from_ymd(2025, 1, 1).unwrap();
/// let cal = HolidayCalendar::new("LENDER", [new_year]);
/// assert!(!cal.is_business_day(new_year));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and a set of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns a copy with one more holiday.
    #[must_use]
    pub fn with_holiday(mut self, date: Date) -> Self {
        self.holidays.insert(date);
        self
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(date(2025, 1, 6)));
        assert!(!cal.is_business_day(date(2025, 1, 4)));
        assert!(cal.is_holiday(date(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        assert_eq!(cal.add_business_days(date(2025, 1, 3), 1), date(2025, 1, 6));
        assert_eq!(cal.add_business_days(date(2025, 1, 6), -1), date(2025, 1, 3));
    }

    #[test]
    fn test_holiday_calendar_rolls_past_holiday() {
        let cal = HolidayCalendar::new("TEST", [date(2025, 1, 1)]).with_holiday(date(2025, 1, 2));
        assert_eq!(cal.name(), "TEST");
        assert_eq!(
            cal.adjust(date(2025, 1, 1), BusinessDayConvention::Following),
            date(2025, 1, 3)
        );
    }
}
