//! Time periods ("3M", "30Y", "90D") and date arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CredkitError, CredkitResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days
    Days,
    /// Weeks of seven days
    Weeks,
    /// Calendar months (day clamped at month end)
    Months,
    /// Calendar years
    Years,
}

impl TimeUnit {
    fn suffix(self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }
}

/// A length of time such as a loan term or a recovery lag.
///
/// # Example
///
/// ```rust
/// use credkit_core::types::{Date, Period, TimeUnit};
///
/// let term: Period = "30Y".parse().unwrap();
/// assert_eq!(term.to_months(), Some(360));
///
/// let lag = Period::new(3, TimeUnit::Months);
/// let start = Date::from_ymd(2025, 1, 15).unwrap();
/// assert_eq!(lag.add_to_date(start).unwrap(), Date::from_ymd(2025, 4, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    length: u32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a new period.
    #[must_use]
    pub const fn new(length: u32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Shorthand for a period in months.
    #[must_use]
    pub const fn months(length: u32) -> Self {
        Self::new(length, TimeUnit::Months)
    }

    /// Shorthand for a period in years.
    #[must_use]
    pub const fn years(length: u32) -> Self {
        Self::new(length, TimeUnit::Years)
    }

    /// Shorthand for a period in days.
    #[must_use]
    pub const fn days(length: u32) -> Self {
        Self::new(length, TimeUnit::Days)
    }

    /// Returns the number of units.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns true for a zero-length period.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.length == 0
    }

    /// Returns the period scaled by `factor` (e.g. the i-th payment offset).
    #[must_use]
    pub fn times(&self, factor: u32) -> Self {
        Self::new(self.length * factor, self.unit)
    }

    /// Adds the period to a date.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::InvalidDate` if the result is out of range.
    pub fn add_to_date(&self, date: Date) -> CredkitResult<Date> {
        let length = i64::from(self.length);
        match self.unit {
            TimeUnit::Days => Ok(date.add_days(length)),
            TimeUnit::Weeks => Ok(date.add_days(length * 7)),
            TimeUnit::Months => date.add_months(self.length as i32),
            TimeUnit::Years => date.add_years(self.length as i32),
        }
    }

    /// Length in whole months, for month- and year-based periods.
    #[must_use]
    pub fn to_months(&self) -> Option<u32> {
        match self.unit {
            TimeUnit::Months => Some(self.length),
            TimeUnit::Years => Some(self.length * 12),
            TimeUnit::Days | TimeUnit::Weeks => None,
        }
    }

    /// Length in whole days, for day- and week-based periods.
    #[must_use]
    pub fn to_days(&self) -> Option<u32> {
        match self.unit {
            TimeUnit::Days => Some(self.length),
            TimeUnit::Weeks => Some(self.length * 7),
            TimeUnit::Months | TimeUnit::Years => None,
        }
    }

    /// Approximate length in years (365-day years, 12-month years).
    #[must_use]
    pub fn to_years_approx(&self) -> f64 {
        let length = f64::from(self.length);
        match self.unit {
            TimeUnit::Days => length / 365.0,
            TimeUnit::Weeks => length * 7.0 / 365.0,
            TimeUnit::Months => length / 12.0,
            TimeUnit::Years => length,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

impl FromStr for Period {
    type Err = CredkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CredkitError::parse_error(s, "Period"))?;
        let (digits, suffix) = trimmed.split_at(split);

        let length: u32 = digits
            .parse()
            .map_err(|_| CredkitError::parse_error(s, "Period"))?;
        let unit = match suffix.to_ascii_uppercase().as_str() {
            "D" => TimeUnit::Days,
            "W" => TimeUnit::Weeks,
            "M" => TimeUnit::Months,
            "Y" => TimeUnit::Years,
            _ => return Err(CredkitError::parse_error(s, "Period")),
        };

        Ok(Self::new(length, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("3M".parse::<Period>().unwrap(), Period::months(3));
        assert_eq!("1y".parse::<Period>().unwrap(), Period::years(1));
        assert_eq!("90D".parse::<Period>().unwrap(), Period::days(90));
        assert_eq!(
            "2W".parse::<Period>().unwrap(),
            Period::new(2, TimeUnit::Weeks)
        );
        assert!("M".parse::<Period>().is_err());
        assert!("12".parse::<Period>().is_err());
        assert!("5Q".parse::<Period>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let p = Period::new(18, TimeUnit::Months);
        assert_eq!(p.to_string(), "18M");
        assert_eq!(p.to_string().parse::<Period>().unwrap(), p);
    }

    #[test]
    fn test_add_to_date() {
        let start = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(
            Period::months(1).add_to_date(start).unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap()
        );
        assert_eq!(
            Period::new(2, TimeUnit::Weeks).add_to_date(start).unwrap(),
            Date::from_ymd(2024, 2, 14).unwrap()
        );
        assert_eq!(
            Period::years(30).add_to_date(start).unwrap(),
            Date::from_ymd(2054, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Period::years(5).to_months(), Some(60));
        assert_eq!(Period::days(10).to_months(), None);
        assert_eq!(Period::new(2, TimeUnit::Weeks).to_days(), Some(14));
        assert!((Period::months(18).to_years_approx() - 1.5).abs() < 1e-12);
        assert_eq!(Period::months(2).times(3), Period::months(6));
    }
}
