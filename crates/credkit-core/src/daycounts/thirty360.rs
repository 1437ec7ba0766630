//! 30/360 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30/360 US (Bond Basis).
///
/// Every month counts as 30 days, so consecutive monthly payment dates are
/// exactly 1/12 of a year apart. Month-end rules:
///
/// 1. If D1 is the last day of February, D1 becomes 30
/// 2. If D1 is 31, D1 becomes 30
/// 3. If D2 is the last day of February and D1 was too, D2 becomes 30
/// 4. If D2 is 31 and D1 is now 30, D2 becomes 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.day_count(end, start);
        }

        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());
        let start_feb_eom = is_last_day_of_february(start);

        if start_feb_eom || d1 == 31 {
            d1 = 30;
        }
        if start_feb_eom && is_last_day_of_february(end) {
            d2 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_periods_are_exact() {
        let start = date(2025, 1, 15);
        for months in 1..=24 {
            let end = start.add_months(months).unwrap();
            assert_eq!(
                Thirty360.year_fraction(start, end),
                Decimal::from(months) / dec!(12)
            );
        }
    }

    #[test]
    fn test_month_end_rules() {
        assert_eq!(Thirty360.day_count(date(2025, 1, 31), date(2025, 3, 31)), 60);
        assert_eq!(Thirty360.day_count(date(2024, 2, 29), date(2025, 2, 28)), 360);
        assert_eq!(Thirty360.day_count(date(2025, 1, 15), date(2025, 1, 31)), 16);
    }

    #[test]
    fn test_reversed_dates() {
        assert_eq!(Thirty360.day_count(date(2025, 7, 1), date(2025, 1, 1)), -180);
    }
}
