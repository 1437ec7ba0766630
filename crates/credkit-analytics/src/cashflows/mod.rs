//! Schedule-level cash flow measures.

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{CashFlowSchedule, Date};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Weighted average life in years, measured from `from_date`.
///
/// Principal and prepayment flows are weighted by their ACT/365F time from
/// `from_date`:
///
/// ```text
/// WAL = Σ t_k × principal_k / Σ principal_k
/// ```
///
/// Flows dated before `from_date` are ignored.
///
/// # Errors
///
/// Returns `AnalyticsError::CalculationFailed` when no principal remains
/// to be repaid.
pub fn weighted_average_life(
    schedule: &CashFlowSchedule,
    from_date: Date,
) -> AnalyticsResult<f64> {
    let day_count = DayCountConvention::Act365Fixed;
    let (weighted, total) = schedule
        .principal_flows()
        .iter()
        .filter(|cf| cf.date() >= from_date)
        .fold((0.0, 0.0), |(weighted, total), cf| {
            let amount = cf.amount().to_f64();
            let t = day_count.year_fraction_f64(from_date, cf.date());
            (weighted + t * amount, total + amount)
        });

    if total.abs() < 1e-10 {
        return Err(AnalyticsError::calculation_failed(
            "schedule has no principal repayments",
        ));
    }
    Ok(weighted / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use credkit_core::{CashFlow, Money};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_bullet_wal_is_maturity() {
        let start = date(2025, 1, 1);
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::interest(date(2026, 1, 1), Money::usd(dec!(50))),
            CashFlow::principal(date(2026, 1, 1), Money::usd(dec!(1000))),
        ]);
        assert_relative_eq!(weighted_average_life(&schedule, start).unwrap(), 1.0);
    }

    #[test]
    fn test_interest_is_ignored() {
        let start = date(2025, 1, 1);
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::principal(date(2026, 1, 1), Money::usd(dec!(500))),
            CashFlow::interest(date(2026, 1, 1), Money::usd(dec!(1000000))),
            CashFlow::principal(date(2027, 1, 1), Money::usd(dec!(500))),
        ]);
        assert_relative_eq!(weighted_average_life(&schedule, start).unwrap(), 1.5);
    }

    #[test]
    fn test_no_principal_fails() {
        let schedule = CashFlowSchedule::new(vec![CashFlow::interest(
            date(2026, 1, 1),
            Money::usd(dec!(10)),
        )]);
        assert!(matches!(
            weighted_average_life(&schedule, date(2025, 1, 1)),
            Err(AnalyticsError::CalculationFailed(_))
        ));
    }
}
