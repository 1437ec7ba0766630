//! Present value of cash-flow schedules against a discount curve.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use credkit_core::{CashFlowSchedule, Money};
use credkit_curves::DiscountCurve;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Present value of a schedule: `Σ amount_k · DF(date_k)`.
///
/// Only cash flows dated on or after the curve's valuation date contribute;
/// DEFAULT_LOSS memo flows are skipped.
/// The result carries full decimal precision in the schedule's currency; an
/// empty schedule is worth zero in the default currency.
///
/// # Errors
///
/// Returns an error for a mixed-currency schedule or a non-finite
/// discount factor.
///
/// # Example
///
/// ```rust
/// use credkit_analytics::present_value;
/// use credkit_core::{CashFlow, CashFlowSchedule, Date, InterestRate, Money};
/// use credkit_curves::FlatDiscountCurve;
/// use rust_decimal_macros::dec;
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let schedule = CashFlowSchedule::new(vec![CashFlow::principal(
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     Money::usd(dec!(1000)),
/// )]);
/// let curve = FlatDiscountCurve::new(InterestRate::from_percent(dec!(5)), today).unwrap();
///
/// let pv = present_value(&schedule, &curve).unwrap();
/// assert!(pv.amount() < dec!(1000));
/// ```
pub fn present_value<C: DiscountCurve + ?Sized>(
    schedule: &CashFlowSchedule,
    curve: &C,
) -> AnalyticsResult<Money> {
    let valuation_date = curve.valuation_date();
    let currency = schedule.currency().unwrap_or_default();

    schedule
        .cash_flows()
        .filter(|cf| cf.date() >= valuation_date)
        .try_fold(Money::zero(currency), |acc, cf| {
            let df = curve.discount_factor(cf.date());
            let df = Decimal::from_f64(df).ok_or_else(|| {
                AnalyticsError::invalid_input(format!(
                    "discount factor {df} on {} is not representable",
                    cf.date()
                ))
            })?;
            Ok(acc.checked_add(&(cf.amount() * df))?)
        })
}

/// Present value as `f64`, for bump-and-reprice loops.
pub(crate) fn pv_f64<C: DiscountCurve + ?Sized>(schedule: &CashFlowSchedule, curve: &C) -> f64 {
    let valuation_date = curve.valuation_date();
    schedule
        .cash_flows()
        .filter(|cf| cf.date() >= valuation_date)
        .map(|cf| cf.amount().to_f64() * curve.discount_factor(cf.date()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use credkit_core::daycounts::DayCountConvention;
    use credkit_core::{CashFlow, CashFlowType, Compounding, Currency, Date};
    use credkit_curves::FlatDiscountCurve;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn curve(today: Date) -> FlatDiscountCurve {
        FlatDiscountCurve::from_f64(
            0.05,
            today,
            Compounding::Annual,
            DayCountConvention::Thirty360,
        )
        .unwrap()
    }

    #[test]
    fn test_discounts_each_flow() {
        let today = date(2025, 1, 1);
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::interest(date(2026, 1, 1), Money::usd(dec!(50))),
            CashFlow::interest(date(2027, 1, 1), Money::usd(dec!(50))),
            CashFlow::principal(date(2027, 1, 1), Money::usd(dec!(1000))),
        ]);
        let pv = present_value(&schedule, &curve(today)).unwrap();
        assert_relative_eq!(pv.amount().to_f64().unwrap(), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(pv_f64(&schedule, &curve(today)), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ignores_past_flows() {
        let today = date(2025, 6, 1);
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::principal(date(2025, 1, 1), Money::usd(dec!(500))),
            CashFlow::principal(today, Money::usd(dec!(100))),
        ]);
        let pv = present_value(&schedule, &curve(today)).unwrap();
        assert_eq!(pv.amount(), dec!(100));
    }

    #[test]
    fn test_default_loss_is_not_valued() {
        let today = date(2025, 1, 1);
        let recovery = CashFlowSchedule::new(vec![CashFlow::new(
            date(2026, 1, 1),
            Money::usd(dec!(300)),
            CashFlowType::Recovery,
        )]);
        let with_loss = recovery.merge(&CashFlowSchedule::new(vec![CashFlow::new(
            date(2025, 7, 1),
            Money::usd(dec!(700)),
            CashFlowType::DefaultLoss,
        )]));
        assert_eq!(
            present_value(&with_loss, &curve(today)).unwrap(),
            present_value(&recovery, &curve(today)).unwrap()
        );
        assert_relative_eq!(
            pv_f64(&with_loss, &curve(today)),
            300.0 / 1.05,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_empty_schedule_is_zero() {
        let pv = present_value(&CashFlowSchedule::empty(), &curve(date(2025, 1, 1))).unwrap();
        assert!(pv.is_zero());
        assert_eq!(pv.currency(), Currency::USD);
    }

    #[test]
    fn test_mixed_currency_rejected() {
        let today = date(2025, 1, 1);
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::principal(date(2026, 1, 1), Money::usd(dec!(100))),
            CashFlow::principal(date(2026, 1, 1), Money::new(dec!(100), Currency::EUR)),
        ]);
        assert!(present_value(&schedule, &curve(today)).is_err());
    }
}
