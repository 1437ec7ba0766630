//! Cash flows and immutable cash-flow schedules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Currency, Date, Money};
use crate::error::CredkitResult;

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Scheduled principal repayment (including final/balloon principal)
    Principal,
    /// Interest payment
    Interest,
    /// Unscheduled principal repayment
    Prepayment,
    /// Principal written off at default
    DefaultLoss,
    /// Recovery on defaulted principal
    Recovery,
    /// Fee income or expense
    Fee,
}

impl CashFlowType {
    /// Returns true if the flow returns principal to the lender.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        matches!(self, CashFlowType::Principal | CashFlowType::Prepayment)
    }

    /// Returns true if the flow moves cash.
    ///
    /// DEFAULT_LOSS records principal written off and pays nothing; it is a
    /// memo flow excluded from totals, netting and valuation.
    #[must_use]
    pub fn is_cash(&self) -> bool {
        !matches!(self, CashFlowType::DefaultLoss)
    }
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Principal => "Principal",
            CashFlowType::Interest => "Interest",
            CashFlowType::Prepayment => "Prepayment",
            CashFlowType::DefaultLoss => "Default Loss",
            CashFlowType::Recovery => "Recovery",
            CashFlowType::Fee => "Fee",
        };
        write!(f, "{name}")
    }
}

/// A single dated cash flow.
///
/// # Example
///
/// ```rust
/// use credkit_core::types::{CashFlow, CashFlowType, Date, Money};
/// use rust_decimal_macros::dec;
///
/// let cf = CashFlow::new(
///     Date::from_ymd(2025, 6, 15).unwrap(),
///     Money::usd(dec!(1250.00)),
///     CashFlowType::Interest,
/// );
/// assert_eq!(cf.amount().amount(), dec!(1250.00));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    date: Date,
    amount: Money,
    cf_type: CashFlowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: Money, cf_type: CashFlowType) -> Self {
        Self {
            date,
            amount,
            cf_type,
            description: None,
        }
    }

    /// Creates a scheduled principal flow.
    #[must_use]
    pub fn principal(date: Date, amount: Money) -> Self {
        Self::new(date, amount, CashFlowType::Principal)
    }

    /// Creates an interest flow.
    #[must_use]
    pub fn interest(date: Date, amount: Money) -> Self {
        Self::new(date, amount, CashFlowType::Interest)
    }

    /// Attaches a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the signed amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the cash flow type.
    #[must_use]
    pub fn cf_type(&self) -> CashFlowType {
        self.cf_type
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.cf_type, self.amount)
    }
}

/// An immutable, date-ordered sequence of cash flows.
///
/// Flows are stably sorted by date at construction, so same-date flows keep
/// their insertion order. Every query that narrows or combines schedules
/// returns a new schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CashFlow>", into = "Vec<CashFlow>")]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Builds a schedule, sorting flows by date (stable).
    #[must_use]
    pub fn new(mut flows: Vec<CashFlow>) -> Self {
        flows.sort_by_key(CashFlow::date);
        Self { flows }
    }

    /// Returns an empty schedule.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if there are no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Returns the flows in date order.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Returns an iterator over the flows.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Returns an iterator over the flows that move cash, skipping memo
    /// flows such as DEFAULT_LOSS.
    pub fn cash_flows(&self) -> impl Iterator<Item = &CashFlow> + '_ {
        self.flows.iter().filter(|cf| cf.cf_type().is_cash())
    }

    /// Returns the currency of the first flow, if any.
    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.flows.first().map(|cf| cf.amount().currency())
    }

    fn filtered(&self, keep: impl Fn(&CashFlow) -> bool) -> Self {
        Self {
            flows: self.flows.iter().filter(|cf| keep(cf)).cloned().collect(),
        }
    }

    /// Returns the flows of one type.
    #[must_use]
    pub fn filter_by_type(&self, cf_type: CashFlowType) -> Self {
        self.filtered(|cf| cf.cf_type() == cf_type)
    }

    /// Returns the flows dated within `[start, end]`.
    #[must_use]
    pub fn filter_by_date_range(&self, start: Date, end: Date) -> Self {
        self.filtered(|cf| cf.date() >= start && cf.date() <= end)
    }

    /// Returns the flows dated strictly before `date`.
    #[must_use]
    pub fn before(&self, date: Date) -> Self {
        self.filtered(|cf| cf.date() < date)
    }

    /// Returns the flows dated on or after `date`.
    #[must_use]
    pub fn on_or_after(&self, date: Date) -> Self {
        self.filtered(|cf| cf.date() >= date)
    }

    /// Returns scheduled principal and prepayment flows.
    #[must_use]
    pub fn principal_flows(&self) -> Self {
        self.filtered(|cf| cf.cf_type().is_principal())
    }

    /// Sums the cash received over the schedule.
    ///
    /// Memo flows (DEFAULT_LOSS) are not counted; use
    /// [`total_by_type`](Self::total_by_type) to sum them. An empty schedule
    /// totals to zero in the default currency.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::CurrencyMismatch` for mixed-currency schedules.
    pub fn total(&self) -> CredkitResult<Money> {
        let currency = self.currency().unwrap_or_default();
        self.cash_flows()
            .try_fold(Money::zero(currency), |acc, cf| acc.checked_add(&cf.amount()))
    }

    /// Sums the flows of one type.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::CurrencyMismatch` for mixed-currency schedules.
    pub fn total_by_type(&self, cf_type: CashFlowType) -> CredkitResult<Money> {
        let currency = self.currency().unwrap_or_default();
        self.flows
            .iter()
            .filter(|cf| cf.cf_type() == cf_type)
            .try_fold(Money::zero(currency), |acc, cf| acc.checked_add(&cf.amount()))
    }

    /// Sums flows per type; types with no flows are absent.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::CurrencyMismatch` for mixed-currency schedules.
    pub fn sum_by_type(&self) -> CredkitResult<BTreeMap<CashFlowType, Money>> {
        let mut totals: BTreeMap<CashFlowType, Money> = BTreeMap::new();
        for cf in &self.flows {
            let next = match totals.get(&cf.cf_type()) {
                Some(acc) => acc.checked_add(&cf.amount())?,
                None => cf.amount(),
            };
            totals.insert(cf.cf_type(), next);
        }
        Ok(totals)
    }

    /// Nets the cash flows falling on the same date, in date order.
    ///
    /// Memo flows are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CredkitError::CurrencyMismatch` for mixed-currency schedules.
    pub fn aggregate_by_date(&self) -> CredkitResult<Vec<(Date, Money)>> {
        let mut out: Vec<(Date, Money)> = Vec::new();
        for cf in self.cash_flows() {
            match out.last_mut() {
                Some((date, acc)) if *date == cf.date() => {
                    *acc = acc.checked_add(&cf.amount())?;
                }
                _ => out.push((cf.date(), cf.amount())),
            }
        }
        Ok(out)
    }

    /// Returns the first payment date.
    #[must_use]
    pub fn earliest_date(&self) -> Option<Date> {
        self.flows.first().map(CashFlow::date)
    }

    /// Returns the last payment date.
    #[must_use]
    pub fn latest_date(&self) -> Option<Date> {
        self.flows.last().map(CashFlow::date)
    }

    /// Returns dates and raw decimal amounts as parallel vectors.
    #[must_use]
    pub fn to_arrays(&self) -> (Vec<Date>, Vec<Decimal>) {
        self.flows
            .iter()
            .map(|cf| (cf.date(), cf.amount().amount()))
            .unzip()
    }

    /// Combines two schedules; on equal dates flows of `self` come first.
    #[must_use]
    pub fn merge(&self, other: &CashFlowSchedule) -> Self {
        let mut flows = self.flows.clone();
        flows.extend(other.flows.iter().cloned());
        Self::new(flows)
    }
}

impl From<Vec<CashFlow>> for CashFlowSchedule {
    fn from(flows: Vec<CashFlow>) -> Self {
        Self::new(flows)
    }
}

impl From<CashFlowSchedule> for Vec<CashFlow> {
    fn from(schedule: CashFlowSchedule) -> Self {
        schedule.flows
    }
}

impl FromIterator<CashFlow> for CashFlowSchedule {
    fn from_iter<I: IntoIterator<Item = CashFlow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for CashFlowSchedule {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample() -> CashFlowSchedule {
        CashFlowSchedule::new(vec![
            CashFlow::interest(date(2025, 2, 1), Money::usd(dec!(50))),
            CashFlow::principal(date(2025, 1, 1), Money::usd(dec!(100))),
            CashFlow::interest(date(2025, 1, 1), Money::usd(dec!(60))),
            CashFlow::new(date(2025, 2, 1), Money::usd(dec!(25)), CashFlowType::Prepayment),
            CashFlow::principal(date(2025, 2, 1), Money::usd(dec!(101))),
        ])
    }

    #[test]
    fn test_sorted_with_stable_ties() {
        let schedule = sample();
        let types: Vec<_> = schedule.iter().map(CashFlow::cf_type).collect();
        assert_eq!(
            types,
            vec![
                CashFlowType::Principal,
                CashFlowType::Interest,
                CashFlowType::Interest,
                CashFlowType::Prepayment,
                CashFlowType::Principal,
            ]
        );
        assert_eq!(schedule.earliest_date(), Some(date(2025, 1, 1)));
        assert_eq!(schedule.latest_date(), Some(date(2025, 2, 1)));
    }

    #[test]
    fn test_totals() {
        let schedule = sample();
        assert_eq!(schedule.total().unwrap().amount(), dec!(336));
        assert_eq!(
            schedule.total_by_type(CashFlowType::Interest).unwrap().amount(),
            dec!(110)
        );
        let by_type = schedule.sum_by_type().unwrap();
        assert_eq!(by_type[&CashFlowType::Principal].amount(), dec!(201));
        assert!(!by_type.contains_key(&CashFlowType::Fee));
        assert_eq!(schedule.principal_flows().len(), 3);
    }

    #[test]
    fn test_filters() {
        let schedule = sample();
        assert_eq!(schedule.before(date(2025, 2, 1)).len(), 2);
        assert_eq!(schedule.on_or_after(date(2025, 2, 1)).len(), 3);
        assert_eq!(
            schedule
                .filter_by_date_range(date(2025, 1, 15), date(2025, 3, 1))
                .len(),
            3
        );
        assert_eq!(schedule.filter_by_type(CashFlowType::Fee).len(), 0);
    }

    #[test]
    fn test_aggregate_by_date() {
        let netted = sample().aggregate_by_date().unwrap();
        assert_eq!(netted.len(), 2);
        assert_eq!(netted[0].1.amount(), dec!(160));
        assert_eq!(netted[1].1.amount(), dec!(176));
    }

    #[test]
    fn test_default_loss_is_not_cash() {
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::principal(date(2025, 1, 1), Money::usd(dec!(100))),
            CashFlow::new(date(2025, 2, 1), Money::usd(dec!(900)), CashFlowType::DefaultLoss),
            CashFlow::new(date(2025, 5, 1), Money::usd(dec!(300)), CashFlowType::Recovery),
        ]);
        assert!(!CashFlowType::DefaultLoss.is_cash());
        assert!(CashFlowType::Recovery.is_cash());
        assert_eq!(schedule.cash_flows().count(), 2);
        assert_eq!(schedule.total().unwrap().amount(), dec!(400));
        assert_eq!(
            schedule.total_by_type(CashFlowType::DefaultLoss).unwrap().amount(),
            dec!(900)
        );

        let netted = schedule.aggregate_by_date().unwrap();
        let dates: Vec<Date> = netted.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 5, 1)]);
    }

    #[test]
    fn test_mixed_currency_total_fails() {
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::principal(date(2025, 1, 1), Money::usd(dec!(1))),
            CashFlow::principal(date(2025, 1, 1), Money::new(dec!(1), Currency::EUR)),
        ]);
        assert!(schedule.total().is_err());
    }

    #[test]
    fn test_merge_and_empty() {
        let empty = CashFlowSchedule::empty();
        assert!(empty.total().unwrap().is_zero());
        let merged = empty.merge(&sample());
        assert_eq!(merged, sample());
    }

    #[test]
    fn test_serde_round_trip() {
        let schedule = sample();
        let json = serde_json::to_string(&schedule).unwrap();
        let back: CashFlowSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }
}
