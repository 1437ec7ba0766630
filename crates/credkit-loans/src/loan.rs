//! The loan facade: terms, validation and schedule queries.

use serde::{Deserialize, Serialize};
use std::fmt;

use rust_decimal::Decimal;

use credkit_core::{
    CashFlowSchedule, CashFlowType, Date, InterestRate, Money, PaymentFrequency, Period,
};

use crate::adjust::BehavioralAdjuster;
use crate::amortization::{offset_dates, AmortizationEngine, AmortizationType};
use crate::behavior::{DefaultCurve, LossGivenDefault, PrepaymentCurve};
use crate::config::EngineConfig;
use crate::error::{LoanError, LoanResult};

/// A fixed-rate amortizing loan.
///
/// Terms are validated on construction and never change; every schedule
/// query and adjustment produces a new [`CashFlowSchedule`]. Payment `i`
/// (1-based) falls on `origination_date + i × period`.
///
/// # Example
///
/// ```rust
/// use credkit_core::{Date, InterestRate, Money};
/// use credkit_loans::Loan;
/// use rust_decimal_macros::dec;
///
/// let loan = Loan::mortgage(
///     Money::usd(dec!(300000)),
///     InterestRate::from_percent(dec!(6.5)),
///     30,
///     Date::from_ymd(2025, 1, 1).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(loan.number_of_payments(), 360);
/// assert_eq!(loan.payment_rounded().unwrap().amount(), dec!(1896.20));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LoanData", into = "LoanData")]
pub struct Loan {
    principal: Money,
    annual_rate: InterestRate,
    term: Period,
    payment_frequency: PaymentFrequency,
    amortization_type: AmortizationType,
    origination_date: Date,
    number_of_payments: u32,
    maturity_date: Date,
}

#[derive(Serialize, Deserialize)]
struct LoanData {
    principal: Money,
    annual_rate: InterestRate,
    term: Period,
    #[serde(default)]
    payment_frequency: PaymentFrequency,
    #[serde(default)]
    amortization_type: AmortizationType,
    origination_date: Date,
}

impl Loan {
    /// Creates a loan after validating its terms.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidLoan` for a non-positive principal, a
    /// negative rate, a zero term, a zero-coupon frequency, or a frequency
    /// that does not divide the term into whole periods.
    pub fn new(
        principal: Money,
        annual_rate: InterestRate,
        term: Period,
        payment_frequency: PaymentFrequency,
        amortization_type: AmortizationType,
        origination_date: Date,
    ) -> LoanResult<Self> {
        if !principal.is_positive() {
            return Err(LoanError::invalid_loan(
                "principal",
                format!("must be positive, got {principal}"),
            ));
        }
        if annual_rate.is_negative() {
            return Err(LoanError::invalid_loan(
                "annual_rate",
                format!("must not be negative, got {annual_rate}"),
            ));
        }
        if term.is_zero() {
            return Err(LoanError::invalid_loan("term", "must be positive"));
        }

        let number_of_payments = periods_in_term(term, payment_frequency)?;
        let maturity_date = term.add_to_date(origination_date)?;

        Ok(Self {
            principal,
            annual_rate,
            term,
            payment_frequency,
            amortization_type,
            origination_date,
            number_of_payments,
            maturity_date,
        })
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    /// Monthly level-payment mortgage over `years` years.
    pub fn mortgage(
        principal: Money,
        annual_rate: InterestRate,
        years: u32,
        origination_date: Date,
    ) -> LoanResult<Self> {
        Self::new(
            principal,
            annual_rate,
            Period::years(years),
            PaymentFrequency::Monthly,
            AmortizationType::LevelPayment,
            origination_date,
        )
    }

    /// Monthly level-payment auto loan over `months` months.
    pub fn auto_loan(
        principal: Money,
        annual_rate: InterestRate,
        months: u32,
        origination_date: Date,
    ) -> LoanResult<Self> {
        Self::new(
            principal,
            annual_rate,
            Period::months(months),
            PaymentFrequency::Monthly,
            AmortizationType::LevelPayment,
            origination_date,
        )
    }

    /// Monthly level-payment personal loan over `months` months.
    pub fn personal_loan(
        principal: Money,
        annual_rate: InterestRate,
        months: u32,
        origination_date: Date,
    ) -> LoanResult<Self> {
        Self::auto_loan(principal, annual_rate, months, origination_date)
    }

    /// Returns the original principal.
    #[must_use]
    pub fn principal(&self) -> Money {
        self.principal
    }

    /// Returns the note rate.
    #[must_use]
    pub fn annual_rate(&self) -> InterestRate {
        self.annual_rate
    }

    /// Returns the term.
    #[must_use]
    pub fn term(&self) -> Period {
        self.term
    }

    /// Returns the payment frequency.
    #[must_use]
    pub fn payment_frequency(&self) -> PaymentFrequency {
        self.payment_frequency
    }

    /// Returns the amortization type.
    #[must_use]
    pub fn amortization_type(&self) -> AmortizationType {
        self.amortization_type
    }

    /// Returns the origination date.
    #[must_use]
    pub fn origination_date(&self) -> Date {
        self.origination_date
    }

    /// Returns `origination_date + term`.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the number of scheduled payment periods.
    #[must_use]
    pub fn number_of_payments(&self) -> u32 {
        self.number_of_payments
    }

    /// Note rate per payment period.
    #[must_use]
    pub fn periodic_rate(&self) -> Decimal {
        self.annual_rate
            .periodic_rate(self.payment_frequency.periods_per_year())
    }

    /// Scheduled payment at full precision.
    pub fn payment(&self) -> LoanResult<Money> {
        AmortizationEngine::payment(self)
    }

    /// Scheduled payment rounded to the currency's minor unit.
    pub fn payment_rounded(&self) -> LoanResult<Money> {
        Ok(self.payment()?.round_to_currency())
    }

    /// Scheduled payment dates, `origination_date + i × period` for
    /// `i = 1..=n`.
    pub fn payment_dates(&self) -> LoanResult<Vec<Date>> {
        let period = self
            .payment_frequency
            .period()
            .ok_or_else(|| LoanError::invalid_loan("payment_frequency", "has no period"))?;
        offset_dates(self.origination_date, period, 1..=self.number_of_payments)
    }

    /// Contractual cash flows with no prepayment or default.
    pub fn generate_schedule(&self) -> LoanResult<CashFlowSchedule> {
        AmortizationEngine::generate_schedule(self)
    }

    /// Total contractual interest.
    pub fn total_interest(&self) -> LoanResult<Money> {
        Ok(self
            .generate_schedule()?
            .total_by_type(CashFlowType::Interest)?)
    }

    /// Total contractual payments (principal plus interest).
    pub fn total_payments(&self) -> LoanResult<Money> {
        Ok(self.generate_schedule()?.total()?)
    }

    /// Splices a lump-sum prepayment into the contractual schedule; see
    /// [`BehavioralAdjuster::apply_prepayment`].
    pub fn apply_prepayment(
        &self,
        prepayment_date: Date,
        amount: Money,
    ) -> LoanResult<CashFlowSchedule> {
        let schedule = self.generate_schedule()?;
        BehavioralAdjuster::apply_prepayment(&schedule, self, prepayment_date, amount)
    }

    /// Defaults the contractual schedule on `default_date`; see
    /// [`BehavioralAdjuster::apply_default`].
    pub fn apply_default(
        &self,
        default_date: Date,
        lgd: &LossGivenDefault,
    ) -> LoanResult<(CashFlowSchedule, Money)> {
        let schedule = self.generate_schedule()?;
        BehavioralAdjuster::apply_default(&schedule, self, default_date, lgd)
    }

    /// Expected cash flows under behavioral assumptions; see
    /// [`BehavioralAdjuster::expected_cashflows`].
    pub fn expected_cashflows(
        &self,
        prepayment_curve: Option<&PrepaymentCurve>,
        default_curve: Option<&DefaultCurve>,
        lgd: Option<&LossGivenDefault>,
    ) -> LoanResult<CashFlowSchedule> {
        BehavioralAdjuster::expected_cashflows(self, prepayment_curve, default_curve, lgd)
    }

    /// Expected cash flows with the payoff threshold from `config`.
    pub fn expected_cashflows_with_config(
        &self,
        prepayment_curve: Option<&PrepaymentCurve>,
        default_curve: Option<&DefaultCurve>,
        lgd: Option<&LossGivenDefault>,
        config: &EngineConfig,
    ) -> LoanResult<CashFlowSchedule> {
        BehavioralAdjuster::expected_cashflows_with_tolerance(
            self,
            prepayment_curve,
            default_curve,
            lgd,
            config.balance_tolerance,
        )
    }
}

/// Number of whole `frequency` periods in `term`.
fn periods_in_term(term: Period, frequency: PaymentFrequency) -> LoanResult<u32> {
    let period = frequency.period().ok_or_else(|| {
        LoanError::invalid_loan("payment_frequency", "zero-coupon loans are not supported")
    })?;

    let (term_units, period_units) = match (term.to_months(), period.to_months()) {
        (Some(t), Some(p)) => (t, p),
        _ => match (term.to_days(), period.to_days()) {
            (Some(t), Some(p)) => (t, p),
            _ => {
                return Err(LoanError::invalid_loan(
                    "term",
                    format!("{term} cannot be divided into {frequency} periods"),
                ))
            }
        },
    };

    if term_units % period_units != 0 {
        return Err(LoanError::invalid_loan(
            "term",
            format!("{term} is not a whole number of {frequency} periods"),
        ));
    }
    Ok(term_units / period_units)
}

impl TryFrom<LoanData> for Loan {
    type Error = LoanError;

    fn try_from(data: LoanData) -> LoanResult<Self> {
        Self::new(
            data.principal,
            data.annual_rate,
            data.term,
            data.payment_frequency,
            data.amortization_type,
            data.origination_date,
        )
    }
}

impl From<Loan> for LoanData {
    fn from(loan: Loan) -> Self {
        Self {
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            term: loan.term,
            payment_frequency: loan.payment_frequency,
            amortization_type: loan.amortization_type,
            origination_date: loan.origination_date,
        }
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {:.3}% over {}, {} from {}",
            self.principal,
            self.amortization_type,
            self.annual_rate.to_percent(),
            self.term,
            self.payment_frequency,
            self.origination_date
        )
    }
}

/// Builder for [`Loan`].
///
/// Principal, rate, term and origination date are required; frequency
/// defaults to monthly and amortization to level payment.
#[derive(Debug, Clone, Default)]
pub struct LoanBuilder {
    principal: Option<Money>,
    annual_rate: Option<InterestRate>,
    term: Option<Period>,
    payment_frequency: Option<PaymentFrequency>,
    amortization_type: Option<AmortizationType>,
    origination_date: Option<Date>,
}

impl LoanBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the principal.
    #[must_use]
    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the note rate.
    #[must_use]
    pub fn annual_rate(mut self, rate: InterestRate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// Sets the note rate from a percentage.
    #[must_use]
    pub fn rate_percent(self, percent: Decimal) -> Self {
        self.annual_rate(InterestRate::from_percent(percent))
    }

    /// Sets the term.
    #[must_use]
    pub fn term(mut self, term: Period) -> Self {
        self.term = Some(term);
        self
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn payment_frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.payment_frequency = Some(frequency);
        self
    }

    /// Sets the amortization type.
    #[must_use]
    pub fn amortization_type(mut self, amortization_type: AmortizationType) -> Self {
        self.amortization_type = Some(amortization_type);
        self
    }

    /// Sets the origination date.
    #[must_use]
    pub fn origination_date(mut self, date: Date) -> Self {
        self.origination_date = Some(date);
        self
    }

    /// Builds the loan.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::MissingField` for an unset required field, or
    /// any validation error from [`Loan::new`].
    pub fn build(self) -> LoanResult<Loan> {
        let principal = self
            .principal
            .ok_or_else(|| LoanError::missing_field("principal"))?;
        let annual_rate = self
            .annual_rate
            .ok_or_else(|| LoanError::missing_field("annual_rate"))?;
        let term = self.term.ok_or_else(|| LoanError::missing_field("term"))?;
        let origination_date = self
            .origination_date
            .ok_or_else(|| LoanError::missing_field("origination_date"))?;

        Loan::new(
            principal,
            annual_rate,
            term,
            self.payment_frequency.unwrap_or_default(),
            self.amortization_type.unwrap_or_default(),
            origination_date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credkit_core::TimeUnit;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn mortgage() -> Loan {
        Loan::mortgage(
            Money::usd(dec!(300000)),
            InterestRate::from_percent(dec!(6.5)),
            30,
            date(2025, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_mortgage_terms() {
        let loan = mortgage();
        assert_eq!(loan.number_of_payments(), 360);
        assert_eq!(loan.maturity_date(), date(2055, 1, 1));
        assert_eq!(loan.periodic_rate(), dec!(0.065) / dec!(12));
        assert_eq!(loan.payment_rounded().unwrap(), Money::usd(dec!(1896.20)));
    }

    #[test]
    fn test_payment_dates() {
        let loan = mortgage();
        let dates = loan.payment_dates().unwrap();
        assert_eq!(dates.len(), 360);
        assert_eq!(dates[0], date(2025, 2, 1));
        assert_eq!(dates[359], loan.maturity_date());
    }

    #[test]
    fn test_month_end_dates_do_not_drift() {
        let loan = Loan::auto_loan(
            Money::usd(dec!(20000)),
            InterestRate::from_percent(dec!(5)),
            6,
            date(2025, 1, 31),
        )
        .unwrap();
        let dates = loan.payment_dates().unwrap();
        assert_eq!(dates[0], date(2025, 2, 28));
        assert_eq!(dates[1], date(2025, 3, 31));
    }

    #[test]
    fn test_schedule_totals() {
        let loan = mortgage();
        let total = loan.total_payments().unwrap();
        let interest = loan.total_interest().unwrap();
        assert_eq!(total.checked_sub(&interest).unwrap(), loan.principal());
        assert!(interest.amount() > dec!(380000) && interest.amount() < dec!(385000));
    }

    #[test]
    fn test_adjustments_use_own_schedule() {
        let loan = mortgage();
        let schedule = loan.generate_schedule().unwrap();
        let prepay_date = date(2027, 6, 15);
        let amount = Money::usd(dec!(50000));

        assert_eq!(
            loan.apply_prepayment(prepay_date, amount).unwrap(),
            BehavioralAdjuster::apply_prepayment(&schedule, &loan, prepay_date, amount).unwrap()
        );

        let lgd = LossGivenDefault::default();
        let (defaulted, loss) = loan.apply_default(date(2030, 3, 1), &lgd).unwrap();
        assert_eq!(
            (defaulted, loss),
            BehavioralAdjuster::apply_default(&schedule, &loan, date(2030, 3, 1), &lgd).unwrap()
        );
        assert!(loan.apply_default(loan.maturity_date(), &lgd).is_err());
    }

    #[test]
    fn test_frequency_must_divide_term() {
        let quarterly = Loan::builder()
            .principal(Money::usd(dec!(50000)))
            .rate_percent(dec!(8))
            .term(Period::months(24))
            .payment_frequency(PaymentFrequency::Quarterly)
            .origination_date(date(2025, 1, 1))
            .build()
            .unwrap();
        assert_eq!(quarterly.number_of_payments(), 8);

        let weekly = Loan::builder()
            .principal(Money::usd(dec!(5000)))
            .rate_percent(dec!(12))
            .term(Period::new(52, TimeUnit::Weeks))
            .payment_frequency(PaymentFrequency::BiWeekly)
            .origination_date(date(2025, 1, 1))
            .build()
            .unwrap();
        assert_eq!(weekly.number_of_payments(), 26);

        let ragged = Loan::builder()
            .principal(Money::usd(dec!(50000)))
            .rate_percent(dec!(8))
            .term(Period::months(13))
            .payment_frequency(PaymentFrequency::Quarterly)
            .origination_date(date(2025, 1, 1))
            .build();
        assert!(matches!(ragged, Err(LoanError::InvalidLoan { field: "term", .. })));

        let mixed = Loan::builder()
            .principal(Money::usd(dec!(50000)))
            .rate_percent(dec!(8))
            .term(Period::years(1))
            .payment_frequency(PaymentFrequency::Weekly)
            .origination_date(date(2025, 1, 1))
            .build();
        assert!(mixed.is_err());
    }

    #[test]
    fn test_invalid_terms() {
        let start = date(2025, 1, 1);
        let rate = InterestRate::from_percent(dec!(5));
        assert!(Loan::mortgage(Money::usd(Decimal::ZERO), rate, 30, start).is_err());
        assert!(Loan::mortgage(Money::usd(dec!(1000)), rate, 0, start).is_err());
        assert!(Loan::mortgage(
            Money::usd(dec!(1000)),
            InterestRate::from_percent(dec!(-1)),
            30,
            start
        )
        .is_err());

        let zero_coupon = Loan::new(
            Money::usd(dec!(1000)),
            rate,
            Period::years(1),
            PaymentFrequency::ZeroCoupon,
            AmortizationType::Bullet,
            start,
        );
        assert!(matches!(
            zero_coupon,
            Err(LoanError::InvalidLoan { field: "payment_frequency", .. })
        ));
    }

    #[test]
    fn test_builder_missing_fields() {
        let err = Loan::builder()
            .principal(Money::usd(dec!(1000)))
            .rate_percent(dec!(5))
            .build()
            .unwrap_err();
        assert_eq!(err, LoanError::missing_field("term"));

        let built = Loan::builder()
            .principal(Money::usd(dec!(1000)))
            .rate_percent(dec!(5))
            .term(Period::years(1))
            .origination_date(date(2025, 1, 1))
            .build()
            .unwrap();
        assert_eq!(built.payment_frequency(), PaymentFrequency::Monthly);
        assert_eq!(built.amortization_type(), AmortizationType::LevelPayment);
    }

    #[test]
    fn test_serde_round_trip_revalidates() {
        let loan = Loan::auto_loan(
            Money::usd(dec!(25000)),
            InterestRate::from_percent(dec!(5)),
            48,
            date(2025, 1, 1),
        )
        .unwrap();
        let json = serde_json::to_string(&loan).unwrap();
        assert!(!json.contains("number_of_payments"));
        let back: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loan);
        assert_eq!(back.number_of_payments(), 48);

        let bad = json.replace("25000", "-5");
        assert!(serde_json::from_str::<Loan>(&bad).is_err());
    }

    #[test]
    fn test_display() {
        let text = mortgage().to_string();
        assert!(text.contains("6.500%"));
        assert!(text.contains("30Y"));
        assert!(text.contains("2025-01-01"));
    }
}
