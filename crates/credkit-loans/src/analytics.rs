//! Loan-level analytics over the contractual or behavioral schedule.

use serde::{Deserialize, Serialize};

use credkit_analytics::{
    dv01, effective_convexity, effective_duration, macaulay_duration, present_value,
    solve_yield, weighted_average_life, YieldResult, YieldSolverConfig, DEFAULT_BUMP_SIZE,
};
use credkit_core::daycounts::DayCountConvention;
use credkit_core::{Compounding, Money, PaymentFrequency};
use credkit_curves::DiscountCurve;

use crate::behavior::{DefaultCurve, PrepaymentCurve};
use crate::config::EngineConfig;
use crate::error::LoanResult;
use crate::loan::Loan;

/// Which duration [`Loan::duration`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DurationKind {
    /// Effective (modified) duration from parallel curve shifts
    #[default]
    Modified,
    /// PV-weighted average time to the cash flows
    Macaulay,
}

/// Risk summary of a loan's contractual schedule against a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRiskMetrics {
    /// Present value on the curve
    pub present_value: Money,
    /// Effective duration
    pub modified_duration: f64,
    /// Macaulay duration, in years
    pub macaulay_duration: f64,
    /// Effective convexity
    pub convexity: f64,
    /// Value change for a one basis point parallel move
    pub dv01: Money,
    /// Weighted average life from origination, in years
    pub weighted_average_life: f64,
}

impl Loan {
    /// Weighted average life in years from origination.
    ///
    /// With no curves this is the contractual WAL; with either curve it is
    /// measured on the expected cash flows.
    pub fn weighted_average_life(
        &self,
        prepayment_curve: Option<&PrepaymentCurve>,
        default_curve: Option<&DefaultCurve>,
    ) -> LoanResult<f64> {
        let schedule = if prepayment_curve.is_none() && default_curve.is_none() {
            self.generate_schedule()?
        } else {
            self.expected_cashflows(prepayment_curve, default_curve, None)?
        };
        Ok(weighted_average_life(&schedule, self.origination_date())?)
    }

    /// Present value of the contractual schedule on `curve`.
    pub fn present_value<C: DiscountCurve + ?Sized>(&self, curve: &C) -> LoanResult<Money> {
        Ok(present_value(&self.generate_schedule()?, curve)?)
    }

    /// Yield at which the contractual schedule is worth `price` at
    /// origination.
    ///
    /// The yield is quoted with the compounding of the payment frequency
    /// (monthly for weekly schedules) on 30/360 times, starting from the
    /// note rate.
    pub fn yield_to_maturity(&self, price: Money) -> LoanResult<f64> {
        Ok(self
            .yield_to_maturity_with(price, &self.yield_solver_config(YieldSolverConfig::default()))?
            .rate)
    }

    /// [`yield_to_maturity`](Self::yield_to_maturity) with explicit solver
    /// settings, returning the full solver result.
    pub fn yield_to_maturity_with(
        &self,
        price: Money,
        config: &YieldSolverConfig,
    ) -> LoanResult<YieldResult> {
        let schedule = self.generate_schedule()?;
        Ok(solve_yield(&schedule, price, self.origination_date(), config)?)
    }

    /// Duration of the contractual schedule on `curve`, using a 1bp bump
    /// for the modified measure.
    pub fn duration<C: DiscountCurve + ?Sized>(
        &self,
        curve: &C,
        kind: DurationKind,
    ) -> LoanResult<f64> {
        let schedule = self.generate_schedule()?;
        Ok(match kind {
            DurationKind::Modified => effective_duration(&schedule, curve, DEFAULT_BUMP_SIZE)?,
            DurationKind::Macaulay => macaulay_duration(&schedule, curve)?,
        })
    }

    /// Effective convexity of the contractual schedule on `curve`.
    pub fn convexity<C: DiscountCurve + ?Sized>(&self, curve: &C) -> LoanResult<f64> {
        Ok(effective_convexity(
            &self.generate_schedule()?,
            curve,
            DEFAULT_BUMP_SIZE,
        )?)
    }

    /// Full risk summary, with the bump size from `config`.
    pub fn risk_metrics<C: DiscountCurve + ?Sized>(
        &self,
        curve: &C,
        config: &EngineConfig,
    ) -> LoanResult<LoanRiskMetrics> {
        config.validate()?;
        let schedule = self.generate_schedule()?;
        let bump = config.risk_bump;

        let metrics = LoanRiskMetrics {
            present_value: present_value(&schedule, curve)?,
            modified_duration: effective_duration(&schedule, curve, bump)?,
            macaulay_duration: macaulay_duration(&schedule, curve)?,
            convexity: effective_convexity(&schedule, curve, bump)?,
            dv01: dv01(&schedule, curve)?,
            weighted_average_life: weighted_average_life(&schedule, self.origination_date())?,
        };
        log::debug!(
            "risk for {}: pv {}, duration {:.4}, convexity {:.4}",
            self,
            metrics.present_value,
            metrics.modified_duration,
            metrics.convexity
        );
        Ok(metrics)
    }

    /// `base` with this loan's rate conventions and the note rate as the
    /// starting guess.
    pub fn yield_solver_config(&self, base: YieldSolverConfig) -> YieldSolverConfig {
        let guess = self
            .annual_rate()
            .as_f64()
            .clamp(base.lower_bound, base.upper_bound);
        base.with_initial_guess(guess)
            .with_conventions(compounding_for(self.payment_frequency()), DayCountConvention::Thirty360)
    }
}

fn compounding_for(frequency: PaymentFrequency) -> Compounding {
    match frequency {
        PaymentFrequency::Annual => Compounding::Annual,
        PaymentFrequency::SemiAnnual => Compounding::SemiAnnual,
        PaymentFrequency::Quarterly => Compounding::Quarterly,
        PaymentFrequency::Monthly
        | PaymentFrequency::BiWeekly
        | PaymentFrequency::Weekly
        | PaymentFrequency::ZeroCoupon => Compounding::Monthly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use credkit_core::{Date, InterestRate};
    use credkit_curves::FlatDiscountCurve;
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

    fn note_rate_curve(loan: &Loan) -> FlatDiscountCurve {
        let rate = loan
            .annual_rate()
            .with_compounding(Compounding::Monthly)
            .with_day_count(DayCountConvention::Thirty360);
        FlatDiscountCurve::new(rate, loan.origination_date()).unwrap()
    }

    #[test]
    fn test_note_rate_reprices_principal() {
        let loan = mortgage();
        let pv = loan.present_value(&note_rate_curve(&loan)).unwrap();
        assert!((pv.amount() - dec!(300000)).abs() < dec!(0.01));
    }

    #[test]
    fn test_yield_at_par_is_note_rate() {
        let loan = mortgage();
        let ytm = loan.yield_to_maturity(loan.principal()).unwrap();
        assert_relative_eq!(ytm, 0.065, epsilon = 1e-6);

        let discount = loan.yield_to_maturity(Money::usd(dec!(290000))).unwrap();
        assert!(discount > 0.065);
    }

    #[test]
    fn test_duration_kinds() {
        let loan = mortgage();
        let curve = note_rate_curve(&loan);
        let modified = loan.duration(&curve, DurationKind::Modified).unwrap();
        let macaulay = loan.duration(&curve, DurationKind::Macaulay).unwrap();
        assert!(modified > 0.0 && modified < macaulay);
        assert!(macaulay < loan.weighted_average_life(None, None).unwrap());
        assert!(loan.convexity(&curve).unwrap() > 0.0);
    }

    #[test]
    fn test_prepayments_shorten_wal() {
        let loan = mortgage();
        let contractual = loan.weighted_average_life(None, None).unwrap();
        let psa = PrepaymentCurve::psa(100.0).unwrap();
        let with_prepayments = loan.weighted_average_life(Some(&psa), None).unwrap();
        assert!(with_prepayments < contractual);
        assert!(contractual > 18.0 && contractual < 21.0);
    }

    #[test]
    fn test_risk_metrics_consistent() {
        let loan = mortgage();
        let curve = note_rate_curve(&loan);
        let metrics = loan.risk_metrics(&curve, &EngineConfig::default()).unwrap();

        let expected_dv01 =
            metrics.modified_duration * metrics.present_value.to_f64() * DEFAULT_BUMP_SIZE;
        assert_relative_eq!(metrics.dv01.to_f64(), expected_dv01, max_relative = 1e-4);
        assert_eq!(
            metrics.modified_duration,
            loan.duration(&curve, DurationKind::Modified).unwrap()
        );
    }

    #[test]
    fn test_compounding_for_frequency() {
        assert_eq!(compounding_for(PaymentFrequency::Quarterly), Compounding::Quarterly);
        assert_eq!(compounding_for(PaymentFrequency::BiWeekly), Compounding::Monthly);
    }
}
