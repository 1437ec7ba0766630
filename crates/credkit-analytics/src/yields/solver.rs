//! Flat-yield solver.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{CashFlowSchedule, Compounding, Date, Money};
use credkit_math::solvers::{newton_bisection, SolverConfig, SolverMethod};
use credkit_math::MathError;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Settings for [`solve_yield`].
///
/// The yield is the flat rate, quoted with `compounding` over `day_count`
/// year fractions, at which the schedule's present value equals the price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolverConfig {
    /// Starting point for Newton's method.
    pub initial_guess: f64,
    /// Convergence tolerance on the price difference.
    pub tolerance: f64,
    /// Iteration cap shared by Newton and the bisection fallback.
    pub max_iterations: u32,
    /// Half-width of the central-difference derivative.
    pub derivative_bump: f64,
    /// Lower end of the bisection bracket.
    pub lower_bound: f64,
    /// Upper end of the bisection bracket.
    pub upper_bound: f64,
    /// Compounding of the solved rate.
    pub compounding: Compounding,
    /// Day count for discounting times.
    pub day_count: DayCountConvention,
}

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.05,
            tolerance: 1e-8,
            max_iterations: 100,
            derivative_bump: 1e-4,
            lower_bound: -0.99,
            upper_bound: 10.0,
            compounding: Compounding::Monthly,
            day_count: DayCountConvention::Thirty360,
        }
    }
}

impl YieldSolverConfig {
    /// Sets the initial guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the rate conventions.
    #[must_use]
    pub fn with_conventions(mut self, compounding: Compounding, day_count: DayCountConvention) -> Self {
        self.compounding = compounding;
        self.day_count = day_count;
        self
    }

    /// Checks that the settings describe a solvable problem.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` for a non-positive tolerance,
    /// bump or iteration cap, an empty bracket, or a guess outside it.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(AnalyticsError::invalid_input("tolerance must be positive"));
        }
        if self.derivative_bump.is_nan() || self.derivative_bump <= 0.0 {
            return Err(AnalyticsError::invalid_input("derivative bump must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(AnalyticsError::invalid_input("max_iterations must be at least 1"));
        }
        if self.lower_bound >= self.upper_bound || self.lower_bound < -1.0 || !self.upper_bound.is_finite() {
            return Err(AnalyticsError::invalid_input(format!(
                "invalid bracket [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }
        if !(self.lower_bound..=self.upper_bound).contains(&self.initial_guess) {
            return Err(AnalyticsError::invalid_input(format!(
                "initial guess {} outside bracket",
                self.initial_guess
            )));
        }
        Ok(())
    }
}

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldResult {
    /// The solved yield (as a decimal, e.g., 0.05 for 5%).
    pub rate: f64,
    /// Iterations used across both solver phases.
    pub iterations: u32,
    /// Method that produced the root.
    pub method: SolverMethod,
}

/// Solves for the flat rate that prices `schedule` at `price`.
///
/// Cash flows dated on or after `valuation_date` are discounted at a flat rate;
/// Newton's method with a central-difference derivative runs first, and
/// bisection over the configured bracket takes over if Newton diverges,
/// meets a flat derivative or leaves the bracket.
///
/// # Errors
///
/// - `AnalyticsError::InvalidInput` for an invalid config, a non-finite
///   price or a price in another currency
/// - `AnalyticsError::NoFutureCashFlows` if nothing is left to value
/// - `AnalyticsError::YieldSolverFailed` if no rate in the bracket reprices
///   the schedule within the iteration cap
pub fn solve_yield(
    schedule: &CashFlowSchedule,
    price: Money,
    valuation_date: Date,
    config: &YieldSolverConfig,
) -> AnalyticsResult<YieldResult> {
    config.validate()?;

    if let Some(currency) = schedule.currency() {
        if currency != price.currency() {
            return Err(AnalyticsError::invalid_input(format!(
                "price in {} for a {} schedule",
                price.currency(),
                currency
            )));
        }
    }

    let flows: Vec<(f64, f64)> = schedule
        .cash_flows()
        .filter(|cf| cf.date() >= valuation_date)
        .map(|cf| {
            let t = config.day_count.year_fraction_f64(valuation_date, cf.date());
            (t, cf.amount().to_f64())
        })
        .collect();

    if flows.is_empty() {
        return Err(AnalyticsError::NoFutureCashFlows { valuation_date });
    }

    let target = price.to_f64();
    if !target.is_finite() {
        return Err(AnalyticsError::invalid_input("price must be finite"));
    }

    let compounding = config.compounding;
    let pv = |rate: f64| -> f64 {
        flows
            .iter()
            .map(|&(t, amount)| amount * compounding.discount_factor(rate, t))
            .sum()
    };
    let objective = |rate: f64| pv(rate) - target;
    let h = config.derivative_bump;
    let derivative = |rate: f64| (pv(rate + h) - pv(rate - h)) / (2.0 * h);

    let solver = SolverConfig::new(config.tolerance, config.max_iterations);
    match newton_bisection(
        objective,
        derivative,
        config.initial_guess,
        (config.lower_bound, config.upper_bound),
        &solver,
    ) {
        Ok(result) => {
            debug!(
                "Solved yield {:.8} in {} iterations ({})",
                result.root, result.iterations, result.method
            );
            Ok(YieldResult {
                rate: result.root,
                iterations: result.iterations,
                method: result.method,
            })
        }
        Err(err) => {
            warn!("Yield solver failed for price {target}: {err}");
            let iterations = match err {
                MathError::ConvergenceFailed { iterations, .. } => iterations,
                _ => 0,
            };
            Err(AnalyticsError::YieldSolverFailed {
                iterations,
                reason: err.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::present_value;
    use approx::assert_relative_eq;
    use credkit_core::{CashFlow, ErrorKind};
    use credkit_curves::FlatDiscountCurve;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    /// Five annual coupons of 60 on 1000 face.
    fn bond_like(start: Date) -> CashFlowSchedule {
        let mut flows = Vec::new();
        for year in 1..=5 {
            let d = start.add_years(year).unwrap();
            flows.push(CashFlow::interest(d, Money::usd(dec!(60))));
        }
        flows.push(CashFlow::principal(
            start.add_years(5).unwrap(),
            Money::usd(dec!(1000)),
        ));
        CashFlowSchedule::new(flows)
    }

    #[test]
    fn test_par_price_gives_coupon_rate() {
        let today = date(2025, 1, 1);
        let config = YieldSolverConfig::default()
            .with_conventions(Compounding::Annual, DayCountConvention::Thirty360);
        let result = solve_yield(&bond_like(today), Money::usd(dec!(1000)), today, &config).unwrap();
        assert_relative_eq!(result.rate, 0.06, epsilon = 1e-9);
    }

    #[test]
    fn test_recovers_rate_used_for_pricing() {
        let today = date(2025, 1, 1);
        let schedule = bond_like(today);
        let config = YieldSolverConfig::default();
        let curve = FlatDiscountCurve::from_f64(0.0731, today, config.compounding, config.day_count)
            .unwrap();
        let price = present_value(&schedule, &curve).unwrap();

        let result = solve_yield(&schedule, price, today, &config).unwrap();
        assert_relative_eq!(result.rate, 0.0731, epsilon = 1e-6);
    }

    #[test]
    fn test_newton_fallback_still_converges() {
        // A guess at the top of the bracket makes Newton overshoot
        let today = date(2025, 1, 1);
        let config = YieldSolverConfig::default().with_initial_guess(9.5);
        let schedule = bond_like(today);
        let result = solve_yield(&schedule, Money::usd(dec!(950)), today, &config).unwrap();

        let curve =
            FlatDiscountCurve::from_f64(result.rate, today, config.compounding, config.day_count)
                .unwrap();
        let pv = present_value(&schedule, &curve).unwrap().amount().to_f64().unwrap();
        assert_relative_eq!(pv, 950.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unreachable_price_is_convergence_error() {
        let today = date(2025, 1, 1);
        // Undiscounted value is 1300; no rate in the bracket reaches 1e9
        let err = solve_yield(
            &bond_like(today),
            Money::usd(dec!(1000000000)),
            today,
            &YieldSolverConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Convergence);
    }

    #[test]
    fn test_input_validation() {
        let today = date(2025, 1, 1);
        let schedule = bond_like(today);

        let after_maturity = date(2031, 1, 1);
        assert!(matches!(
            solve_yield(&schedule, Money::usd(dec!(1000)), after_maturity, &YieldSolverConfig::default()),
            Err(AnalyticsError::NoFutureCashFlows { .. })
        ));

        let eur = Money::new(dec!(1000), credkit_core::Currency::EUR);
        assert!(solve_yield(&schedule, eur, today, &YieldSolverConfig::default()).is_err());

        let bad = YieldSolverConfig {
            lower_bound: 1.0,
            upper_bound: 0.5,
            ..YieldSolverConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: YieldSolverConfig =
            serde_json::from_str(r#"{"tolerance": 1e-10, "compounding": "Annual"}"#).unwrap();
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.compounding, Compounding::Annual);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.day_count, DayCountConvention::Thirty360);
    }
}
