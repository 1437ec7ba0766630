//! Sequential zero-curve bootstrap.

use log::debug;

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{Compounding, Date};
use credkit_math::solvers::{newton_bisection, SolverConfig};

use crate::bootstrap::BootstrapInstrument;
use crate::curves::ZeroCurve;
use crate::error::{CurveError, CurveResult};

/// Search range for a pivot's zero rate.
const RATE_BRACKET: (f64, f64) = (-0.5, 1.0);

/// Step for the central-difference derivative of the pricing error.
const DERIVATIVE_BUMP: f64 = 1e-6;

/// Sequential bootstrapper for [`ZeroCurve`]s.
///
/// 1. Sort instruments by maturity
/// 2. For each instrument, solve the zero rate at its maturity that sets its
///    pricing error to zero, with earlier pivots held fixed
/// 3. Build the final curve from the solved pivots
///
/// # Example
///
/// ```rust
/// use credkit_core::daycounts::DayCountConvention;
/// use credkit_core::{Compounding, Date, PaymentFrequency};
/// use credkit_curves::bootstrap::{Deposit, ParInstrument, ZeroCurveBootstrapper};
/// use credkit_curves::DiscountCurve;
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let d = |y, m| Date::from_ymd(y, m, 1).unwrap();
///
/// let curve = ZeroCurveBootstrapper::new(today)
///     .with_compounding(Compounding::Annual)
///     .with_day_count(DayCountConvention::Thirty360)
///     .add_instrument(Deposit::new(today, d(2025, 7), 0.040).unwrap())
///     .add_instrument(ParInstrument::new(today, d(2027, 1), 0.042, PaymentFrequency::Annual).unwrap())
///     .add_instrument(ParInstrument::new(today, d(2030, 1), 0.045, PaymentFrequency::Annual).unwrap())
///     .bootstrap()
///     .unwrap();
///
/// assert_eq!(curve.len(), 3);
/// assert!(curve.spot_rate(d(2030, 1)) > curve.spot_rate(d(2027, 1)));
/// ```
pub struct ZeroCurveBootstrapper {
    valuation_date: Date,
    compounding: Compounding,
    day_count: DayCountConvention,
    instruments: Vec<Box<dyn BootstrapInstrument>>,
    solver: SolverConfig,
}

impl ZeroCurveBootstrapper {
    /// Creates a bootstrapper with monthly compounding and ACT/365F.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            compounding: Compounding::default(),
            day_count: DayCountConvention::default(),
            instruments: Vec::new(),
            solver: SolverConfig::new(1e-12, 100),
        }
    }

    /// Sets the compounding of the resulting curve.
    #[must_use]
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the day count of the resulting curve.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the per-pivot solver configuration.
    #[must_use]
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Adds an instrument to the bootstrap set.
    #[must_use]
    pub fn add_instrument<I: BootstrapInstrument + 'static>(mut self, instrument: I) -> Self {
        self.instruments.push(Box::new(instrument));
        self
    }

    /// Bootstraps the curve from the added instruments.
    ///
    /// # Errors
    ///
    /// Returns an error if no instruments were added, an instrument matures
    /// on or before the valuation date, two instruments share a maturity, or
    /// a pivot cannot be solved.
    pub fn bootstrap(mut self) -> CurveResult<ZeroCurve> {
        if self.instruments.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }

        self.instruments.sort_by_key(|inst| inst.maturity());

        let mut pivots: Vec<(Date, f64)> = Vec::with_capacity(self.instruments.len());

        for instrument in &self.instruments {
            let maturity = instrument.maturity();
            if maturity <= self.valuation_date {
                return Err(CurveError::invalid_instrument(format!(
                    "{} matures on or before valuation date {}",
                    instrument.description(),
                    self.valuation_date
                )));
            }
            if pivots.last().is_some_and(|&(last, _)| last == maturity) {
                return Err(CurveError::invalid_instrument(format!(
                    "{} duplicates pivot {maturity}",
                    instrument.description()
                )));
            }

            let rate = self
                .solve_pivot(&pivots, instrument.as_ref())
                .map_err(|e| CurveError::bootstrap_failed(instrument.description(), &e))?;
            pivots.push((maturity, rate));
        }

        ZeroCurve::from_rates(
            self.valuation_date,
            &pivots,
            self.compounding,
            self.day_count,
        )
    }

    fn solve_pivot(
        &self,
        solved: &[(Date, f64)],
        instrument: &dyn BootstrapInstrument,
    ) -> CurveResult<f64> {
        let maturity = instrument.maturity();
        let trial_curve = |rate: f64| {
            let mut pivots = solved.to_vec();
            pivots.push((maturity, rate));
            ZeroCurve::from_rates(
                self.valuation_date,
                &pivots,
                self.compounding,
                self.day_count,
            )
        };

        let guess = instrument
            .quote()
            .clamp(RATE_BRACKET.0, RATE_BRACKET.1);
        // Surface structural problems before handing the closure to the solver
        trial_curve(guess)?;

        let f = |rate: f64| {
            trial_curve(rate).map_or(f64::NAN, |curve| instrument.pricing_error(&curve))
        };
        let df = |rate: f64| (f(rate + DERIVATIVE_BUMP) - f(rate - DERIVATIVE_BUMP)) / (2.0 * DERIVATIVE_BUMP);

        let result = newton_bisection(&f, df, guess, RATE_BRACKET, &self.solver)?;

        debug!(
            "Bootstrapped pivot {maturity}: zero rate {:.6} ({} iterations, {})",
            result.root, result.iterations, result.method
        );

        Ok(result.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{Deposit, ParInstrument};
    use crate::traits::DiscountCurve;
    use approx::assert_relative_eq;
    use credkit_core::{ErrorKind, PaymentFrequency};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_reprices_every_instrument() {
        let today = date(2025, 1, 1);
        let deposit = Deposit::new(today, date(2025, 7, 1), 0.040).unwrap();
        let two_year =
            ParInstrument::new(today, date(2027, 1, 1), 0.042, PaymentFrequency::SemiAnnual)
                .unwrap();
        let five_year =
            ParInstrument::new(today, date(2030, 1, 1), 0.046, PaymentFrequency::SemiAnnual)
                .unwrap();

        let curve = ZeroCurveBootstrapper::new(today)
            .with_compounding(Compounding::SemiAnnual)
            .with_day_count(DayCountConvention::Thirty360)
            .add_instrument(five_year.clone())
            .add_instrument(deposit)
            .add_instrument(two_year.clone())
            .bootstrap()
            .unwrap();

        assert_eq!(
            curve.pivot_dates(),
            &[date(2025, 7, 1), date(2027, 1, 1), date(2030, 1, 1)]
        );
        assert_relative_eq!(deposit.pricing_error(&curve), 0.0, epsilon = 1e-10);
        assert_relative_eq!(two_year.pricing_error(&curve), 0.0, epsilon = 1e-10);
        assert_relative_eq!(five_year.pricing_error(&curve), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_par_quotes_give_flat_curve() {
        let today = date(2025, 1, 1);
        let mut bootstrapper = ZeroCurveBootstrapper::new(today)
            .with_compounding(Compounding::Annual)
            .with_day_count(DayCountConvention::Thirty360);
        for years in 1..=5 {
            bootstrapper = bootstrapper.add_instrument(
                ParInstrument::new(today, date(2025 + years, 1, 1), 0.05, PaymentFrequency::Annual)
                    .unwrap(),
            );
        }
        let curve = bootstrapper.bootstrap().unwrap();

        for &rate in curve.pivot_rates() {
            assert_relative_eq!(rate, 0.05, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rejects_bad_instrument_sets() {
        let today = date(2025, 1, 1);

        assert!(matches!(
            ZeroCurveBootstrapper::new(today).bootstrap(),
            Err(CurveError::InsufficientPoints { .. })
        ));

        let dup = ZeroCurveBootstrapper::new(today)
            .add_instrument(Deposit::new(today, date(2026, 1, 1), 0.04).unwrap())
            .add_instrument(
                ParInstrument::new(today, date(2026, 1, 1), 0.04, PaymentFrequency::Annual)
                    .unwrap(),
            )
            .bootstrap();
        assert!(matches!(dup, Err(CurveError::InvalidInstrument { .. })));

        let stale = ZeroCurveBootstrapper::new(date(2026, 6, 1))
            .add_instrument(Deposit::new(today, date(2026, 1, 1), 0.04).unwrap())
            .bootstrap();
        assert_eq!(stale.unwrap_err().kind(), ErrorKind::Validation);
    }
}
