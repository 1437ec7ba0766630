//! Newton-Raphson with bisection fallback.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::bisection::bisect_with_budget;
use crate::solvers::newton::MIN_DERIVATIVE;
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Newton iterations allowed before handing over to bisection.
const MAX_NEWTON_ITERATIONS: u32 = 20;

/// Consecutive residual blow-ups tolerated before Newton is abandoned.
const MAX_DIVERGENCE: u32 = 3;

/// Monitored Newton-Raphson with bisection fallback.
///
/// Newton runs from `initial_guess` and is abandoned in favour of bisection
/// over `bracket` when it
///
/// - hits a near-zero derivative,
/// - steps outside the bracket or to a non-finite value,
/// - grows the residual repeatedly, or
/// - spends its share of iterations without converging.
///
/// Both phases draw from the single `config.max_iterations` budget, so the
/// total work is bounded and exhausting it is reported as
/// [`MathError::ConvergenceFailed`].
pub fn newton_bisection<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bracket: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (lo, hi) = (bracket.0.min(bracket.1), bracket.0.max(bracket.1));
    if lo.is_nan() || hi.is_nan() || lo >= hi {
        return Err(MathError::invalid_input(format!(
            "empty bracket [{}, {}]",
            bracket.0, bracket.1
        )));
    }

    let newton_budget = config.max_iterations.min(MAX_NEWTON_ITERATIONS);
    let start = initial_guess.clamp(lo, hi);
    let (outcome, used) = monitored_newton(&f, &df, start, (lo, hi), config, newton_budget);

    match outcome {
        Ok(result) => Ok(result),
        Err(reason) => {
            debug!("Newton abandoned after {used} iterations ({reason}); bisecting [{lo}, {hi}]");
            let remaining = config.max_iterations.saturating_sub(used);
            bisect_with_budget(&f, lo, hi, config, remaining, used)
        }
    }
}

fn monitored_newton<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    (lo, hi): (f64, f64),
    config: &SolverConfig,
    budget: u32,
) -> (Result<SolverResult, &'static str>, u32)
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut prev_residual = f64::MAX;
    let mut divergence_count = 0;

    for iteration in 0..budget {
        let fx = f(x);
        let residual = fx.abs();

        if residual < config.tolerance {
            let result = SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                method: SolverMethod::Newton,
            };
            return (Ok(result), iteration);
        }

        if residual > prev_residual * 2.0 {
            divergence_count += 1;
            if divergence_count >= MAX_DIVERGENCE {
                return (Err("diverging"), iteration + 1);
            }
        } else {
            divergence_count = 0;
        }
        prev_residual = residual;

        let dfx = df(x);
        if !dfx.is_finite() || dfx.abs() < MIN_DERIVATIVE {
            return (Err("flat derivative"), iteration + 1);
        }

        x -= fx / dfx;

        if !x.is_finite() || x < lo || x > hi {
            return (Err("left bracket"), iteration + 1);
        }
    }

    (Err("iteration share exhausted"), budget)
}
