//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Smallest derivative magnitude Newton will divide by.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-15;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` and stops once
/// `|f(x_n)|` is below the configured tolerance.
///
/// # Example
///
/// ```rust
/// use credkit_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                method: SolverMethod::Newton,
            });
        }

        let dfx = df(x);
        if dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        x -= fx / dfx;

        if !x.is_finite() {
            return Err(MathError::invalid_input("Newton produced non-finite value"));
        }
    }

    let fx = f(x);
    if fx.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x,
            iterations: config.max_iterations,
            residual: fx,
            method: SolverMethod::Newton,
        });
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}

/// Newton-Raphson with a central-difference derivative.
///
/// `bump` is the half-width of the difference: `f'(x) ≈ (f(x+h) - f(x-h)) / 2h`.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    bump: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if bump <= 0.0 || !bump.is_finite() {
        return Err(MathError::invalid_input(format!(
            "derivative bump must be positive, got {bump}"
        )));
    }

    let df = |x: f64| (f(x + bump) - f(x - bump)) / (2.0 * bump);
    newton_raphson(&f, df, initial_guess, config)
}
