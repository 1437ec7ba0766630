//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverMethod, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly halves `[a, b]`, keeping the half whose endpoints straddle a
/// sign change. Requires `f(a) * f(b) <= 0`.
///
/// The search stops when `|f(mid)|` is below the tolerance, or when the
/// bracket can no longer be split in floating point (the midpoint equals an
/// endpoint), in which case the midpoint is the best representable root.
///
/// # Example
///
/// ```rust
/// use credkit_math::solvers::{bisection, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    bisect_with_budget(&f, a, b, config, config.max_iterations, 0)
}

/// Bisection with an explicit iteration budget, used by the hybrid solver
/// to share one iteration cap across both phases.
pub(crate) fn bisect_with_budget<F>(
    f: &F,
    a: f64,
    b: f64,
    config: &SolverConfig,
    budget: u32,
    iterations_used: u32,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let done = |root: f64, residual: f64, iterations: u32| SolverResult {
        root,
        iterations,
        residual,
        method: SolverMethod::Bisection,
    };

    if f_lo.abs() < config.tolerance {
        return Ok(done(lo, f_lo, iterations_used));
    }
    if f_hi.abs() < config.tolerance {
        return Ok(done(hi, f_hi, iterations_used));
    }

    for step in 0..budget {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);
        let iterations = iterations_used + step + 1;

        if f_mid.abs() < config.tolerance || mid <= lo || mid >= hi {
            return Ok(done(mid, f_mid, iterations));
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    let mid = lo + (hi - lo) / 2.0;
    Err(MathError::convergence_failed(
        iterations_used + budget,
        f(mid).abs(),
    ))
}
