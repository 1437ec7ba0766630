//! Zero-curve bootstrapping from market instruments.
//!
//! Instruments are sorted by maturity and solved one at a time: each adds a
//! pivot whose zero rate reprices the instrument exactly, given the pivots
//! already solved before it.

mod instruments;
mod sequential;

pub use instruments::{BootstrapInstrument, Deposit, ParInstrument};
pub use sequential::ZeroCurveBootstrapper;
