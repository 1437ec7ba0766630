//! Engine configuration.
//!
//! Settings for the numerical parts of loan analytics, loadable from TOML:
//!
//! ```toml
//! risk_bump = 0.0001
//! balance_tolerance = 0.01
//!
//! [yield_solver]
//! tolerance = 1e-10
//! max_iterations = 200
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use credkit_analytics::{YieldSolverConfig, DEFAULT_BUMP_SIZE};

use crate::adjust::DEFAULT_BALANCE_TOLERANCE;
use crate::error::{LoanError, LoanResult};

/// Numerical settings for yields, risk and cash-flow simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Parallel rate shift for duration and convexity
    #[serde(default = "default_risk_bump")]
    pub risk_bump: f64,

    /// Balance below which a simulated pool is paid off
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,

    /// Flat-yield solver settings
    #[serde(default)]
    pub yield_solver: YieldSolverConfig,
}

fn default_risk_bump() -> f64 {
    DEFAULT_BUMP_SIZE
}

fn default_balance_tolerance() -> Decimal {
    DEFAULT_BALANCE_TOLERANCE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_bump: default_risk_bump(),
            balance_tolerance: default_balance_tolerance(),
            yield_solver: YieldSolverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidConfig` for malformed TOML or invalid
    /// settings.
    pub fn from_toml_str(content: &str) -> LoanResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| LoanError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidConfig` if the file cannot be read or
    /// does not hold a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> LoanResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoanError::invalid_config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> LoanResult<String> {
        toml::to_string(self).map_err(|e| LoanError::invalid_config(e.to_string()))
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::InvalidConfig` naming the first invalid setting.
    pub fn validate(&self) -> LoanResult<()> {
        self.yield_solver
            .validate()
            .map_err(|e| LoanError::invalid_config(format!("yield_solver: {e}")))?;
        if !self.risk_bump.is_finite() || self.risk_bump <= 0.0 {
            return Err(LoanError::invalid_config(format!(
                "risk_bump must be positive, got {}",
                self.risk_bump
            )));
        }
        if self.balance_tolerance < Decimal::ZERO {
            return Err(LoanError::invalid_config(format!(
                "balance_tolerance must not be negative, got {}",
                self.balance_tolerance
            )));
        }
        Ok(())
    }
}
