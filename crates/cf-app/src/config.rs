//! Configuration loading, saving and validation.
//!
//! ```yaml
//! format:
//!   exp_upper: 1000000.0
//!   exp_lower: 0.0001
//!   digits: 4
//! default_units:
//!   pipe-flow:
//!     q: L/s
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use cf_core::FormatPolicy;
use cf_formula::FormulaRegistry;
use cf_units::lookup;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Largest number of fraction digits the formatter accepts.
const MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub format: FormatPolicy,
    /// Preferred unit per formula id and quantity key.
    pub default_units: BTreeMap<String, BTreeMap<String, String>>,
}

impl AppConfig {
    /// Unit overrides for one formula, if any are configured.
    pub fn units_for(&self, formula_id: &str) -> Option<&BTreeMap<String, String>> {
        self.default_units.get(formula_id)
    }

    /// Check the format policy and every configured unit.
    pub fn validate(&self, registry: &FormulaRegistry) -> AppResult<()> {
        let f = &self.format;
        if !(f.exp_lower.is_finite() && f.exp_upper.is_finite()) {
            return Err(AppError::Config(
                "format thresholds must be finite".to_string(),
            ));
        }
        if f.exp_lower <= 0.0 || f.exp_lower >= f.exp_upper {
            return Err(AppError::Config(format!(
                "format thresholds must satisfy 0 < exp_lower < exp_upper (got {} and {})",
                f.exp_lower, f.exp_upper
            )));
        }
        if f.digits > MAX_DIGITS {
            return Err(AppError::Config(format!(
                "format digits must be at most {MAX_DIGITS} (got {})",
                f.digits
            )));
        }

        for (formula_id, units) in &self.default_units {
            let spec = registry
                .get(formula_id)
                .map_err(|_| AppError::Config(format!("unknown formula '{formula_id}'")))?;
            for (key, unit) in units {
                let quantity = spec.quantity(key).ok_or_else(|| {
                    AppError::Config(format!("formula '{formula_id}' has no quantity '{key}'"))
                })?;
                lookup(quantity.dimension, unit).map_err(|e| {
                    AppError::Config(format!("{formula_id}.{key}: {e}"))
                })?;
            }
        }
        Ok(())
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path, registry: &FormulaRegistry) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AppConfig = serde_yaml::from_str(&content)?;
    config.validate(registry)?;
    debug!(path = %path.display(), formulas = config.default_units.len(), "loaded config");

    Ok(config)
}

/// Save a configuration file.
pub fn save_config(path: &Path, config: &AppConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)?;

    std::fs::write(path, content).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
