//! Number formatting shared by results and calculation steps.
//!
//! Large and tiny magnitudes switch to exponential notation, everything else
//! is fixed-point with trailing zeros trimmed.

use crate::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thresholds and precision for displaying numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatPolicy {
    /// Magnitudes at or above this use exponential notation.
    pub exp_upper: Real,
    /// Non-zero magnitudes below this use exponential notation.
    pub exp_lower: Real,
    /// Fraction digits, both for the mantissa and for fixed-point output.
    pub digits: usize,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            exp_upper: 1e6,
            exp_lower: 1e-4,
            digits: 4,
        }
    }
}

impl FormatPolicy {
    pub fn format(&self, v: Real) -> String {
        if !v.is_finite() {
            return "Invalid".to_string();
        }
        if v == 0.0 {
            return "0".to_string();
        }
        let mag = v.abs();
        if mag >= self.exp_upper || mag < self.exp_lower {
            return self.exponential(v);
        }
        let fixed = format!("{:.*}", self.digits, v);
        let trimmed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            fixed.as_str()
        };
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Value followed by its unit symbol, without a dangling space for
    /// dimensionless units.
    pub fn with_unit(&self, v: Real, unit: &str) -> String {
        let value = self.format(v);
        if unit.is_empty() {
            value
        } else {
            format!("{value} {unit}")
        }
    }

    fn exponential(&self, v: Real) -> String {
        let raw = format!("{:.*e}", self.digits, v);
        match raw.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{mantissa}e{sign}{digits}")
            }
            None => raw,
        }
    }
}

/// Format with the default policy.
pub fn format_value(v: Real) -> String {
    FormatPolicy::default().format(v)
}
