//! Text input parsing.
//!
//! Numbers are parsed strictly: `"12abc"` is an error, not 12.

use crate::{Dimension, UnitDefinition, UnitError, UnitResult, lookup};

/// Parse a raw field into a finite number.
pub fn parse_number(raw: &str) -> UnitResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UnitError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(UnitError::InvalidNumber {
            text: trimmed.to_string(),
        }),
    }
}

/// Split a value+unit string into (numeric text, unit text).
///
/// Examples:
/// - "70°F" -> ("70", "°F")
/// - "14.7 psi" -> ("14.7", "psi")
/// - "1e-3 m" -> ("1e-3", "m")
/// - "5eV" -> ("5", "eV")
/// - "300" -> ("300", "")
pub fn split_value_and_unit(input: &str) -> (&str, &str) {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    idx += digits(idx);
    if bytes.get(idx) == Some(&b'.') {
        idx += 1;
        idx += digits(idx);
    }
    // An exponent only counts when digits follow it, so "5eV" keeps its unit.
    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        let mut exp = idx + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let n = digits(exp);
        if n > 0 {
            idx = exp + n;
        }
    }

    let (num, unit) = trimmed.split_at(idx);
    (num.trim(), unit.trim())
}

/// Parse `"<number> <unit>"` for a dimension. A missing unit means the base unit.
pub fn parse_quantity(
    text: &str,
    dimension: Dimension,
) -> UnitResult<(f64, &'static UnitDefinition)> {
    let (num, unit) = split_value_and_unit(text);
    let value = parse_number(num).map_err(|err| match err {
        UnitError::Empty if !text.trim().is_empty() => UnitError::InvalidNumber {
            text: text.trim().to_string(),
        },
        other => other,
    })?;
    let unit = lookup(dimension, unit)?;
    Ok((value, unit))
}
