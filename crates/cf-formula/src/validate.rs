//! Formula and registry validation.

use std::collections::HashSet;

use cf_units::lookup;

use crate::error::{SpecError, SpecResult};
use crate::spec::FormulaSpec;

/// Validate a formula: keys are unique and declared, every variable is
/// solvable, rearrangements are distinct and well-formed, defaults resolve.
pub(crate) fn validate_formula(spec: &FormulaSpec) -> SpecResult<()> {
    let formula = spec.id;

    if spec.quantities.is_empty() {
        return Err(SpecError::Empty { formula });
    }

    // Unique quantity keys
    let mut keys = HashSet::new();
    for q in &spec.quantities {
        if !keys.insert(q.key) {
            return Err(SpecError::DuplicateQuantity { formula, key: q.key });
        }
    }

    // Defaults must resolve against the unit table
    for q in &spec.quantities {
        if lookup(q.dimension, q.default_unit).is_err() {
            return Err(SpecError::BadDefaultUnit {
                formula,
                key: q.key,
                unit: q.default_unit,
            });
        }
        if let Some(value) = q.default_value {
            if !value.is_finite() {
                return Err(SpecError::BadDefaultValue {
                    formula,
                    key: q.key,
                    value,
                });
            }
        }
    }

    let mut seen_cases: Vec<(&'static str, Vec<&'static str>)> = Vec::new();
    for r in &spec.rearrangements {
        let target = spec.quantity(r.target).ok_or(SpecError::UnknownKey {
            formula,
            key: r.target,
        })?;
        if !target.is_variable() {
            return Err(SpecError::ParameterTarget {
                formula,
                key: r.target,
            });
        }

        for &key in r.requires.iter().chain(r.optional) {
            if spec.quantity(key).is_none() {
                return Err(SpecError::UnknownKey { formula, key });
            }
            if key == r.target {
                return Err(SpecError::SelfDependent {
                    formula,
                    target: r.target,
                });
            }
        }

        let mut requires = r.requires.to_vec();
        requires.sort_unstable();
        if seen_cases
            .iter()
            .any(|(t, req)| *t == r.target && *req == requires)
        {
            return Err(SpecError::DuplicateRearrangement {
                formula,
                target: r.target,
            });
        }
        seen_cases.push((r.target, requires));
    }

    // Every variable needs at least one way to be solved
    for q in spec.variables() {
        if spec.rearrangements_for(q.key).next().is_none() {
            return Err(SpecError::Unsolvable {
                formula,
                key: q.key,
            });
        }
    }

    Ok(())
}

/// Formula ids must be unique across a registry.
pub(crate) fn validate_registry(formulas: &[FormulaSpec]) -> SpecResult<()> {
    let mut ids = HashSet::new();
    for spec in formulas {
        if !ids.insert(spec.id) {
            return Err(SpecError::DuplicateFormula { id: spec.id });
        }
    }
    Ok(())
}
