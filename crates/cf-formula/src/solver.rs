//! The generic "solve for the missing quantity" engine.
//!
//! Selection, validation, evaluation and denormalization happen in that order,
//! so a completeness problem is reported before a bad number and a bad number
//! before a domain failure.

use std::collections::BTreeSet;

use cf_core::{Real, ensure_finite};
use cf_units::{UnitDefinition, lookup, parse_number};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SolveError, SolveResult};
use crate::quantity::{QuantityDef, Role};
use crate::spec::{Evaluation, FormulaSpec, Inputs, Rearrangement};

/// Raw form input for one quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub raw: String,
    pub unit: String,
}

impl Field {
    pub fn new(key: impl Into<String>, raw: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
            unit: unit.into(),
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.raw.trim().is_empty()
    }
}

/// An input as the solver used it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
    pub quantity: QuantityDef,
    /// Value in the entered unit.
    pub value: Real,
    pub unit: &'static UnitDefinition,
    /// Value in the dimension's base unit.
    pub base: Real,
    /// Taken from the quantity's preset because the field was empty.
    pub defaulted: bool,
}

/// Everything the narrator needs about one successful calculation.
#[derive(Debug, Clone)]
pub struct Solution {
    pub formula_id: &'static str,
    pub formula_name: &'static str,
    pub target: QuantityDef,
    pub rearrangement: Rearrangement,
    pub inputs: Vec<ResolvedInput>,
    pub evaluation: Evaluation,
    /// Output unit requested for the target.
    pub unit: &'static UnitDefinition,
    /// Result in `unit`.
    pub value: Real,
}

impl Solution {
    /// Result in base units.
    pub fn base_value(&self) -> Real {
        self.evaluation.value
    }
}

/// Solve `spec` from raw fields.
///
/// With `target = None` the target is inferred from which variables are
/// empty; with `Some(key)` the target's own field is ignored and the first
/// rearrangement whose required inputs are filled is used.
pub fn solve(spec: &FormulaSpec, fields: &[Field], target: Option<&str>) -> SolveResult<Solution> {
    for field in fields {
        if spec.quantity(&field.key).is_none() {
            return Err(SolveError::UnknownQuantity {
                formula: spec.id,
                key: field.key.clone(),
            });
        }
    }

    let target = target.map(|key| resolve_target(spec, key)).transpose()?;
    let filled: BTreeSet<&'static str> = spec
        .variables()
        .filter(|q| target.is_none_or(|t| t.key != q.key))
        .filter(|q| field_for(fields, q.key).is_some_and(Field::is_filled))
        .map(|q| q.key)
        .collect();

    let chosen = select(spec, &filled, target)?;
    let target = *spec.quantity(chosen.target).ok_or_else(|| SolveError::UnknownQuantity {
        formula: spec.id,
        key: chosen.target.to_string(),
    })?;

    let (resolved, inputs) = resolve_inputs(spec, chosen, fields)?;
    let evaluation = (chosen.eval)(&inputs)?;
    ensure_finite(evaluation.value, target.name)?;
    if !target.constraint.admits(evaluation.value) {
        return Err(SolveError::ResultConstraint {
            quantity: target.name,
            constraint: target.constraint,
        });
    }

    let unit = output_unit(&target, fields)?;
    let value = unit.from_base(evaluation.value);

    debug!(
        formula = spec.id,
        target = target.key,
        inputs = ?chosen.requires,
        base = evaluation.value,
        "solved"
    );

    Ok(Solution {
        formula_id: spec.id,
        formula_name: spec.name,
        target,
        rearrangement: *chosen,
        inputs: resolved,
        evaluation,
        unit,
        value,
    })
}

fn field_for<'f>(fields: &'f [Field], key: &str) -> Option<&'f Field> {
    fields.iter().find(|f| f.key == key)
}

fn resolve_target<'s>(spec: &'s FormulaSpec, key: &str) -> SolveResult<&'s QuantityDef> {
    let quantity = spec
        .quantity(key)
        .ok_or_else(|| SolveError::UnknownQuantity {
            formula: spec.id,
            key: key.to_string(),
        })?;
    if quantity.role == Role::Parameter {
        return Err(SolveError::NotSolvable {
            quantity: quantity.name,
        });
    }
    Ok(quantity)
}

fn covers(r: &Rearrangement, filled: &BTreeSet<&'static str>) -> bool {
    r.requires.iter().all(|k| filled.contains(k))
}

fn select<'s>(
    spec: &'s FormulaSpec,
    filled: &BTreeSet<&'static str>,
    target: Option<&QuantityDef>,
) -> SolveResult<&'s Rearrangement> {
    if let Some(target) = target {
        return spec
            .rearrangements_for(target.key)
            .find(|r| covers(r, filled))
            .ok_or_else(|| SolveError::Incomplete {
                expected: format!(
                    "{} to calculate {}",
                    describe_groups(spec, target.key),
                    target.name.to_lowercase()
                ),
            });
    }

    let candidates: Vec<&Rearrangement> = spec
        .rearrangements
        .iter()
        .filter(|r| !filled.contains(r.target))
        .filter(|r| covers(r, filled))
        .filter(|r| filled.iter().all(|k| r.uses(k)))
        .collect();

    let mut targets: Vec<&'static str> = Vec::new();
    for r in &candidates {
        if !targets.contains(&r.target) {
            targets.push(r.target);
        }
    }

    match (candidates.first(), targets.len()) {
        (Some(r), 1) => Ok(*r),
        (_, 0) => Err(SolveError::Incomplete {
            expected: completeness_hint(spec),
        }),
        _ => Err(SolveError::Ambiguous {
            candidates: targets
                .iter()
                .filter_map(|k| spec.quantity(k).map(|q| q.name))
                .collect(),
        }),
    }
}

fn completeness_hint(spec: &FormulaSpec) -> String {
    if spec.is_single_alternative() {
        let n = spec.variables().count().saturating_sub(1);
        format!("exactly {n} values (leave one empty to calculate it)")
    } else {
        let groups: Vec<String> = spec
            .rearrangements
            .iter()
            .map(|r| {
                let target = spec.quantity(r.target).map_or(r.target, |q| q.symbol);
                format!("{} to find {target}", symbols(spec, r.requires))
            })
            .collect();
        format!("one complete set of values: {}", groups.join("; or "))
    }
}

fn describe_groups(spec: &FormulaSpec, target: &str) -> String {
    let groups: Vec<String> = spec
        .rearrangements_for(target)
        .map(|r| symbols(spec, r.requires))
        .collect();
    groups.join(", or ")
}

/// `["m", "g", "h"]` -> `"m, g and h"` using display symbols.
fn symbols(spec: &FormulaSpec, keys: &[&'static str]) -> String {
    let names: Vec<&str> = keys
        .iter()
        .map(|&k| spec.quantity(k).map_or(k, |q| q.symbol))
        .collect();
    match names.split_last() {
        None => "nothing".to_string(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

fn resolve_inputs(
    spec: &FormulaSpec,
    chosen: &Rearrangement,
    fields: &[Field],
) -> SolveResult<(Vec<ResolvedInput>, Inputs)> {
    let mut resolved = Vec::new();
    let mut inputs = Inputs::new();

    for q in spec.quantities.iter().filter(|q| chosen.uses(q.key)) {
        let field = field_for(fields, q.key);
        let entered = field.filter(|f| f.is_filled());

        let (value, unit_text, defaulted) = match (entered, q.default_value) {
            (Some(f), _) => {
                let value = parse_number(&f.raw)
                    .map_err(|_| SolveError::InvalidNumber { quantity: q.name })?;
                (value, f.unit.as_str(), false)
            }
            (None, Some(preset)) if !chosen.requires.contains(&q.key) => {
                (preset, q.default_unit, true)
            }
            // Optional and empty: the rearrangement falls back on its own.
            (None, _) if !chosen.requires.contains(&q.key) => continue,
            (None, _) => {
                return Err(SolveError::Incomplete {
                    expected: format!("a value for {}", q.name.to_lowercase()),
                });
            }
        };

        let unit_text = if unit_text.trim().is_empty() {
            q.default_unit
        } else {
            unit_text
        };
        let unit = lookup(q.dimension, unit_text).map_err(|source| SolveError::UnknownUnit {
            quantity: q.name,
            source,
        })?;
        let base = unit.to_base(value);
        if !q.constraint.admits(base) {
            return Err(SolveError::ConstraintViolated {
                quantity: q.name,
                constraint: q.constraint,
            });
        }

        inputs.insert(q.key, base);
        resolved.push(ResolvedInput {
            quantity: *q,
            value,
            unit,
            base,
            defaulted,
        });
    }

    Ok((resolved, inputs))
}

fn output_unit(target: &QuantityDef, fields: &[Field]) -> SolveResult<&'static UnitDefinition> {
    let requested = field_for(fields, target.key)
        .map(|f| f.unit.trim())
        .filter(|u| !u.is_empty())
        .unwrap_or(target.default_unit);
    lookup(target.dimension, requested).map_err(|source| SolveError::UnknownUnit {
        quantity: target.name,
        source,
    })
}
