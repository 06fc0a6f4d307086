//! Step narration.
//!
//! Reads a `Solution` and renders it; nothing here recomputes a value, so the
//! steps always show the numbers the result was built from.

use cf_core::{FormatPolicy, Real};
use cf_units::{Dimension, base_unit};
use serde::{Deserialize, Serialize};

use crate::solver::Solution;

/// A finished calculation ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Result in `unit`.
    pub value: Real,
    pub unit: String,
    /// Display symbol of the solved quantity.
    pub symbol: String,
    /// Human name of the solved quantity.
    pub label: String,
    /// `value` under the format policy.
    pub formatted: String,
    pub steps: Vec<String>,
}

pub fn narrate(solution: &Solution, policy: &FormatPolicy) -> CalculationResult {
    let mut steps = Vec::new();

    steps.push("Given:".to_string());
    for input in &solution.inputs {
        let q = &input.quantity;
        let mut line = format!(
            "  {} {} = {}",
            q.name,
            q.symbol,
            policy.with_unit(input.value, input.unit.symbol)
        );
        if !input.unit.is_base() {
            line.push_str(" = ");
            line.push_str(&in_base(policy, input.base, q.dimension));
        }
        if input.defaulted {
            line.push_str(" (default)");
        }
        steps.push(line);
    }

    let eval = &solution.evaluation;
    if !eval.terms.is_empty() {
        steps.push("Intermediate:".to_string());
        for term in &eval.terms {
            steps.push(format!(
                "  {} = {} = {}",
                term.symbol,
                term.expression,
                in_base(policy, term.value, term.dimension)
            ));
        }
    }

    steps.push(format!("Formula: {}", solution.rearrangement.equation));
    steps.push(format!(
        "Substitute: {}",
        substitute(solution.rearrangement.substitution, solution, policy)
    ));

    let target = &solution.target;
    let mut result = format!(
        "Result: {} = {}",
        target.symbol,
        in_base(policy, solution.base_value(), target.dimension)
    );
    if !solution.unit.is_base() {
        result.push_str(" = ");
        result.push_str(&policy.with_unit(solution.value, solution.unit.symbol));
    }
    steps.push(result);

    for extra in &eval.extras {
        steps.push(format!(
            "{}: {}",
            extra.label,
            in_base(policy, extra.value, extra.dimension)
        ));
    }

    CalculationResult {
        value: solution.value,
        unit: solution.unit.symbol.to_string(),
        symbol: target.symbol.to_string(),
        label: target.name.to_string(),
        formatted: policy.format(solution.value),
        steps,
    }
}

fn in_base(policy: &FormatPolicy, value: Real, dimension: Dimension) -> String {
    policy.with_unit(value, base_unit(dimension).symbol)
}

/// Replace `{key}` placeholders with base values. Keys name inputs first,
/// then intermediate terms; unknown placeholders are left as written.
fn substitute(template: &str, solution: &Solution, policy: &FormatPolicy) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match placeholder(key, solution) {
            Some((value, dimension)) => {
                let text = in_base(policy, value, dimension);
                if value < 0.0 {
                    out.push('(');
                    out.push_str(&text);
                    out.push(')');
                } else {
                    out.push_str(&text);
                }
            }
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

fn placeholder(key: &str, solution: &Solution) -> Option<(Real, Dimension)> {
    solution
        .inputs
        .iter()
        .find(|i| i.quantity.key == key)
        .map(|i| (i.base, i.quantity.dimension))
        .or_else(|| {
            solution
                .evaluation
                .terms
                .iter()
                .find(|t| t.symbol == key)
                .map(|t| (t.value, t.dimension))
        })
}
