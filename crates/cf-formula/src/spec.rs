//! Formula specifications and their builder.

use std::collections::BTreeMap;

use cf_core::{CfError, CfResult, Real};
use cf_units::Dimension;

use crate::error::SpecResult;
use crate::quantity::QuantityDef;
use crate::validate;

/// Evaluates one rearrangement over base-unit inputs.
pub type EvalFn = fn(&Inputs) -> CfResult<Evaluation>;

/// Base-unit values handed to a rearrangement, keyed by quantity key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    values: BTreeMap<&'static str, Real>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: Real) {
        self.values.insert(key, value);
    }

    /// A required input. The solver guarantees presence; absence is a bug.
    pub fn get(&self, key: &str) -> CfResult<Real> {
        self.values.get(key).copied().ok_or(CfError::Invariant {
            what: "required input missing from rearrangement inputs",
        })
    }

    /// An optional input, `None` when the field was left empty.
    pub fn opt(&self, key: &str) -> Option<Real> {
        self.values.get(key).copied()
    }

    pub fn with(mut self, key: &'static str, value: Real) -> Self {
        self.insert(key, value);
        self
    }
}

/// A named intermediate value shown by the narrator.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub symbol: &'static str,
    pub expression: &'static str,
    pub value: Real,
    pub dimension: Dimension,
}

/// A secondary result reported next to the main one.
#[derive(Debug, Clone, PartialEq)]
pub struct Extra {
    pub label: &'static str,
    pub value: Real,
    pub dimension: Dimension,
}

/// Outcome of a rearrangement, in base units.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Real,
    pub terms: Vec<Term>,
    pub extras: Vec<Extra>,
}

impl Evaluation {
    pub fn of(value: Real) -> Self {
        Self {
            value,
            terms: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub fn term(
        mut self,
        symbol: &'static str,
        expression: &'static str,
        value: Real,
        dimension: Dimension,
    ) -> Self {
        self.terms.push(Term {
            symbol,
            expression,
            value,
            dimension,
        });
        self
    }

    pub fn extra(mut self, label: &'static str, value: Real, dimension: Dimension) -> Self {
        self.extras.push(Extra {
            label,
            value,
            dimension,
        });
        self
    }
}

/// One "solve for X" case.
#[derive(Debug, Clone, Copy)]
pub struct Rearrangement {
    pub target: &'static str,
    /// Keys that must be filled.
    pub requires: &'static [&'static str],
    /// Keys used when present.
    pub optional: &'static [&'static str],
    /// Symbolic form, e.g. `m = PE / (g × h)`.
    pub equation: &'static str,
    /// Same form with `{key}` placeholders for substituted values.
    pub substitution: &'static str,
    pub eval: EvalFn,
}

impl Rearrangement {
    pub const fn new(
        target: &'static str,
        requires: &'static [&'static str],
        equation: &'static str,
        substitution: &'static str,
        eval: EvalFn,
    ) -> Self {
        Self {
            target,
            requires,
            optional: &[],
            equation,
            substitution,
            eval,
        }
    }

    pub const fn with_optional(self, optional: &'static [&'static str]) -> Self {
        Self { optional, ..self }
    }

    /// Whether `key` feeds this rearrangement.
    pub fn uses(&self, key: &str) -> bool {
        self.requires.contains(&key) || self.optional.contains(&key)
    }
}

/// A validated formula: quantities plus every supported rearrangement.
#[derive(Debug, Clone)]
pub struct FormulaSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub equation: &'static str,
    pub quantities: Vec<QuantityDef>,
    pub rearrangements: Vec<Rearrangement>,
}

impl FormulaSpec {
    pub fn builder(
        id: &'static str,
        name: &'static str,
        equation: &'static str,
    ) -> FormulaBuilder {
        FormulaBuilder {
            spec: FormulaSpec {
                id,
                name,
                equation,
                quantities: Vec::new(),
                rearrangements: Vec::new(),
            },
        }
    }

    pub fn quantity(&self, key: &str) -> Option<&QuantityDef> {
        self.quantities.iter().find(|q| q.key == key)
    }

    pub fn variables(&self) -> impl Iterator<Item = &QuantityDef> {
        self.quantities.iter().filter(|q| q.is_variable())
    }

    pub fn rearrangements_for<'a>(
        &'a self,
        target: &'a str,
    ) -> impl Iterator<Item = &'a Rearrangement> {
        self.rearrangements.iter().filter(move |r| r.target == target)
    }

    /// True when every variable has one rearrangement needing all the others,
    /// i.e. the classic "fill k-1 of k fields" form.
    pub fn is_single_alternative(&self) -> bool {
        let vars: Vec<&'static str> = self.variables().map(|q| q.key).collect();
        vars.iter().all(|&target| {
            let mut cases = self.rearrangements_for(target);
            match (cases.next(), cases.next()) {
                (Some(r), None) => {
                    r.requires.len() == vars.len() - 1
                        && vars.iter().all(|&k| k == target || r.requires.contains(&k))
                }
                _ => false,
            }
        })
    }
}

/// Collects quantities and rearrangements, then validates on `build`.
#[derive(Debug)]
pub struct FormulaBuilder {
    spec: FormulaSpec,
}

impl FormulaBuilder {
    pub fn quantity(mut self, quantity: QuantityDef) -> Self {
        self.spec.quantities.push(quantity);
        self
    }

    pub fn rearrangement(mut self, rearrangement: Rearrangement) -> Self {
        self.spec.rearrangements.push(rearrangement);
        self
    }

    pub fn build(self) -> SpecResult<FormulaSpec> {
        validate::validate_formula(&self.spec)?;
        Ok(self.spec)
    }
}
