//! Formula and unit introspection for front ends.

use cf_formula::{FormulaRegistry, FormulaSpec, Role};
use cf_units::{Dimension, units_for};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Summary of a formula for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaSummary {
    pub id: String,
    pub name: String,
    pub equation: String,
    pub quantity_count: usize,
    /// More than one way to compute at least one quantity.
    pub has_modes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantitySummary {
    pub key: String,
    pub symbol: String,
    pub name: String,
    pub dimension: String,
    pub default_unit: String,
    pub default_value: Option<String>,
    pub constraint: String,
    pub solvable: bool,
    pub units: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RearrangementSummary {
    pub target: String,
    pub requires: Vec<String>,
    pub optional: Vec<String>,
    pub equation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaDetail {
    pub id: String,
    pub name: String,
    pub equation: String,
    pub quantities: Vec<QuantitySummary>,
    pub rearrangements: Vec<RearrangementSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSummary {
    pub symbol: String,
    pub name: String,
    pub factor: f64,
    pub offset: f64,
    pub aliases: Vec<String>,
    pub base: bool,
}

/// The built-in catalogue.
pub fn standard_registry() -> AppResult<&'static FormulaRegistry> {
    Ok(FormulaRegistry::standard()?)
}

fn strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn has_modes(spec: &FormulaSpec) -> bool {
    spec.variables()
        .any(|q| spec.rearrangements_for(q.key).nth(1).is_some())
}

/// List every formula in catalogue order.
pub fn list_formulas(registry: &FormulaRegistry) -> Vec<FormulaSummary> {
    registry
        .iter()
        .map(|spec| FormulaSummary {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            equation: spec.equation.to_string(),
            quantity_count: spec.quantities.len(),
            has_modes: has_modes(spec),
        })
        .collect()
}

/// Quantities, units and rearrangements of one formula.
pub fn describe_formula(registry: &FormulaRegistry, id: &str) -> AppResult<FormulaDetail> {
    let spec = registry
        .get(id)
        .map_err(|_| AppError::NotFound(format!("formula '{id}'")))?;

    let quantities = spec
        .quantities
        .iter()
        .map(|q| QuantitySummary {
            key: q.key.to_string(),
            symbol: q.symbol.to_string(),
            name: q.name.to_string(),
            dimension: q.dimension.key().to_string(),
            default_unit: q.default_unit.to_string(),
            default_value: q.default_value.map(|v| v.to_string()),
            constraint: q.constraint.to_string(),
            solvable: q.role == Role::Variable,
            units: units_for(q.dimension).map(|u| u.symbol.to_string()).collect(),
        })
        .collect();

    let rearrangements = spec
        .rearrangements
        .iter()
        .map(|r| RearrangementSummary {
            target: r.target.to_string(),
            requires: strings(r.requires),
            optional: strings(r.optional),
            equation: r.equation.to_string(),
        })
        .collect();

    Ok(FormulaDetail {
        id: spec.id.to_string(),
        name: spec.name.to_string(),
        equation: spec.equation.to_string(),
        quantities,
        rearrangements,
    })
}

/// Units of a dimension given by its kebab-case name, e.g. `flow-rate`.
pub fn list_units(dimension: &str) -> AppResult<Vec<UnitSummary>> {
    let dimension: Dimension = dimension
        .parse()
        .map_err(|_| AppError::NotFound(format!("dimension '{dimension}'")))?;

    Ok(units_for(dimension)
        .map(|u| UnitSummary {
            symbol: u.symbol.to_string(),
            name: u.name.to_string(),
            factor: u.factor,
            offset: u.offset,
            aliases: strings(u.aliases),
            base: u.is_base(),
        })
        .collect())
}

/// Pretty JSON for machine-readable output.
pub fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
