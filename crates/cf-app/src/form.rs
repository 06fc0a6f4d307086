//! Calculator form controller.
//!
//! A form is plain data (`FormState`) changed only through `reduce`, so a
//! front end keeps one state value per calculator and renders `view(&state)`
//! after every action:
//!
//! `Idle -> edits -> Idle -> Calculate -> Success | Error -> edit or Clear -> Idle`

use std::collections::BTreeMap;

use cf_core::FormatPolicy;
use cf_formula::{CalculationResult, ErrorKind, Field, FormulaSpec, SolveError, narrate, solve};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of the last action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Status {
    Idle,
    Success(CalculationResult),
    Error { kind: ErrorKind, message: String },
}

impl Status {
    fn from_error(err: &SolveError) -> Self {
        Status::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Input fields of one calculator plus the calculation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub formula_id: String,
    /// Quantity selected in the mode selector; `None` means "the empty field".
    pub target: Option<String>,
    pub fields: Vec<Field>,
    pub status: Status,
}

impl FormState {
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SetValue { key: String, raw: String },
    SetUnit { key: String, unit: String },
    SelectTarget(Option<String>),
    Calculate,
    Clear,
}

/// Binds one formula to a format policy and the preferred units.
#[derive(Debug, Clone)]
pub struct FormController<'s> {
    spec: &'s FormulaSpec,
    policy: FormatPolicy,
    overrides: BTreeMap<String, String>,
}

impl<'s> FormController<'s> {
    pub fn new(spec: &'s FormulaSpec, policy: FormatPolicy) -> Self {
        Self {
            spec,
            policy,
            overrides: BTreeMap::new(),
        }
    }

    /// Start fields in these units instead of each quantity's default unit.
    /// Keys the formula does not declare are ignored.
    pub fn with_unit_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        self.overrides = overrides
            .iter()
            .filter(|(key, _)| self.spec.quantity(key).is_some())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self
    }

    pub fn spec(&self) -> &'s FormulaSpec {
        self.spec
    }

    pub fn policy(&self) -> &FormatPolicy {
        &self.policy
    }

    /// Fields in their preferred units with presets filled in.
    pub fn initial_state(&self) -> FormState {
        let fields = self
            .spec
            .quantities
            .iter()
            .map(|q| {
                let unit = self
                    .overrides
                    .get(q.key)
                    .map_or(q.default_unit, String::as_str);
                let preset = q.default_value.map(|v| v.to_string()).unwrap_or_default();
                Field::new(q.key, preset, unit)
            })
            .collect();

        FormState {
            formula_id: self.spec.id.to_string(),
            target: None,
            fields,
            status: Status::Idle,
        }
    }

    pub fn reduce(&self, mut state: FormState, action: Action) -> FormState {
        match action {
            Action::SetValue { key, raw } => match state.field_mut(&key) {
                Some(field) => {
                    field.raw = raw;
                    state.status = Status::Idle;
                }
                None => state.status = self.unknown_key(key),
            },
            Action::SetUnit { key, unit } => match state.field_mut(&key) {
                Some(field) => {
                    field.unit = unit;
                    state.status = Status::Idle;
                }
                None => state.status = self.unknown_key(key),
            },
            Action::SelectTarget(None) => {
                state.target = None;
                state.status = Status::Idle;
            }
            Action::SelectTarget(Some(key)) => match self.spec.quantity(&key) {
                Some(q) if q.is_variable() => {
                    state.target = Some(key);
                    state.status = Status::Idle;
                }
                Some(q) => {
                    state.status = Status::from_error(&SolveError::NotSolvable { quantity: q.name });
                }
                None => state.status = self.unknown_key(key),
            },
            Action::Calculate => state.status = self.calculate(&state),
            Action::Clear => return self.initial_state(),
        }
        state
    }

    fn calculate(&self, state: &FormState) -> Status {
        match solve(self.spec, &state.fields, state.target.as_deref()) {
            Ok(solution) => {
                let result = narrate(&solution, &self.policy);
                debug!(
                    formula = self.spec.id,
                    target = solution.target.key,
                    value = %result.formatted,
                    "calculated"
                );
                Status::Success(result)
            }
            Err(err) => {
                debug!(formula = self.spec.id, kind = ?err.kind(), error = %err, "calculation failed");
                Status::from_error(&err)
            }
        }
    }

    fn unknown_key(&self, key: String) -> Status {
        warn!(formula = self.spec.id, key = %key, "edit for unknown field");
        Status::from_error(&SolveError::UnknownQuantity {
            formula: self.spec.id,
            key,
        })
    }
}

/// The block a front end shows for a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBlock {
    pub formatted_value: String,
    pub unit: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormView {
    Idle,
    Result {
        block: ResultBlock,
        steps: Vec<String>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

pub fn view(state: &FormState) -> FormView {
    match &state.status {
        Status::Idle => FormView::Idle,
        Status::Success(result) => FormView::Result {
            block: ResultBlock {
                formatted_value: result.formatted.clone(),
                unit: result.unit.clone(),
                label: format!("{} ({})", result.label, result.symbol),
            },
            steps: result.steps.clone(),
        },
        Status::Error { kind, message } => FormView::Error {
            kind: *kind,
            message: message.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_formula::FormulaRegistry;

    fn spec(id: &str) -> &'static FormulaSpec {
        FormulaRegistry::standard().unwrap().get(id).unwrap()
    }

    fn set(key: &str, raw: &str) -> Action {
        Action::SetValue {
            key: key.to_string(),
            raw: raw.to_string(),
        }
    }

    #[test]
    fn initial_state_uses_defaults() {
        let controller = FormController::new(spec("potential-energy"), FormatPolicy::default());
        let state = controller.initial_state();
        assert_eq!(state.formula_id, "potential-energy");
        assert_eq!(state.status, Status::Idle);
        let g = state.field("g").unwrap();
        assert_eq!(g.raw, "9.80665");
        assert_eq!(g.unit, "m/s²");
        assert_eq!(state.field("pe").unwrap().raw, "");
    }

    #[test]
    fn overrides_change_starting_units_only_for_known_keys() {
        let overrides = BTreeMap::from([
            ("q".to_string(), "L/s".to_string()),
            ("bogus".to_string(), "m".to_string()),
        ]);
        let controller = FormController::new(spec("pipe-flow"), FormatPolicy::default())
            .with_unit_overrides(&overrides);
        let state = controller.initial_state();
        assert_eq!(state.field("q").unwrap().unit, "L/s");
        assert!(state.field("bogus").is_none());
    }

    #[test]
    fn calculate_then_edit_returns_to_idle() {
        let controller = FormController::new(spec("cube-surface-area"), FormatPolicy::default());
        let state = controller.reduce(controller.initial_state(), set("s", "5"));
        let state = controller.reduce(state, Action::Calculate);
        match view(&state) {
            FormView::Result { block, steps } => {
                assert_eq!(block.formatted_value, "150");
                assert_eq!(block.unit, "m²");
                assert_eq!(block.label, "Surface area (SA)");
                assert!(!steps.is_empty());
            }
            other => panic!("expected a result, got {other:?}"),
        }

        let state = controller.reduce(state, set("s", "6"));
        assert_eq!(view(&state), FormView::Idle);
    }

    #[test]
    fn unknown_key_leaves_fields_alone() {
        let controller = FormController::new(spec("cube-surface-area"), FormatPolicy::default());
        let before = controller.initial_state();
        let after = controller.reduce(before.clone(), set("side", "5"));
        assert_eq!(after.fields, before.fields);
        assert!(matches!(
            view(&after),
            FormView::Error { kind: ErrorKind::Validity, .. }
        ));
    }

    #[test]
    fn parameters_cannot_be_selected_as_target() {
        let controller = FormController::new(spec("darcy-weisbach"), FormatPolicy::default());
        let state = controller.reduce(
            controller.initial_state(),
            Action::SelectTarget(Some("rho".to_string())),
        );
        assert_eq!(state.target, None);
        assert!(matches!(state.status, Status::Error { .. }));
    }
}
