//! Shared application layer for calcflow.
//!
//! Front ends drive calculators through this crate instead of calling the
//! solver directly: a form is a `FormState` plus a pure reducer, and the
//! configuration file supplies number formatting and preferred units.
//!
//! Contains:
//! - `form`: the calculator form controller and its view model
//! - `converter`: the two's-complement converter form
//! - `config`: YAML configuration, validated against the registry
//! - `service`: formula and unit listings for front ends

pub mod config;
pub mod converter;
pub mod error;
pub mod form;
pub mod service;

pub use config::{AppConfig, load_config, save_config};
pub use converter::{ConverterAction, ConverterState, ConverterStatus, Direction};
pub use error::{AppError, AppResult};
pub use form::{Action, FormController, FormState, FormView, ResultBlock, Status, view};
pub use service::{
    FormulaDetail, FormulaSummary, QuantitySummary, RearrangementSummary, UnitSummary,
    describe_formula, list_formulas, list_units, standard_registry, to_json,
};
