//! cf-formula: declarative formulas, the solver and the step narrator.
//!
//! A `FormulaSpec` relates a handful of named quantities by one equation and
//! lists a closed-form rearrangement for every quantity that can be solved for.
//! The solver picks the rearrangement the filled fields satisfy, works in base
//! units and converts the answer once. The narrator turns the recorded
//! numbers into display steps.
//!
//! Provides:
//! - `FormulaSpec` + `FormulaBuilder` (validated on build)
//! - `FormulaRegistry` with the standard catalogue (`formulas`)
//! - `solve` and `narrate`
//! - `binary`: two's-complement conversion with steps

pub mod binary;
pub mod error;
pub mod formulas;
pub mod narrate;
pub mod quantity;
pub mod registry;
pub mod solver;
pub mod spec;

mod validate;

pub use binary::{BitWidth, TwosComplement};
pub use error::{ErrorKind, SolveError, SolveResult, SpecError, SpecResult};
pub use narrate::{CalculationResult, narrate};
pub use quantity::{Constraint, QuantityDef, Role};
pub use registry::{FormulaRegistry, RegistryBuilder};
pub use solver::{Field, ResolvedInput, Solution, solve};
pub use spec::{Evaluation, Extra, FormulaBuilder, FormulaSpec, Inputs, Rearrangement, Term};
