//! cf-units: the unit table for calcflow.
//!
//! Provides:
//! - `Dimension`: closed set of physical categories, each with one base unit
//! - `UnitDefinition` tables with factor/offset conversion to the base unit
//! - `to_base` / `from_base` / `convert` over those tables
//! - value+unit text parsing (`"5 kg"`, `"70°F"`)

pub mod dimension;
pub mod error;
pub mod parse;
pub mod table;

pub use dimension::Dimension;
pub use error::{UnitError, UnitResult};
pub use parse::{parse_number, parse_quantity, split_value_and_unit};
pub use table::{UnitDefinition, base_unit, convert, from_base, lookup, to_base, units_for};
