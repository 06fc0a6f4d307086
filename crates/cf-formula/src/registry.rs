//! Formula registry.

use std::sync::LazyLock;

use crate::error::{SolveError, SolveResult, SpecError, SpecResult};
use crate::formulas;
use crate::spec::FormulaSpec;
use crate::validate;

/// An immutable, validated collection of formulas.
#[derive(Debug, Clone)]
pub struct FormulaRegistry {
    formulas: Vec<FormulaSpec>,
}

impl FormulaRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The built-in catalogue, built once.
    pub fn standard() -> SpecResult<&'static FormulaRegistry> {
        static STANDARD: LazyLock<SpecResult<FormulaRegistry>> = LazyLock::new(|| {
            formulas::all()?
                .into_iter()
                .fold(FormulaRegistry::builder(), RegistryBuilder::register)
                .build()
        });
        STANDARD.as_ref().map_err(Clone::clone)
    }

    pub fn get(&self, id: &str) -> SolveResult<&FormulaSpec> {
        self.formulas
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| SolveError::UnknownFormula { id: id.to_string() })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormulaSpec> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

/// Collects formulas; `build` rejects duplicate ids.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    formulas: Vec<FormulaSpec>,
}

impl RegistryBuilder {
    pub fn register(mut self, spec: FormulaSpec) -> Self {
        self.formulas.push(spec);
        self
    }

    pub fn build(self) -> SpecResult<FormulaRegistry> {
        validate::validate_registry(&self.formulas)?;
        Ok(FormulaRegistry {
            formulas: self.formulas,
        })
    }
}
