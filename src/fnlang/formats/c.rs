//! Target-syntax formatter
//!
//! Thin registry adapter over [`generate`].

use super::registry::{FormatError, Formatter};
use crate::fnlang::ast::FunctionDef;
use crate::fnlang::generation::generate;

pub struct CFormatter;

impl Formatter for CFormatter {
    fn name(&self) -> &str {
        "c"
    }

    fn serialize(&self, def: &FunctionDef) -> Result<String, FormatError> {
        Ok(generate(def)?)
    }

    fn description(&self) -> &str {
        "C-like target syntax"
    }
}
