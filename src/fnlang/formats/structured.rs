//! AST dumps through serde

use super::registry::{FormatError, Formatter};
use crate::fnlang::ast::FunctionDef;

/// Pretty-printed JSON of the AST
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "ast-json"
    }

    fn serialize(&self, def: &FunctionDef) -> Result<String, FormatError> {
        serde_json::to_string_pretty(def)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "AST as pretty-printed JSON"
    }
}

/// YAML of the AST
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "ast-yaml"
    }

    fn serialize(&self, def: &FunctionDef) -> Result<String, FormatError> {
        serde_yaml::to_string(def).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "AST as YAML"
    }
}
