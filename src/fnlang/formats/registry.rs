//! Named output formats for a parsed function
//!
//! The CLI picks an output by name; every name maps to one [`Formatter`] held
//! in a [`FormatRegistry`].

use crate::fnlang::ast::FunctionDef;
use crate::fnlang::generation::GeneratorError;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    /// Target-syntax rendering failed
    #[error(transparent)]
    Generation(#[from] GeneratorError),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Renders a [`FunctionDef`] as text
pub trait Formatter: Send + Sync {
    /// Name selected with `--format`
    fn name(&self) -> &str;

    fn serialize(&self, def: &FunctionDef) -> Result<String, FormatError>;

    /// Shown by `--list-formats`
    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// A registry with no formats; see [`FormatRegistry::with_defaults`]
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Later registrations win over earlier ones with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render `def` with the formatter registered as `format`
    pub fn serialize(&self, def: &FunctionDef, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(def)
    }

    /// Registered names in alphabetical order
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// `c`, `ast-json`, `ast-yaml` and `ast-treeviz`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::CFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TreevizFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
