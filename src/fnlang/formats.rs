//! Output format implementations for parsed functions
//!
//! This module contains the formats a [`FunctionDef`](crate::fnlang::ast::FunctionDef)
//! can be serialized to:
//! - `c`: target-syntax text, the translator's real output
//! - `ast-json` / `ast-yaml`: the AST through serde
//! - `ast-treeviz`: one line per node, for eyeballing trees

pub mod c;
pub mod registry;
pub mod structured;
pub mod treeviz;

pub use c::CFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
