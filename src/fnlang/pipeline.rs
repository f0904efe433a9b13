//! Driver for the translation pipeline
//!
//! ```text
//! read → tokenize → parse → generate / format → text
//! ```
//!
//! Every stage fails with its own error type; [`PipelineError`] wraps them
//! without translation so callers can tell which stage aborted the run. There
//! is no partial output: either the whole pipeline succeeds or nothing is
//! produced.

use crate::fnlang::ast::FunctionDef;
use crate::fnlang::formats::{FormatError, FormatRegistry};
use crate::fnlang::generation::{generate, GeneratorError};
use crate::fnlang::lexing::{tokenize, tokenize_with_spans, LexError};
use crate::fnlang::parsing::{parse, ParseError};
use crate::fnlang::token::TokenKind;
use config::ConfigError;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Token-stage formats, served without parsing
pub const TOKEN_FORMATS: &[(&str, &str)] = &[
    ("token-json", "Tokens with byte spans as JSON"),
    ("token-simple", "One `kind text` line per token"),
];

/// The pipeline stage an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Io,
    Lex,
    Parse,
    Generate,
    Format,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Io => "io",
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Generate => "generate",
            Stage::Format => "format",
        };
        f.write_str(name)
    }
}

/// Errors during pipeline execution
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("generate error: {0}")]
    Generate(#[from] GeneratorError),

    #[error("format error: {0}")]
    Format(FormatError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Config(_) => Stage::Config,
            PipelineError::Io { .. } => Stage::Io,
            PipelineError::Lex(_) => Stage::Lex,
            PipelineError::Parse(_) => Stage::Parse,
            PipelineError::Generate(_) => Stage::Generate,
            PipelineError::Format(_) => Stage::Format,
        }
    }
}

impl From<FormatError> for PipelineError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Generation(err) => PipelineError::Generate(err),
            other => PipelineError::Format(other),
        }
    }
}

/// Tokenize, parse and generate target syntax in one go
pub fn translate(source: &str) -> Result<String, PipelineError> {
    let def = front_end(source)?;
    let output = generate(&def)?;
    debug!("generated {} bytes", output.len());
    Ok(output)
}

/// Tokenize and parse
pub fn front_end(source: &str) -> Result<FunctionDef, PipelineError> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

#[derive(Serialize)]
struct SpannedToken<'a> {
    kind: TokenKind,
    text: &'a str,
    span: Range<usize>,
}

/// Runs the pipeline and serializes its result in a named format
pub struct Translator {
    registry: FormatRegistry,
}

impl Translator {
    /// Create a translator with the default formats
    pub fn new() -> Self {
        Self {
            registry: FormatRegistry::with_defaults(),
        }
    }

    /// All format names with their descriptions, sorted by name
    pub fn list_formats(&self) -> Vec<(String, String)> {
        let mut formats: Vec<(String, String)> = self
            .registry
            .list_formats()
            .into_iter()
            .filter_map(|name| {
                let description = self.registry.get(&name)?.description().to_string();
                Some((name, description))
            })
            .chain(
                TOKEN_FORMATS
                    .iter()
                    .map(|(name, description)| (name.to_string(), description.to_string())),
            )
            .collect();
        formats.sort();
        formats
    }

    pub fn has_format(&self, format: &str) -> bool {
        self.registry.has(format) || TOKEN_FORMATS.iter().any(|(name, _)| *name == format)
    }

    /// Run the pipeline on `source` and serialize the result as `format`
    pub fn execute(&self, source: &str, format: &str) -> Result<String, PipelineError> {
        // Fail on an unknown format before doing any work
        if !self.has_format(format) {
            return Err(PipelineError::Format(FormatError::FormatNotFound(
                format.to_string(),
            )));
        }

        match format {
            "token-json" => {
                let tokens = tokenize_with_spans(source)?;
                let records: Vec<SpannedToken<'_>> = tokens
                    .iter()
                    .map(|(token, span)| SpannedToken {
                        kind: token.kind,
                        text: &token.text,
                        span: span.clone(),
                    })
                    .collect();
                serde_json::to_string_pretty(&records)
                    .map_err(|e| FormatError::SerializationError(e.to_string()).into())
            }
            "token-simple" => Ok(tokenize(source)?
                .iter()
                .map(|token| format!("{} {}", token.kind, token.text))
                .collect::<Vec<_>>()
                .join("\n")),
            _ => {
                let def = front_end(source)?;
                let output = self.registry.serialize(&def, format)?;
                debug!("serialized `{}` as {format}", def.name);
                Ok(output)
            }
        }
    }

    /// Read the file at `path` and run [`Translator::execute`] on it
    pub fn load_and_execute(
        &self,
        path: impl AsRef<Path>,
        format: &str,
    ) -> Result<String, PipelineError> {
        let path = path.as_ref();
        info!("translating {} as {format}", path.display());

        let source = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.execute(&source, format)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
