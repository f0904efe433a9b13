//! Main module for fnlang library functionality
//!
//! Modules are listed in pipeline order, leaves first.

pub mod token;
pub mod location;
pub mod lexing;
pub mod ast;
pub mod parsing;
pub mod generation;
pub mod formats;
pub mod pipeline;
pub mod config;

pub use ast::{Argument, Call, Expression, FunctionDef, IntegerLiteral, Node, Variable};
pub use generation::{generate, GeneratorError};
pub use lexing::{tokenize, tokenize_with_spans, LexError};
pub use parsing::{parse, ParseError, Parser, MAX_NESTING_DEPTH};
pub use pipeline::{translate, PipelineError, Stage};
pub use token::{Token, TokenKind};
