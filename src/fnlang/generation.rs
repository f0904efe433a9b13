//! Target-syntax code generation
//!
//! Renders an AST node into C-like text:
//!
//! ```text
//! FunctionDef     <return_type> <name>(<args joined by ", ">){\n\t<body joined by ";">;\n}
//! Argument        <type> <name>
//! Call            <name>(<args joined by ",">)
//! Variable        <name>
//! IntegerLiteral  <decimal value>
//! ```
//!
//! Generation is a pure function of the tree. The only failures are trees that
//! the parser could never have produced: an empty function body, or a name that
//! is not a run of ASCII letters.

use crate::fnlang::ast::{Argument, Call, Expression, FunctionDef, Node};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("function `{function}` has an empty body")]
    EmptyBody { function: String },

    #[error("{node} has invalid identifier `{name}`")]
    InvalidIdentifier { node: &'static str, name: String },
}

/// Render any node in target syntax
pub fn generate<'a>(node: impl Into<Node<'a>>) -> Result<String, GeneratorError> {
    match node.into() {
        Node::FunctionDef(def) => function_def(def),
        Node::Argument(arg) => argument(arg),
        Node::Call(call) => self::call(call),
        Node::Variable(var) => Ok(identifier("Variable", &var.name)?.to_string()),
        Node::IntegerLiteral(lit) => Ok(lit.value.to_string()),
    }
}

fn function_def(def: &FunctionDef) -> Result<String, GeneratorError> {
    let name = identifier("FunctionDef", &def.name)?;
    let return_type = identifier("FunctionDef", &def.return_type)?;
    if def.body.is_empty() {
        return Err(GeneratorError::EmptyBody {
            function: def.name.clone(),
        });
    }

    let args = def
        .args
        .iter()
        .map(argument)
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");
    let body = def
        .body
        .iter()
        .map(expression)
        .collect::<Result<Vec<_>, _>>()?
        .join(";");

    Ok(format!("{return_type} {name}({args}){{\n\t{body};\n}}"))
}

fn argument(arg: &Argument) -> Result<String, GeneratorError> {
    let name = identifier("Argument", &arg.name)?;
    let ty = identifier("Argument", &arg.ty)?;
    Ok(format!("{ty} {name}"))
}

fn call(call: &Call) -> Result<String, GeneratorError> {
    let name = identifier("Call", &call.name)?;
    let args = call
        .args
        .iter()
        .map(expression)
        .collect::<Result<Vec<_>, _>>()?
        .join(",");
    Ok(format!("{name}({args})"))
}

fn expression(expr: &Expression) -> Result<String, GeneratorError> {
    generate(expr)
}

/// Names must look like something the lexer would have produced
fn identifier<'n>(node: &'static str, name: &'n str) -> Result<&'n str, GeneratorError> {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(name)
    } else {
        Err(GeneratorError::InvalidIdentifier {
            node,
            name: name.to_string(),
        })
    }
}
