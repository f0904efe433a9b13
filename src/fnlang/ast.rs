//! AST node definitions
//!
//! The parser produces exactly one [`FunctionDef`] per source. It owns its
//! argument list and body, and transitively every node below them; nothing is
//! shared and nothing is mutated after parsing.
//!
//! [`Node`] is a borrowed view over all five node kinds and is what the
//! generator accepts.

use serde::Serialize;
use std::fmt;

/// `function <name>(<args>): <return_type> { <body> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub args: Vec<Argument>,
    pub return_type: String,
    /// At least one expression when built by the parser
    pub body: Vec<Expression>,
}

/// `<name>: <type>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// `<name>(<args>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegerLiteral {
    pub value: u64,
}

/// Anything that can appear as a statement or a call argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Expression {
    Call(Call),
    Variable(Variable),
    IntegerLiteral(IntegerLiteral),
}

/// A reference to any AST node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    FunctionDef(&'a FunctionDef),
    Argument(&'a Argument),
    Call(&'a Call),
    Variable(&'a Variable),
    IntegerLiteral(&'a IntegerLiteral),
}

impl FunctionDef {
    pub fn new(
        name: impl Into<String>,
        args: Vec<Argument>,
        return_type: impl Into<String>,
        body: Vec<Expression>,
    ) -> Self {
        Self {
            name: name.into(),
            args,
            return_type: return_type.into(),
            body,
        }
    }
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl IntegerLiteral {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

impl Expression {
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call(Call::new(name, args))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(Variable::new(name))
    }

    pub fn integer(value: u64) -> Self {
        Expression::IntegerLiteral(IntegerLiteral::new(value))
    }

    pub fn as_node(&self) -> Node<'_> {
        Node::from(self)
    }
}

impl<'a> Node<'a> {
    /// Human-readable node type name
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::FunctionDef(_) => "FunctionDef",
            Node::Argument(_) => "Argument",
            Node::Call(_) => "Call",
            Node::Variable(_) => "Variable",
            Node::IntegerLiteral(_) => "IntegerLiteral",
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::FunctionDef(def) => def
                .args
                .iter()
                .map(Node::Argument)
                .chain(def.body.iter().map(Node::from))
                .collect(),
            Node::Call(call) => call.args.iter().map(Node::from).collect(),
            Node::Argument(_) | Node::Variable(_) | Node::IntegerLiteral(_) => Vec::new(),
        }
    }
}

impl<'a> From<&'a FunctionDef> for Node<'a> {
    fn from(def: &'a FunctionDef) -> Self {
        Node::FunctionDef(def)
    }
}

impl<'a> From<&'a Argument> for Node<'a> {
    fn from(arg: &'a Argument) -> Self {
        Node::Argument(arg)
    }
}

impl<'a> From<&'a Call> for Node<'a> {
    fn from(call: &'a Call) -> Self {
        Node::Call(call)
    }
}

impl<'a> From<&'a Variable> for Node<'a> {
    fn from(var: &'a Variable) -> Self {
        Node::Variable(var)
    }
}

impl<'a> From<&'a IntegerLiteral> for Node<'a> {
    fn from(lit: &'a IntegerLiteral) -> Self {
        Node::IntegerLiteral(lit)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expr: &'a Expression) -> Self {
        match expr {
            Expression::Call(call) => Node::Call(call),
            Expression::Variable(var) => Node::Variable(var),
            Expression::IntegerLiteral(lit) => Node::IntegerLiteral(lit),
        }
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::FunctionDef(def) => write!(f, "{} -> {}", def.name, def.return_type),
            Node::Argument(arg) => write!(f, "{}: {}", arg.name, arg.ty),
            Node::Call(call) => write!(f, "{}/{}", call.name, call.args.len()),
            Node::Variable(var) => f.write_str(&var.name),
            Node::IntegerLiteral(lit) => write!(f, "{}", lit.value),
        }
    }
}
