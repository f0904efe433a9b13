//! Token types shared between the lexer and the parser
//!
//! A [`Token`] is a classified fragment of source text: its [`TokenKind`] plus
//! the exact substring the lexer matched. Tokens are never modified after the
//! lexer creates them.

use serde::Serialize;
use std::fmt;

/// The classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// The `function` keyword
    FunctionKeyword,

    /// A run of ASCII letters
    Identifier,

    /// A run of ASCII digits
    IntegerLiteral,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Colon,
    Comma,
    Semicolon,
}

impl TokenKind {
    /// Every kind, in lexer priority order
    pub const ALL: [TokenKind; 10] = [
        TokenKind::FunctionKeyword,
        TokenKind::Identifier,
        TokenKind::IntegerLiteral,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::Colon,
        TokenKind::Comma,
        TokenKind::Semicolon,
    ];

    /// The kebab-case name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::FunctionKeyword => "function-keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer-literal",
            TokenKind::OpenParen => "open-paren",
            TokenKind::CloseParen => "close-paren",
            TokenKind::OpenBrace => "open-brace",
            TokenKind::CloseBrace => "close-brace",
            TokenKind::Colon => "colon",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token: its kind and the literal text it was lexed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Whether this token is of the given kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.text)
    }
}
