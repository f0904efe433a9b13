//! Tokenization of fnlang source text
//!
//! The lexer walks a cursor over the source and, at each position, tries the
//! rules of [`LEXING_RULES`] in declaration order. The first rule whose pattern
//! matches at the cursor wins, its matched text becomes the token's literal and
//! the cursor moves past it. Whitespace between tokens is skipped, including any
//! leading whitespace before the first token.
//!
//! Order matters: the keyword rule must come before the identifier rule, since
//! every keyword is also a valid identifier. Keyword, identifier and integer
//! patterns end at a word boundary, so `function1` or `12ab` are rejected
//! rather than split.

use crate::fnlang::location::Position;
use crate::fnlang::token::{Token, TokenKind};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use thiserror::Error;

/// Token rules as (kind, pattern) pairs.
/// Order matters: rules are tried in declaration order and the first match wins.
pub const LEXING_RULES: &[(TokenKind, &str)] = &[
    (TokenKind::FunctionKeyword, r"function\b"),
    (TokenKind::Identifier, r"[A-Za-z]+\b"),
    (TokenKind::IntegerLiteral, r"[0-9]+\b"),
    (TokenKind::OpenParen, r"\("),
    (TokenKind::CloseParen, r"\)"),
    (TokenKind::OpenBrace, r"\{"),
    (TokenKind::CloseBrace, r"\}"),
    (TokenKind::Colon, r":"),
    (TokenKind::Comma, r","),
    (TokenKind::Semicolon, r";"),
];

/// The rule table compiled once, each pattern anchored at the cursor
static COMPILED_RULES: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    LEXING_RULES
        .iter()
        .map(|(kind, pattern)| {
            let anchored = format!("^(?:{pattern})");
            (*kind, Regex::new(&anchored).unwrap())
        })
        .collect()
});

/// Longest remainder prefix shown in error messages
const SNIPPET_CHARS: usize = 20;

/// Raised when no rule matches at the cursor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no token matches at {position}: `{}`", snippet(.remainder))]
pub struct LexError {
    /// The unconsumed source, starting at the offending character
    pub remainder: String,
    /// Byte offset of the remainder in the source
    pub offset: usize,
    pub position: Position,
}

impl LexError {
    fn at(source: &str, offset: usize) -> Self {
        Self {
            remainder: source[offset..].to_string(),
            offset,
            position: Position::from_offset(source, offset),
        }
    }
}

fn snippet(remainder: &str) -> String {
    let line = remainder.lines().next().unwrap_or("");
    if line.chars().count() > SNIPPET_CHARS {
        let mut truncated: String = line.chars().take(SNIPPET_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        line.to_string()
    }
}

/// Tokenize source text into an ordered token sequence
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

/// Tokenize source text, pairing every token with its byte range
pub fn tokenize_with_spans(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut tokens = Vec::new();
    let mut offset = skip_whitespace(source, 0);

    while offset < source.len() {
        let rest = &source[offset..];
        let (kind, len) = match_rule(rest).ok_or_else(|| LexError::at(source, offset))?;
        let span = offset..offset + len;
        trace!("{} {:?} at {:?}", kind, &rest[..len], span);

        tokens.push((Token::new(kind, &rest[..len]), span));
        offset = skip_whitespace(source, offset + len);
    }

    debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());
    Ok(tokens)
}

/// First rule matching at the start of `rest`, with the matched length
fn match_rule(rest: &str) -> Option<(TokenKind, usize)> {
    COMPILED_RULES
        .iter()
        .find_map(|(kind, regex)| regex.find(rest).map(|m| (*kind, m.end())))
}

fn skip_whitespace(source: &str, offset: usize) -> usize {
    let rest = &source[offset..];
    offset + (rest.len() - rest.trim_start().len())
}
