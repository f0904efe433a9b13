//! Recursive descent parser
//!
//! Grammar, one method per production:
//!
//! ```text
//! funcdef   := "function" IDENT "(" args? ")" ":" IDENT block
//! args      := arg ("," arg)*
//! arg       := IDENT ":" IDENT
//! block     := "{" expr ";" (expr ";")* "}"
//! expr      := INTEGER | call | var
//! call      := IDENT "(" (expr ("," expr)*)? ")"
//! var       := IDENT
//! ```
//!
//! The parser is an index cursor over an immutable token slice. At an
//! identifier in expression position, one extra token of lookahead decides
//! between a call (next token is `(`) and a variable.
//!
//! Calls may nest at most [`MAX_NESTING_DEPTH`] levels deep.

use crate::fnlang::ast::{Argument, Call, Expression, FunctionDef, IntegerLiteral, Variable};
use crate::fnlang::token::{Token, TokenKind};
use log::debug;
use thiserror::Error;

/// Deepest call nesting accepted inside a statement
pub const MAX_NESTING_DEPTH: usize = 256;

/// Errors that can occur during parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token of the wrong kind was found where the grammar requires another
    #[error("expected {expected}, found {found} `{text}`")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
    },

    /// The token sequence ran out while the grammar still required a token
    #[error("expected {expected}, found end of input")]
    UnexpectedEnd { expected: TokenKind },

    /// Tokens remain after the closing brace of the function
    #[error("expected end of input, found {found} `{text}`")]
    TrailingInput { found: TokenKind, text: String },

    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntegerOutOfRange { text: String },

    #[error("calls nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    /// The token kind the grammar required, if any
    pub fn expected(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEnd { expected } => Some(*expected),
            ParseError::TrailingInput { .. } | ParseError::NestingTooDeep { .. } => None,
            ParseError::IntegerOutOfRange { .. } => Some(TokenKind::IntegerLiteral),
        }
    }

    /// The token kind actually found, or `None` at end of input
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            ParseError::UnexpectedToken { found, .. } | ParseError::TrailingInput { found, .. } => {
                Some(*found)
            }
            ParseError::UnexpectedEnd { .. } | ParseError::NestingTooDeep { .. } => None,
            ParseError::IntegerOutOfRange { .. } => Some(TokenKind::IntegerLiteral),
        }
    }
}

/// Parse a token sequence into a function definition
pub fn parse(tokens: &[Token]) -> Result<FunctionDef, ParseError> {
    Parser::new(tokens).parse()
}

/// Recursive descent parser over a token slice
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse the single function definition and require that nothing follows it
    pub fn parse(mut self) -> Result<FunctionDef, ParseError> {
        let def = self.parse_funcdef()?;

        if let Some(token) = self.tokens.get(self.position) {
            return Err(ParseError::TrailingInput {
                found: token.kind,
                text: token.text.clone(),
            });
        }

        debug!(
            "parsed function `{}` with {} arguments and {} statements",
            def.name,
            def.args.len(),
            def.body.len()
        );
        Ok(def)
    }

    /// Take the next token, failing unless it has the expected kind
    fn consume(&mut self, expected: TokenKind) -> Result<&'t Token, ParseError> {
        let token = self
            .tokens
            .get(self.position)
            .ok_or(ParseError::UnexpectedEnd { expected })?;

        if !token.is(expected) {
            return Err(ParseError::UnexpectedToken {
                expected,
                found: token.kind,
                text: token.text.clone(),
            });
        }

        self.position += 1;
        Ok(token)
    }

    /// Whether the token `offset` places ahead has the given kind.
    /// Past the end of the sequence nothing matches.
    fn peek(&self, expected: TokenKind, offset: usize) -> bool {
        self.tokens
            .get(self.position + offset)
            .is_some_and(|token| token.is(expected))
    }

    fn parse_funcdef(&mut self) -> Result<FunctionDef, ParseError> {
        self.consume(TokenKind::FunctionKeyword)?;
        let name = self.consume(TokenKind::Identifier)?.text.clone();

        self.consume(TokenKind::OpenParen)?;
        let args = if self.peek(TokenKind::Identifier, 0) {
            self.parse_args()?
        } else {
            Vec::new()
        };
        self.consume(TokenKind::CloseParen)?;

        self.consume(TokenKind::Colon)?;
        let return_type = self.consume(TokenKind::Identifier)?.text.clone();
        let body = self.parse_block()?;

        Ok(FunctionDef {
            name,
            args,
            return_type,
            body,
        })
    }

    fn parse_args(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut args = vec![self.parse_arg()?];
        while self.peek(TokenKind::Comma, 0) {
            self.consume(TokenKind::Comma)?;
            args.push(self.parse_arg()?);
        }
        Ok(args)
    }

    fn parse_arg(&mut self) -> Result<Argument, ParseError> {
        let name = self.consume(TokenKind::Identifier)?.text.clone();
        self.consume(TokenKind::Colon)?;
        let ty = self.consume(TokenKind::Identifier)?.text.clone();
        Ok(Argument { name, ty })
    }

    /// Every statement, including the last, ends with a semicolon
    fn parse_block(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.consume(TokenKind::OpenBrace)?;

        let mut body = Vec::new();
        loop {
            body.push(self.parse_expr()?);
            self.consume(TokenKind::Semicolon)?;
            if self.peek(TokenKind::CloseBrace, 0) {
                break;
            }
        }

        self.consume(TokenKind::CloseBrace)?;
        Ok(body)
    }

    fn parse_expr(&mut self) -> Result<Expression, ParseError> {
        if self.peek(TokenKind::IntegerLiteral, 0) {
            self.parse_integer().map(Expression::IntegerLiteral)
        } else if self.peek(TokenKind::Identifier, 0) && self.peek(TokenKind::OpenParen, 1) {
            self.parse_call().map(Expression::Call)
        } else {
            self.parse_var().map(Expression::Variable)
        }
    }

    fn parse_integer(&mut self) -> Result<IntegerLiteral, ParseError> {
        let text = &self.consume(TokenKind::IntegerLiteral)?.text;
        let value = text
            .parse::<u64>()
            .map_err(|_| ParseError::IntegerOutOfRange { text: text.clone() })?;
        Ok(IntegerLiteral { value })
    }

    fn parse_call(&mut self) -> Result<Call, ParseError> {
        let name = self.consume(TokenKind::Identifier)?.text.clone();
        self.consume(TokenKind::OpenParen)?;

        if self.depth == MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;

        let mut args = Vec::new();
        if !self.peek(TokenKind::CloseParen, 0) {
            args.push(self.parse_expr()?);
            while self.peek(TokenKind::Comma, 0) {
                self.consume(TokenKind::Comma)?;
                args.push(self.parse_expr()?);
            }
        }

        self.depth -= 1;
        self.consume(TokenKind::CloseParen)?;
        Ok(Call { name, args })
    }

    fn parse_var(&mut self) -> Result<Variable, ParseError> {
        let name = self.consume(TokenKind::Identifier)?.text.clone();
        Ok(Variable { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fnlang::lexing::tokenize;
    use rstest::rstest;

    fn parse_source(source: &str) -> Result<FunctionDef, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn test_add_function() {
        let def = parse_source("function add(x: int, y: int): int { add(x, y); }").unwrap();
        assert_eq!(
            def,
            FunctionDef::new(
                "add",
                vec![Argument::new("x", "int"), Argument::new("y", "int")],
                "int",
                vec![Expression::call(
                    "add",
                    vec![Expression::variable("x"), Expression::variable("y")]
                )],
            )
        );
    }

    #[test]
    fn test_no_arguments_integer_body() {
        let def = parse_source("function f(): int { 42; }").unwrap();
        assert!(def.args.is_empty());
        assert_eq!(def.body, vec![Expression::integer(42)]);
    }

    #[test]
    fn test_multiple_statements() {
        let def = parse_source("function f(a: int): void { a; g(); 7; }").unwrap();
        assert_eq!(
            def.body,
            vec![
                Expression::variable("a"),
                Expression::call("g", vec![]),
                Expression::integer(7),
            ]
        );
    }

    #[test]
    fn test_nested_calls() {
        let def = parse_source("function f(): int { g(h(1), x, k()); }").unwrap();
        assert_eq!(
            def.body,
            vec![Expression::call(
                "g",
                vec![
                    Expression::call("h", vec![Expression::integer(1)]),
                    Expression::variable("x"),
                    Expression::call("k", vec![]),
                ]
            )]
        );
    }

    #[test]
    fn test_missing_colon() {
        let err = parse_source("function f() int { 1; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Colon,
                found: TokenKind::Identifier,
                text: "int".to_string(),
            }
        );
        assert_eq!(err.expected(), Some(TokenKind::Colon));
        assert_eq!(err.found(), Some(TokenKind::Identifier));
        assert_eq!(err.to_string(), "expected colon, found identifier `int`");
    }

    #[rstest]
    #[case("function f(): int { 1 }", TokenKind::Semicolon, Some(TokenKind::CloseBrace))]
    #[case("function f(): int { }", TokenKind::Identifier, Some(TokenKind::CloseBrace))]
    #[case("function f(x): int { 1; }", TokenKind::Colon, Some(TokenKind::CloseParen))]
    #[case("function f(x: int,): int { 1; }", TokenKind::Identifier, Some(TokenKind::CloseParen))]
    #[case("f(): int { 1; }", TokenKind::FunctionKeyword, Some(TokenKind::Identifier))]
    #[case("function f(): int { g(1,); }", TokenKind::Identifier, Some(TokenKind::CloseParen))]
    #[case("function f(): int { 1;", TokenKind::Identifier, None)]
    #[case("function f(): int { 1", TokenKind::Semicolon, None)]
    #[case("", TokenKind::FunctionKeyword, None)]
    fn test_unexpected_tokens(
        #[case] source: &str,
        #[case] expected: TokenKind,
        #[case] found: Option<TokenKind>,
    ) {
        let err = parse_source(source).unwrap_err();
        assert_eq!(err.expected(), Some(expected), "{source}: {err}");
        assert_eq!(err.found(), found, "{source}: {err}");
    }

    #[test]
    fn test_exhausted_input_is_an_error_not_a_panic() {
        let err = parse_source("function f(): int {").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEnd {
                expected: TokenKind::Identifier
            }
        );
        assert_eq!(err.to_string(), "expected identifier, found end of input");
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_source("function f(): int { 1; } g").unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingInput {
                found: TokenKind::Identifier,
                text: "g".to_string(),
            }
        );
    }

    #[test]
    fn test_integer_overflow() {
        let err = parse_source("function f(): int { 99999999999999999999; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::IntegerOutOfRange {
                text: "99999999999999999999".to_string()
            }
        );
    }

    #[test]
    fn test_identifier_before_paren_is_a_call_at_any_depth() {
        let def = parse_source("function f(): int { a(b(c(d))); }").unwrap();
        let Expression::Call(a) = &def.body[0] else {
            panic!("expected call, got {:?}", def.body[0]);
        };
        let Expression::Call(b) = &a.args[0] else {
            panic!("expected call, got {:?}", a.args[0]);
        };
        let Expression::Call(c) = &b.args[0] else {
            panic!("expected call, got {:?}", b.args[0]);
        };
        assert_eq!(c.args, vec![Expression::variable("d")]);
    }

    fn nested_calls(depth: usize) -> String {
        format!(
            "function f(): int {{ {}1{}; }}",
            "g(".repeat(depth),
            ")".repeat(depth)
        )
    }

    #[test]
    fn test_nesting_up_to_the_limit() {
        let def = parse_source(&nested_calls(MAX_NESTING_DEPTH)).unwrap();
        let mut expr = &def.body[0];
        let mut depth = 0;
        while let Expression::Call(call) = expr {
            depth += 1;
            expr = &call.args[0];
        }
        assert_eq!(depth, MAX_NESTING_DEPTH);
        assert_eq!(expr, &Expression::integer(1));
    }

    #[rstest]
    #[case(MAX_NESTING_DEPTH + 1)]
    #[case(200_000)]
    fn test_nesting_past_the_limit(#[case] depth: usize) {
        let err = parse_source(&nested_calls(depth)).unwrap_err();
        assert_eq!(
            err,
            ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        );
        assert_eq!(err.expected(), None);
        assert_eq!(err.to_string(), "calls nested deeper than 256 levels");
    }

    #[test]
    fn test_sibling_calls_do_not_accumulate_depth() {
        let statements = "g(h(1));".repeat(MAX_NESTING_DEPTH * 2);
        let source = format!("function f(): int {{ {statements} }}");
        let def = parse_source(&source).unwrap();
        assert_eq!(def.body.len(), MAX_NESTING_DEPTH * 2);
    }

    #[test]
    fn test_keyword_is_not_an_identifier() {
        let err = parse_source("function function(): int { 1; }").unwrap_err();
        assert_eq!(err.expected(), Some(TokenKind::Identifier));
        assert_eq!(err.found(), Some(TokenKind::FunctionKeyword));
    }
}
