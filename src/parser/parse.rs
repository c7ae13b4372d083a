//! Main parser coordinator
//!
//! This module provides the [`Parser`] cursor and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses recursive descent with exactly one token of lookahead:
//! - This module: Parser struct, cursor movement, `expect`, `parse_program`
//! - `declarations`: declarations, classes, functions, parameter lists
//! - `statements`: blocks, assignments, `if`/`while`, conditions, `return`
//! - `expressions`: `Expr`/`Term`/`Factor` with `*`/`/` binding tighter than `+`/`-`
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor. The cursor only moves forward;
//! there is no backtracking.

use crate::parser::lexer::{LexError, Token, TokenKind};
use crate::parser::options::GrammarOptions;
use crate::parser::tree::{labels, ParseTreeNode};
use log::{debug, trace};
use std::fmt;
use thiserror::Error;

/// What the grammar wanted at the point of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    Declaration,
    Member,
    Statement,
    Factor,
    Condition,
    ReturnValue,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Declaration => write!(f, "declaration"),
            Expected::Member => write!(f, "class member"),
            Expected::Statement => write!(f, "statement"),
            Expected::Factor => write!(f, "factor"),
            Expected::Condition => write!(f, "condition"),
            Expected::ReturnValue => write!(f, "return value"),
        }
    }
}

/// What was actually under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token { kind: TokenKind, lexeme: String },
    EndOfInput,
}

impl Found {
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Found::Token { kind, .. } => Some(*kind),
            Found::EndOfInput => None,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token { kind, lexeme } => write!(f, "{} '{}'", kind, lexeme),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Syntax error at line {line}: expected {expected}, found {found}")]
    Syntax {
        expected: Expected,
        found: Found,
        line: usize,
    },

    #[error("Unexpected trailing input at line {line}: {found}")]
    TrailingInput { found: Found, line: usize },

    #[error("Nesting deeper than {limit} levels at line {line}")]
    NestingTooDeep { limit: usize, line: usize },
}

impl ParseError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.line,
            ParseError::Syntax { line, .. }
            | ParseError::TrailingInput { line, .. }
            | ParseError::NestingTooDeep { line, .. } => *line,
        }
    }
}

/// Recursive descent parser over a borrowed token sequence
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
    pub(crate) options: GrammarOptions,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::with_options(tokens, GrammarOptions::default())
    }

    pub fn with_options(tokens: &'t [Token], options: GrammarOptions) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            options,
        }
    }

    /// Parse the entire program: `Program := Decl*`
    pub fn parse_program(&mut self) -> Result<ParseTreeNode, ParseError> {
        let mut code = ParseTreeNode::new(labels::CODE);

        while !self.is_at_end() {
            if let Some(decl) = self.parse_declaration()? {
                code.push(decl);
            }
        }
        self.finish()?;

        debug!(
            "parsed {} tokens into {} nodes",
            self.tokens.len(),
            code.node_count()
        );
        Ok(code)
    }

    /// Fail with `TrailingInput` unless every token has been consumed.
    pub fn finish(&self) -> Result<(), ParseError> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(ParseError::TrailingInput {
                found: self.found(),
                line: self.current_line(),
            })
        }
    }

    // ===== Cursor =====

    /// The lookahead token, or `None` at end of input.
    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Move the cursor one token forward; a no-op at end of input.
    pub fn advance(&mut self) {
        if let Some(token) = self.current() {
            trace!("consume {} at line {}", token, token.line);
            self.position += 1;
        }
    }

    /// Consume the lookahead if it has category `kind`, otherwise fail
    /// without moving.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'t Token, ParseError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            }
            _ => Err(self.error(Expected::Token(kind))),
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.current().map(|token| token.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// `expect`, returning the consumed token as a terminal leaf.
    pub(crate) fn expect_leaf(&mut self, kind: TokenKind) -> Result<ParseTreeNode, ParseError> {
        self.expect(kind)
            .map(|token| ParseTreeNode::new(token.lexeme.as_str()))
    }

    /// `expect(LBrace) Block expect(RBrace)`
    pub(crate) fn parse_braced_block(&mut self) -> Result<ParseTreeNode, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let block = self.parse_block()?;
        self.expect(TokenKind::RBrace)?;
        Ok(block)
    }

    /// Run a recursive rule one level deeper, enforcing `max_depth`.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                line: self.current_line(),
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn error(&self, expected: Expected) -> ParseError {
        ParseError::Syntax {
            expected,
            found: self.found(),
            line: self.current_line(),
        }
    }

    fn found(&self) -> Found {
        match self.current() {
            Some(token) => Found::Token {
                kind: token.kind,
                lexeme: token.lexeme.clone(),
            },
            None => Found::EndOfInput,
        }
    }

    /// Line of the lookahead; at end of input, the line of the last token.
    pub(crate) fn current_line(&self) -> usize {
        self.current()
            .or_else(|| self.tokens.last())
            .map_or(1, |token| token.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_advance_stops_at_end() {
        let tokens = tokenize("x").unwrap();
        let mut parser = Parser::new(&tokens);

        parser.advance();
        assert!(parser.is_at_end());
        parser.advance();
        assert_eq!(parser.position(), 1);
        assert!(parser.current().is_none());
    }

    #[test]
    fn test_expect_consumes_match() {
        let tokens = tokenize("int x").unwrap();
        let mut parser = Parser::new(&tokens);

        let token = parser.expect(TokenKind::TypeKeyword).unwrap();
        assert_eq!(token.lexeme, "int");
        assert_eq!(parser.position(), 1);
    }

    #[test]
    fn test_expect_mismatch_does_not_move() {
        let tokens = tokenize("int\n  x").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.advance();

        let err = parser.expect(TokenKind::Semicolon).unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                expected: Expected::Token(TokenKind::Semicolon),
                found: Found::Token {
                    kind: TokenKind::Ident,
                    lexeme: "x".to_string(),
                },
                line: 2,
            }
        );
        assert_eq!(parser.position(), 1);
    }

    #[test]
    fn test_expect_at_end_reports_last_line() {
        let tokens = tokenize("class\nA").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.advance();
        parser.advance();

        let err = parser.expect(TokenKind::LBrace).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                found: Found::EndOfInput,
                line: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_finish_reports_trailing_input() {
        let tokens = tokenize("x y").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.advance();

        let err = parser.finish().unwrap_err();
        assert!(matches!(err, ParseError::TrailingInput { line: 1, .. }));
    }

    #[test]
    fn test_parse_empty_program() {
        let tokens = tokenize("").unwrap();
        let tree = Parser::new(&tokens).parse_program().unwrap();

        assert_eq!(tree.label(), labels::CODE);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_error_messages() {
        let tokens = tokenize("int 5").unwrap();
        let err = Parser::new(&tokens).parse_program().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Syntax error at line 1: expected id, found num '5'"
        );
        assert_eq!(err.line(), 1);
    }
}
