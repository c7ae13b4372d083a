//! MiniJava front end
//!
//! This module transforms MiniJava source text into a concrete parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → parse tree), split over `declarations`,
//!   `statements` and `expressions`
//! - [`tree`]: Parse tree node definition
//! - [`options`]: Grammar switches
//!
//! # Supported Language
//!
//! - Types: `int`, `double`, `boolean`, `char`, `String`, `void`
//! - Declarations: variables, classes (nested), functions as class members
//!   when enabled
//! - Statements: assignment, `if`/`else`, `while`
//! - Expressions: `+ - * /` over identifiers, literals and parentheses
//! - Conditions: a boolean literal, or one comparison
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead and no
//! backtracking. The first error aborts the parse; there is no recovery.

mod declarations;
mod expressions;
pub mod lexer;
pub mod options;
pub mod parse;
mod statements;
pub mod tree;

pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use options::GrammarOptions;
pub use parse::{Expected, Found, ParseError, Parser};
pub use tree::ParseTreeNode;

/// Lex and parse a whole program with the default grammar.
pub fn parse_source(source: &str) -> Result<ParseTreeNode, ParseError> {
    parse_source_with(source, GrammarOptions::default())
}

/// Lex and parse a whole program.
pub fn parse_source_with(
    source: &str,
    options: GrammarOptions,
) -> Result<ParseTreeNode, ParseError> {
    let tokens = tokenize(source)?;
    Parser::with_options(&tokens, options).parse_program()
}

/// Lex and parse a lone expression that must span the whole input.
pub fn parse_expression_source(source: &str) -> Result<ParseTreeNode, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expression()?;
    parser.finish()?;
    Ok(expr)
}
