//! # Introduction
//!
//! MiniJava lexes and parses a reduced Java-like teaching language into a
//! concrete parse tree, and can browse the result in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Parse tree → (printer | TUI)
//! ```
//!
//! 1. [`parser::lexer`]: first-match-wins tokenization with line tracking.
//! 2. [`parser::parse`]: single-lookahead recursive descent building a
//!    [`parser::tree::ParseTreeNode`] rooted at `CODE`.
//! 3. [`ui`]: ratatui-based tree viewer; not part of the stable library API.
//!
//! Every call owns its own cursor and tree, so parses can run on separate
//! threads without coordination.

pub mod parser;
pub mod ui;

pub use parser::{parse_expression_source, parse_source, parse_source_with, tokenize};
