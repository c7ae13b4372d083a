//! Statement parsing implementation
//!
//! This module handles the rules that appear inside blocks:
//!
//! - Variable declarations: `int x = 42;`
//! - Assignments: `x = x + 1;`
//! - Control flow: `if`/`else`, `while`
//! - Conditions and the `return` clause of functions
//!
//! # Grammar
//!
//! ```text
//! Block     ::= (VarDecl | Assign ";" | IfStmt | WhileStmt | ";")*
//! Assign    ::= id "=" Expr
//! IfStmt    ::= "if" "(" Cond ")" "{" Block "}" [ "else" "{" Block "}" ]
//! WhileStmt ::= "while" "(" Cond ")" "{" Block "}"
//! Cond      ::= bool-lit | Expr RelOp Expr
//! Return    ::= "return" Rhs ";"
//! ```
//!
//! All parsing methods are implemented on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};
use crate::parser::tree::{labels, ParseTreeNode};
use log::trace;

impl<'t> Parser<'t> {
    /// Parse block statements (inside braces, excluding the braces themselves)
    ///
    /// Stops at the first token that cannot start a statement.
    pub fn parse_block(&mut self) -> Result<ParseTreeNode, ParseError> {
        self.nested(|p| {
            let mut block = ParseTreeNode::new(labels::BLOCK);

            while let Some(kind) = p.peek_kind() {
                trace!("statement {} at line {}", kind, p.current_line());
                match kind {
                    TokenKind::TypeKeyword => {
                        let vdecl = p.parse_variable_declaration()?;
                        block.push(vdecl);
                    }
                    TokenKind::Ident => {
                        let assign = p.parse_assignment()?;
                        p.expect(TokenKind::Semicolon)?;
                        block.push(assign);
                    }
                    TokenKind::If => {
                        let stmt = p.parse_if_statement()?;
                        block.push(stmt);
                    }
                    TokenKind::While => {
                        let stmt = p.parse_while_statement()?;
                        block.push(stmt);
                    }
                    TokenKind::Semicolon => p.advance(),
                    _ => break,
                }
            }

            Ok(block)
        })
    }

    /// Parse a single statement; unlike [`Parser::parse_block`] this fails
    /// when the lookahead cannot start one.
    pub fn parse_statement(&mut self) -> Result<ParseTreeNode, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::TypeKeyword) => self.parse_variable_declaration(),
            Some(TokenKind::Ident) => {
                let assign = self.parse_assignment()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(assign)
            }
            Some(TokenKind::If) => self.parse_if_statement(),
            Some(TokenKind::While) => self.parse_while_statement(),
            _ => Err(self.error(Expected::Statement)),
        }
    }

    /// Parse assignment statement: name = expr
    pub(crate) fn parse_assignment(&mut self) -> Result<ParseTreeNode, ParseError> {
        let target = self.expect_leaf(TokenKind::Ident)?;
        let op = self.expect_leaf(TokenKind::Assign)?;
        let value = self.parse_expression()?;

        Ok(ParseTreeNode::with_children(
            labels::ASSIGN,
            vec![target, op, value],
        ))
    }

    /// Parse the `= expr` tail of a variable declaration
    pub(crate) fn parse_initializer(&mut self) -> Result<ParseTreeNode, ParseError> {
        let op = self.expect_leaf(TokenKind::Assign)?;
        let value = self.parse_expression()?;

        Ok(ParseTreeNode::with_children(labels::ASSIGN, vec![op, value]))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<ParseTreeNode, ParseError> {
        let keyword = self.expect_leaf(TokenKind::If)?;
        let condition = self.parse_parenthesized_condition()?;
        let then_branch = self.parse_braced_block()?;

        let mut stmt = ParseTreeNode::with_children(
            labels::IFSTMT,
            vec![keyword, condition, then_branch],
        );

        if self.check(TokenKind::Else) {
            stmt.push(self.expect_leaf(TokenKind::Else)?);
            stmt.push(self.parse_braced_block()?);
        }

        Ok(stmt)
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<ParseTreeNode, ParseError> {
        let keyword = self.expect_leaf(TokenKind::While)?;
        let condition = self.parse_parenthesized_condition()?;
        let body = self.parse_braced_block()?;

        Ok(ParseTreeNode::with_children(
            labels::WHILESTMT,
            vec![keyword, condition, body],
        ))
    }

    fn parse_parenthesized_condition(&mut self) -> Result<ParseTreeNode, ParseError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    /// Parse condition
    ///
    /// A leading boolean literal always selects the single-literal form, so
    /// `true == x` stops after `true`.
    pub fn parse_condition(&mut self) -> Result<ParseTreeNode, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::BoolLiteral) => {
                let literal = self.expect_leaf(TokenKind::BoolLiteral)?;
                Ok(ParseTreeNode::with_children(labels::COND, vec![literal]))
            }
            Some(kind) if starts_factor(kind) => {
                let lhs = self.parse_expression()?;
                let op = self.expect_leaf(TokenKind::RelOp)?;
                let rhs = self.parse_expression()?;
                Ok(ParseTreeNode::with_children(labels::COND, vec![lhs, op, rhs]))
            }
            _ => Err(self.error(Expected::Condition)),
        }
    }

    /// Parse return clause: return rhs;
    pub(crate) fn parse_return(&mut self) -> Result<ParseTreeNode, ParseError> {
        let keyword = self.expect_leaf(TokenKind::Return)?;
        let value = self.parse_rhs()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(ParseTreeNode::with_children(labels::RETURN, vec![keyword, value]))
    }
}

/// Categories that can begin a `Factor`.
pub(crate) fn starts_factor(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen
            | TokenKind::Ident
            | TokenKind::IntLiteral
            | TokenKind::StringLiteral
            | TokenKind::CharLiteral
            | TokenKind::BoolLiteral
    )
}
