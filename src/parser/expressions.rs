//! Expression parsing implementation
//!
//! Two precedence levels, both left-associative:
//!
//! ```text
//! Expr   ::= Term (("+" | "-") Term)*
//! Term   ::= Factor (("*" | "/") Factor)*
//! Factor ::= "(" Expr ")" | id | int | string | char | bool-lit
//! Rhs    ::= id | int | string | char | bool-lit
//! ```
//!
//! Operands and operators are kept flat under their `EXPR`/`TERM` node in
//! source order, which is the left-associative reading. Parentheses recurse
//! through the full `Expr` rule and count toward the nesting limit.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};
use crate::parser::tree::{labels, ParseTreeNode};

impl<'t> Parser<'t> {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<ParseTreeNode, ParseError> {
        let mut expr = ParseTreeNode::new(labels::EXPR);
        expr.push(self.parse_term()?);

        while self.check(TokenKind::AddOp) {
            expr.push(self.expect_leaf(TokenKind::AddOp)?);
            expr.push(self.parse_term()?);
        }

        Ok(expr)
    }

    /// Parse multiplicative term (*, /)
    fn parse_term(&mut self) -> Result<ParseTreeNode, ParseError> {
        let mut term = ParseTreeNode::new(labels::TERM);
        term.push(self.parse_factor()?);

        while self.check(TokenKind::MulOp) {
            term.push(self.expect_leaf(TokenKind::MulOp)?);
            term.push(self.parse_factor()?);
        }

        Ok(term)
    }

    fn parse_factor(&mut self) -> Result<ParseTreeNode, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::LParen) => self.nested(|p| {
                p.advance();
                let inner = p.parse_expression()?;
                p.expect(TokenKind::RParen)?;
                Ok(ParseTreeNode::with_children(labels::FACTOR, vec![inner]))
            }),
            Some(
                kind @ (TokenKind::Ident
                | TokenKind::IntLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::BoolLiteral),
            ) => {
                let operand = self.expect_leaf(kind)?;
                Ok(ParseTreeNode::with_children(labels::FACTOR, vec![operand]))
            }
            _ => Err(self.error(Expected::Factor)),
        }
    }

    /// Parse the single-operand value of a `return`
    pub(crate) fn parse_rhs(&mut self) -> Result<ParseTreeNode, ParseError> {
        match self.peek_kind() {
            Some(
                kind @ (TokenKind::Ident
                | TokenKind::IntLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::BoolLiteral),
            ) => {
                let value = self.expect_leaf(kind)?;
                Ok(ParseTreeNode::with_children(labels::RHS, vec![value]))
            }
            _ => Err(self.error(Expected::ReturnValue)),
        }
    }
}
