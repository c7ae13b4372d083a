//! Declaration parsing implementation
//!
//! This module handles the declaration-level rules:
//!
//! - Top-level dispatch: variables, classes, and stray `;`, `( ... )`, `{ ... }`
//! - Variable declarations: `int x;`, `int x = 1 + 2;`
//! - Class declarations and their member lists
//! - Function declarations and parameter lists
//!
//! # Grammar
//!
//! ```text
//! Decl      ::= VarDecl | ClassDecl | ";" | "(" Params ")" | "{" Block "}"
//! VarDecl   ::= TypeKw id [ "=" Expr ";" ]
//! ClassDecl ::= "class" id "{" Member* "}"
//! Member    ::= VarDecl | ClassDecl | ";"
//! FuncDecl  ::= TypeKw id "(" Params ")" "{" Block "return" Rhs ";" "}"
//! Params    ::= ε | TypeKw id ("," TypeKw id)*
//! ```
//!
//! `FuncDecl` is only a `Member` alternative when
//! [`GrammarOptions::class_functions`](crate::parser::options::GrammarOptions)
//! is set. All parsing methods are implemented on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};
use crate::parser::tree::{labels, ParseTreeNode};
use log::trace;

impl<'t> Parser<'t> {
    /// Parse one top-level declaration.
    ///
    /// Returns `None` for fragments that leave nothing in the tree: a bare `;`
    /// and an empty `( )` or `{ }`.
    pub(crate) fn parse_declaration(&mut self) -> Result<Option<ParseTreeNode>, ParseError> {
        trace!("declaration at line {}", self.current_line());

        match self.peek_kind() {
            Some(TokenKind::TypeKeyword) => self.parse_variable_declaration().map(Some),
            Some(TokenKind::Class) => self.parse_class_declaration().map(Some),
            Some(TokenKind::Semicolon) => {
                self.advance();
                Ok(None)
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let args = self.parse_params()?;
                self.expect(TokenKind::RParen)?;
                Ok(non_empty(args))
            }
            Some(TokenKind::LBrace) => {
                let block = self.parse_braced_block()?;
                Ok(non_empty(block))
            }
            _ => Err(self.error(Expected::Declaration)),
        }
    }

    /// Parse variable declaration: type name [= expr;]
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<ParseTreeNode, ParseError> {
        let var_type = self.expect_leaf(TokenKind::TypeKeyword)?;
        let name = self.expect_leaf(TokenKind::Ident)?;
        self.finish_variable_declaration(var_type, name)
    }

    fn finish_variable_declaration(
        &mut self,
        var_type: ParseTreeNode,
        name: ParseTreeNode,
    ) -> Result<ParseTreeNode, ParseError> {
        let mut vdecl = ParseTreeNode::with_children(labels::VDECL, vec![var_type, name]);

        if self.check(TokenKind::Assign) {
            vdecl.push(self.parse_initializer()?);
            self.expect(TokenKind::Semicolon)?;
        } else if self.options.strict_semicolons {
            self.expect(TokenKind::Semicolon)?;
        }

        Ok(vdecl)
    }

    /// Parse class declaration: class Name { members }
    pub(crate) fn parse_class_declaration(&mut self) -> Result<ParseTreeNode, ParseError> {
        self.nested(|p| {
            let keyword = p.expect_leaf(TokenKind::Class)?;
            let name = p.expect_leaf(TokenKind::Ident)?;
            p.expect(TokenKind::LBrace)?;
            let members = p.parse_members()?;
            p.expect(TokenKind::RBrace)?;

            Ok(ParseTreeNode::with_children(
                labels::CDECL,
                vec![keyword, name, members],
            ))
        })
    }

    /// Parse class members up to (not including) the closing brace
    fn parse_members(&mut self) -> Result<ParseTreeNode, ParseError> {
        let mut odecl = ParseTreeNode::new(labels::ODECL);

        loop {
            match self.peek_kind() {
                Some(TokenKind::TypeKeyword) => {
                    let member = self.parse_typed_member()?;
                    odecl.push(member);
                }
                Some(TokenKind::Class) => {
                    let class = self.parse_class_declaration()?;
                    odecl.push(class);
                }
                Some(TokenKind::Semicolon) => self.advance(),
                _ => break,
            }
        }

        Ok(odecl)
    }

    /// A member starting with a type: a variable, or a function when enabled.
    ///
    /// Both share the `TypeKw id` prefix, so the choice is made on the token
    /// after the name.
    fn parse_typed_member(&mut self) -> Result<ParseTreeNode, ParseError> {
        if !self.options.class_functions {
            return self.parse_variable_declaration();
        }

        let member_type = self.expect_leaf(TokenKind::TypeKeyword)?;
        let name = self.expect_leaf(TokenKind::Ident)?;
        if self.check(TokenKind::LParen) {
            self.finish_function_declaration(member_type, name)
        } else {
            self.finish_variable_declaration(member_type, name)
        }
    }

    /// Parse function declaration: type name(params) { body return rhs; }
    pub fn parse_function_declaration(&mut self) -> Result<ParseTreeNode, ParseError> {
        let return_type = self.expect_leaf(TokenKind::TypeKeyword)?;
        let name = self.expect_leaf(TokenKind::Ident)?;
        self.finish_function_declaration(return_type, name)
    }

    fn finish_function_declaration(
        &mut self,
        return_type: ParseTreeNode,
        name: ParseTreeNode,
    ) -> Result<ParseTreeNode, ParseError> {
        self.expect(TokenKind::LParen)?;
        let args = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        let body = self.parse_block()?;
        let ret = self.parse_return()?;
        self.expect(TokenKind::RBrace)?;

        Ok(ParseTreeNode::with_children(
            labels::FDECL,
            vec![return_type, name, args, body, ret],
        ))
    }

    /// Parse parameter list (without the parentheses)
    pub(crate) fn parse_params(&mut self) -> Result<ParseTreeNode, ParseError> {
        let mut args = ParseTreeNode::new(labels::ARGS);

        if !self.check(TokenKind::TypeKeyword) {
            return Ok(args);
        }

        loop {
            args.push(self.expect_leaf(TokenKind::TypeKeyword)?);
            args.push(self.expect_leaf(TokenKind::Ident)?);

            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(args)
    }
}

fn non_empty(node: ParseTreeNode) -> Option<ParseTreeNode> {
    (!node.is_empty()).then_some(node)
}

#[cfg(test)]
mod tests {
    use crate::parser::lexer::tokenize;
    use crate::parser::options::GrammarOptions;
    use crate::parser::parse::{Expected, ParseError, Parser};

    fn parse(source: &str) -> Result<String, ParseError> {
        parse_with(source, GrammarOptions::default())
    }

    fn parse_with(source: &str, options: GrammarOptions) -> Result<String, ParseError> {
        let tokens = tokenize(source).unwrap();
        Parser::with_options(&tokens, options)
            .parse_program()
            .map(|tree| tree.sexpr())
    }

    #[test]
    fn test_var_without_initializer_leaves_semicolon() {
        assert_eq!(parse("int x;").unwrap(), "(CODE (VDECL int x))");
        assert_eq!(parse("int x int y").unwrap(), "(CODE (VDECL int x) (VDECL int y))");
    }

    #[test]
    fn test_var_with_initializer_requires_semicolon() {
        assert_eq!(
            parse("char c = 'a';").unwrap(),
            "(CODE (VDECL char c (ASSIGN = (EXPR (TERM (FACTOR 'a'))))))"
        );
        assert!(matches!(
            parse("int x = 1").unwrap_err(),
            ParseError::Syntax {
                expected: Expected::Token(crate::parser::lexer::TokenKind::Semicolon),
                ..
            }
        ));
    }

    #[test]
    fn test_strict_semicolons() {
        let strict = GrammarOptions::default().with_strict_semicolons(true);

        assert_eq!(parse_with("int x;", strict).unwrap(), "(CODE (VDECL int x))");
        assert!(parse_with("int x int y", strict).is_err());
    }

    #[test]
    fn test_nested_classes() {
        assert_eq!(
            parse("class A { class B { } ; int y; }").unwrap(),
            "(CODE (CDECL class A (ODECL (CDECL class B ODECL) (VDECL int y))))"
        );
    }

    #[test]
    fn test_params_fragment() {
        assert_eq!(
            parse("(int a, String b)").unwrap(),
            "(CODE (ARGS int a String b))"
        );
        assert_eq!(parse("( ) ; { }").unwrap(), "CODE");
    }

    #[test]
    fn test_dangling_comma_in_params() {
        assert!(parse("(int a,)").is_err());
    }

    #[test]
    fn test_functions_are_not_members_by_default() {
        let err = parse("class A { int f() { return 0; } }").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                expected: Expected::Token(crate::parser::lexer::TokenKind::RBrace),
                ..
            }
        ));
    }

    #[test]
    fn test_class_functions() {
        let options = GrammarOptions::default().with_class_functions(true);

        assert_eq!(
            parse_with("class A { int n = 1; int get(int k) { k = n; return k; } }", options)
                .unwrap(),
            "(CODE (CDECL class A (ODECL \
             (VDECL int n (ASSIGN = (EXPR (TERM (FACTOR 1))))) \
             (FDECL int get (ARGS int k) \
             (BLOCK (ASSIGN k = (EXPR (TERM (FACTOR n))))) \
             (RETURN return (RHS k))))))"
        );
    }

    #[test]
    fn test_function_declaration_directly() {
        let tokens = tokenize("void main() { return \"done\"; }").unwrap();
        let mut parser = Parser::new(&tokens);
        let fdecl = parser.parse_function_declaration().unwrap();

        assert_eq!(
            fdecl.sexpr(),
            "(FDECL void main ARGS BLOCK (RETURN return (RHS \"done\")))"
        );
        assert!(parser.finish().is_ok());
    }

    #[test]
    fn test_invalid_declaration() {
        let err = parse("x = 1;").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                expected: Expected::Declaration,
                ..
            }
        ));
    }
}
