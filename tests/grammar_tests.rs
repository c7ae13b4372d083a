// Integration tests for the MiniJava front end

use minijava::parser::lexer::LexErrorKind;
use minijava::parser::{Expected, Found, GrammarOptions, ParseError, TokenKind};
use minijava::{parse_expression_source, parse_source, parse_source_with};
use rstest::rstest;

fn sexpr(source: &str) -> String {
    parse_source(source).expect("Parsing failed").sexpr()
}

#[test]
fn test_declaration_without_initializer() {
    assert_eq!(sexpr("int x;"), "(CODE (VDECL int x))");
}

#[test]
fn test_declaration_with_initializer() {
    assert_eq!(
        sexpr("int x = 5;"),
        "(CODE (VDECL int x (ASSIGN = (EXPR (TERM (FACTOR 5))))))"
    );
}

#[test]
fn test_class_with_field() {
    assert_eq!(
        sexpr("class A { int x; }"),
        "(CODE (CDECL class A (ODECL (VDECL int x))))"
    );
}

#[test]
fn test_while_in_block() {
    assert_eq!(
        sexpr("{ while (true) { } }"),
        "(CODE (BLOCK (WHILESTMT while (COND true) BLOCK)))"
    );
}

#[test]
fn test_while_is_not_a_declaration() {
    let err = parse_source("while (true) { }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Syntax {
            expected: Expected::Declaration,
            ..
        }
    ));
}

#[test]
fn test_operator_in_factor_position() {
    let err = parse_expression_source("x +* y").unwrap_err();
    assert_eq!(
        err,
        ParseError::Syntax {
            expected: Expected::Factor,
            found: Found::Token {
                kind: TokenKind::MulOp,
                lexeme: "*".to_string(),
            },
            line: 1,
        }
    );
}

#[test]
fn test_operator_in_factor_position_inside_program() {
    let err = parse_source("int a;\n{ a = x +* y; }").unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(err.to_string().contains("expected factor, found multdiv '*'"));
}

#[test]
fn test_unterminated_string() {
    let err = parse_source("\"abc").unwrap_err();
    match err {
        ParseError::Lex(lex) => {
            assert_eq!(lex.kind, LexErrorKind::UnterminatedString);
            assert_eq!(lex.offset, 0);
            assert_eq!(lex.line, 1);
        }
        other => panic!("Expected lexical error, got {:?}", other),
    }
}

#[test]
fn test_expression_must_consume_input() {
    let err = parse_expression_source("a + b c").unwrap_err();
    assert_eq!(
        err,
        ParseError::TrailingInput {
            found: Found::Token {
                kind: TokenKind::Ident,
                lexeme: "c".to_string(),
            },
            line: 1,
        }
    );
}

#[test]
fn test_empty_fragments_leave_no_children() {
    assert_eq!(sexpr(";;; ( ) { } ;"), "CODE");
    assert_eq!(
        sexpr("{ ; x = 1; ; }"),
        "(CODE (BLOCK (ASSIGN x = (EXPR (TERM (FACTOR 1))))))"
    );
}

#[test]
fn test_keyword_prefixed_identifier_in_program() {
    assert_eq!(
        sexpr("int classify = iffy;"),
        "(CODE (VDECL int classify (ASSIGN = (EXPR (TERM (FACTOR iffy))))))"
    );
}

#[test]
fn test_signed_literal_after_identifier() {
    // `x-1` lexes as `x` `-1`, so the subtraction is missing its operator
    let err = parse_source("{ y = x-1; }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Syntax {
            expected: Expected::Token(TokenKind::Semicolon),
            found: Found::Token {
                kind: TokenKind::IntLiteral,
                ..
            },
            ..
        }
    ));
    assert!(parse_source("{ y = x - 1; }").is_ok());
}

#[test]
fn test_full_program() {
    let source = r#"
        // Fields and a nested class
        class Account {
            int balance = 0;
            String owner = "nobody";
            class Audit { boolean done; }
        }

        {
            int i = 3;
            while (i > 0) {
                if (i == 2) {
                    balance = balance + (i * 10) / 2;
                } else {
                    char c = 'z';
                }
                i = i - 1;
            }
        }
    "#;

    let tree = parse_source(source).expect("Parsing failed");

    assert_eq!(tree.label(), "CODE");
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.children()[0].label(), "CDECL");
    assert_eq!(tree.children()[1].label(), "BLOCK");

    let labels: Vec<&str> = tree.preorder().map(|(_, node)| node.label()).collect();
    assert!(labels.contains(&"WHILESTMT"));
    assert!(labels.contains(&"IFSTMT"));
    assert!(labels.contains(&"else"));
    assert!(labels.contains(&"\"nobody\""));
}

#[test]
fn test_strict_semicolons_reject_missing_semicolon() {
    let strict = GrammarOptions::default().with_strict_semicolons(true);

    assert!(parse_source("int a int b").is_ok());
    let err = parse_source_with("int a int b", strict).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Syntax {
            expected: Expected::Token(TokenKind::Semicolon),
            ..
        }
    ));
}

#[test]
fn test_deep_nesting_is_rejected_not_overflowed() {
    let depth = 10_000;
    let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));

    let err = parse_source(&source).unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { limit: 256, .. }));
}

#[test]
fn test_independent_parses_on_threads() {
    let sources = ["int a = 1;", "class B { }", "{ c = 'x'; }", "(int d)"];

    let trees: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || parse_source(source).map(|tree| tree.sexpr())))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    for (source, tree) in sources.iter().zip(&trees) {
        assert_eq!(tree, &sexpr(source));
    }
}

#[rstest]
#[case("int", Expected::Token(TokenKind::Ident))]
#[case("class { }", Expected::Token(TokenKind::Ident))]
#[case("class A int x; }", Expected::Token(TokenKind::LBrace))]
#[case("class A { x }", Expected::Token(TokenKind::RBrace))]
#[case("{ if true { } }", Expected::Token(TokenKind::LParen))]
#[case("{ if (true) x = 1; }", Expected::Token(TokenKind::LBrace))]
#[case("{ while (x) { } }", Expected::Token(TokenKind::RelOp))]
#[case("{ while () { } }", Expected::Condition)]
#[case("{ x = ; }", Expected::Factor)]
#[case("{ x 1; }", Expected::Token(TokenKind::Assign))]
#[case("int x = (1 + 2;", Expected::Token(TokenKind::RParen))]
#[case("(int a int b)", Expected::Token(TokenKind::RParen))]
#[case("}", Expected::Declaration)]
#[case("return", Expected::Declaration)]
fn test_syntax_errors(#[case] source: &str, #[case] expected: Expected) {
    match parse_source(source) {
        Err(ParseError::Syntax { expected: got, .. }) => assert_eq!(got, expected),
        other => panic!("Expected syntax error for {:?}, got {:?}", source, other),
    }
}

#[rstest]
#[case("int x = a + b - c;", "(EXPR (TERM (FACTOR a)) + (TERM (FACTOR b)) - (TERM (FACTOR c)))")]
#[case("int x = a * (b - c);", "(EXPR (TERM (FACTOR a) * (FACTOR (EXPR (TERM (FACTOR b)) - (TERM (FACTOR c))))))")]
#[case("int x = -4 / y;", "(EXPR (TERM (FACTOR -4) / (FACTOR y)))")]
#[case("int x = true;", "(EXPR (TERM (FACTOR true)))")]
fn test_expression_shapes(#[case] source: &str, #[case] expr: &str) {
    let tree = parse_source(source).expect("Parsing failed");
    let assign = &tree.children()[0].children()[2];

    assert_eq!(assign.children()[1].sexpr(), expr);
}
