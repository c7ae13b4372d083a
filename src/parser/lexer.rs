//! Lexer (tokenizer) for MiniJava source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace and `//` line comments are discarded, but the newlines they
//! contain still advance the line counter.
//!
//! # Scanning
//!
//! At every position the categories in `SCAN_ORDER` are tried top to bottom
//! and the lexer commits to the **first** one that matches. This is not
//! longest-match: `-5` is a signed integer rather than `-` followed by `5`,
//! because integers outrank the additive operator. Keyword-like categories only
//! match whole words, so `classify` and `integer` stay single identifiers.

use log::{debug, trace};
use std::fmt;
use thiserror::Error;

/// Token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals and types
    TypeKeyword,   // int double boolean char String void
    IntLiteral,    // -?[0-9]+
    CharLiteral,   // 'c'
    BoolLiteral,   // true false
    StringLiteral, // "..."

    // Keywords
    If,
    Else,
    While,
    Return,
    Class,

    Ident,

    // Operators
    AddOp,  // + -
    MulOp,  // * /
    Assign, // =
    RelOp,  // == != <= >= < >

    // Punctuation
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
}

impl TokenKind {
    /// Short category name, as printed by `--tokens` and in syntax errors.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::TypeKeyword => "vtype",
            TokenKind::IntLiteral => "num",
            TokenKind::CharLiteral => "character",
            TokenKind::BoolLiteral => "boolstr",
            TokenKind::StringLiteral => "literal",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Return => "return",
            TokenKind::Class => "class",
            TokenKind::Ident => "id",
            TokenKind::AddOp => "addsub",
            TokenKind::MulOp => "multdiv",
            TokenKind::Assign => "assign",
            TokenKind::RelOp => "comp",
            TokenKind::Semicolon => "semi",
            TokenKind::Comma => "comma",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexeme with its category and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line on which the lexeme starts
    pub line: usize,
    /// Byte offset of the lexeme's first character
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, offset: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            offset,
        }
    }

    /// Byte offset one past the lexeme's last character.
    pub fn end(&self) -> usize {
        self.offset + self.lexeme.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.lexeme)
    }
}

/// Why no category matched.
///
/// All variants mean the same thing to the scanner; the variant is picked from
/// the offending character to make the message more useful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    MalformedChar,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {:?}", c),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::MalformedChar => write!(f, "malformed character literal"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexical error at line {line}, offset {offset}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
    pub line: usize,
}

/// One row of the priority table: either a token category or a discarded span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Emit(TokenKind),
    Comment,
    Whitespace,
}

/// Scan priority, highest first.
const SCAN_ORDER: [Rule; 23] = [
    Rule::Emit(TokenKind::TypeKeyword),
    Rule::Emit(TokenKind::IntLiteral),
    Rule::Emit(TokenKind::CharLiteral),
    Rule::Emit(TokenKind::BoolLiteral),
    Rule::Emit(TokenKind::StringLiteral),
    Rule::Emit(TokenKind::If),
    Rule::Emit(TokenKind::Else),
    Rule::Emit(TokenKind::While),
    Rule::Emit(TokenKind::Return),
    Rule::Emit(TokenKind::Class),
    Rule::Comment,
    Rule::Emit(TokenKind::Ident),
    Rule::Emit(TokenKind::AddOp),
    Rule::Emit(TokenKind::MulOp),
    Rule::Emit(TokenKind::Assign),
    Rule::Emit(TokenKind::RelOp),
    Rule::Emit(TokenKind::Semicolon),
    Rule::Emit(TokenKind::Comma),
    Rule::Emit(TokenKind::LParen),
    Rule::Emit(TokenKind::RParen),
    Rule::Emit(TokenKind::LBrace),
    Rule::Emit(TokenKind::RBrace),
    Rule::Whitespace,
];

const TYPE_KEYWORDS: &[&str] = &["int", "double", "boolean", "char", "String", "void"];
const BOOL_LITERALS: &[&str] = &["true", "false"];
const RELATIONAL_OPS: &[&str] = &["==", "!=", "<=", ">=", "<", ">"];

/// Lexer for MiniJava source code
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    line: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        debug!("lexed {} tokens over {} lines", tokens.len(), self.line);
        Ok(tokens)
    }

    /// Scan forward to the next emitted token, skipping discarded spans.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        while !self.is_at_end() {
            let offset = self.position;
            let line = self.line;
            let (rule, len) = self.scan().ok_or_else(|| self.error_here())?;
            let lexeme = self.consume(len);

            match rule {
                Rule::Emit(kind) => {
                    trace!("{} {:?} at line {}", kind, lexeme, line);
                    return Ok(Some(Token::new(kind, lexeme, line, offset)));
                }
                Rule::Comment | Rule::Whitespace => {}
            }
        }

        Ok(None)
    }

    /// Try every rule in priority order at the current position.
    fn scan(&self) -> Option<(Rule, usize)> {
        let rest = &self.source[self.position..];
        SCAN_ORDER
            .iter()
            .find_map(|&rule| match_rule(rule, rest).map(|len| (rule, len)))
    }

    /// Consume `len` bytes, counting the newlines inside them.
    fn consume(&mut self, len: usize) -> &'src str {
        let span = &self.source[self.position..self.position + len];
        self.line += span.matches('\n').count();
        self.position += len;
        span
    }

    fn error_here(&self) -> LexError {
        let kind = match self.source[self.position..].chars().next() {
            Some('"') => LexErrorKind::UnterminatedString,
            Some('\'') => LexErrorKind::MalformedChar,
            Some(c) => LexErrorKind::UnexpectedCharacter(c),
            None => LexErrorKind::UnexpectedCharacter('\0'),
        };
        LexError {
            kind,
            offset: self.position,
            line: self.line,
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}

/// Convenience wrapper: tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Length in bytes of the match of `rule` at the start of `rest`.
fn match_rule(rule: Rule, rest: &str) -> Option<usize> {
    match rule {
        Rule::Emit(kind) => match kind {
            TokenKind::TypeKeyword => match_word(rest, TYPE_KEYWORDS),
            TokenKind::IntLiteral => match_integer(rest),
            TokenKind::CharLiteral => match_char(rest),
            TokenKind::BoolLiteral => match_word(rest, BOOL_LITERALS),
            TokenKind::StringLiteral => match_string(rest),
            TokenKind::If => match_word(rest, &["if"]),
            TokenKind::Else => match_word(rest, &["else"]),
            TokenKind::While => match_word(rest, &["while"]),
            TokenKind::Return => match_word(rest, &["return"]),
            TokenKind::Class => match_word(rest, &["class"]),
            TokenKind::Ident => match_identifier(rest),
            TokenKind::AddOp => match_one_of(rest, &['+', '-']),
            TokenKind::MulOp => match_one_of(rest, &['*', '/']),
            // '=' must not eat the front of '=='
            TokenKind::Assign => (rest.starts_with('=') && !rest.starts_with("==")).then_some(1),
            TokenKind::RelOp => RELATIONAL_OPS
                .iter()
                .find(|op| rest.starts_with(**op))
                .map(|op| op.len()),
            TokenKind::Semicolon => match_one_of(rest, &[';']),
            TokenKind::Comma => match_one_of(rest, &[',']),
            TokenKind::LParen => match_one_of(rest, &['(']),
            TokenKind::RParen => match_one_of(rest, &[')']),
            TokenKind::LBrace => match_one_of(rest, &['{']),
            TokenKind::RBrace => match_one_of(rest, &['}']),
        },
        Rule::Comment => rest
            .starts_with("//")
            .then(|| rest.find('\n').unwrap_or(rest.len())),
        Rule::Whitespace => {
            let len = prefix_len(rest, char::is_whitespace);
            (len > 0).then_some(len)
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of the longest prefix whose chars all satisfy `pred`.
fn prefix_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i)
}

/// Match any of `words`, anchored to a trailing word boundary.
fn match_word(rest: &str, words: &[&str]) -> Option<usize> {
    words.iter().find_map(|word| {
        let tail = rest.strip_prefix(word)?;
        match tail.chars().next() {
            Some(c) if is_ident_continue(c) => None,
            _ => Some(word.len()),
        }
    })
}

fn match_integer(rest: &str) -> Option<usize> {
    let sign = usize::from(rest.starts_with('-'));
    let digits = prefix_len(&rest[sign..], |c| c.is_ascii_digit());
    (digits > 0).then_some(sign + digits)
}

fn match_char(rest: &str) -> Option<usize> {
    let mut chars = rest.chars();
    if chars.next() != Some('\'') {
        return None;
    }
    let c = chars.next().filter(|&c| c != '\n')?;
    (chars.next() == Some('\'')).then_some(2 + c.len_utf8())
}

fn match_string(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('"')?;
    body.find('"').map(|close| close + 2)
}

fn match_identifier(rest: &str) -> Option<usize> {
    let first = rest.chars().next().filter(|&c| is_ident_start(c))?;
    Some(first.len_utf8() + prefix_len(&rest[first.len_utf8()..], is_ident_continue))
}

fn match_one_of(rest: &str, chars: &[char]) -> Option<usize> {
    rest.chars()
        .next()
        .filter(|c| chars.contains(c))
        .map(char::len_utf8)
}
