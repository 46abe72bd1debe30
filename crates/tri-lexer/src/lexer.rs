// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use logos::Logos;
use tri_ast::token::{Token, TokenKind};
use tri_ast::{LineMap, Span};

/// Raw token type for logos. Words are split into keywords and identifiers
/// in a second pass through the keyword table.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"![^\n]*")]
enum RawToken {
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Word,

    #[regex(r"[0-9]+")]
    IntLiteral,

    #[token("'", char_literal)]
    Quote(Quoted),

    #[regex(r"[+\-*/<>\\][+\-*/<>\\=]*")]
    Operator,

    #[token(";")]
    Semicolon,
    #[token("=")]
    Becomes,
    #[token("~")]
    Is,
    #[token("(")]
    LeftBracket,
    #[token(")")]
    RightBracket,
}

/// Outcome of scanning after an opening quote.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Quoted {
    Literal,
    Malformed,
}

/// Consume the rest of a character literal after the opening quote.
///
/// A well-formed literal is one character followed by a closing quote. When
/// the closing quote is missing only the following character is consumed.
fn char_literal(lex: &mut logos::Lexer<RawToken>) -> Quoted {
    let mut rest = lex.remainder().chars();
    match rest.next() {
        Some(c) => {
            if rest.next() == Some('\'') {
                lex.bump(c.len_utf8() + 1);
                Quoted::Literal
            } else {
                lex.bump(c.len_utf8());
                Quoted::Malformed
            }
        }
        None => Quoted::Malformed,
    }
}

/// The result of tokenizing a source string.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The lexer for Tri source code.
pub struct Lexer<'a> {
    source: &'a str,
    lines: LineMap,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: LineMap::new(source),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The returned sequence always ends with a single `EndOfText` token at
    /// the end of the input. Bad characters become `Error` tokens and
    /// scanning carries on past them.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            let span = logos_lexer.span();
            let slice = logos_lexer.slice();

            let kind = match result {
                Ok(raw) => self.convert_token(raw, slice, span.start, span.end),
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start));
                    TokenKind::Error
                }
            };

            let token = Token::new(
                kind,
                slice,
                Span::new(span.start, span.end),
                self.lines.position(span.start),
            );
            tracing::trace!(token = %token, "scanned");
            tokens.push(token);
        }

        let end = self.source.len();
        tokens.push(Token::new(
            TokenKind::EndOfText,
            "",
            Span::new(end, end),
            self.lines.position(end),
        ));

        tracing::debug!(
            tokens = tokens.len(),
            errors = self.errors.len(),
            "tokenized source"
        );

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }

    fn convert_token(&mut self, raw: RawToken, slice: &str, start: usize, end: usize) -> TokenKind {
        match raw {
            RawToken::Word => TokenKind::keyword(slice).unwrap_or(TokenKind::Identifier),
            RawToken::IntLiteral => TokenKind::IntLiteral,
            RawToken::Quote(Quoted::Literal) => TokenKind::CharLiteral,
            RawToken::Quote(Quoted::Malformed) => {
                self.errors.push(LexError::malformed_char_literal(start, end));
                TokenKind::Error
            }
            RawToken::Operator => TokenKind::Operator,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Becomes => TokenKind::Becomes,
            RawToken::Is => TokenKind::Is,
            RawToken::LeftBracket => TokenKind::LeftBracket,
            RawToken::RightBracket => TokenKind::RightBracket,
        }
    }
}

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedChar,
    MalformedCharLiteral,
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        Self {
            kind: LexErrorKind::UnexpectedChar,
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn malformed_char_literal(start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::MalformedCharLiteral,
            span: Span::new(start, end),
            message: "malformed character literal".to_string(),
            hint: Some("a character literal is one character between quotes, like 'a'".to_string()),
        }
    }
}
