// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use std::fmt;

use crate::{Position, Span};

/// A token produced by the lexer.
///
/// `spelling` is the exact source text of the token; `position` is the
/// line/column of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub span: Span,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, spelling: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            span,
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @ {}", self.kind, self.spelling, self.position)
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Literals
    IntLiteral,
    CharLiteral,

    // Names
    Identifier,
    Operator,

    // Keywords
    Begin,
    Const,
    Do,
    Else,
    End,
    If,
    In,
    Let,
    Then,
    Var,
    While,
    Wend,
    WendWhile,
    Pass,
    Endlet,

    // Punctuation
    Semicolon,
    Becomes,
    Is,
    LeftBracket,
    RightBracket,

    // Special
    EndOfText,
    Error,
}

/// Reserved words and the kinds they map to.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("begin", TokenKind::Begin),
    ("const", TokenKind::Const),
    ("do", TokenKind::Do),
    ("else", TokenKind::Else),
    ("end", TokenKind::End),
    ("if", TokenKind::If),
    ("in", TokenKind::In),
    ("let", TokenKind::Let),
    ("then", TokenKind::Then),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
    ("wend", TokenKind::Wend),
    ("wendwhile", TokenKind::WendWhile),
    ("pass", TokenKind::Pass),
    ("endlet", TokenKind::Endlet),
];

impl TokenKind {
    /// Look up a word in the keyword table.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, kind)| *kind)
    }

    /// All keyword spellings with their kinds.
    pub fn keywords() -> &'static [(&'static str, TokenKind)] {
        KEYWORDS
    }

    pub fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }

    /// Human-readable name for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "an integer literal",
            TokenKind::CharLiteral => "a character literal",
            TokenKind::Identifier => "a name",
            TokenKind::Operator => "an operator",

            TokenKind::Begin => "'begin'",
            TokenKind::Const => "'const'",
            TokenKind::Do => "'do'",
            TokenKind::Else => "'else'",
            TokenKind::End => "'end'",
            TokenKind::If => "'if'",
            TokenKind::In => "'in'",
            TokenKind::Let => "'let'",
            TokenKind::Then => "'then'",
            TokenKind::Var => "'var'",
            TokenKind::While => "'while'",
            TokenKind::Wend => "'wend'",
            TokenKind::WendWhile => "'wendwhile'",
            TokenKind::Pass => "'pass'",
            TokenKind::Endlet => "'endlet'",

            TokenKind::Semicolon => "';'",
            TokenKind::Becomes => "'='",
            TokenKind::Is => "'~'",
            TokenKind::LeftBracket => "'('",
            TokenKind::RightBracket => "')'",

            TokenKind::EndOfText => "end of text",
            TokenKind::Error => "an invalid token",
        }
    }
}
