// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the Tri language.
//!
//! Tokenizes source code into a stream of tokens for the parser.

mod lexer;

pub use lexer::{LexError, LexErrorKind, LexResult, Lexer};

/// Convenience wrapper: tokenize a whole source string.
pub fn tokenize(source: &str) -> LexResult {
    Lexer::new(source).tokenize()
}
