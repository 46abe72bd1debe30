// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Tri language.
//!
//! Transforms a token stream into an abstract syntax tree.

mod hints;
mod parser;

pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser};

/// Lex and parse a source string in one go.
///
/// Lexical errors are not reported here; callers that care run the lexer
/// themselves.
pub fn parse_source(source: &str) -> ParseResult {
    let lex_result = tri_lexer::Lexer::new(source).tokenize();
    Parser::new(lex_result.tokens).parse()
}
