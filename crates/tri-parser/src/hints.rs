// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.

use tri_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on what was found instead.
pub fn for_expected(expected: &str, found: TokenKind) -> Option<&'static str> {
    match (expected, found) {
        ("')'", TokenKind::EndOfText) => Some("add ')' to close the parenthesis"),
        ("'end'", _) => Some("every 'begin' needs a matching 'end'"),
        ("'endlet'", _) => Some("a let command is closed by 'endlet'"),
        ("'wend'", _) => Some("a while loop body is closed by 'wend'"),
        ("'wendwhile'", _) => Some("syntax: do command wendwhile condition"),
        ("'then'", _) => Some("syntax: if condition then command else command"),
        ("'else'", _) => Some("every 'if' needs an 'else' branch; use 'pass' for an empty one"),
        ("'in'", TokenKind::Semicolon) => None,
        ("'in'", _) => Some("declarations in a let are separated by ';' and followed by 'in'"),
        ("'~'", TokenKind::Becomes) => Some("constants are declared with '~', not '='"),
        ("'~'", _) => Some("syntax: const name ~ value"),
        ("a name", TokenKind::IntLiteral) => Some("names can't start with a digit"),
        ("a name", _) => Some("names start with a letter"),
        ("a type name", _) => Some("try a type like 'Integer', 'Char' or 'Boolean'"),
        ("expression", TokenKind::Becomes) => Some("put the value after '='"),
        ("expression", _) => Some("try a literal, a name, or an operator application"),
        ("end of text", TokenKind::Semicolon) => None,
        ("end of text", _) => Some("separate commands with ';'"),
        _ => None,
    }
}
