// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Canonical printer for Tri programs.
//!
//! Printing a parsed program and parsing the result again yields a program
//! that prints identically.

mod config;
mod printer;

pub use config::FormatConfig;

use tri_ast::Program;

/// Format Tri source code with default configuration.
/// Returns formatted source, or the original if lexing or parsing fails.
pub fn format_source(source: &str) -> String {
    format_source_with_config(source, &FormatConfig::default())
}

/// Format Tri source code with custom configuration.
pub fn format_source_with_config(source: &str, config: &FormatConfig) -> String {
    let lex_result = tri_lexer::Lexer::new(source).tokenize();
    if !lex_result.is_ok() {
        return source.to_string();
    }

    let parse_result = tri_parser::Parser::new(lex_result.tokens).parse();
    if !parse_result.is_ok() {
        return source.to_string();
    }

    format_program(&parse_result.program, config)
}

/// Print an already parsed program.
pub fn format_program(program: &Program, config: &FormatConfig) -> String {
    let mut p = printer::Printer::new(config);
    p.format_program(program);
    p.finish()
}
