// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Code generation seam and the listing target.

use serde::Serialize;
use tri_ast::LineMap;
use tri_fmt::FormatConfig;

use crate::{AnalyzedProgram, SourceFile};

/// Output of a code generator, renderable as bytes and as text.
pub trait TargetCode {
    fn to_binary(&self) -> Vec<u8>;
    fn to_text(&self) -> String;
}

/// Back end consuming a checked program.
pub trait CodeGenerator {
    type Output: TargetCode;

    fn generate(&mut self, program: &AnalyzedProgram) -> Self::Output;
}

/// One declared constant or variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub kind: &'static str,
    #[serde(rename = "type")]
    pub ty: String,
    pub line: u32,
    pub column: u32,
}

/// Canonical program text plus its declaration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub program: String,
    pub declarations: Vec<ListingEntry>,
}

impl TargetCode for Listing {
    /// JSON encoding of the declaration table.
    fn to_binary(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(&self.declarations).unwrap_or_default()
    }

    /// The program followed by the declarations as `!` comments, so the
    /// text is itself valid source.
    fn to_text(&self) -> String {
        let mut out = self.program.clone();
        if self.declarations.is_empty() {
            return out;
        }
        out.push_str("! declarations\n");
        for entry in &self.declarations {
            out.push_str(&format!(
                "! {}:{} {} {}: {}\n",
                entry.line, entry.column, entry.kind, entry.name, entry.ty
            ));
        }
        out
    }
}

/// Generates a [`Listing`] for programs read from one source file.
pub struct ListingGenerator {
    lines: LineMap,
    config: FormatConfig,
}

impl ListingGenerator {
    pub fn new(source: &SourceFile) -> Self {
        Self::with_config(source, FormatConfig::default())
    }

    pub fn with_config(source: &SourceFile, config: FormatConfig) -> Self {
        Self {
            lines: LineMap::new(&source.text),
            config,
        }
    }
}

impl CodeGenerator for ListingGenerator {
    type Output = Listing;

    fn generate(&mut self, analyzed: &AnalyzedProgram) -> Listing {
        let typed = &analyzed.typed;
        let declarations = typed
            .symbols
            .declared()
            .map(|symbol| {
                let position = self.lines.position(symbol.span.map_or(0, |s| s.start));
                ListingEntry {
                    name: symbol.name.clone(),
                    kind: symbol.kind.describe(),
                    ty: typed
                        .symbol_type(symbol.id)
                        .map_or_else(|| "?".to_string(), |ty| ty.to_string()),
                    line: position.line,
                    column: position.column,
                }
            })
            .collect();

        Listing {
            program: tri_fmt::format_program(&analyzed.program, &self.config),
            declarations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_diagnostics::Diagnostics;

    fn listing(src: &str) -> Listing {
        let source = SourceFile::new("main.tri", src);
        let mut diagnostics = Diagnostics::new();
        let analyzed = crate::analyze(&source, &mut diagnostics).unwrap();
        ListingGenerator::new(&source).generate(&analyzed)
    }

    #[test]
    fn declaration_table_in_order() {
        let listing = listing("let var y Integer; const x ~ 'a' in y = 1 endlet pass");
        assert_eq!(
            listing.declarations,
            vec![
                ListingEntry {
                    name: "y".into(),
                    kind: "variable",
                    ty: "Integer".into(),
                    line: 1,
                    column: 9,
                },
                ListingEntry {
                    name: "x".into(),
                    kind: "constant",
                    ty: "Char".into(),
                    line: 1,
                    column: 26,
                },
            ]
        );
    }

    #[test]
    fn text_is_reparseable() {
        let listing = listing("let var y Integer in y = 1 endlet pass");
        let text = listing.to_text();
        assert!(text.starts_with("let\n    var y Integer\nin\n    y = 1\nendlet\npass\n"));
        assert!(text.ends_with("! declarations\n! 1:9 variable y: Integer\n"));
        assert!(tri_parser::parse_source(&text).is_ok());
    }

    #[test]
    fn binary_is_json_table() {
        let listing = listing("let const x ~ 5 in pass endlet pass");
        let value: serde_json::Value = serde_json::from_slice(&listing.to_binary()).unwrap();
        assert_eq!(value[0]["name"], "x");
        assert_eq!(value[0]["type"], "Integer");
        assert_eq!(value[0]["kind"], "constant");
    }

    #[test]
    fn no_declarations_prints_program_only() {
        let listing = listing("putint(1)");
        assert_eq!(listing.to_text(), "putint(1)\n");
        assert_eq!(listing.to_binary(), b"[]".to_vec());
    }
}
