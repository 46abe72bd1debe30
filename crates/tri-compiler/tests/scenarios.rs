// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end runs of the front end.

use std::fs;

use tri_ast::token::TokenKind;
use tri_ast::Span;
use tri_compiler::{analyze, compile, CompileError, ListingGenerator, Phase, SourceFile, TargetCodeWriter};
use tri_diagnostics::Diagnostics;

fn source(text: &str) -> SourceFile {
    SourceFile::new("main.tri", text)
}

fn codes(diagnostics: &Diagnostics) -> Vec<&str> {
    diagnostics
        .as_slice()
        .iter()
        .filter_map(|d| d.code.as_ref().map(|c| c.0.as_str()))
        .collect()
}

fn halted_at(result: Result<tri_compiler::AnalyzedProgram, CompileError>) -> Phase {
    match result {
        Err(CompileError::Halted { phase, .. }) => phase,
        other => panic!("expected the pipeline to halt, got {other:?}"),
    }
}

#[test_log::test]
fn const_declaration_tokens() {
    let lexed = tri_lexer::tokenize("const x ~ 5");
    assert!(lexed.is_ok());

    let kinds: Vec<TokenKind> = lexed.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Const,
            TokenKind::Identifier,
            TokenKind::Is,
            TokenKind::IntLiteral,
            TokenKind::EndOfText,
        ]
    );
    assert_eq!(lexed.tokens[1].spelling, "x");
    assert_eq!(lexed.tokens[3].spelling, "5");
}

#[test_log::test]
fn well_typed_program_reaches_code_generation() {
    let src = source("let var y Integer; const x ~ 5 in y = x endlet pass");
    let dir = tempfile::tempdir().unwrap();
    let writer = TargetCodeWriter::new(dir.path().join("main.bin"), dir.path().join("main.lst"));
    let mut generator = ListingGenerator::new(&src);
    let mut diagnostics = Diagnostics::new();

    let listing = compile(&src, &mut generator, &writer, &mut diagnostics).unwrap();

    assert!(diagnostics.is_empty());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(listing.declarations.len(), 2);

    let text = fs::read_to_string(dir.path().join("main.lst")).unwrap();
    assert!(text.contains("y = x"));
    assert!(text.contains("! 1:9 variable y: Integer"));
    assert!(text.contains("! 1:26 constant x: Integer"));

    let json: serde_json::Value = serde_json::from_slice(&fs::read(dir.path().join("main.bin")).unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test_log::test]
fn duplicate_declaration_reported_once() {
    let text = "let const x ~ 1; const x ~ 2 in pass endlet pass";
    let mut diagnostics = Diagnostics::new();

    let phase = halted_at(analyze(&source(text), &mut diagnostics));

    assert_eq!(phase, Phase::Identification);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(codes(&diagnostics), vec!["E0201"]);

    let second_x = text.rfind("x ~").unwrap();
    assert_eq!(
        diagnostics.as_slice()[0].primary_span(),
        Some(Span::new(second_x, second_x + 1))
    );
}

#[test_log::test]
fn undefined_symbol_halts_before_type_checking() {
    let src = source("z = 3");
    let dir = tempfile::tempdir().unwrap();
    let writer = TargetCodeWriter::new(dir.path().join("main.bin"), dir.path().join("main.lst"));
    let mut generator = ListingGenerator::new(&src);
    let mut diagnostics = Diagnostics::new();

    let result = compile(&src, &mut generator, &writer, &mut diagnostics);

    match result {
        Err(CompileError::Halted { phase, errors }) => {
            assert_eq!(phase, Phase::Identification);
            assert_eq!(errors, 1);
        }
        other => panic!("expected halt, got {other:?}"),
    }
    assert_eq!(codes(&diagnostics), vec!["E0200"]);
    assert_eq!(diagnostics.as_slice()[0].primary_span(), Some(Span::new(0, 1)));
    assert!(!dir.path().join("main.bin").exists());
    assert!(!dir.path().join("main.lst").exists());
}

#[test_log::test]
fn non_boolean_condition_is_a_mismatch() {
    let mut diagnostics = Diagnostics::new();

    let phase = halted_at(analyze(&source("if 3 then pass else pass"), &mut diagnostics));

    assert_eq!(phase, Phase::TypeCheck);
    assert_eq!(codes(&diagnostics), vec!["E0308"]);
    assert_eq!(diagnostics.as_slice()[0].primary_span(), Some(Span::new(3, 4)));
}

#[test_log::test]
fn lexical_errors_stop_before_parsing() {
    let mut diagnostics = Diagnostics::new();

    let phase = halted_at(analyze(&source("x = @"), &mut diagnostics));

    assert_eq!(phase, Phase::Lex);
    assert_eq!(codes(&diagnostics), vec!["E0001"]);
}

#[test_log::test]
fn syntax_errors_stop_before_identification() {
    let mut diagnostics = Diagnostics::new();

    // `undefined` would be an identification error if parsing went on.
    let phase = halted_at(analyze(&source("if undefined then pass"), &mut diagnostics));

    assert_eq!(phase, Phase::Parse);
    assert!(diagnostics.has_errors());
    assert!(codes(&diagnostics).iter().all(|c| c.starts_with("E01")));
}

#[test_log::test]
fn every_expression_typed_in_checked_program() {
    let src = source("let var n Integer; const c ~ 'q' in begin getint(var n); n = n + 1 * maxint; put(c) end endlet pass");
    let mut diagnostics = Diagnostics::new();

    let analyzed = analyze(&src, &mut diagnostics).unwrap();

    assert!(!analyzed.typed.node_types.is_empty());
    assert!(analyzed.typed.node_types.values().all(|ty| !ty.is_error()));
}

#[test_log::test]
fn errors_already_in_the_sink_stop_the_pipeline() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(tri_diagnostics::Diagnostic::error("earlier failure"));

    let result = analyze(&source("let var y Integer in y = 1 endlet pass"), &mut diagnostics);

    match result {
        Err(CompileError::Halted { phase, errors }) => {
            assert_eq!(phase, Phase::Lex);
            assert_eq!(errors, 1);
        }
        other => panic!("expected halt, got {other:?}"),
    }
    assert_eq!(diagnostics.len(), 1);
}
