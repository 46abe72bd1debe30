// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The front-end pipeline: lex, parse, identify, check.

use std::fmt;

use tracing::{debug, info};
use tri_diagnostics::{Diagnostics, ToDiagnostic};
use tri_lexer::Lexer;
use tri_parser::Parser;

use crate::codegen::{CodeGenerator, TargetCode};
use crate::writer::TargetCodeWriter;
use crate::{AnalyzedProgram, CompileError, SourceFile};

/// A stage of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Identification,
    TypeCheck,
}

impl Phase {
    /// Short name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Lex => "lex",
            Phase::Parse => "parse",
            Phase::Identification => "resolve",
            Phase::TypeCheck => "typecheck",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run the front end over one source file.
///
/// Every error a stage finds is reported to `diagnostics`. The pipeline stops
/// after the first stage that leaves the sink holding any error, and returns
/// [`CompileError::Halted`] naming it.
pub fn analyze(source: &SourceFile, diagnostics: &mut Diagnostics) -> Result<AnalyzedProgram, CompileError> {
    info!(file = %source.name, "lexing");
    let lexed = Lexer::new(&source.text).tokenize();
    report_phase(Phase::Lex, &lexed.errors, diagnostics)?;

    info!(tokens = lexed.tokens.len(), "parsing");
    let parsed = Parser::new(lexed.tokens).parse();
    report_phase(Phase::Parse, &parsed.errors, diagnostics)?;
    let program = parsed.program;

    info!("identifying");
    let resolved = tri_resolve::resolve(&program);
    report_phase(Phase::Identification, &resolved.errors, diagnostics)?;

    info!(symbols = resolved.symbols.len(), "type checking");
    let checked = tri_types::typecheck(resolved, &program);
    report_phase(Phase::TypeCheck, &checked.errors, diagnostics)?;

    info!("analysis complete");
    Ok(AnalyzedProgram {
        program,
        typed: checked.typed,
    })
}

/// Analyze a source file, generate target code and write both renderings.
pub fn compile<G: CodeGenerator>(
    source: &SourceFile,
    generator: &mut G,
    writer: &TargetCodeWriter,
    diagnostics: &mut Diagnostics,
) -> Result<G::Output, CompileError> {
    let analyzed = analyze(source, diagnostics)?;

    info!("generating code");
    let output = generator.generate(&analyzed);
    writer.write(&output as &dyn TargetCode)?;
    Ok(output)
}

fn report_phase<E: ToDiagnostic>(
    phase: Phase,
    errors: &[E],
    diagnostics: &mut Diagnostics,
) -> Result<(), CompileError> {
    debug!(phase = %phase, errors = errors.len(), "phase finished");
    diagnostics.report_all(errors);
    if !diagnostics.has_errors() {
        return Ok(());
    }
    Err(CompileError::Halted {
        phase,
        errors: diagnostics.error_count(),
    })
}
