// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `tric`: the Tri compiler front end.

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tri_compiler::{compile, CompileError, ListingGenerator, SourceFile, TargetCodeWriter};
use tri_diagnostics::formatter::DiagnosticFormatter;
use tri_diagnostics::json;
use tri_diagnostics::Diagnostics;

mod args;
mod output;

use args::{Args, Emit, Format};

fn main() {
    let args = Args::parse();
    output::init();
    init_logging(args.logging.log_level_filter());

    process::exit(run(&args));
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> i32 {
    let source = match SourceFile::read(&args.input) {
        Ok(source) => source,
        Err(source) => {
            let err = CompileError::Read {
                path: args.input.clone(),
                source,
            };
            eprintln!("{}: {}", output::error_label(), err);
            return 1;
        }
    };

    if let Some(emit) = args.emit {
        return emit_dump(&source, emit);
    }

    // Both are present whenever `--emit` is absent.
    let (Some(binary), Some(text)) = (&args.binary_output, &args.text_output) else {
        eprintln!("{}: missing output paths", output::error_label());
        return 1;
    };

    let writer = TargetCodeWriter::new(binary, text);
    let mut generator = ListingGenerator::new(&source);
    let mut diagnostics = Diagnostics::new();

    match compile(&source, &mut generator, &writer, &mut diagnostics) {
        Ok(_) => {
            match args.format {
                Format::Human => {
                    println!("{}", output::banner_ok("compile"));
                    println!("wrote {} and {}", display_path(binary), display_path(text));
                }
                Format::Json => {
                    let report = json::to_json_report(&[], &source.text, &source.name, "compile");
                    println!("{}", json::to_json_string(&report));
                }
            }
            0
        }
        Err(CompileError::Halted { phase, .. }) => {
            show_diagnostics(&diagnostics, &source, phase.name(), args.format);
            1
        }
        Err(err) => {
            eprintln!("{}: {}", output::error_label(), err);
            1
        }
    }
}

/// Print a phase's diagnostics in the requested format.
fn show_diagnostics(diagnostics: &Diagnostics, source: &SourceFile, phase: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(&source.text).with_file_name(&source.name);
            for diagnostic in diagnostics.as_slice() {
                eprintln!("{}", formatter.format(diagnostic));
            }
            eprintln!("{}", output::banner_fail(phase, diagnostics.error_count()));
        }
        Format::Json => {
            let report = json::to_json_report(diagnostics.as_slice(), &source.text, &source.name, phase);
            println!("{}", json::to_json_string(&report));
        }
    }
}

fn emit_dump(source: &SourceFile, emit: Emit) -> i32 {
    let lexed = tri_lexer::tokenize(&source.text);
    let mut diagnostics = Diagnostics::new();
    diagnostics.report_all(&lexed.errors);

    match emit {
        Emit::Tokens => {
            for token in &lexed.tokens {
                println!("{}", token);
            }
        }
        Emit::Ast => {
            let parsed = tri_parser::Parser::new(lexed.tokens).parse();
            diagnostics.report_all(&parsed.errors);
            println!("{:#?}", parsed.program);
        }
    }

    if diagnostics.has_errors() {
        show_diagnostics(&diagnostics, source, emit_phase(emit), Format::Human);
        return 1;
    }
    0
}

fn emit_phase(emit: Emit) -> &'static str {
    match emit {
        Emit::Tokens => "lex",
        Emit::Ast => "parse",
    }
}

fn display_path(path: &Path) -> String {
    output::file_path(&path.display().to_string()).to_string()
}
