// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compiler driver for the Tri language.
//!
//! Runs the front end over a [`SourceFile`], reporting into a
//! [`Diagnostics`](tri_diagnostics::Diagnostics) sink, and hands checked
//! programs to a [`CodeGenerator`].

mod codegen;
mod error;
mod pipeline;
mod source;
mod writer;

pub use codegen::{CodeGenerator, Listing, ListingEntry, ListingGenerator, TargetCode};
pub use error::CompileError;
pub use pipeline::{analyze, compile, Phase};
pub use source::SourceFile;
pub use writer::TargetCodeWriter;

use tri_ast::Program;
use tri_types::TypedProgram;

/// A program that passed every front-end stage. Read-only input to code
/// generation.
#[derive(Debug)]
pub struct AnalyzedProgram {
    pub program: Program,
    pub typed: TypedProgram,
}
