// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Tri language.
//!
//! This crate defines the tokens and AST nodes shared between the lexer,
//! parser, identification pass and type checker.

pub mod span;
pub mod token;
pub mod expr;
pub mod command;
pub mod decl;

pub use span::{LineMap, Position, Span};

use command::Command;

/// Unique identifier for AST nodes.
///
/// Used by semantic analysis passes to track resolution and typing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

/// A whole program: a single (possibly sequential) command.
#[derive(Debug, Clone)]
pub struct Program {
    pub command: Command,
    pub span: Span,
}
