// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Identification error types.

use thiserror::Error;
use tri_ast::Span;

/// A name resolution error.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

impl ResolveError {
    pub fn undefined(name: String, span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::UndefinedSymbol { name },
            span,
        }
    }

    pub fn duplicate(name: String, span: Span, previous: Span) -> Self {
        Self {
            kind: ResolveErrorKind::DuplicateDeclaration { name, previous },
            span,
        }
    }
}

/// The kind of resolution error.
#[derive(Debug, Clone, Error)]
pub enum ResolveErrorKind {
    #[error("undefined symbol: {name}")]
    UndefinedSymbol { name: String },

    #[error("duplicate declaration: {name} (previously declared at {previous:?})")]
    DuplicateDeclaration { name: String, previous: Span },
}

/// Misuse of the scope stack. This is a compiler bug, never a user error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("attempted to close a scope when none is open")]
    NoOpenScope,
}
