// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type checker error types.

use tri_ast::Span;
use tri_stdlib::{ParamMode, Type};

/// A type error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch {
        expected: Type,
        found: Type,
        span: Span,
    },
    #[error("operands of `{op}` differ: {lhs} and {rhs}")]
    OperandMismatch {
        op: String,
        lhs: Type,
        rhs: Type,
        span: Span,
    },
    #[error("`{name}` is a {kind}, not a value")]
    NotAValue {
        name: String,
        kind: &'static str,
        span: Span,
    },
    #[error("`{name}` is not a variable")]
    NotAVariable { name: String, span: Span },
    #[error("`{name}` is not a type")]
    NotAType { name: String, span: Span },
    #[error("`{name}` is not a {} operator", if *arity == 1 { "unary" } else { "binary" })]
    NotAnOperator {
        name: String,
        arity: usize,
        span: Span,
    },
    #[error("`{name}` is not a procedure")]
    NotAProcedure { name: String, span: Span },
    #[error("arity mismatch: `{name}` expects {expected} arguments, found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },
    #[error("parameter of `{name}` must be passed {}", match expected { ParamMode::Value => "by value", ParamMode::Reference => "with `var`" })]
    ParameterMode {
        name: String,
        expected: ParamMode,
        span: Span,
    },
    #[error("constant `{name}` is used in its own definition")]
    RecursiveConstant { name: String, span: Span },
    #[error("literal {literal} is out of range")]
    LiteralOutOfRange { literal: String, span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::Mismatch { span, .. }
            | TypeError::OperandMismatch { span, .. }
            | TypeError::NotAValue { span, .. }
            | TypeError::NotAVariable { span, .. }
            | TypeError::NotAType { span, .. }
            | TypeError::NotAnOperator { span, .. }
            | TypeError::NotAProcedure { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::ParameterMode { span, .. }
            | TypeError::RecursiveConstant { span, .. }
            | TypeError::LiteralOutOfRange { span, .. } => *span,
        }
    }
}
