// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes and the leaves shared with commands and declarations.

use crate::{NodeId, Span};

/// A name occurrence (applied or defining).
#[derive(Debug, Clone)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

/// An operator occurrence such as `+` or `\=`.
#[derive(Debug, Clone)]
pub struct Operator {
    pub id: NodeId,
    pub spelling: String,
    pub span: Span,
}

/// A type denoter, which is always a type name.
#[derive(Debug, Clone)]
pub struct TypeDenoter {
    pub id: NodeId,
    pub name: Ident,
    pub span: Span,
}

/// An expression in the AST.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Binary operation `lhs op rhs`
    Binary {
        op: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Unary operation `op operand`
    Unary {
        op: Operator,
        operand: Box<Expr>,
    },
    /// Integer literal, kept as spelled; range is checked during type checking
    Int(String),
    /// Character literal, without its quotes
    Char(char),
    /// Variable or constant reference
    Ident(Ident),
    /// Placeholder left behind by a syntax error
    Error,
}

/// An actual parameter of a procedure call.
#[derive(Debug, Clone)]
pub struct Param {
    pub id: NodeId,
    pub kind: ParamKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ParamKind {
    /// By-value argument
    Expr(Expr),
    /// By-reference argument `var x`
    Var(Ident),
    /// No argument
    Blank,
    Error,
}
