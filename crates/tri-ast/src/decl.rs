// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use crate::expr::{Expr, Ident, TypeDenoter};
use crate::{NodeId, Span};

/// A declaration in the AST.
#[derive(Debug, Clone)]
pub struct Decl {
    pub id: NodeId,
    pub kind: DeclKind,
    pub span: Span,
}

/// The kind of declaration.
#[derive(Debug, Clone)]
pub enum DeclKind {
    /// `const name ~ value`
    Const {
        name: Ident,
        value: Expr,
    },
    /// `var name Type`
    Var {
        name: Ident,
        ty: TypeDenoter,
    },
    /// `first ; second`
    Sequential {
        first: Box<Decl>,
        second: Box<Decl>,
    },
    /// Placeholder left behind by a syntax error
    Error,
}
