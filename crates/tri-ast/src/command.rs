// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Command AST nodes.

use crate::decl::Decl;
use crate::expr::{Expr, Ident, Param};
use crate::{NodeId, Span};

/// A command in the AST.
#[derive(Debug, Clone)]
pub struct Command {
    pub id: NodeId,
    pub kind: CommandKind,
    pub span: Span,
}

/// The kind of command.
#[derive(Debug, Clone)]
pub enum CommandKind {
    /// Assignment `target = value`
    Assign {
        target: Ident,
        value: Expr,
    },
    /// Procedure call `callee(param)`
    Call {
        callee: Ident,
        param: Param,
    },
    /// `if cond then C1 else C2`
    If {
        cond: Expr,
        then_branch: Box<Command>,
        else_branch: Box<Command>,
    },
    /// `while cond do body wend rest`
    While {
        cond: Expr,
        body: Box<Command>,
        rest: Box<Command>,
    },
    /// `do body wendwhile cond`
    DoWhile {
        body: Box<Command>,
        cond: Expr,
    },
    /// `let decl in body endlet rest`
    Let {
        decl: Decl,
        body: Box<Command>,
        rest: Box<Command>,
    },
    /// `first ; second`
    Sequential {
        first: Box<Command>,
        second: Box<Command>,
    },
    /// Empty command, spelled `pass` or nothing at all
    Blank,
    /// Placeholder left behind by a syntax error
    Error,
}

impl Command {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, CommandKind::Blank)
    }
}
