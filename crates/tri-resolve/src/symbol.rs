// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbol definitions and the declaration arena.

use tri_ast::{NodeId, Span};
use tri_stdlib::{FormalParam, OperatorSig, Type};

/// Unique identifier for a symbol. Indices are stable for the lifetime of
/// the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// The kind of symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// A constant. Built-in constants carry their type.
    Const { builtin: Option<Type> },
    /// A variable.
    Var,
    /// A type name.
    Type(Type),
    /// A built-in operator.
    Operator(OperatorSig),
    /// A built-in procedure.
    Procedure { params: Vec<FormalParam> },
    /// Stand-in binding for names that failed to resolve.
    Unknown,
}

impl SymbolKind {
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolKind::Const { .. } => "constant",
            SymbolKind::Var => "variable",
            SymbolKind::Type(_) => "type",
            SymbolKind::Operator(_) => "operator",
            SymbolKind::Procedure { .. } => "procedure",
            SymbolKind::Unknown => "unknown",
        }
    }
}

/// A declared symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// Where the name was declared; `None` for built-ins.
    pub span: Option<Span>,
    /// The declaration node; `None` for built-ins.
    pub decl: Option<NodeId>,
}

impl Symbol {
    pub fn is_builtin(&self) -> bool {
        self.decl.is_none()
    }
}

/// Table of all symbols in a program.
///
/// Slot 0 always holds the `unknown` sentinel that unresolved names are
/// bound to.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub const UNKNOWN: SymbolId = SymbolId(0);

    pub fn new() -> Self {
        let unknown = Symbol {
            id: Self::UNKNOWN,
            name: "<unknown>".to_string(),
            kind: SymbolKind::Unknown,
            span: None,
            decl: None,
        };
        Self { symbols: vec![unknown] }
    }

    /// Insert a new symbol and return its ID.
    pub fn insert(
        &mut self,
        name: String,
        kind: SymbolKind,
        span: Option<Span>,
        decl: Option<NodeId>,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name,
            kind,
            span,
            decl,
        });
        id
    }

    /// Get a symbol by ID.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    /// Iterate over all symbols, the sentinel included.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Symbols declared in the program, in declaration order.
    pub fn declared(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| !s.is_builtin())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
