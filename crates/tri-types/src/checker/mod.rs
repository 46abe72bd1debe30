// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type checker implementation.

use std::collections::HashMap;

use tri_ast::{NodeId, Program, Span};
use tri_resolve::{ResolvedProgram, Symbol, SymbolId, SymbolKind, SymbolTable};
use tri_stdlib::Type;

mod check_command;
mod check_decl;
mod check_expr;
mod errors;

pub use errors::TypeError;

/// A program with every expression and declared entity typed.
#[derive(Debug)]
pub struct TypedProgram {
    /// Resolved symbols from identification.
    pub symbols: SymbolTable,
    /// Symbol resolutions from identification.
    pub resolutions: HashMap<NodeId, SymbolId>,
    /// Declaration nodes to the symbols they introduce.
    pub declarations: HashMap<NodeId, SymbolId>,
    /// Computed type for each expression node.
    pub node_types: HashMap<NodeId, Type>,
    /// Entity type of each constant and variable.
    pub symbol_types: HashMap<SymbolId, Type>,
}

impl TypedProgram {
    pub fn type_of(&self, node: NodeId) -> Option<Type> {
        self.node_types.get(&node).copied()
    }

    pub fn symbol_type(&self, symbol: SymbolId) -> Option<Type> {
        self.symbol_types.get(&symbol).copied()
    }
}

/// Outcome of type checking: the typed program is always produced, with
/// `Type::Error` wherever checking failed.
#[derive(Debug)]
pub struct TypeResult {
    pub typed: TypedProgram,
    pub errors: Vec<TypeError>,
}

impl TypeResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct TypeChecker {
    /// Symbol table from identification.
    pub(super) resolved: ResolvedProgram,
    /// Types assigned to expression nodes.
    pub(super) node_types: HashMap<NodeId, Type>,
    /// Types assigned to symbols. Written once per symbol.
    pub(super) symbol_types: HashMap<SymbolId, Type>,
    /// Collected errors.
    pub(super) errors: Vec<TypeError>,
}

impl TypeChecker {
    /// Create a new type checker. Built-in constants are typed up front.
    pub fn new(resolved: ResolvedProgram) -> Self {
        let symbol_types = resolved
            .symbols
            .iter()
            .filter_map(|symbol| match symbol.kind {
                SymbolKind::Const { builtin: Some(ty) } => Some((symbol.id, ty)),
                _ => None,
            })
            .collect();

        Self {
            resolved,
            node_types: HashMap::new(),
            symbol_types,
            errors: Vec::new(),
        }
    }

    pub fn check(mut self, program: &Program) -> TypeResult {
        self.check_command(&program.command);

        tracing::debug!(
            expressions = self.node_types.len(),
            entities = self.symbol_types.len(),
            errors = self.errors.len(),
            "type checking finished"
        );

        TypeResult {
            typed: TypedProgram {
                symbols: self.resolved.symbols,
                resolutions: self.resolved.resolutions,
                declarations: self.resolved.declarations,
                node_types: self.node_types,
                symbol_types: self.symbol_types,
            },
            errors: self.errors,
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// The symbol a leaf was bound to during identification.
    pub(super) fn symbol(&self, node: NodeId) -> Option<&Symbol> {
        self.resolved.symbol_of(node)
    }

    pub(super) fn symbol_kind(&self, node: NodeId) -> Option<SymbolKind> {
        self.symbol(node).map(|s| s.kind.clone())
    }

    pub(super) fn record_node(&mut self, node: NodeId, ty: Type) -> Type {
        self.node_types.insert(node, ty);
        ty
    }

    /// Record an entity type unless the symbol already has one.
    pub(super) fn record_symbol(&mut self, symbol: SymbolId, ty: Type) {
        self.symbol_types.entry(symbol).or_insert(ty);
    }

    /// Require `found` to equal `expected`. Error types never produce a
    /// further diagnostic.
    pub(super) fn expect_type(&mut self, expected: Type, found: Type, span: Span) {
        if expected.is_error() || found.is_error() || expected == found {
            return;
        }
        self.errors.push(TypeError::Mismatch {
            expected,
            found,
            span,
        });
    }
}

/// Type check a resolved program.
pub fn typecheck(resolved: ResolvedProgram, program: &Program) -> TypeResult {
    TypeChecker::new(resolved).check(program)
}
