// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Identification for the Tri language.
//!
//! Binds every applied occurrence of a name or operator to its declaration,
//! producing a mapping from AST NodeIds to SymbolIds.

mod error;
mod resolver;
mod scope;
mod symbol;

pub use error::{ResolveError, ResolveErrorKind, ScopeError};
pub use resolver::Resolver;
pub use scope::ScopeStack;
pub use symbol::{Symbol, SymbolId, SymbolKind, SymbolTable};

use std::collections::HashMap;
use tri_ast::{NodeId, Program};

/// The result of identification.
#[derive(Debug, Default)]
pub struct ResolvedProgram {
    /// Every symbol: built-ins, the unknown sentinel and declared names.
    pub symbols: SymbolTable,
    /// Applied occurrences (identifier and operator leaves) to their symbols.
    pub resolutions: HashMap<NodeId, SymbolId>,
    /// Const/var declaration nodes to the symbols they introduce.
    pub declarations: HashMap<NodeId, SymbolId>,
    pub errors: Vec<ResolveError>,
}

impl ResolvedProgram {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The symbol a leaf resolved to.
    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        self.resolutions.get(&node).and_then(|id| self.symbols.get(*id))
    }
}

/// Resolve all names in a program.
pub fn resolve(program: &Program) -> ResolvedProgram {
    Resolver::resolve(program)
}
