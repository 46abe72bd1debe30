// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope stack for identification.

use std::collections::HashMap;
use std::fmt;

use crate::error::ScopeError;
use crate::symbol::SymbolId;

/// Stack of open scopes, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, SymbolId>>,
}

impl ScopeStack {
    /// Create an empty stack with no open scope.
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Push an empty scope.
    pub fn open_scope(&mut self) {
        self.scopes.push(HashMap::new());
        tracing::debug!(depth = self.scopes.len(), "opened scope");
    }

    /// Pop the innermost scope. Its bindings become unreachable; the symbols
    /// themselves stay in the table.
    pub fn close_scope(&mut self) -> Result<(), ScopeError> {
        self.scopes.pop().ok_or(ScopeError::NoOpenScope)?;
        tracing::debug!(depth = self.scopes.len(), "closed scope");
        Ok(())
    }

    /// Bind `name` in the innermost scope. Returns `false`, leaving the
    /// scope untouched, if the name is already bound there or no scope is
    /// open.
    pub fn enter(&mut self, name: &str, symbol: SymbolId) -> bool {
        let Some(scope) = self.scopes.last_mut() else {
            return false;
        };
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(name.to_string(), symbol);
        true
    }

    /// Look up a name from the innermost scope outwards.
    pub fn retrieve(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    /// Look up a name in the innermost scope only.
    pub fn retrieve_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes.last().and_then(|scope| scope.get(name).copied())
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl fmt::Display for ScopeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, scope) in self.scopes.iter().enumerate() {
            writeln!(f, "scope {}:", level)?;
            let mut bindings: Vec<_> = scope.iter().collect();
            bindings.sort_by_key(|(_, id)| **id);
            for (name, id) in bindings {
                writeln!(f, "  {} -> #{}", name, id.0)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_in_fresh_scope_succeeds() {
        let mut scopes = ScopeStack::new();
        scopes.open_scope();
        assert!(scopes.enter("x", SymbolId(1)));
        assert_eq!(scopes.retrieve("x"), Some(SymbolId(1)));
    }

    #[test]
    fn second_enter_in_same_scope_fails() {
        let mut scopes = ScopeStack::new();
        scopes.open_scope();
        assert!(scopes.enter("x", SymbolId(1)));
        assert!(!scopes.enter("x", SymbolId(2)));
        assert_eq!(scopes.retrieve("x"), Some(SymbolId(1)));
    }

    #[test]
    fn closed_scope_hides_its_names() {
        let mut scopes = ScopeStack::new();
        scopes.open_scope();
        scopes.open_scope();
        scopes.enter("x", SymbolId(1));
        scopes.close_scope().unwrap();
        assert_eq!(scopes.retrieve("x"), None);
    }

    #[test]
    fn outer_binding_reappears_after_close() {
        let mut scopes = ScopeStack::new();
        scopes.open_scope();
        scopes.enter("x", SymbolId(1));
        scopes.open_scope();
        assert!(scopes.enter("x", SymbolId(2)));
        assert_eq!(scopes.retrieve("x"), Some(SymbolId(2)));
        assert_eq!(scopes.retrieve_local("x"), Some(SymbolId(2)));
        scopes.close_scope().unwrap();
        assert_eq!(scopes.retrieve("x"), Some(SymbolId(1)));
    }

    #[test]
    fn closing_without_open_scope_is_an_error() {
        let mut scopes = ScopeStack::new();
        assert_eq!(scopes.close_scope(), Err(ScopeError::NoOpenScope));
        assert!(!scopes.enter("x", SymbolId(1)));
    }

    #[test]
    fn display_lists_bindings_in_declaration_order() {
        let mut scopes = ScopeStack::new();
        scopes.open_scope();
        scopes.enter("b", SymbolId(1));
        scopes.enter("a", SymbolId(2));
        scopes.open_scope();
        scopes.enter("c", SymbolId(3));
        assert_eq!(
            scopes.to_string(),
            "scope 0:\n  b -> #1\n  a -> #2\nscope 1:\n  c -> #3\n"
        );
    }
}
