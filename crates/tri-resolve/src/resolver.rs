// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The identification pass.

use std::collections::HashMap;

use tri_ast::command::{Command, CommandKind};
use tri_ast::decl::{Decl, DeclKind};
use tri_ast::expr::{Expr, ExprKind, Ident, Operator, Param, ParamKind, TypeDenoter};
use tri_ast::{NodeId, Program, Span};
use tri_stdlib::StdEntity;

use crate::error::ResolveError;
use crate::scope::ScopeStack;
use crate::symbol::{SymbolId, SymbolKind, SymbolTable};
use crate::ResolvedProgram;

pub struct Resolver {
    symbols: SymbolTable,
    scopes: ScopeStack,
    resolutions: HashMap<NodeId, SymbolId>,
    declarations: HashMap<NodeId, SymbolId>,
    errors: Vec<ResolveError>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Create a resolver whose only open scope holds the standard
    /// environment.
    pub fn new() -> Self {
        let mut resolver = Self {
            symbols: SymbolTable::new(),
            scopes: ScopeStack::new(),
            resolutions: HashMap::new(),
            declarations: HashMap::new(),
            errors: Vec::new(),
        };

        resolver.scopes.open_scope();
        resolver.register_builtins();
        resolver
    }

    fn register_builtins(&mut self) {
        for builtin in tri_stdlib::standard_environment() {
            let kind = match builtin.entity {
                StdEntity::Type(ty) => SymbolKind::Type(ty),
                StdEntity::Const { ty } => SymbolKind::Const { builtin: Some(ty) },
                StdEntity::Operator(sig) => SymbolKind::Operator(sig),
                StdEntity::Procedure(params) => SymbolKind::Procedure { params },
            };
            let id = self.symbols.insert(builtin.name.to_string(), kind, None, None);
            self.scopes.enter(builtin.name, id);
        }
    }

    /// Resolve all names in a program.
    pub fn resolve(program: &Program) -> ResolvedProgram {
        let mut resolver = Resolver::new();
        resolver.resolve_command(&program.command);

        tracing::debug!(
            symbols = resolver.symbols.len(),
            resolutions = resolver.resolutions.len(),
            errors = resolver.errors.len(),
            "identification finished"
        );

        ResolvedProgram {
            symbols: resolver.symbols,
            resolutions: resolver.resolutions,
            declarations: resolver.declarations,
            errors: resolver.errors,
        }
    }

    fn with_scope(&mut self, f: impl FnOnce(&mut Self)) {
        self.scopes.open_scope();
        f(self);
        tracing::trace!(scopes = %self.scopes, "closing scope");
        let closed = self.scopes.close_scope();
        debug_assert!(closed.is_ok(), "scope opened by this call was already closed");
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn resolve_command(&mut self, cmd: &Command) {
        match &cmd.kind {
            CommandKind::Assign { target, value } => {
                self.resolve_ident(target);
                self.resolve_expr(value);
            }
            CommandKind::Call { callee, param } => {
                self.resolve_ident(callee);
                self.resolve_param(param);
            }
            CommandKind::If { cond, then_branch, else_branch } => {
                self.resolve_expr(cond);
                self.resolve_command(then_branch);
                self.resolve_command(else_branch);
            }
            CommandKind::While { cond, body, rest } => {
                self.with_scope(|r| {
                    r.resolve_expr(cond);
                    r.resolve_command(body);
                    r.resolve_command(rest);
                });
            }
            CommandKind::DoWhile { body, cond } => {
                self.resolve_command(body);
                self.resolve_expr(cond);
            }
            CommandKind::Let { decl, body, rest } => {
                self.with_scope(|r| {
                    r.resolve_decl(decl);
                    r.resolve_command(body);
                });
                self.resolve_command(rest);
            }
            CommandKind::Sequential { first, second } => {
                self.resolve_command(first);
                self.resolve_command(second);
            }
            CommandKind::Blank | CommandKind::Error => {}
        }
    }

    fn resolve_param(&mut self, param: &Param) {
        match &param.kind {
            ParamKind::Expr(expr) => self.resolve_expr(expr),
            ParamKind::Var(ident) => self.resolve_ident(ident),
            ParamKind::Blank | ParamKind::Error => {}
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn resolve_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Const { name, value } => {
                self.declare(decl.id, name, SymbolKind::Const { builtin: None });
                self.resolve_expr(value);
            }
            DeclKind::Var { name, ty } => {
                self.resolve_type_denoter(ty);
                self.declare(decl.id, name, SymbolKind::Var);
            }
            DeclKind::Sequential { first, second } => {
                self.resolve_decl(first);
                self.resolve_decl(second);
            }
            DeclKind::Error => {}
        }
    }

    /// Register a declared name and bind it in the innermost scope.
    fn declare(&mut self, decl: NodeId, name: &Ident, kind: SymbolKind) {
        let id = self
            .symbols
            .insert(name.name.clone(), kind, Some(name.span), Some(decl));
        self.declarations.insert(decl, id);

        if let Some(previous) = self.scopes.retrieve_local(&name.name) {
            let previous_span = self
                .symbols
                .get(previous)
                .and_then(|s| s.span)
                .unwrap_or_default();
            self.errors
                .push(ResolveError::duplicate(name.name.clone(), name.span, previous_span));
            return;
        }

        self.scopes.enter(&name.name, id);
        tracing::debug!(name = %name.name, symbol = id.0, depth = self.scopes.depth(), "declared");
    }

    fn resolve_type_denoter(&mut self, ty: &TypeDenoter) {
        self.resolve_ident(&ty.name);
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, lhs, rhs } => {
                self.resolve_expr(lhs);
                self.resolve_operator(op);
                self.resolve_expr(rhs);
            }
            ExprKind::Unary { op, operand } => {
                self.resolve_operator(op);
                self.resolve_expr(operand);
            }
            ExprKind::Ident(ident) => self.resolve_ident(ident),
            ExprKind::Int(_) | ExprKind::Char(_) | ExprKind::Error => {}
        }
    }

    fn resolve_ident(&mut self, ident: &Ident) {
        self.lookup(ident.id, &ident.name, ident.span);
    }

    fn resolve_operator(&mut self, op: &Operator) {
        self.lookup(op.id, &op.spelling, op.span);
    }

    fn lookup(&mut self, node: NodeId, name: &str, span: Span) {
        let symbol = match self.scopes.retrieve(name) {
            Some(symbol) => symbol,
            None => {
                self.errors.push(ResolveError::undefined(name.to_string(), span));
                SymbolTable::UNKNOWN
            }
        };
        self.resolutions.insert(node, symbol);
    }
}
