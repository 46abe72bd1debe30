// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration type checking.

use tri_ast::decl::{Decl, DeclKind};
use tri_ast::expr::TypeDenoter;
use tri_resolve::SymbolKind;
use tri_stdlib::Type;

use super::errors::TypeError;
use super::TypeChecker;

impl TypeChecker {
    pub(super) fn check_decl(&mut self, decl: &Decl) {
        match &decl.kind {
            DeclKind::Const { value, .. } => {
                let ty = self.check_expr(value);
                if let Some(&symbol) = self.resolved.declarations.get(&decl.id) {
                    self.record_symbol(symbol, ty);
                }
            }
            DeclKind::Var { ty, .. } => {
                let ty = self.check_type_denoter(ty);
                if let Some(&symbol) = self.resolved.declarations.get(&decl.id) {
                    self.record_symbol(symbol, ty);
                }
            }
            DeclKind::Sequential { first, second } => {
                self.check_decl(first);
                self.check_decl(second);
            }
            DeclKind::Error => {}
        }
    }

    fn check_type_denoter(&mut self, denoter: &TypeDenoter) -> Type {
        match self.symbol_kind(denoter.name.id) {
            Some(SymbolKind::Type(ty)) => ty,
            None | Some(SymbolKind::Unknown) => Type::Error,
            Some(_) => {
                self.errors.push(TypeError::NotAType {
                    name: denoter.name.name.clone(),
                    span: denoter.span,
                });
                Type::Error
            }
        }
    }
}
