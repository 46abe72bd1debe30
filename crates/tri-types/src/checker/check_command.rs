// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Command type checking.

use tri_ast::command::{Command, CommandKind};
use tri_ast::expr::{Expr, Ident, Param, ParamKind};
use tri_resolve::SymbolKind;
use tri_stdlib::{FormalParam, ParamMode, Type};

use super::errors::TypeError;
use super::TypeChecker;

impl TypeChecker {
    pub(super) fn check_command(&mut self, cmd: &Command) {
        match &cmd.kind {
            CommandKind::Assign { target, value } => {
                let target_ty = self.check_variable(target);
                let value_ty = self.check_expr(value);
                if let Some(target_ty) = target_ty {
                    self.expect_type(target_ty, value_ty, value.span);
                }
            }
            CommandKind::Call { callee, param } => self.check_call(callee, param),
            CommandKind::If { cond, then_branch, else_branch } => {
                self.check_condition(cond);
                self.check_command(then_branch);
                self.check_command(else_branch);
            }
            CommandKind::While { cond, body, rest } => {
                self.check_condition(cond);
                self.check_command(body);
                self.check_command(rest);
            }
            CommandKind::DoWhile { body, cond } => {
                self.check_command(body);
                self.check_condition(cond);
            }
            CommandKind::Let { decl, body, rest } => {
                self.check_decl(decl);
                self.check_command(body);
                self.check_command(rest);
            }
            CommandKind::Sequential { first, second } => {
                self.check_command(first);
                self.check_command(second);
            }
            CommandKind::Blank | CommandKind::Error => {}
        }
    }

    fn check_condition(&mut self, cond: &Expr) {
        let ty = self.check_expr(cond);
        self.expect_type(Type::Boolean, ty, cond.span);
    }

    /// Type of a name that must denote a variable. `None` when the name is
    /// not a variable; the error has been recorded unless the name was
    /// already unresolved.
    fn check_variable(&mut self, ident: &Ident) -> Option<Type> {
        let symbol = *self.resolved.resolutions.get(&ident.id)?;
        match self.symbol_kind(ident.id)? {
            SymbolKind::Var => Some(self.symbol_types.get(&symbol).copied().unwrap_or(Type::Error)),
            SymbolKind::Unknown => None,
            _ => {
                self.errors.push(TypeError::NotAVariable {
                    name: ident.name.clone(),
                    span: ident.span,
                });
                None
            }
        }
    }

    fn check_call(&mut self, callee: &Ident, param: &Param) {
        let params = match self.symbol_kind(callee.id) {
            Some(SymbolKind::Procedure { params }) => params,
            None | Some(SymbolKind::Unknown) => {
                self.check_param_alone(param);
                return;
            }
            Some(_) => {
                self.errors.push(TypeError::NotAProcedure {
                    name: callee.name.clone(),
                    span: callee.span,
                });
                self.check_param_alone(param);
                return;
            }
        };

        let supplied = match param.kind {
            ParamKind::Blank => 0,
            ParamKind::Error => return,
            ParamKind::Expr(_) | ParamKind::Var(_) => 1,
        };

        match params.as_slice() {
            [formal] if supplied == 1 => self.check_param(callee, *formal, param),
            _ if supplied == params.len() => {}
            _ => {
                self.errors.push(TypeError::ArityMismatch {
                    name: callee.name.clone(),
                    expected: params.len(),
                    found: supplied,
                    span: param.span,
                });
                self.check_param_alone(param);
            }
        }
    }

    /// Check an actual parameter against its formal parameter.
    fn check_param(&mut self, callee: &Ident, formal: FormalParam, param: &Param) {
        match (formal.mode, &param.kind) {
            (ParamMode::Value, ParamKind::Expr(expr)) => {
                let ty = self.check_expr(expr);
                self.expect_type(formal.ty, ty, expr.span);
            }
            (ParamMode::Reference, ParamKind::Var(ident)) => {
                if let Some(ty) = self.check_variable(ident) {
                    self.expect_type(formal.ty, ty, ident.span);
                }
            }
            (expected, _) => {
                self.errors.push(TypeError::ParameterMode {
                    name: callee.name.clone(),
                    expected,
                    span: param.span,
                });
                self.check_param_alone(param);
            }
        }
    }

    /// Type an actual parameter with nothing to compare it against.
    fn check_param_alone(&mut self, param: &Param) {
        if let ParamKind::Expr(expr) = &param.kind {
            self.check_expr(expr);
        }
    }
}
