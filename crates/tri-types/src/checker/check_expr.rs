// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression type checking.

use tri_ast::expr::{Expr, ExprKind, Ident, Operator};
use tri_ast::Span;
use tri_resolve::SymbolKind;
use tri_stdlib::{OperatorSig, Type, MAXINT, MININT};

use super::errors::TypeError;
use super::TypeChecker;

impl TypeChecker {
    /// Type an expression and record the result against its node.
    pub(super) fn check_expr(&mut self, expr: &Expr) -> Type {
        let ty = match &expr.kind {
            ExprKind::Int(spelling) => self.check_int_literal(spelling, expr.span),
            ExprKind::Char(c) => {
                if u32::from(*c) > MAXINT as u32 {
                    self.errors.push(TypeError::LiteralOutOfRange {
                        literal: format!("'{}'", c),
                        span: expr.span,
                    });
                    Type::Error
                } else {
                    Type::Char
                }
            }
            ExprKind::Ident(ident) => self.check_value(ident),
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.check_expr(lhs);
                let rhs_ty = self.check_expr(rhs);
                self.check_binary(op, (lhs_ty, lhs.span), (rhs_ty, rhs.span))
            }
            ExprKind::Unary { op, operand } => {
                let operand_ty = self.check_expr(operand);
                self.check_unary(op, operand_ty, operand.span)
            }
            ExprKind::Error => Type::Error,
        };
        self.record_node(expr.id, ty)
    }

    fn check_int_literal(&mut self, spelling: &str, span: Span) -> Type {
        match spelling.parse::<i64>() {
            Ok(value) if (i64::from(MININT)..=i64::from(MAXINT)).contains(&value) => Type::Integer,
            _ => {
                self.errors.push(TypeError::LiteralOutOfRange {
                    literal: spelling.to_string(),
                    span,
                });
                Type::Error
            }
        }
    }

    /// Type of a name used as a value.
    fn check_value(&mut self, ident: &Ident) -> Type {
        let Some(&symbol) = self.resolved.resolutions.get(&ident.id) else {
            return Type::Error;
        };
        match self.symbol_kind(ident.id) {
            Some(SymbolKind::Const { .. }) | Some(SymbolKind::Var) => {
                match self.symbol_types.get(&symbol) {
                    Some(&ty) => ty,
                    None => {
                        // Only a constant referring to itself is untyped here
                        self.errors.push(TypeError::RecursiveConstant {
                            name: ident.name.clone(),
                            span: ident.span,
                        });
                        Type::Error
                    }
                }
            }
            None | Some(SymbolKind::Unknown) => Type::Error,
            Some(other) => {
                self.errors.push(TypeError::NotAValue {
                    name: ident.name.clone(),
                    kind: other.describe(),
                    span: ident.span,
                });
                Type::Error
            }
        }
    }

    fn check_binary(&mut self, op: &Operator, lhs: (Type, Span), rhs: (Type, Span)) -> Type {
        match self.symbol_kind(op.id) {
            Some(SymbolKind::Operator(OperatorSig::Binary {
                lhs: lhs_param,
                rhs: rhs_param,
                result,
            })) => {
                if lhs_param == Type::Any {
                    let (lhs_ty, rhs_ty) = (lhs.0, rhs.0);
                    if !lhs_ty.is_error() && !rhs_ty.is_error() && lhs_ty != rhs_ty {
                        self.errors.push(TypeError::OperandMismatch {
                            op: op.spelling.clone(),
                            lhs: lhs_ty,
                            rhs: rhs_ty,
                            span: lhs.1.to(rhs.1),
                        });
                    }
                } else {
                    self.expect_type(lhs_param, lhs.0, lhs.1);
                    self.expect_type(rhs_param, rhs.0, rhs.1);
                }
                result
            }
            None | Some(SymbolKind::Unknown) => Type::Error,
            Some(_) => {
                self.errors.push(TypeError::NotAnOperator {
                    name: op.spelling.clone(),
                    arity: 2,
                    span: op.span,
                });
                Type::Error
            }
        }
    }

    fn check_unary(&mut self, op: &Operator, operand: Type, operand_span: Span) -> Type {
        match self.symbol_kind(op.id) {
            Some(SymbolKind::Operator(OperatorSig::Unary { operand: param, result })) => {
                if param != Type::Any {
                    self.expect_type(param, operand, operand_span);
                }
                result
            }
            None | Some(SymbolKind::Unknown) => Type::Error,
            Some(_) => {
                self.errors.push(TypeError::NotAnOperator {
                    name: op.spelling.clone(),
                    arity: 1,
                    span: op.span,
                });
                Type::Error
            }
        }
    }
}
