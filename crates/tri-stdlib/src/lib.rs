// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tri standard environment.
//!
//! Semantic types and the built-in declarations that populate the outermost
//! scope before identification starts.

pub mod types;

pub use types::{FormalParam, OperatorSig, ParamMode, Type};

/// What a built-in name denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdEntity {
    /// A type name
    Type(Type),
    /// A constant of the given type
    Const { ty: Type },
    Operator(OperatorSig),
    Procedure(Vec<FormalParam>),
}

/// A built-in declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdDecl {
    pub name: &'static str,
    pub entity: StdEntity,
}

impl StdDecl {
    fn new(name: &'static str, entity: StdEntity) -> Self {
        Self { name, entity }
    }
}

/// Largest value of type Integer.
pub const MAXINT: i32 = 32767;
/// Smallest value of type Integer.
pub const MININT: i32 = -32768;

fn unary(operand: Type, result: Type) -> StdEntity {
    StdEntity::Operator(OperatorSig::Unary { operand, result })
}

fn binary(lhs: Type, rhs: Type, result: Type) -> StdEntity {
    StdEntity::Operator(OperatorSig::Binary { lhs, rhs, result })
}

fn by_value(ty: Type) -> FormalParam {
    FormalParam { mode: ParamMode::Value, ty }
}

fn by_reference(ty: Type) -> FormalParam {
    FormalParam { mode: ParamMode::Reference, ty }
}

/// Returns every built-in declaration, in the order they are entered into
/// the standard scope.
pub fn standard_environment() -> Vec<StdDecl> {
    use Type::{Any, Boolean, Char, Integer};

    vec![
        // Types
        StdDecl::new("Boolean", StdEntity::Type(Boolean)),
        StdDecl::new("Char", StdEntity::Type(Char)),
        StdDecl::new("Integer", StdEntity::Type(Integer)),
        // Constants
        StdDecl::new("false", StdEntity::Const { ty: Boolean }),
        StdDecl::new("true", StdEntity::Const { ty: Boolean }),
        StdDecl::new("maxint", StdEntity::Const { ty: Integer }),
        // Operators
        StdDecl::new("\\", unary(Boolean, Boolean)),
        StdDecl::new("/\\", binary(Boolean, Boolean, Boolean)),
        StdDecl::new("\\/", binary(Boolean, Boolean, Boolean)),
        StdDecl::new("+", binary(Integer, Integer, Integer)),
        StdDecl::new("-", binary(Integer, Integer, Integer)),
        StdDecl::new("*", binary(Integer, Integer, Integer)),
        StdDecl::new("/", binary(Integer, Integer, Integer)),
        StdDecl::new("//", binary(Integer, Integer, Integer)),
        StdDecl::new("<", binary(Integer, Integer, Boolean)),
        StdDecl::new("<=", binary(Integer, Integer, Boolean)),
        StdDecl::new(">", binary(Integer, Integer, Boolean)),
        StdDecl::new(">=", binary(Integer, Integer, Boolean)),
        StdDecl::new("\\=", binary(Any, Any, Boolean)),
        // Procedures
        StdDecl::new("put", StdEntity::Procedure(vec![by_value(Char)])),
        StdDecl::new("putint", StdEntity::Procedure(vec![by_value(Integer)])),
        StdDecl::new("puteol", StdEntity::Procedure(vec![])),
        StdDecl::new("get", StdEntity::Procedure(vec![by_reference(Char)])),
        StdDecl::new("getint", StdEntity::Procedure(vec![by_reference(Integer)])),
        StdDecl::new("geteol", StdEntity::Procedure(vec![])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let env = standard_environment();
        let names: HashSet<_> = env.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), env.len());
    }

    #[test]
    fn comparison_yields_boolean() {
        let env = standard_environment();
        let le = env.iter().find(|d| d.name == "<=").unwrap();
        let StdEntity::Operator(sig) = &le.entity else { panic!() };
        assert_eq!(sig.arity(), 2);
        assert_eq!(sig.result(), Type::Boolean);
    }

    #[test]
    fn getint_takes_a_variable() {
        let env = standard_environment();
        let getint = env.iter().find(|d| d.name == "getint").unwrap();
        assert_eq!(
            getint.entity,
            StdEntity::Procedure(vec![FormalParam { mode: ParamMode::Reference, ty: Type::Integer }])
        );
    }

    #[test]
    fn constants_carry_their_type() {
        let env = standard_environment();
        let ty_of = |name: &str| env.iter().find(|d| d.name == name).map(|d| d.entity.clone());
        assert_eq!(ty_of("maxint"), Some(StdEntity::Const { ty: Type::Integer }));
        assert_eq!(ty_of("true"), Some(StdEntity::Const { ty: Type::Boolean }));
        assert_eq!(ty_of("false"), Some(StdEntity::Const { ty: Type::Boolean }));
    }
}
