// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Semantic types.

use std::fmt;

/// A type in Tri.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Boolean,
    Char,
    Integer,
    /// Wildcard parameter type of polymorphic operators such as `\=`
    Any,
    /// Type of an erroneous construct; never reported again
    Error,
}

impl Type {
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "Boolean"),
            Type::Char => write!(f, "Char"),
            Type::Integer => write!(f, "Integer"),
            Type::Any => write!(f, "any"),
            Type::Error => write!(f, "<error>"),
        }
    }
}

/// How a procedure parameter is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamMode {
    /// An expression is evaluated and passed
    Value,
    /// A variable is passed with `var`
    Reference,
}

/// A formal parameter of a built-in procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormalParam {
    pub mode: ParamMode,
    pub ty: Type,
}

impl fmt::Display for FormalParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ParamMode::Value => write!(f, "{}", self.ty),
            ParamMode::Reference => write!(f, "var {}", self.ty),
        }
    }
}

/// Signature of a built-in operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorSig {
    Unary { operand: Type, result: Type },
    Binary { lhs: Type, rhs: Type, result: Type },
}

impl OperatorSig {
    pub fn arity(&self) -> usize {
        match self {
            OperatorSig::Unary { .. } => 1,
            OperatorSig::Binary { .. } => 2,
        }
    }

    pub fn result(&self) -> Type {
        match self {
            OperatorSig::Unary { result, .. } | OperatorSig::Binary { result, .. } => *result,
        }
    }
}
