// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes (E0001, E0308, etc.) to titles and categories.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Identification,
    Type,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Identification => write!(f, "Identification"),
            ErrorCategory::Type => write!(f, "Type"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unexpected character", Lexical),
                "E0002" => ("malformed character literal", Lexical),

                // Parser errors (E01xx)
                "E0100" => ("expected token not found", Syntax),
                "E0101" => ("unexpected token", Syntax),
                "E0102" => ("nesting too deep", Syntax),

                // Identification errors (E02xx)
                "E0200" => ("undefined symbol", Identification),
                "E0201" => ("duplicate declaration", Identification),

                // Type errors (E03xx)
                "E0308" => ("mismatched types", Type),
                "E0309" => ("mismatched operand types", Type),
                "E0310" => ("not a value", Type),
                "E0311" => ("not a variable", Type),
                "E0312" => ("not a type", Type),
                "E0313" => ("not an operator", Type),
                "E0314" => ("not a procedure", Type),
                "E0315" => ("arity mismatch", Type),
                "E0316" => ("wrong parameter mode", Type),
                "E0317" => ("recursive constant", Type),
                "E0320" => ("literal out of range", Type),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}
