// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from each phase's error type to `Diagnostic`.

use tri_stdlib::ParamMode;

use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Lexer Errors
// ============================================================================

impl ToDiagnostic for tri_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        use tri_lexer::LexErrorKind::*;

        let (code, label) = match self.kind {
            UnexpectedChar => ("E0001", "unexpected character"),
            MalformedCharLiteral => ("E0002", "malformed literal"),
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .with_primary(self.span, label);

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for tri_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let code = match self.kind {
            tri_parser::ParseErrorKind::ExpectedToken => "E0100",
            tri_parser::ParseErrorKind::UnexpectedToken => "E0101",
            tri_parser::ParseErrorKind::TooDeep => "E0102",
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .with_primary(self.span, "here");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Identification Errors
// ============================================================================

impl ToDiagnostic for tri_resolve::ResolveError {
    fn to_diagnostic(&self) -> Diagnostic {
        use tri_resolve::ResolveErrorKind::*;

        match &self.kind {
            UndefinedSymbol { name } => Diagnostic::error(format!("undefined symbol: `{}`", name))
                .with_code("E0200")
                .with_primary(self.span, "not found in this scope"),

            DuplicateDeclaration { name, previous } => {
                Diagnostic::error(format!("duplicate declaration: `{}`", name))
                    .with_code("E0201")
                    .with_primary(self.span, "redeclared here")
                    .with_secondary(*previous, "previously declared here")
                    .with_note("names must be unique within one `let` declaration")
            }
        }
    }
}

// ============================================================================
// Type Errors
// ============================================================================

impl ToDiagnostic for tri_types::TypeError {
    fn to_diagnostic(&self) -> Diagnostic {
        use tri_types::TypeError::*;

        match self {
            Mismatch {
                expected,
                found,
                span,
            } => Diagnostic::error("mismatched types")
                .with_code("E0308")
                .with_primary(*span, format!("expected `{}`, found `{}`", expected, found)),

            OperandMismatch { op, lhs, rhs, span } => {
                Diagnostic::error(format!("operands of `{}` have different types", op))
                    .with_code("E0309")
                    .with_primary(*span, format!("`{}` compared with `{}`", lhs, rhs))
            }

            NotAValue { name, kind, span } => Diagnostic::error(format!("`{}` is not a value", name))
                .with_code("E0310")
                .with_primary(*span, format!("this is a {}", kind)),

            NotAVariable { name, span } => {
                Diagnostic::error(format!("`{}` is not a variable", name))
                    .with_code("E0311")
                    .with_primary(*span, "expected a variable")
                    .with_help("only names declared with `var` can be assigned or passed by reference")
            }

            NotAType { name, span } => Diagnostic::error(format!("`{}` is not a type", name))
                .with_code("E0312")
                .with_primary(*span, "expected a type name")
                .with_help("the built-in types are Boolean, Char and Integer"),

            NotAnOperator { name, arity, span } => {
                let which = if *arity == 1 { "unary" } else { "binary" };
                Diagnostic::error(format!("`{}` is not a {} operator", name, which))
                    .with_code("E0313")
                    .with_primary(*span, format!("used as a {} operator here", which))
            }

            NotAProcedure { name, span } => {
                Diagnostic::error(format!("`{}` is not a procedure", name))
                    .with_code("E0314")
                    .with_primary(*span, "cannot be called")
            }

            ArityMismatch {
                name,
                expected,
                found,
                span,
            } => Diagnostic::error(format!(
                "`{}` expects {} argument{}, found {}",
                name,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ))
            .with_code("E0315")
            .with_primary(*span, "wrong number of arguments"),

            ParameterMode {
                name,
                expected,
                span,
            } => {
                let diag = Diagnostic::error(format!("wrong parameter mode in call to `{}`", name))
                    .with_code("E0316");
                match expected {
                    ParamMode::Value => diag
                        .with_primary(*span, "expected a value")
                        .with_help("remove `var`"),
                    ParamMode::Reference => diag
                        .with_primary(*span, "expected a variable")
                        .with_help("pass a variable with `var name`"),
                }
            }

            RecursiveConstant { name, span } => {
                Diagnostic::error(format!("constant `{}` is defined in terms of itself", name))
                    .with_code("E0317")
                    .with_primary(*span, "used before it has a value")
            }

            LiteralOutOfRange { literal, span } => {
                Diagnostic::error(format!("literal {} is out of range", literal))
                    .with_code("E0320")
                    .with_primary(*span, "does not fit in 16 bits")
                    .with_note(format!(
                        "values must lie between {} and {}",
                        tri_stdlib::MININT,
                        tri_stdlib::MAXINT
                    ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ErrorCodeRegistry;

    #[test]
    fn every_phase_error_has_a_registered_code() {
        let registry = ErrorCodeRegistry::default();

        let src = "x = 1 @ 'ab";
        let lexed = tri_lexer::Lexer::new(src).tokenize();
        let parsed = tri_parser::Parser::new(lexed.tokens.clone()).parse();
        let mut diags: Vec<Diagnostic> = lexed.errors.iter().map(|e| e.to_diagnostic()).collect();
        diags.extend(parsed.errors.iter().map(|e| e.to_diagnostic()));

        let program = tri_parser::parse_source("let const a ~ 1; const a ~ 2 in b = 'c' endlet pass");
        let resolved = tri_resolve::resolve(&program.program);
        diags.extend(resolved.errors.iter().map(|e| e.to_diagnostic()));

        let program = tri_parser::parse_source("if 70000 then getint(1) else puteol(2)");
        let resolved = tri_resolve::resolve(&program.program);
        let checked = tri_types::typecheck(resolved, &program.program);
        diags.extend(checked.errors.iter().map(|e| e.to_diagnostic()));

        assert!(diags.len() >= 6);
        for diag in &diags {
            let code = diag.code.as_ref().expect("diagnostic without code");
            assert!(registry.get(&code.0).is_some(), "unregistered code {}", code.0);
            assert!(diag.primary_span().is_some());
        }
    }

    #[test]
    fn duplicate_points_at_both_declarations() {
        let program = tri_parser::parse_source("let var a Integer; var a Char in pass endlet pass");
        let resolved = tri_resolve::resolve(&program.program);
        let diag = resolved.errors[0].to_diagnostic();
        assert_eq!(diag.code, Some(crate::ErrorCode("E0201".to_string())));
        assert_eq!(diag.labels.len(), 2);
    }
}
