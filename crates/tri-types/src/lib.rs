// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type checker for the Tri language.
//!
//! Assigns a type to every expression and declared entity of a resolved
//! program and reports every violation of the typing rules.

mod checker;

pub use checker::{typecheck, TypeChecker, TypeError, TypeResult, TypedProgram};
pub use tri_stdlib::Type;

#[cfg(test)]
mod tests {
    use super::*;
    use tri_stdlib::ParamMode;

    fn check(src: &str) -> TypeResult {
        let parsed = tri_parser::parse_source(src);
        assert!(parsed.is_ok(), "Parse errors: {:?}", parsed.errors);
        let resolved = tri_resolve::resolve(&parsed.program);
        assert!(resolved.is_ok(), "Resolve errors: {:?}", resolved.errors);
        typecheck(resolved, &parsed.program)
    }

    fn errors(src: &str) -> Vec<TypeError> {
        check(src).errors
    }

    #[test]
    fn let_with_const_and_var() {
        let result = check("let var y Integer; const x ~ 5 in y = x endlet pass");
        assert!(result.is_ok(), "{:?}", result.errors);
        let types: Vec<_> = result
            .typed
            .symbols
            .declared()
            .map(|s| result.typed.symbol_type(s.id))
            .collect();
        assert_eq!(types, vec![Some(Type::Integer), Some(Type::Integer)]);
    }

    #[test]
    fn well_typed_program_has_no_error_types() {
        let src = "let var n Integer; var c Char; var done Boolean; const limit ~ maxint - 1 in \
                   begin \
                     getint(var n); get(var c); \
                     done = false; \
                     while \\ done /\\ (n < limit) do \
                       n = n * 2 + 1; \
                       if n \\= 0 then putint(n // 3) else put(c) \
                     wend \
                     do n = n - 1 wendwhile n >= 0; \
                     puteol() \
                   end \
                   endlet pass";
        let result = check(src);
        assert!(result.is_ok(), "{:?}", result.errors);
        assert!(!result.typed.node_types.is_empty());
        for (node, ty) in &result.typed.node_types {
            assert!(!ty.is_error(), "node {:?} has error type", node);
        }
    }

    #[test]
    fn non_boolean_condition() {
        let errs = errors("if 3 then pass else pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(
            errs[0],
            TypeError::Mismatch { expected: Type::Boolean, found: Type::Integer, .. }
        ));

        for src in ["while 'a' do pass wend pass", "do pass wendwhile 1 + 1"] {
            let errs = errors(src);
            assert_eq!(errs.len(), 1, "{src}");
            assert!(matches!(errs[0], TypeError::Mismatch { expected: Type::Boolean, .. }));
        }
    }

    #[test]
    fn literal_range() {
        assert!(errors("putint(32767)").is_empty());
        let errs = errors("putint(32768)");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::LiteralOutOfRange { ref literal, .. } if literal == "32768"));
        assert_eq!(errors("putint(99999999999999999999999)").len(), 1);
    }

    #[test]
    fn error_types_do_not_cascade() {
        let errs = errors("let var x Integer in x = 'a' + 1 endlet pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(
            errs[0],
            TypeError::Mismatch { expected: Type::Integer, found: Type::Char, .. }
        ));

        // The out-of-range literal is the only complaint
        let errs = errors("let var x Integer in x = 40000 * 2 endlet pass");
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn equality_needs_equal_operands() {
        assert!(errors("if 1 \\= 2 then pass else pass").is_empty());
        assert!(errors("if 'a' \\= 'b' then pass else pass").is_empty());
        let errs = errors("if 1 \\= 'b' then pass else pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::OperandMismatch { ref op, .. } if op == "\\="));
    }

    #[test]
    fn assignment_target_must_be_variable() {
        let errs = errors("maxint = 3");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::NotAVariable { ref name, .. } if name == "maxint"));
    }

    #[test]
    fn type_denoter_must_name_a_type() {
        let errs = errors("let var x maxint in pass endlet pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::NotAType { .. }));
    }

    #[test]
    fn names_that_are_not_values() {
        let errs = errors("putint(Integer)");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::NotAValue { kind: "type", .. }));
    }

    #[test]
    fn binary_operator_used_as_unary() {
        let errs = errors("putint(- 1)");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::NotAnOperator { arity: 1, .. }));
    }

    #[test]
    fn call_of_non_procedure() {
        let errs = errors("let var x Integer in x(1) endlet pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::NotAProcedure { .. }));
    }

    #[test]
    fn arity() {
        let errs = errors("puteol(1)");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::ArityMismatch { expected: 0, found: 1, .. }));

        let errs = errors("putint()");
        assert!(matches!(errs[0], TypeError::ArityMismatch { expected: 1, found: 0, .. }));
    }

    #[test]
    fn parameter_modes() {
        let errs = errors("getint(5)");
        assert_eq!(errs.len(), 1);
        assert!(matches!(
            errs[0],
            TypeError::ParameterMode { expected: ParamMode::Reference, .. }
        ));

        let errs = errors("let var c Char in put(var c) endlet pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::ParameterMode { expected: ParamMode::Value, .. }));

        let errs = errors("getint(var maxint)");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::NotAVariable { .. }));

        let errs = errors("let var c Char in getint(var c) endlet pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::Mismatch { expected: Type::Integer, found: Type::Char, .. }));
    }

    #[test]
    fn recursive_constant() {
        let errs = errors("let const x ~ x + 1 in pass endlet pass");
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], TypeError::RecursiveConstant { ref name, .. } if name == "x"));
    }

    #[test]
    fn declared_types_are_not_rewritten() {
        let result = check("let var x Integer in x = 'a' endlet pass");
        assert_eq!(result.errors.len(), 1);
        let x = result.typed.symbols.declared().next().unwrap();
        assert_eq!(result.typed.symbol_type(x.id), Some(Type::Integer));
    }
}
