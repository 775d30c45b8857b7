//! matc-gen - lowers a parsed, semantically-checked MatLang program to C.
//!
//! Emits the fixed helper-function prelude once, then walks every statement
//! in order, translating each into one or more lines of `main`. Expressions
//! arrive already rewritten to postfix by `matc-par`; this crate's only job
//! is to evaluate that postfix stream against an operand stack of typed,
//! dimensioned values and turn each reduction into a C statement.

mod error;
mod expr;
mod generator;
mod prelude;

pub use error::{CodeGenError, CodeGenResult};
pub use generator::CodeGenerator;

#[cfg(test)]
mod tests {
    use super::*;
    use matc_lex::tokenize_line;
    use matc_par::parse_line;
    use matc_sym::SymbolTable;

    fn compile(lines: &[&str]) -> Result<String, matc_util::LineError> {
        let mut symbols = SymbolTable::new();
        let statements: Vec<_> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let tokens = tokenize_line(line).expect("lex");
                parse_line(tokens, i + 1, &mut symbols).expect("parse")
            })
            .collect();
        let mut gen = CodeGenerator::new(&mut symbols);
        gen.generate(&statements)
    }

    #[test]
    fn scalar_arithmetic_program_compiles() {
        let c = compile(&["scalar x", "x = 3 + 4 * 2", "print(x)"]).unwrap();
        assert!(c.contains("double x;"));
        assert!(c.contains("print(x);"));
        assert!(c.starts_with("#include <stdio.h>"));
    }

    #[test]
    fn matrix_list_assignment_emits_per_element_writes() {
        let c = compile(&["matrix A[2, 2]", "A = { 1, 2, 3, 4 }", "print(A)"]).unwrap();
        assert!(c.contains("A[0][0] = 1;"));
        assert!(c.contains("A[0][1] = 2;"));
        assert!(c.contains("A[1][0] = 3;"));
        assert!(c.contains("A[1][1] = 4;"));
        assert!(c.contains("print_mat(2, 2, A);"));
    }

    #[test]
    fn matrix_matrix_multiply_collapses_to_scalar_helper() {
        let c = compile(&[
            "vector v[3]",
            "v = { 1, 2, 3 }",
            "scalar s",
            "s = tr(v) * v",
            "print(s)",
        ])
        .unwrap();
        assert!(c.contains("mat_mat_mul_s("));
        assert!(c.contains("tr(3, 1,"));
    }

    #[test]
    fn scalar_times_matrix_uses_matrix_dimensions_regardless_of_operand_order() {
        // Exercises both scalar*matrix and matrix*scalar: the original's
        // convert_scalar_mat_mul swaps its (matrix, scalar) arguments for
        // one of the two call sites, which would size the temporary as the
        // scalar's 1x1 instead of the matrix's real shape. Both orderings
        // here must produce a 2x1 temporary.
        let c = compile(&[
            "scalar k",
            "k = 2",
            "vector y[2]",
            "y = { 1, 2 }",
            "vector a[2]",
            "a = k * y",
            "vector b[2]",
            "b = y * k",
        ])
        .unwrap();
        assert!(c.contains("mat_sca_mul(2, 1, k, y,"));
        assert!(c.contains("mat_sca_mul(2, 1, k, y,"));
    }

    #[test]
    fn single_subscript_assignment_lowers_index() {
        let c = compile(&["vector v[3]", "v = { 1, 2, 3 }", "v[1] = 9"]).unwrap();
        assert!(c.contains("v[(int)1 - 1][0] = 9;"));
    }

    #[test]
    fn double_for_loop_nests_and_tracks_indentation() {
        let c = compile(&[
            "scalar i",
            "scalar j",
            "matrix M[2, 2]",
            "for (i, j in 1 : 2 : 1, 1 : 2 : 1) {",
            "M[i, j] = i + j",
            "}",
        ])
        .unwrap();
        assert!(c.contains("for (i = 1; i < 2+1; i += 1) {"));
        assert!(c.contains("\tfor (j = 1; j < 2+1; j += 1) {"));
    }

    #[test]
    fn assignment_type_mismatch_is_a_code_gen_error() {
        let err = compile(&["matrix A[2, 2]", "scalar s", "s = A"]).unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn list_assignment_with_too_few_expressions_is_an_error() {
        let err = compile(&["matrix A[2, 2]", "A = { 1, 2, 3 }"]).unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn matrix_subtraction_negates_the_right_operand_then_adds() {
        // "A - B" is rewritten by the parser to postfix "A 0 B - +", so the
        // generator never sees a direct matrix-matrix "-" reduction: it
        // always negates the right term (the "0 - B" step) and then adds
        // that negation to the left term.
        let c = compile(&[
            "matrix A[2, 2]",
            "matrix B[2, 2]",
            "A = { 1, 2, 3, 4 }",
            "B = { 5, 6, 7, 8 }",
            "matrix C[2, 2]",
            "C = A - B",
            "print(C)",
        ])
        .unwrap();
        assert!(c.contains("neg_mat(2, 2,"));
        assert!(c.contains("mat_mat_add(2, 2,"));
    }

    #[test]
    fn bare_zero_minus_matrix_is_a_type_error() {
        // Unlike "A - B", a literal leading "0" never collapses away: it
        // survives to the final "+" reduction as a bare scalar paired with
        // the negated matrix, which is the same mismatch a genuine
        // scalar-plus-matrix expression would hit.
        let err = compile(&[
            "matrix A[2, 2]",
            "A = { 1, 2, 3, 4 }",
            "matrix B[2, 2]",
            "B = 0 - A",
        ])
        .unwrap_err();
        assert_eq!(err.line, 4);
    }

    #[test]
    fn expression_level_subscript_lowers_both_indices() {
        let c = compile(&[
            "matrix A[2, 2]",
            "A = { 1, 2, 3, 4 }",
            "scalar i",
            "i = 1",
            "scalar j",
            "j = 2",
            "scalar s",
            "s = A[i, j]",
        ])
        .unwrap();
        assert!(c.contains("A[(int)(i - 1)][(int)(j - 1)]"));
    }

    #[test]
    fn sqrt_and_choose_inline_as_scalar_expressions() {
        let c = compile(&[
            "scalar x",
            "x = 4",
            "scalar y",
            "y = sqrt(x)",
            "scalar z",
            "z = choose(x, 1, 2, 3)",
        ])
        .unwrap();
        assert!(c.contains("sqrt(x)"));
        assert!(c.contains("choose((int)x, 1, 2, 3)"));
    }

    #[test]
    fn matrix_addition_allocates_a_temporary_and_calls_the_helper() {
        let c = compile(&[
            "matrix A[2, 2]",
            "matrix B[2, 2]",
            "A = { 1, 2, 3, 4 }",
            "B = { 5, 6, 7, 8 }",
            "matrix C[2, 2]",
            "C = A + B",
        ])
        .unwrap();
        assert!(c.contains("mat_mat_add(2, 2, A, B,"));
    }

    #[test]
    fn matrix_matrix_multiply_uses_the_full_helper_when_result_is_not_scalar_shaped() {
        let c = compile(&[
            "matrix A[2, 3]",
            "matrix B[3, 2]",
            "A = { 1, 2, 3, 4, 5, 6 }",
            "B = { 1, 0, 0, 1, 1, 1 }",
            "matrix C[2, 2]",
            "C = A * B",
        ])
        .unwrap();
        assert!(c.contains("mat_mat_mul(2, 3, 2, A, B,"));
    }

    #[test]
    fn single_for_uses_spaced_plus_one() {
        let c = compile(&[
            "scalar i",
            "for (i in 1 : 3 : 1) {",
            "print(i)",
            "}",
        ])
        .unwrap();
        assert!(c.contains("for (i = 1; i < 3 + 1; i += 1) {"));
    }

    // ------------------------------------------------------------------------
    // Property-based tests - arbitrary matrix shapes via proptest
    // ------------------------------------------------------------------------

    mod proptests {
        use super::compile;
        use proptest::prelude::*;

        fn source_for_add(a: (usize, usize), b: (usize, usize)) -> Vec<String> {
            vec![
                format!("matrix A[{}, {}]", a.0, a.1),
                format!("matrix B[{}, {}]", b.0, b.1),
                format!(
                    "A = {{ {} }}",
                    vec!["1"; a.0 * a.1].join(", ")
                ),
                format!(
                    "B = {{ {} }}",
                    vec!["1"; b.0 * b.1].join(", ")
                ),
                format!("matrix C[{}, {}]", a.0, a.1),
                "C = A + B".to_string(),
            ]
        }

        proptest! {
            /// Every matrix-matrix add either succeeds (same shape) or
            /// fails with a shape error (different shape) - never anything
            /// else, and never panics.
            #[test]
            fn matrix_add_shape_check_is_total(
                a in (1usize..4, 1usize..4),
                b in (1usize..4, 1usize..4),
            ) {
                // (1, 1) declarations demote to `Scalar` at parse time (per
                // the declaration-demotion rule), which would make the
                // `{ ... }` list assignment below fail for an unrelated
                // reason (wrong target kind) - excluded so this test stays
                // focused on the add's own shape check.
                prop_assume!(a != (1, 1) && b != (1, 1));
                let lines = source_for_add(a, b);
                let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                let result = compile(&refs);
                if a == b {
                    prop_assert!(result.is_ok(), "same-shape add must succeed: {a:?} {b:?}");
                } else {
                    prop_assert!(result.is_err(), "mismatched-shape add must fail: {a:?} {b:?}");
                }
            }

            /// Matrix-matrix multiply is only well-shaped when
            /// `lhs.cols == rhs.rows`; every other combination is rejected
            /// before any C is emitted.
            #[test]
            fn matrix_multiply_shape_check_is_total(
                lhs in (1usize..4, 1usize..4),
                rhs in (1usize..4, 1usize..4),
            ) {
                prop_assume!(lhs != (1, 1) && rhs != (1, 1));
                let lines = vec![
                    format!("matrix A[{}, {}]", lhs.0, lhs.1),
                    format!("matrix B[{}, {}]", rhs.0, rhs.1),
                    format!("A = {{ {} }}", vec!["1"; lhs.0 * lhs.1].join(", ")),
                    format!("B = {{ {} }}", vec!["1"; rhs.0 * rhs.1].join(", ")),
                    "scalar s".to_string(),
                    "s = A * B".to_string(),
                ];
                let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                let result = compile(&refs);
                if lhs.1 == rhs.0 {
                    // the product is only assignable to the scalar `s` when
                    // it collapses to 1x1; otherwise this specific program
                    // still fails, but on the *assignment* shape check, not
                    // the multiply's own shape check - both are shape
                    // errors, so either way this must not panic or succeed
                    // with a non-scalar C emitted into `s`.
                    prop_assert!(result.is_ok() == (lhs.0 == 1 && rhs.1 == 1));
                } else {
                    prop_assert!(result.is_err());
                }
            }
        }
    }
}
