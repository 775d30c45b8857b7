//! The fixed runtime prelude emitted verbatim before every program's `main`.
//!
//! Every MatLang binary op on matrices compiles to a call into one of these
//! helpers rather than inline loops at each call site, keeping the emitted
//! `main` body to one line per statement.

use std::fmt::Write as _;

pub fn write_program_structure(out: &mut String) {
    write_preprocessor_commands(out);
    write_negative_matrix(out);
    write_matrix_matrix_multiply(out);
    write_matrix_matrix_add(out);
    write_matrix_matrix_subtract(out);
    write_scalar_matrix_multiply(out);
    write_matrix_assign(out);
    write_tr_function(out);
    write_choose_function(out);
    write_print_function(out);
    write_printsep_function(out);
}

fn write_preprocessor_commands(out: &mut String) {
    writeln!(out, "#include <stdio.h>").unwrap();
    writeln!(out, "#include <math.h>").unwrap();
}

fn write_tr_function(out: &mut String) {
    writeln!(out, "void tr(int size1, int size2, double matrix[size1][size2], double result[size2][size1])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tresult[j][i] = matrix[i][j];").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_choose_function(out: &mut String) {
    writeln!(out, "double choose(int condition, double first, double second, double third)").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tif (condition == 0) {{").unwrap();
    writeln!(out, "\t\treturn first;").unwrap();
    writeln!(out, "\t}} else if (condition > 0) {{").unwrap();
    writeln!(out, "\t\treturn second;").unwrap();
    writeln!(out, "\t}} else {{").unwrap();
    writeln!(out, "\t\treturn third;").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_print_function(out: &mut String) {
    writeln!(out, "void print(double value)").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tprintf(\"%g\\n\", value);").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "void print_mat(int size1, int size2, double matrix[size1][size2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tdouble value = matrix[i][j];").unwrap();
    writeln!(out, "\t\t\tprintf(\"%g\", value);").unwrap();
    writeln!(out, "\t\t\tif (j != size2 - 1)").unwrap();
    writeln!(out, "\t\t\t\tprintf(\"\\t\");").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t\t\tprintf(\"\\n\");").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_printsep_function(out: &mut String) {
    writeln!(out, "void printsep()").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tprintf(\"----------\\n\");").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_matrix_matrix_subtract(out: &mut String) {
    writeln!(out, "void mat_mat_sub(int size1, int size2, double mat1[size1][size2], double mat2[size1][size2], double result[size1][size2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tresult[i][j] = mat1[i][j] - mat2[i][j];").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_matrix_matrix_add(out: &mut String) {
    writeln!(out, "void mat_mat_add(int size1, int size2, double mat1[size1][size2], double mat2[size1][size2], double result[size1][size2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tresult[i][j] = mat1[i][j] + mat2[i][j];").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_negative_matrix(out: &mut String) {
    writeln!(out, "void neg_mat(int size1, int size2, double mat[size1][size2], double result[size1][size2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tresult[i][j] = -mat[i][j];").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_matrix_matrix_multiply(out: &mut String) {
    writeln!(out, "void mat_mat_mul(int size1_1, int common_size, int size2_2, double mat1[size1_1][common_size], double mat2[common_size][size2_2], double result[size1_1][size2_2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tint k;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1_1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2_2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tdouble sum = 0;").unwrap();
    writeln!(out, "\t\t\tfor (k = 0; k < common_size; ++k) {{").unwrap();
    writeln!(out, "\t\t\t\tsum += mat1[i][k] * mat2[k][j];").unwrap();
    writeln!(out, "\t\t\t}}").unwrap();
    writeln!(out, "\t\t\tresult[i][j] = sum;").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    // (1xN) (Nx1) multiplication collapses to a scalar.
    writeln!(out, "double mat_mat_mul_s(int common_size, double mat1[1][common_size], double mat2[common_size][1])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint k;").unwrap();
    writeln!(out, "\tdouble sum = 0;").unwrap();
    writeln!(out, "\tfor (k = 0; k < common_size; ++k) {{").unwrap();
    writeln!(out, "\t\tsum += mat1[0][k] * mat2[k][0];").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "\treturn sum;").unwrap();
    writeln!(out, "}}").unwrap();
}

fn write_scalar_matrix_multiply(out: &mut String) {
    writeln!(out, "void mat_sca_mul(int size1, int size2, double scalar, double matrix[size1][size2], double result[size1][size2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tresult[i][j] = scalar * matrix[i][j];").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

fn write_matrix_assign(out: &mut String) {
    writeln!(out, "void mat_assign(int size1, int size2, double mat[size1][size2], double result[size1][size2])").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tint i;").unwrap();
    writeln!(out, "\tint j;").unwrap();
    writeln!(out, "\tfor (i = 0; i < size1; ++i) {{").unwrap();
    writeln!(out, "\t\tfor (j = 0; j < size2; ++j) {{").unwrap();
    writeln!(out, "\t\t\tresult[i][j] = mat[i][j];").unwrap();
    writeln!(out, "\t\t}}").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out, "}}").unwrap();
}
