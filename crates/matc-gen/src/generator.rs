use std::fmt::Write as _;

use matc_lex::Token;
use matc_par::{AnnotatedStatement, StatementKind};
use matc_sym::{Dimensions, SymbolTable, Variable, VariableKind};
use matc_util::LineError;

use crate::error::{CodeGenError, CodeGenResult};
use crate::prelude;

/// Finds the next `ExpressionBegin` sentinel at or after `from`.
///
/// Every statement's token vector is laid out by the production-rule table,
/// so the offsets between rule elements are fixed in principle; scanning for
/// the sentinel instead of hard-coding those offsets keeps each statement
/// handler readable without depending on exactly how many terminals precede
/// an `Expr` slot.
fn next_expr_begin(tokens: &[Token], from: usize) -> usize {
    tokens[from..]
        .iter()
        .position(|t| t.category == matc_lex::TokenCategory::ExpressionBegin)
        .map(|i| from + i)
        .expect("malformed statement: expected another expression")
}

/// Lowers a parsed, semantically-checked program to C.
///
/// Owns the symbol table for the duration of generation, since every
/// temporary it allocates while reducing an expression is registered back
/// into the same table the parser populated.
pub struct CodeGenerator<'a> {
    symbols: &'a mut SymbolTable,
    indentation: usize,
    double_for: bool,
    temp_counter: usize,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(symbols: &'a mut SymbolTable) -> Self {
        Self {
            symbols,
            indentation: 0,
            double_for: false,
            temp_counter: 0,
        }
    }

    /// Emits the fixed prelude, then every statement inside `main`.
    pub fn generate(&mut self, statements: &[AnnotatedStatement]) -> Result<String, LineError> {
        let mut out = String::new();
        prelude::write_program_structure(&mut out);
        writeln!(out, "int main()").unwrap();
        writeln!(out, "{{").unwrap();
        self.indentation = 1;
        for statement in statements {
            self.emit(statement, &mut out)
                .map_err(|err| LineError::new(statement.line, err.to_string()))?;
        }
        writeln!(out, "\treturn 0;").unwrap();
        write!(out, "}}").unwrap();
        log::debug!("code generation complete, {} bytes emitted", out.len());
        Ok(out)
    }

    fn emit(&mut self, statement: &AnnotatedStatement, out: &mut String) -> CodeGenResult<()> {
        use StatementKind::*;
        let tokens = &statement.tokens;
        match statement.kind {
            ScalarDeclaration => self.emit_scalar_decl(tokens, out),
            VectorDeclaration => self.emit_vector_decl(tokens, out),
            MatrixDeclaration => self.emit_matrix_decl(tokens, out),
            SingleForStatement => {
                self.emit_single_for(tokens, out)?;
                self.indentation += 1;
                Ok(())
            }
            DoubleForStatement => {
                self.emit_double_for(tokens, out)?;
                self.double_for = true;
                self.indentation += 2;
                Ok(())
            }
            EndFor => self.emit_end_for(out),
            PrintStatement => self.emit_print(tokens, out),
            PrintSepStatement => self.emit_printsep(out),
            ExprAssignment => self.emit_expr_assignment(tokens, out),
            SingleSubscriptExprAssignment => self.emit_single_subscript_assignment(tokens, out),
            DoubleSubscriptExprAssignment => self.emit_double_subscript_assignment(tokens, out),
            ListAssignment => self.emit_list_assignment(tokens, out),
        }
    }

    pub(crate) fn put_tabs(&self, out: &mut String) {
        for _ in 0..self.indentation {
            out.push('\t');
        }
    }

    pub(crate) fn unique_name(&mut self) -> String {
        let name = format!("_E4_{}", self.temp_counter);
        self.temp_counter += 1;
        name
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    pub(crate) fn lookup(&self, name: &str) -> CodeGenResult<Variable> {
        Ok(self.symbols.lookup(name)?)
    }

    pub(crate) fn register_temp(&mut self, name: &str, dim: Dimensions) -> CodeGenResult<()> {
        self.symbols.insert_temp(Variable::matrix(name, dim))?;
        Ok(())
    }

    fn emit_scalar_decl(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        self.put_tabs(out);
        writeln!(out, "double {};", tokens[1].lexeme).unwrap();
        Ok(())
    }

    fn emit_vector_decl(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        self.put_tabs(out);
        writeln!(out, "double {}[{}][1];", tokens[1].lexeme, tokens[3].lexeme).unwrap();
        Ok(())
    }

    fn emit_matrix_decl(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        self.put_tabs(out);
        writeln!(
            out,
            "double {}[{}][{}];",
            tokens[1].lexeme, tokens[3].lexeme, tokens[5].lexeme
        )
        .unwrap();
        Ok(())
    }

    /// Evaluates the three scalar bound expressions of a `for` clause,
    /// starting the search for the first `Expr` at `from`.
    fn for_bounds(
        &mut self,
        tokens: &[Token],
        mut from: usize,
        out: &mut String,
    ) -> CodeGenResult<([Variable; 3], usize)> {
        let mut bounds = Vec::with_capacity(3);
        let mut last_end = from;
        for _ in 0..3 {
            let begin = next_expr_begin(tokens, from);
            let (value, end) = self.eval_expr_at(tokens, begin, out)?;
            if !value.is_scalar() {
                return Err(CodeGenError::TypeError {
                    expected: VariableKind::Scalar,
                    found: value.kind,
                });
            }
            bounds.push(value);
            last_end = end;
            from = end + 1;
        }
        Ok((
            [bounds.remove(0), bounds.remove(0), bounds.remove(0)],
            last_end,
        ))
    }

    fn emit_single_for(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        let name = tokens[2].lexeme.clone();
        let iterator = self.lookup(&name)?;
        if !iterator.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: iterator.kind,
            });
        }
        let (bounds, _) = self.for_bounds(tokens, 0, out)?;
        self.put_tabs(out);
        writeln!(
            out,
            "for ({name} = {start}; {name} < {end} + 1; {name} += {step}) {{",
            name = name,
            start = bounds[0].name,
            end = bounds[1].name,
            step = bounds[2].name,
        )
        .unwrap();
        Ok(())
    }

    fn emit_double_for(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        let first_name = tokens[2].lexeme.clone();
        let second_name = tokens[4].lexeme.clone();
        for name in [&first_name, &second_name] {
            let var = self.lookup(name)?;
            if !var.is_scalar() {
                return Err(CodeGenError::TypeError {
                    expected: VariableKind::Scalar,
                    found: var.kind,
                });
            }
        }
        let (first_bounds, first_end) = self.for_bounds(tokens, 0, out)?;
        let (second_bounds, _) = self.for_bounds(tokens, first_end + 1, out)?;

        self.put_tabs(out);
        writeln!(
            out,
            "for ({name} = {start}; {name} < {end}+1; {name} += {step}) {{",
            name = first_name,
            start = first_bounds[0].name,
            end = first_bounds[1].name,
            step = first_bounds[2].name,
        )
        .unwrap();
        self.put_tabs(out);
        writeln!(
            out,
            "\tfor ({name} = {start}; {name} < {end}+1; {name} += {step}) {{",
            name = second_name,
            start = second_bounds[0].name,
            end = second_bounds[1].name,
            step = second_bounds[2].name,
        )
        .unwrap();
        Ok(())
    }

    fn emit_end_for(&mut self, out: &mut String) -> CodeGenResult<()> {
        if self.double_for {
            self.indentation -= 2;
        } else {
            self.indentation -= 1;
        }
        if self.double_for {
            self.put_tabs(out);
            writeln!(out, "\t}}").unwrap();
        }
        self.put_tabs(out);
        writeln!(out, "}}").unwrap();
        self.double_for = false;
        Ok(())
    }

    fn emit_print(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        let begin = next_expr_begin(tokens, 0);
        let (value, _) = self.eval_expr_at(tokens, begin, out)?;
        self.put_tabs(out);
        match value.kind {
            VariableKind::Matrix => {
                writeln!(
                    out,
                    "print_mat({}, {}, {});",
                    value.dim.rows, value.dim.cols, value.name
                )
                .unwrap();
            }
            VariableKind::Scalar => {
                writeln!(out, "print({});", value.name).unwrap();
            }
        }
        Ok(())
    }

    fn emit_printsep(&mut self, out: &mut String) -> CodeGenResult<()> {
        self.put_tabs(out);
        writeln!(out, "printsep();").unwrap();
        Ok(())
    }

    fn emit_expr_assignment(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        let lhs = self.lookup(&tokens[0].lexeme)?;
        let begin = next_expr_begin(tokens, 0);
        let (rhs, _) = self.eval_expr_at(tokens, begin, out)?;
        self.put_tabs(out);
        match lhs.kind {
            VariableKind::Scalar => {
                if !rhs.is_scalar() {
                    return Err(CodeGenError::TypeError {
                        expected: VariableKind::Scalar,
                        found: rhs.kind,
                    });
                }
                writeln!(out, "{} = {};", lhs.name, rhs.name).unwrap();
            }
            VariableKind::Matrix => {
                if !rhs.is_matrix() {
                    return Err(CodeGenError::TypeError {
                        expected: VariableKind::Matrix,
                        found: rhs.kind,
                    });
                }
                if lhs.dim != rhs.dim {
                    return Err(CodeGenError::AssignmentShapeMismatch);
                }
                writeln!(
                    out,
                    "mat_assign({}, {}, {}, {});",
                    lhs.dim.rows, lhs.dim.cols, rhs.name, lhs.name
                )
                .unwrap();
            }
        }
        Ok(())
    }

    fn emit_single_subscript_assignment(
        &mut self,
        tokens: &[Token],
        out: &mut String,
    ) -> CodeGenResult<()> {
        let name = tokens[0].lexeme.clone();
        let target = self.lookup(&name)?;
        if !target.is_matrix() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Matrix,
                found: target.kind,
            });
        }
        if target.dim.cols != 1 {
            return Err(CodeGenError::SingleSubscriptOnNonVector {
                name: name.clone(),
                dim: target.dim,
            });
        }
        let index_begin = next_expr_begin(tokens, 0);
        let (index, index_end) = self.eval_expr_at(tokens, index_begin, out)?;
        if !index.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: index.kind,
            });
        }
        let rhs_begin = next_expr_begin(tokens, index_end + 1);
        let (rhs, _) = self.eval_expr_at(tokens, rhs_begin, out)?;
        if !rhs.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: rhs.kind,
            });
        }
        self.put_tabs(out);
        writeln!(
            out,
            "{}[(int){} - 1][0] = {};",
            name, index.name, rhs.name
        )
        .unwrap();
        Ok(())
    }

    fn emit_double_subscript_assignment(
        &mut self,
        tokens: &[Token],
        out: &mut String,
    ) -> CodeGenResult<()> {
        let name = tokens[0].lexeme.clone();
        let target = self.lookup(&name)?;
        if !target.is_matrix() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Matrix,
                found: target.kind,
            });
        }
        let row_begin = next_expr_begin(tokens, 0);
        let (row_idx, row_end) = self.eval_expr_at(tokens, row_begin, out)?;
        if !row_idx.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: row_idx.kind,
            });
        }
        let col_begin = next_expr_begin(tokens, row_end + 1);
        let (col_idx, col_end) = self.eval_expr_at(tokens, col_begin, out)?;
        if !col_idx.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: col_idx.kind,
            });
        }
        let rhs_begin = next_expr_begin(tokens, col_end + 1);
        let (rhs, _) = self.eval_expr_at(tokens, rhs_begin, out)?;
        if !rhs.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: rhs.kind,
            });
        }
        self.put_tabs(out);
        writeln!(
            out,
            "{}[(int){} - 1][(int){} - 1] = {};",
            name, row_idx.name, col_idx.name, rhs.name
        )
        .unwrap();
        Ok(())
    }

    fn emit_list_assignment(&mut self, tokens: &[Token], out: &mut String) -> CodeGenResult<()> {
        let name = tokens[0].lexeme.clone();
        let target = self.lookup(&name)?;
        if !target.is_matrix() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Matrix,
                found: target.kind,
            });
        }
        let expected = target.dim.rows * target.dim.cols;
        let found = tokens
            .iter()
            .filter(|t| t.category == matc_lex::TokenCategory::ExpressionBegin)
            .count();
        if found != expected {
            return Err(CodeGenError::ListSizeMismatch { expected, found });
        }

        let mut from = 0;
        for row in 0..target.dim.rows {
            for col in 0..target.dim.cols {
                let begin = next_expr_begin(tokens, from);
                let (value, end) = self.eval_expr_at(tokens, begin, out)?;
                if !value.is_scalar() {
                    return Err(CodeGenError::TypeError {
                        expected: VariableKind::Scalar,
                        found: value.kind,
                    });
                }
                self.put_tabs(out);
                writeln!(out, "{}[{}][{}] = {};", name, row, col, value.name).unwrap();
                from = end + 1;
            }
        }
        Ok(())
    }
}
