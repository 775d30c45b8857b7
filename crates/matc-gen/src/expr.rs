//! The postfix operand-stack evaluator.
//!
//! `matc-par` rewrites every expression to postfix before this crate ever
//! sees it, with one exception: expression-level subscripts (`A[i]`) and
//! function calls (`tr(...)`, `sqrt(...)`, `choose(...)`) keep their
//! bracket/paren/comma tokens in the stream as literal markers rather than
//! folding them into pure postfix operators, since the bracket text itself
//! has to survive into the emitted C. [`CodeGenerator::reduce_range`] walks
//! the flat token range left to right, reducing plain arithmetic the usual
//! RPN way and special-casing those markers by scanning forward for their
//! matching close token.

use std::fmt::Write as _;

use matc_lex::{Token, TokenCategory};
use matc_sym::{Dimensions, Variable, VariableKind};

use crate::error::{CodeGenError, CodeGenResult};
use crate::generator::CodeGenerator;

/// Scans forward from `open_idx` (which must hold `open_cat`) for the
/// matching `close_cat`, tracking nesting depth.
fn find_matching(
    tokens: &[Token],
    open_idx: usize,
    end: usize,
    open_cat: TokenCategory,
    close_cat: TokenCategory,
) -> usize {
    let mut depth = 0i32;
    for (offset, tok) in tokens[open_idx..end].iter().enumerate() {
        if tok.category == open_cat {
            depth += 1;
        } else if tok.category == close_cat {
            depth -= 1;
            if depth == 0 {
                return open_idx + offset;
            }
        }
    }
    panic!("malformed statement: unmatched bracket or parenthesis");
}

/// Scans forward from `start` for the comma or closing parenthesis that
/// ends a `choose(...)` argument, ignoring commas and parens nested inside
/// a further call or subscript.
fn find_arg_end(tokens: &[Token], start: usize, end: usize) -> usize {
    let mut paren_depth = 0i32;
    let mut bracket_depth = 0i32;
    for i in start..end {
        match tokens[i].category {
            TokenCategory::OpenParenthesis => paren_depth += 1,
            TokenCategory::CloseParenthesis => {
                if paren_depth == 0 {
                    return i;
                }
                paren_depth -= 1;
            }
            TokenCategory::OpenSquareBrackets => bracket_depth += 1,
            TokenCategory::CloseSquareBrackets => bracket_depth -= 1,
            TokenCategory::Comma if paren_depth == 0 && bracket_depth == 0 => return i,
            _ => {}
        }
    }
    panic!("malformed statement: unterminated call arguments");
}

impl<'a> CodeGenerator<'a> {
    /// Evaluates the postfix expression starting at the `ExpressionBegin`
    /// sentinel at `begin`, returning its value and the index of the
    /// matching `ExpressionEnd`.
    pub(crate) fn eval_expr_at(
        &mut self,
        tokens: &[Token],
        begin: usize,
        out: &mut String,
    ) -> CodeGenResult<(Variable, usize)> {
        let end = tokens[begin + 1..]
            .iter()
            .position(|t| t.category == TokenCategory::ExpressionEnd)
            .map(|i| begin + 1 + i)
            .expect("malformed statement: unterminated expression");
        let value = self.reduce_range(tokens, begin + 1, end, out)?;
        Ok((value, end))
    }

    /// Reduces the flat (possibly marker-interrupted) postfix range
    /// `[start, end)` to a single value, emitting any helper-function
    /// calls and temporaries a matrix-valued reduction needs along the way.
    fn reduce_range(
        &mut self,
        tokens: &[Token],
        start: usize,
        end: usize,
        out: &mut String,
    ) -> CodeGenResult<Variable> {
        let mut stack: Vec<Variable> = Vec::new();
        let mut i = start;
        while i < end {
            match tokens[i].category {
                TokenCategory::Integer | TokenCategory::Real => {
                    stack.push(Variable::new(
                        tokens[i].lexeme.clone(),
                        VariableKind::Scalar,
                        Dimensions::SCALAR,
                    ));
                    i += 1;
                }
                TokenCategory::Identifier => {
                    if i + 1 < end && tokens[i + 1].category == TokenCategory::OpenSquareBrackets {
                        let (value, next) = self.reduce_subscript(tokens, i, end, out)?;
                        stack.push(value);
                        i = next;
                    } else {
                        stack.push(self.lookup(&tokens[i].lexeme)?);
                        i += 1;
                    }
                }
                TokenCategory::AdditionOperator => {
                    let rhs = stack.pop().expect("postfix stack underflow");
                    let lhs = stack.pop().expect("postfix stack underflow");
                    stack.push(self.combine_add(lhs, rhs, out)?);
                    i += 1;
                }
                TokenCategory::SubtractionOperator => {
                    let rhs = stack.pop().expect("postfix stack underflow");
                    let lhs = stack.pop().expect("postfix stack underflow");
                    stack.push(self.combine_sub(lhs, rhs, out)?);
                    i += 1;
                }
                TokenCategory::MultiplicationOperator => {
                    let rhs = stack.pop().expect("postfix stack underflow");
                    let lhs = stack.pop().expect("postfix stack underflow");
                    stack.push(self.combine_mul(lhs, rhs, out)?);
                    i += 1;
                }
                TokenCategory::TrFunction
                | TokenCategory::SqrtFunction
                | TokenCategory::ChooseFunction => {
                    let (value, next) = self.reduce_call(tokens, i, end, out)?;
                    stack.push(value);
                    i = next;
                }
                other => panic!("unexpected token in postfix expression: {other:?}"),
            }
        }
        Ok(stack.pop().expect("postfix expression produced no value"))
    }

    fn combine_add(&mut self, lhs: Variable, rhs: Variable, out: &mut String) -> CodeGenResult<Variable> {
        match (lhs.kind, rhs.kind) {
            (VariableKind::Scalar, VariableKind::Scalar) => Ok(Variable::new(
                format!("({} + {})", lhs.name, rhs.name),
                VariableKind::Scalar,
                Dimensions::SCALAR,
            )),
            (VariableKind::Matrix, VariableKind::Matrix) => {
                self.emit_mat_mat_binop("mat_mat_add", "add", &lhs, &rhs, out)
            }
            _ => Err(CodeGenError::MatrixScalarAddSub),
        }
    }

    fn combine_sub(&mut self, lhs: Variable, rhs: Variable, out: &mut String) -> CodeGenResult<Variable> {
        match (lhs.kind, rhs.kind) {
            (VariableKind::Scalar, VariableKind::Scalar) => Ok(Variable::new(
                format!("({} - {})", lhs.name, rhs.name),
                VariableKind::Scalar,
                Dimensions::SCALAR,
            )),
            (VariableKind::Matrix, VariableKind::Matrix) => {
                self.emit_mat_mat_binop("mat_mat_sub", "subtract", &lhs, &rhs, out)
            }
            // Every textual '-' is rewritten by the parser to "0 <term> -",
            // so a Scalar lhs paired with a Matrix rhs here is always that
            // literal zero: this is source-level negation, not a mismatched
            // subtraction.
            (VariableKind::Scalar, VariableKind::Matrix) => self.emit_mat_neg(&rhs, out),
            (VariableKind::Matrix, VariableKind::Scalar) => Err(CodeGenError::MatrixScalarAddSub),
        }
    }

    fn emit_mat_neg(&mut self, operand: &Variable, out: &mut String) -> CodeGenResult<Variable> {
        let temp = self.emit_temp_matrix(operand.dim, out)?;
        self.put_tabs(out);
        writeln!(
            out,
            "neg_mat({}, {}, {}, {});",
            operand.dim.rows, operand.dim.cols, operand.name, temp
        )
        .unwrap();
        Ok(Variable::matrix(temp, operand.dim))
    }

    fn combine_mul(&mut self, lhs: Variable, rhs: Variable, out: &mut String) -> CodeGenResult<Variable> {
        match (lhs.kind, rhs.kind) {
            (VariableKind::Scalar, VariableKind::Scalar) => Ok(Variable::new(
                format!("({} * {})", lhs.name, rhs.name),
                VariableKind::Scalar,
                Dimensions::SCALAR,
            )),
            (VariableKind::Scalar, VariableKind::Matrix) => self.emit_scalar_mat_mul(&rhs, &lhs, out),
            (VariableKind::Matrix, VariableKind::Scalar) => self.emit_scalar_mat_mul(&lhs, &rhs, out),
            (VariableKind::Matrix, VariableKind::Matrix) => self.emit_mat_mat_mul(&lhs, &rhs, out),
        }
    }

    fn emit_temp_matrix(&mut self, dim: Dimensions, out: &mut String) -> CodeGenResult<String> {
        let name = self.unique_name();
        self.put_tabs(out);
        writeln!(out, "double {}[{}][{}];", name, dim.rows, dim.cols).unwrap();
        self.register_temp(&name, dim)?;
        Ok(name)
    }

    fn emit_mat_mat_binop(
        &mut self,
        helper: &str,
        op: &'static str,
        lhs: &Variable,
        rhs: &Variable,
        out: &mut String,
    ) -> CodeGenResult<Variable> {
        if lhs.dim != rhs.dim {
            return Err(CodeGenError::ShapeMismatch {
                op,
                left: lhs.dim,
                right: rhs.dim,
            });
        }
        let temp = self.emit_temp_matrix(lhs.dim, out)?;
        self.put_tabs(out);
        writeln!(
            out,
            "{}({}, {}, {}, {}, {});",
            helper, lhs.dim.rows, lhs.dim.cols, lhs.name, rhs.name, temp
        )
        .unwrap();
        Ok(Variable::matrix(temp, lhs.dim))
    }

    fn emit_scalar_mat_mul(
        &mut self,
        matrix: &Variable,
        scalar: &Variable,
        out: &mut String,
    ) -> CodeGenResult<Variable> {
        let temp = self.emit_temp_matrix(matrix.dim, out)?;
        self.put_tabs(out);
        writeln!(
            out,
            "mat_sca_mul({}, {}, {}, {}, {});",
            matrix.dim.rows, matrix.dim.cols, scalar.name, matrix.name, temp
        )
        .unwrap();
        Ok(Variable::matrix(temp, matrix.dim))
    }

    fn emit_mat_mat_mul(&mut self, lhs: &Variable, rhs: &Variable, out: &mut String) -> CodeGenResult<Variable> {
        if lhs.dim.cols != rhs.dim.rows {
            return Err(CodeGenError::ShapeMismatch {
                op: "multiply",
                left: lhs.dim,
                right: rhs.dim,
            });
        }
        let result_dim = Dimensions::new(lhs.dim.rows, rhs.dim.cols);
        if result_dim.is_scalar_shaped() {
            let text = format!("mat_mat_mul_s({}, {}, {})", lhs.dim.cols, lhs.name, rhs.name);
            Ok(Variable::new(text, VariableKind::Scalar, Dimensions::SCALAR))
        } else {
            let temp = self.emit_temp_matrix(result_dim, out)?;
            self.put_tabs(out);
            writeln!(
                out,
                "mat_mat_mul({}, {}, {}, {}, {}, {});",
                lhs.dim.rows, lhs.dim.cols, rhs.dim.cols, lhs.name, rhs.name, temp
            )
            .unwrap();
            Ok(Variable::matrix(temp, result_dim))
        }
    }

    /// Reduces `A[i]`/`A[i, j]` appearing inside a larger expression. Both
    /// forms carry exactly two `[(int) ... ]` segments in the postfix
    /// stream (the single-subscript form's second segment is the literal
    /// `0`), so both are handled by the same two-segment scan.
    fn reduce_subscript(
        &mut self,
        tokens: &[Token],
        ident_idx: usize,
        end: usize,
        out: &mut String,
    ) -> CodeGenResult<(Variable, usize)> {
        let name = tokens[ident_idx].lexeme.clone();
        let target = self.lookup(&name)?;
        if !target.is_matrix() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Matrix,
                found: target.kind,
            });
        }

        let open1 = ident_idx + 1;
        let close1 = find_matching(
            tokens,
            open1,
            end,
            TokenCategory::OpenSquareBrackets,
            TokenCategory::CloseSquareBrackets,
        );
        let idx1 = self.reduce_range(tokens, open1 + 1, close1, out)?;
        if !idx1.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: idx1.kind,
            });
        }

        let open2 = close1 + 1;
        let close2 = find_matching(
            tokens,
            open2,
            end,
            TokenCategory::OpenSquareBrackets,
            TokenCategory::CloseSquareBrackets,
        );
        let idx2 = self.reduce_range(tokens, open2 + 1, close2, out)?;
        if !idx2.is_scalar() {
            return Err(CodeGenError::TypeError {
                expected: VariableKind::Scalar,
                found: idx2.kind,
            });
        }

        let text = format!("{}[(int){}][(int){}]", name, idx1.name, idx2.name);
        Ok((
            Variable::new(text, VariableKind::Scalar, Dimensions::SCALAR),
            close2 + 1,
        ))
    }

    /// Reduces `tr(...)`, `sqrt(...)` or `choose(...)` starting at the
    /// function-name token at `fn_idx`, returning the resulting value and
    /// the index just past the closing parenthesis.
    fn reduce_call(
        &mut self,
        tokens: &[Token],
        fn_idx: usize,
        end: usize,
        out: &mut String,
    ) -> CodeGenResult<(Variable, usize)> {
        let open_idx = fn_idx + 1;
        match tokens[fn_idx].category {
            TokenCategory::TrFunction => {
                let close_idx = find_matching(
                    tokens,
                    open_idx,
                    end,
                    TokenCategory::OpenParenthesis,
                    TokenCategory::CloseParenthesis,
                );
                let arg = self.reduce_range(tokens, open_idx + 1, close_idx, out)?;
                if !arg.is_matrix() {
                    return Err(CodeGenError::TypeError {
                        expected: VariableKind::Matrix,
                        found: arg.kind,
                    });
                }
                let result_dim = Dimensions::new(arg.dim.cols, arg.dim.rows);
                let temp = self.emit_temp_matrix(result_dim, out)?;
                self.put_tabs(out);
                writeln!(
                    out,
                    "tr({}, {}, {}, {});",
                    arg.dim.rows, arg.dim.cols, arg.name, temp
                )
                .unwrap();
                Ok((Variable::matrix(temp, result_dim), close_idx + 1))
            }
            TokenCategory::SqrtFunction => {
                let close_idx = find_matching(
                    tokens,
                    open_idx,
                    end,
                    TokenCategory::OpenParenthesis,
                    TokenCategory::CloseParenthesis,
                );
                let arg = self.reduce_range(tokens, open_idx + 1, close_idx, out)?;
                if !arg.is_scalar() {
                    return Err(CodeGenError::TypeError {
                        expected: VariableKind::Scalar,
                        found: arg.kind,
                    });
                }
                Ok((
                    Variable::new(format!("sqrt({})", arg.name), VariableKind::Scalar, Dimensions::SCALAR),
                    close_idx + 1,
                ))
            }
            TokenCategory::ChooseFunction => {
                let mut cursor = open_idx + 1;
                let mut args = Vec::with_capacity(4);
                for _ in 0..4 {
                    let arg_end = find_arg_end(tokens, cursor, end);
                    let arg = self.reduce_range(tokens, cursor, arg_end, out)?;
                    if !arg.is_scalar() {
                        return Err(CodeGenError::TypeError {
                            expected: VariableKind::Scalar,
                            found: arg.kind,
                        });
                    }
                    args.push(arg);
                    cursor = arg_end + 1;
                }
                let text = format!(
                    "choose((int){}, {}, {}, {})",
                    args[0].name, args[1].name, args[2].name, args[3].name
                );
                Ok((Variable::new(text, VariableKind::Scalar, Dimensions::SCALAR), cursor))
            }
            _ => unreachable!("reduce_call invoked on a non-function token"),
        }
    }
}
