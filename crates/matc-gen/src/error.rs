use matc_sym::{Dimensions, SymbolError, VariableKind};
use thiserror::Error;

/// Everything that can go wrong while lowering an already-parsed program to
/// C. Unlike the lex/parse/symbol phases, most of these are *shape* errors:
/// they can only be caught here because only the generator walks a
/// statement's expressions with full type and dimension information.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeGenError {
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error("Expected type: {expected}, Found type: {found}")]
    TypeError {
        expected: VariableKind,
        found: VariableKind,
    },

    #[error("Invalid subscript operation: {name} has dimensions {dim} but subscripted with only one expression")]
    SingleSubscriptOnNonVector { name: String, dim: Dimensions },

    #[error("Matrix {op} dimension mismatch: {left} and {right}")]
    ShapeMismatch {
        op: &'static str,
        left: Dimensions,
        right: Dimensions,
    },

    #[error("Invalid assignment: Matrices have different sizes")]
    AssignmentShapeMismatch,

    #[error("Cannot add or subtract matrix and scalar")]
    MatrixScalarAddSub,

    #[error("List Initialization: Expected expressions {expected}, Found expressions {found}")]
    ListSizeMismatch { expected: usize, found: usize },
}

pub type CodeGenResult<T> = Result<T, CodeGenError>;
