use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("{0} is already declared")]
    AlreadyDeclared(String),

    #[error("{0} is not declared")]
    NotDeclared(String),
}

pub type SymbolResult<T> = Result<T, SymbolError>;
