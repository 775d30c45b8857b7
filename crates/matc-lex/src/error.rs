use thiserror::Error;

/// Failure raised when a lexeme cannot be classified into any token category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("No meaning can be given to {0:?}")]
    NoMeaning(String),
}

pub type LexResult<T> = Result<T, LexError>;
