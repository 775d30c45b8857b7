use matc_lex::TokenCategory;
use matc_sym::SymbolError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected: {expected} Found: {found}")]
    UnexpectedCategory {
        expected: TokenCategory,
        found: TokenCategory,
    },

    #[error("ran out of tokens")]
    OutOfTokens,

    #[error("Too few tokens")]
    TooFewTokens,

    #[error("Unexpected factor: {0}")]
    UnexpectedFactor(String),

    #[error("Factor: Closing parenthesis expected")]
    ExpectedClosingParenthesis,

    #[error("Subscript operator: Unexpected token {0}")]
    UnexpectedSubscriptToken(String),

    #[error("{0} function: Expected opening parenthesis")]
    ExpectedOpenParenthesis(&'static str),

    #[error("{0} function: Closing parenthesis expected")]
    ExpectedFunctionClosingParenthesis(&'static str),

    #[error("choose function: Expected 4 comma separated expressions")]
    ChooseExpectedComma,

    #[error("Initializer list: Expected opening curly braces")]
    ExpectedOpenCurlyBraces,

    #[error("Vector size cannot be 0")]
    ZeroVectorSize,

    #[error("Matrix size cannot be 0")]
    ZeroMatrixSize,

    /// No production rule matched the whole line; carries the message from
    /// the rule that consumed the longest prefix before failing, tagged
    /// with that rule's name — the same "richest failure wins" heuristic
    /// the original grammar used to surface the most plausible diagnosis.
    #[error("{0}")]
    NoRuleMatched(String),

    #[error(transparent)]
    Symbol(#[from] SymbolError),
}

pub type ParseResult<T> = Result<T, ParseError>;
