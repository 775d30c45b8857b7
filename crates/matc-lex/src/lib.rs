//! matc-lex - regex-driven, maximal-munch tokenizer for MatLang source lines.

mod error;
mod lexer;
mod regex_table;
mod token;

pub use error::{LexError, LexResult};
pub use lexer::{tokenize_line, Lexer};
pub use regex_table::classify;
pub use token::{Token, TokenCategory};
