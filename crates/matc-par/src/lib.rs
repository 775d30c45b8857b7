//! matc-par - recursive-descent expression grammar, production-rule-table
//! statement recognition, and in-place infix→postfix rewriting.

mod error;
mod expr;
mod parser;
mod rule;
mod statement;

pub use error::{ParseError, ParseResult};
pub use parser::parse_line;
pub use rule::{RuleElement, PRODUCTION_RULES};
pub use statement::{AnnotatedStatement, StatementKind};
