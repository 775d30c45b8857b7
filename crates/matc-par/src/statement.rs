use matc_lex::Token;
use std::fmt;

/// The twelve statement shapes the production-rule table recognises.
///
/// Kept as its own enum rather than reusing [`matc_lex::TokenCategory`] for
/// statement classification — a token category describes what a *token* is,
/// not what an entire parsed *line* is, and conflating the two made the
/// original grammar table double as both a token-category set and a
/// statement-kind set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    ScalarDeclaration,
    VectorDeclaration,
    MatrixDeclaration,
    SingleForStatement,
    DoubleForStatement,
    EndFor,
    PrintStatement,
    PrintSepStatement,
    ExprAssignment,
    SingleSubscriptExprAssignment,
    DoubleSubscriptExprAssignment,
    ListAssignment,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A fully parsed source line: its (possibly postfix-rewritten) tokens, the
/// statement kind the production-rule table recognised it as, and the
/// 1-based source line it came from.
#[derive(Debug, Clone)]
pub struct AnnotatedStatement {
    pub tokens: Vec<Token>,
    pub kind: StatementKind,
    pub line: usize,
}
