use matc_lex::TokenCategory;
use once_cell::sync::Lazy;

use crate::statement::StatementKind;

/// One element of a production rule: either an exact terminal match or a
/// trigger for one of the two sub-grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleElement {
    Terminal(TokenCategory),
    Expr,
    InitList,
}

/// The production-rule table, in the declaration order that breaks ties
/// between rules that would otherwise match the same prefix.
pub static PRODUCTION_RULES: Lazy<Vec<(StatementKind, Vec<RuleElement>)>> = Lazy::new(|| {
    use RuleElement::{Expr, InitList, Terminal};
    use StatementKind::*;
    use TokenCategory as Tc;

    vec![
        (
            ScalarDeclaration,
            vec![Terminal(Tc::ScalarType), Terminal(Tc::Identifier)],
        ),
        (
            VectorDeclaration,
            vec![
                Terminal(Tc::VectorType),
                Terminal(Tc::Identifier),
                Terminal(Tc::OpenSquareBrackets),
                Terminal(Tc::Integer),
                Terminal(Tc::CloseSquareBrackets),
            ],
        ),
        (
            MatrixDeclaration,
            vec![
                Terminal(Tc::MatrixType),
                Terminal(Tc::Identifier),
                Terminal(Tc::OpenSquareBrackets),
                Terminal(Tc::Integer),
                Terminal(Tc::Comma),
                Terminal(Tc::Integer),
                Terminal(Tc::CloseSquareBrackets),
            ],
        ),
        (
            SingleForStatement,
            vec![
                Terminal(Tc::ForKeyword),
                Terminal(Tc::OpenParenthesis),
                Terminal(Tc::Identifier),
                Terminal(Tc::InKeyword),
                Expr,
                Terminal(Tc::DoubleColon),
                Expr,
                Terminal(Tc::DoubleColon),
                Expr,
                Terminal(Tc::CloseParenthesis),
                Terminal(Tc::OpenCurlyBraces),
            ],
        ),
        (
            DoubleForStatement,
            vec![
                Terminal(Tc::ForKeyword),
                Terminal(Tc::OpenParenthesis),
                Terminal(Tc::Identifier),
                Terminal(Tc::Comma),
                Terminal(Tc::Identifier),
                Terminal(Tc::InKeyword),
                Expr,
                Terminal(Tc::DoubleColon),
                Expr,
                Terminal(Tc::DoubleColon),
                Expr,
                Terminal(Tc::Comma),
                Expr,
                Terminal(Tc::DoubleColon),
                Expr,
                Terminal(Tc::DoubleColon),
                Expr,
                Terminal(Tc::CloseParenthesis),
                Terminal(Tc::OpenCurlyBraces),
            ],
        ),
        (EndFor, vec![Terminal(Tc::CloseCurlyBraces)]),
        (
            PrintStatement,
            vec![
                Terminal(Tc::PrintFunction),
                Terminal(Tc::OpenParenthesis),
                Expr,
                Terminal(Tc::CloseParenthesis),
            ],
        ),
        (
            PrintSepStatement,
            vec![
                Terminal(Tc::PrintSepFunction),
                Terminal(Tc::OpenParenthesis),
                Terminal(Tc::CloseParenthesis),
            ],
        ),
        (
            ExprAssignment,
            vec![
                Terminal(Tc::Identifier),
                Terminal(Tc::AssignmentOperator),
                Expr,
            ],
        ),
        (
            SingleSubscriptExprAssignment,
            vec![
                Terminal(Tc::Identifier),
                Terminal(Tc::OpenSquareBrackets),
                Expr,
                Terminal(Tc::CloseSquareBrackets),
                Terminal(Tc::AssignmentOperator),
                Expr,
            ],
        ),
        (
            DoubleSubscriptExprAssignment,
            vec![
                Terminal(Tc::Identifier),
                Terminal(Tc::OpenSquareBrackets),
                Expr,
                Terminal(Tc::Comma),
                Expr,
                Terminal(Tc::CloseSquareBrackets),
                Terminal(Tc::AssignmentOperator),
                Expr,
            ],
        ),
        (
            ListAssignment,
            vec![
                Terminal(Tc::Identifier),
                Terminal(Tc::AssignmentOperator),
                InitList,
            ],
        ),
    ]
});
