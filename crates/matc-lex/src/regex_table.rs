use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::TokenCategory;

/// Priority-ordered category → regex table. First match wins, which is why
/// keywords are checked before `Identifier` and `Identifier` before the
/// numeric categories — declaration order here *is* the lexer's priority.
///
/// Built once on first use and never mutated afterwards, matching the
/// "constructed once at start-up, read many times" resource contract.
pub static CATEGORY_TABLE: Lazy<Vec<(TokenCategory, Regex)>> = Lazy::new(|| {
    use TokenCategory::*;
    vec![
        (ScalarType, Regex::new(r"^scalar$").unwrap()),
        (VectorType, Regex::new(r"^vector$").unwrap()),
        (MatrixType, Regex::new(r"^matrix$").unwrap()),
        (ForKeyword, Regex::new(r"^for$").unwrap()),
        (InKeyword, Regex::new(r"^in$").unwrap()),
        (PrintFunction, Regex::new(r"^print$").unwrap()),
        (PrintSepFunction, Regex::new(r"^printsep$").unwrap()),
        (TrFunction, Regex::new(r"^tr$").unwrap()),
        (SqrtFunction, Regex::new(r"^sqrt$").unwrap()),
        (ChooseFunction, Regex::new(r"^choose$").unwrap()),
        (Identifier, Regex::new(r"^[_[:alpha:]][_[:alnum:]]*$").unwrap()),
        (OpenSquareBrackets, Regex::new(r"^\[$").unwrap()),
        (CloseSquareBrackets, Regex::new(r"^\]$").unwrap()),
        (Integer, Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").unwrap()),
        // Corrected per the design notes: the source grammar's intent is a
        // mandatory integer part and fractional part either side of `.`.
        (Real, Regex::new(r"^[-+]?(0|[1-9][0-9]*)\.([0-9]+)$").unwrap()),
        (AssignmentOperator, Regex::new(r"^=$").unwrap()),
        (OpenCurlyBraces, Regex::new(r"^\{$").unwrap()),
        (CloseCurlyBraces, Regex::new(r"^\}$").unwrap()),
        (OpenParenthesis, Regex::new(r"^\($").unwrap()),
        (CloseParenthesis, Regex::new(r"^\)$").unwrap()),
        (AdditionOperator, Regex::new(r"^\+$").unwrap()),
        (SubtractionOperator, Regex::new(r"^-$").unwrap()),
        (MultiplicationOperator, Regex::new(r"^\*$").unwrap()),
        (Comma, Regex::new(r"^,$").unwrap()),
        (DoubleColon, Regex::new(r"^:$").unwrap()),
        (Dot, Regex::new(r"^\.$").unwrap()),
    ]
});

/// Classifies a closed lexeme against the priority table. Returns the first
/// matching category, or `None` if the lexeme fits no category at all.
pub fn classify(lexeme: &str) -> Option<TokenCategory> {
    CATEGORY_TABLE
        .iter()
        .find(|(_, re)| re.is_match(lexeme))
        .map(|(category, _)| *category)
}

/// Whether a single character, on its own, could extend a compound lexeme
/// under accumulation (identifier characters, digits, or `.`).
pub fn extends_accumulator(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
