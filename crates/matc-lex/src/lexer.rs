use crate::error::{LexError, LexResult};
use crate::regex_table::{classify, extends_accumulator};
use crate::token::Token;

/// Tokenizes MatLang source one line at a time.
///
/// The lexer carries no state between calls to [`Lexer::tokenize`] — each
/// source line is classified independently, which is what lets the driver
/// feed preprocessed lines through without a persistent cursor.
#[derive(Debug, Default)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes a single line. An empty or whitespace-only line yields an
    /// empty token vector rather than an error.
    pub fn tokenize(&self, line: &str) -> LexResult<Vec<Token>> {
        tokenize_line(line)
    }
}

/// Maximal-munch tokenization of one line.
///
/// Walks the line character by character (plus one virtual end-of-line
/// position) maintaining an accumulator. A character extends the
/// accumulator if it could be part of an identifier, an integer run, or a
/// `.`; anything else closes the accumulator (classifying it as a whole
/// lexeme) and is itself classified as a standalone lexeme, unless it is
/// whitespace, in which case it is simply discarded.
pub fn tokenize_line(line: &str) -> LexResult<Vec<Token>> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    let mut accumulator = String::new();

    for maybe_char in line.chars().map(Some).chain(std::iter::once(None)) {
        if let Some(c) = maybe_char {
            if extends_accumulator(c) {
                accumulator.push(c);
                continue;
            }
        }

        if !accumulator.is_empty() {
            let category = classify(&accumulator)
                .ok_or_else(|| LexError::NoMeaning(accumulator.clone()))?;
            tokens.push(Token::new(std::mem::take(&mut accumulator), category));
        }

        match maybe_char {
            Some(c) if c.is_whitespace() => {}
            Some(c) => {
                let category = classify(&c.to_string())
                    .ok_or_else(|| LexError::NoMeaning(c.to_string()))?;
                tokens.push(Token::new(c.to_string(), category));
            }
            None => {}
        }
    }

    log::debug!("lexed {} tokens from line {:?}", tokens.len(), line);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenCategory::*;

    fn cats(tokens: &[Token]) -> Vec<crate::token::TokenCategory> {
        tokens.iter().map(|t| t.category).collect()
    }

    #[test]
    fn blank_line_yields_no_tokens() {
        assert!(tokenize_line("").unwrap().is_empty());
        assert!(tokenize_line("   \t  ").unwrap().is_empty());
    }

    #[test]
    fn keyword_wins_over_identifier() {
        let tokens = tokenize_line("scalar").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, ScalarType);
    }

    #[test]
    fn every_reserved_word_beats_identifier() {
        for (word, expected) in [
            ("scalar", ScalarType),
            ("vector", VectorType),
            ("matrix", MatrixType),
            ("for", ForKeyword),
            ("in", InKeyword),
            ("print", PrintFunction),
            ("printsep", PrintSepFunction),
            ("tr", TrFunction),
            ("sqrt", SqrtFunction),
            ("choose", ChooseFunction),
        ] {
            let tokens = tokenize_line(word).unwrap();
            assert_eq!(tokens.len(), 1, "word = {word}");
            assert_eq!(tokens[0].category, expected, "word = {word}");
        }
    }

    #[test]
    fn identifier_with_digits_and_underscore() {
        let tokens = tokenize_line("a_1b2").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, Identifier);
        assert_eq!(tokens[0].lexeme, "a_1b2");
    }

    #[test]
    fn declaration_line_tokenizes_in_order() {
        let tokens = tokenize_line("matrix A[2, 2]").unwrap();
        assert_eq!(
            cats(&tokens),
            vec![
                MatrixType,
                Identifier,
                OpenSquareBrackets,
                Integer,
                Comma,
                Integer,
                CloseSquareBrackets,
            ]
        );
    }

    #[test]
    fn real_literal_requires_fractional_digits() {
        let tokens = tokenize_line("3.14").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, Real);
        assert_eq!(tokens[0].lexeme, "3.14");
    }

    #[test]
    fn minus_sign_never_joins_a_numeric_accumulator() {
        // the lexer never produces a signed literal; '-' always splits off
        // as its own SubtractionOperator token, which is what lets the
        // parser's "0 x - +" rewrite treat every textual '-' uniformly.
        let tokens = tokenize_line("-3").unwrap();
        assert_eq!(cats(&tokens), vec![SubtractionOperator, Integer]);
    }

    #[test]
    fn unrecognized_character_is_a_lex_error() {
        let err = tokenize_line("x = 1 @ 2").unwrap_err();
        assert_eq!(err, LexError::NoMeaning("@".to_string()));
    }

    #[test]
    fn expression_line_tokenizes() {
        let tokens = tokenize_line("x = 3 + 4 * 2").unwrap();
        assert_eq!(
            cats(&tokens),
            vec![
                Identifier,
                AssignmentOperator,
                Integer,
                AdditionOperator,
                Integer,
                MultiplicationOperator,
                Integer,
            ]
        );
    }

    // ------------------------------------------------------------------------
    // Property-based tests - arbitrary inputs via proptest
    // ------------------------------------------------------------------------

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const KEYWORDS: &[&str] = &[
            "scalar", "vector", "matrix", "for", "in", "print", "printsep", "tr", "sqrt", "choose",
        ];

        proptest! {
            /// Any identifier-shaped string that isn't one of the reserved
            /// words tokenizes as exactly one `Identifier`, never anything
            /// else.
            #[test]
            fn arbitrary_identifier_wins_unless_reserved(input in "[a-zA-Z_][a-zA-Z0-9_]{0,15}") {
                let tokens = tokenize_line(&input).unwrap();
                prop_assert_eq!(tokens.len(), 1);
                if KEYWORDS.contains(&input.as_str()) {
                    prop_assert_ne!(tokens[0].category, Identifier);
                } else {
                    prop_assert_eq!(tokens[0].category, Identifier);
                }
                prop_assert_eq!(&tokens[0].lexeme, &input);
            }

            /// Any run of digits with no leading zero (or the single digit
            /// "0") tokenizes as exactly one `Integer` carrying the original
            /// digits back unchanged.
            #[test]
            fn arbitrary_integer_literal_round_trips(input in "0|[1-9][0-9]{0,8}") {
                let tokens = tokenize_line(&input).unwrap();
                prop_assert_eq!(tokens.len(), 1);
                prop_assert_eq!(tokens[0].category, Integer);
                prop_assert_eq!(&tokens[0].lexeme, &input);
            }

            /// A well-formed real literal (integer part, `.`, fractional
            /// part) tokenizes as exactly one `Real`.
            #[test]
            fn arbitrary_real_literal_round_trips(
                int_part in "0|[1-9][0-9]{0,6}",
                frac_part in "[0-9]{1,6}",
            ) {
                let input = format!("{int_part}.{frac_part}");
                let tokens = tokenize_line(&input).unwrap();
                prop_assert_eq!(tokens.len(), 1);
                prop_assert_eq!(tokens[0].category, Real);
                prop_assert_eq!(&tokens[0].lexeme, &input);
            }

            /// Any string made up solely of horizontal whitespace
            /// tokenizes to nothing.
            #[test]
            fn arbitrary_whitespace_only_line_yields_no_tokens(input in "[ \t]{0,20}") {
                prop_assert!(tokenize_line(&input).unwrap().is_empty());
            }
        }
    }
}
