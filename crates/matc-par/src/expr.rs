use std::collections::VecDeque;

use matc_lex::{Token, TokenCategory};

use crate::error::{ParseError, ParseResult};

fn category_at(tokens: &[Token], index: usize) -> ParseResult<TokenCategory> {
    tokens
        .get(index)
        .map(|t| t.category)
        .ok_or(ParseError::OutOfTokens)
}

fn token_at(tokens: &[Token], index: usize) -> ParseResult<Token> {
    tokens.get(index).cloned().ok_or(ParseError::OutOfTokens)
}

/// `Expression → Term (('+' | '-') Term)*`, emitting postfix tokens into
/// `queue` as it goes. Returns the index just past the parsed expression.
pub fn parse_expression(
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    let mut index = parse_term(tokens, index, queue)?;

    if index >= tokens.len() {
        return Ok(index);
    }

    match tokens[index].category {
        TokenCategory::AdditionOperator => {
            index = parse_expression(tokens, index + 1, queue)?;
            queue.push_back(Token::new("+", TokenCategory::AdditionOperator));
        }
        TokenCategory::SubtractionOperator => {
            // Every textual '-' becomes "0 <term> - +": chained subtractions
            // unfold into repeated groups so the generator only ever has to
            // reduce a uniform binary '+'/'-' on two popped operands.
            loop {
                queue.push_back(Token::new("0", TokenCategory::Integer));
                index = parse_term(tokens, index + 1, queue)?;
                queue.push_back(Token::new("-", TokenCategory::SubtractionOperator));
                queue.push_back(Token::new("+", TokenCategory::AdditionOperator));
                if index < tokens.len() && tokens[index].category == TokenCategory::SubtractionOperator {
                    continue;
                }
                break;
            }
            if index < tokens.len() && tokens[index].category == TokenCategory::AdditionOperator {
                index = parse_expression(tokens, index + 1, queue)?;
                queue.push_back(Token::new("+", TokenCategory::AdditionOperator));
            }
        }
        _ => {}
    }
    Ok(index)
}

/// `Term → Factor ('*' Factor)*`
pub fn parse_term(
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    let mut index = parse_factor(tokens, index, queue)?;
    if index < tokens.len() && tokens[index].category == TokenCategory::MultiplicationOperator {
        index = parse_term(tokens, index + 1, queue)?;
        queue.push_back(Token::new("*", TokenCategory::MultiplicationOperator));
    }
    Ok(index)
}

/// `Factor → Integer | Real | Identifier Subscript? | '(' Expression ')'
///         | tr(...) | sqrt(...) | choose(...)`
pub fn parse_factor(
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    let tok = token_at(tokens, index)?;
    match tok.category {
        TokenCategory::Integer | TokenCategory::Real => {
            queue.push_back(tok);
            Ok(index + 1)
        }
        TokenCategory::Identifier => {
            queue.push_back(tok);
            let mut index = index + 1;
            if index < tokens.len() && tokens[index].category == TokenCategory::OpenSquareBrackets {
                index = parse_subscript(tokens, index, queue)?;
            }
            Ok(index)
        }
        TokenCategory::OpenParenthesis => {
            let index = parse_expression(tokens, index + 1, queue)?;
            if category_at(tokens, index)? != TokenCategory::CloseParenthesis {
                return Err(ParseError::ExpectedClosingParenthesis);
            }
            Ok(index + 1)
        }
        TokenCategory::TrFunction => parse_call("tr", tokens, index, queue),
        TokenCategory::SqrtFunction => parse_call("sqrt", tokens, index, queue),
        TokenCategory::ChooseFunction => parse_choose_func(tokens, index, queue),
        _ => Err(ParseError::UnexpectedFactor(tok.lexeme)),
    }
}

/// `'[' Expression ']' | '[' Expression ',' Expression ']'`
///
/// Rewrites the opening bracket's lexeme to `[(int)` and emits the `- 1`
/// index adjustment, lowering 1-based source indices to 0-based C indices.
/// A single subscript additionally emits the fixed `[(int) 0]` second index
/// so `A[i]` and `A[i, 0]` reduce through the same double-subscript closing
/// logic in the generator.
pub fn parse_subscript(
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    tokens[index].lexeme.push_str("(int)");
    queue.push_back(tokens[index].clone());

    let index = parse_expression(tokens, index + 1, queue)?;
    match category_at(tokens, index)? {
        TokenCategory::CloseSquareBrackets => {
            queue.push_back(Token::new("1", TokenCategory::Integer));
            queue.push_back(Token::new("-", TokenCategory::SubtractionOperator));
            queue.push_back(tokens[index].clone());
            queue.push_back(Token::new("[(int)", TokenCategory::OpenSquareBrackets));
            queue.push_back(Token::new("0", TokenCategory::Integer));
            queue.push_back(Token::new("]", TokenCategory::CloseSquareBrackets));
            Ok(index + 1)
        }
        TokenCategory::Comma => {
            queue.push_back(Token::new("1", TokenCategory::Integer));
            queue.push_back(Token::new("-", TokenCategory::SubtractionOperator));
            queue.push_back(Token::new("]", TokenCategory::CloseSquareBrackets));
            queue.push_back(Token::new("[(int)", TokenCategory::OpenSquareBrackets));
            let index = parse_expression(tokens, index + 1, queue)?;
            queue.push_back(Token::new("1", TokenCategory::Integer));
            queue.push_back(Token::new("-", TokenCategory::SubtractionOperator));
            let closing = token_at(tokens, index)?;
            queue.push_back(closing.clone());
            if closing.category == TokenCategory::CloseSquareBrackets {
                Ok(index + 1)
            } else {
                Err(ParseError::UnexpectedSubscriptToken(closing.lexeme))
            }
        }
        _ => Err(ParseError::UnexpectedSubscriptToken(token_at(tokens, index)?.lexeme)),
    }
}

/// Shared shape for `tr(<expr>)` and `sqrt(<expr>)`.
fn parse_call(
    name: &'static str,
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    if category_at(tokens, index + 1)? != TokenCategory::OpenParenthesis {
        return Err(ParseError::ExpectedOpenParenthesis(name));
    }
    queue.push_back(token_at(tokens, index)?);
    queue.push_back(token_at(tokens, index + 1)?);
    let index = parse_expression(tokens, index + 2, queue)?;
    if category_at(tokens, index)? != TokenCategory::CloseParenthesis {
        return Err(ParseError::ExpectedFunctionClosingParenthesis(name));
    }
    queue.push_back(token_at(tokens, index)?);
    Ok(index + 1)
}

/// `choose '(' Expression ',' Expression ',' Expression ',' Expression ')'`
pub fn parse_choose_func(
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    if category_at(tokens, index + 1)? != TokenCategory::OpenParenthesis {
        return Err(ParseError::ExpectedOpenParenthesis("choose"));
    }
    queue.push_back(token_at(tokens, index)?);
    queue.push_back(token_at(tokens, index + 1)?);

    let mut index = index + 1;
    for _ in 0..3 {
        index = parse_expression(tokens, index + 1, queue)?;
        if category_at(tokens, index)? != TokenCategory::Comma {
            return Err(ParseError::ChooseExpectedComma);
        }
        queue.push_back(token_at(tokens, index)?);
    }
    index = parse_expression(tokens, index + 1, queue)?;
    if category_at(tokens, index)? != TokenCategory::CloseParenthesis {
        return Err(ParseError::ExpectedFunctionClosingParenthesis("choose"));
    }
    queue.push_back(token_at(tokens, index)?);
    Ok(index + 1)
}

/// `'{' Expression (',' Expression)* '}'`, wrapping each element in its own
/// `ExpressionBegin`/`ExpressionEnd` segment via [`replace_infix_with_postfix`].
///
/// The original parser never advances past the separating comma between
/// list elements, which makes any list literal with more than one element
/// an unconditional parse error on the comma it stops at. Comma-separated
/// list literals with any number of elements are valid MatLang, so this
/// port consumes the comma between elements explicitly.
pub fn parse_init_list(
    tokens: &mut Vec<Token>,
    index: usize,
    queue: &mut VecDeque<Token>,
) -> ParseResult<usize> {
    if category_at(tokens, index)? != TokenCategory::OpenCurlyBraces {
        return Err(ParseError::ExpectedOpenCurlyBraces);
    }
    let mut index = index + 1;
    loop {
        tokens.insert(index, Token::new("EXPR_BEGIN", TokenCategory::ExpressionBegin));
        index += 1;
        let expr_begin = index;
        index = parse_expression(tokens, index, queue)?;
        tokens.insert(index, Token::new("EXPR_END", TokenCategory::ExpressionEnd));
        let expr_end = index;
        index = replace_infix_with_postfix(tokens, expr_begin, expr_end, index, queue);
        index += 1;

        match category_at(tokens, index)? {
            TokenCategory::Comma => index += 1,
            TokenCategory::CloseCurlyBraces => break,
            _ => return Err(ParseError::UnexpectedFactor(tokens[index].lexeme.clone())),
        }
    }
    Ok(index + 1)
}

/// Splices the postfix tokens accumulated in `queue` into `tokens`, replacing
/// the original infix span `[begin, end)`, and adjusts `current_index` for
/// the size difference between the two spans.
pub fn replace_infix_with_postfix(
    tokens: &mut Vec<Token>,
    begin: usize,
    end: usize,
    mut current_index: usize,
    queue: &mut VecDeque<Token>,
) -> usize {
    let orig_len = end - begin;
    let postfix: Vec<Token> = queue.drain(..).collect();
    let postfix_len = postfix.len();

    tokens.splice(end..end, postfix);
    tokens.drain(begin..begin + orig_len);

    if postfix_len < orig_len {
        current_index -= orig_len - postfix_len;
    } else if postfix_len > orig_len {
        current_index += postfix_len - orig_len;
    }
    current_index
}
