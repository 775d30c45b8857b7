use std::collections::VecDeque;

use matc_lex::{Token, TokenCategory};
use matc_sym::{Dimensions, SymbolTable, Variable};

use crate::error::{ParseError, ParseResult};
use crate::expr::{parse_expression, parse_init_list, replace_infix_with_postfix};
use crate::rule::{RuleElement, PRODUCTION_RULES};
use crate::statement::{AnnotatedStatement, StatementKind};

/// Parses one already-tokenized source line into an [`AnnotatedStatement`],
/// rewriting its embedded expressions to postfix in place and registering
/// any declaration into `symbols`.
pub fn parse_line(
    tokens: Vec<Token>,
    line: usize,
    symbols: &mut SymbolTable,
) -> ParseResult<AnnotatedStatement> {
    let (mut tokens, end_index, mut kind) = derive(tokens)?;

    if end_index != tokens.len() {
        return Err(ParseError::TooFewTokens);
    }

    match kind {
        StatementKind::ScalarDeclaration => register_scalar(&tokens, symbols)?,
        StatementKind::VectorDeclaration => {
            kind = register_vector(&mut tokens, symbols)?;
        }
        StatementKind::MatrixDeclaration => {
            kind = register_matrix(&mut tokens, symbols)?;
        }
        _ => {}
    }

    log::debug!("line {line}: parsed as {kind}");
    Ok(AnnotatedStatement { tokens, kind, line })
}

/// Tries every production rule in table order. The first rule whose
/// sequence is matched end to end wins; ties go to declaration order. If no
/// rule matches, the error surfaced is the one from whichever rule consumed
/// the longest prefix before failing.
fn derive(tokens: Vec<Token>) -> ParseResult<(Vec<Token>, usize, StatementKind)> {
    let mut best_match_count = 0usize;
    let mut best_error: Option<ParseError> = None;

    for (kind, rule) in PRODUCTION_RULES.iter() {
        let mut attempt = tokens.clone();
        let mut queue: VecDeque<Token> = VecDeque::new();
        match match_rule(rule, &mut attempt, 0, &mut queue) {
            Ok(index) => return Ok((attempt, index, *kind)),
            Err((match_count, err)) => {
                if match_count > best_match_count {
                    best_match_count = match_count;
                    best_error = Some(ParseError::NoRuleMatched(format!("{kind}: {err}")));
                }
            }
        }
    }

    Err(best_error.unwrap_or(ParseError::OutOfTokens))
}

/// Attempts to match `rule` against `tokens` starting at `index`. On
/// success, returns the index just past the whole rule. On failure, returns
/// how many rule elements matched before the failure, for the
/// longest-prefix error heuristic.
fn match_rule(
    rule: &[RuleElement],
    tokens: &mut Vec<Token>,
    mut index: usize,
    queue: &mut VecDeque<Token>,
) -> Result<usize, (usize, ParseError)> {
    let mut matched = 0usize;
    for element in rule {
        match element {
            RuleElement::Terminal(category) => {
                let found = tokens
                    .get(index)
                    .map(|t| t.category)
                    .ok_or((matched, ParseError::OutOfTokens))?;
                if found != *category {
                    return Err((
                        matched,
                        ParseError::UnexpectedCategory {
                            expected: *category,
                            found,
                        },
                    ));
                }
                index += 1;
                matched += 1;
            }
            RuleElement::Expr => {
                tokens.insert(index, Token::new("EXPR_BEGIN", TokenCategory::ExpressionBegin));
                index += 1;
                let expr_begin = index;
                index = parse_expression(tokens, index, queue).map_err(|e| (matched, e))?;
                tokens.insert(index, Token::new("EXPR_END", TokenCategory::ExpressionEnd));
                let expr_end = index;
                index = replace_infix_with_postfix(tokens, expr_begin, expr_end, index, queue);
                index += 1;
                matched += 1;
            }
            RuleElement::InitList => {
                index = parse_init_list(tokens, index, queue).map_err(|e| (matched, e))?;
                matched += 1;
            }
        }
    }
    Ok(index)
}

fn register_scalar(tokens: &[Token], symbols: &mut SymbolTable) -> ParseResult<()> {
    let name = &tokens[1].lexeme;
    symbols.insert_user(Variable::scalar(name.clone()))?;
    Ok(())
}

fn register_vector(tokens: &mut [Token], symbols: &mut SymbolTable) -> ParseResult<StatementKind> {
    let name = tokens[1].lexeme.clone();
    let size: usize = tokens[3].lexeme.parse().expect("Integer token must parse");
    if size == 0 {
        return Err(ParseError::ZeroVectorSize);
    }
    if size == 1 {
        symbols.insert_user(Variable::scalar(name))?;
        Ok(StatementKind::ScalarDeclaration)
    } else {
        symbols.insert_user(Variable::matrix(name, Dimensions::new(size, 1)))?;
        Ok(StatementKind::VectorDeclaration)
    }
}

fn register_matrix(tokens: &mut [Token], symbols: &mut SymbolTable) -> ParseResult<StatementKind> {
    let name = tokens[1].lexeme.clone();
    let rows: usize = tokens[3].lexeme.parse().expect("Integer token must parse");
    let cols: usize = tokens[5].lexeme.parse().expect("Integer token must parse");
    if rows == 0 || cols == 0 {
        return Err(ParseError::ZeroMatrixSize);
    }
    if rows == 1 && cols == 1 {
        symbols.insert_user(Variable::scalar(name))?;
        Ok(StatementKind::ScalarDeclaration)
    } else {
        symbols.insert_user(Variable::matrix(name, Dimensions::new(rows, cols)))?;
        Ok(StatementKind::MatrixDeclaration)
    }
}
