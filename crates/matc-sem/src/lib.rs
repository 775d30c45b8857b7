//! matc-sem - whole-program semantic pass.
//!
//! Runs once, after every line has been parsed and every declaration has
//! landed in the symbol table. Its only job is to surface undeclared
//! identifiers before code generation starts, so the generator never has to
//! handle a missing lookup itself.

use matc_lex::TokenCategory;
use matc_par::AnnotatedStatement;
use matc_sym::SymbolTable;
use matc_util::LineError;

pub fn analyze(statements: &[AnnotatedStatement], symbols: &SymbolTable) -> Result<(), LineError> {
    for statement in statements {
        for token in &statement.tokens {
            if token.category != TokenCategory::Identifier {
                continue;
            }
            if let Err(err) = symbols.lookup(&token.lexeme) {
                log::debug!("line {}: {} failed lookup", statement.line, token.lexeme);
                return Err(LineError::new(statement.line, err.to_string()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matc_lex::tokenize_line;
    use matc_par::parse_line;

    fn parse_program(lines: &[&str], symbols: &mut SymbolTable) -> Vec<AnnotatedStatement> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let tokens = tokenize_line(line).unwrap();
                parse_line(tokens, i + 1, symbols).unwrap()
            })
            .collect()
    }

    #[test]
    fn declared_identifiers_pass() {
        let mut symbols = SymbolTable::new();
        let statements = parse_program(&["scalar x", "x = 1"], &mut symbols);
        assert!(analyze(&statements, &symbols).is_ok());
    }

    #[test]
    fn undeclared_identifier_fails_with_its_line() {
        // The parser only checks grammar shape, not whether an identifier
        // used in an expression was ever declared - that's this pass's job.
        let mut symbols = SymbolTable::new();
        symbols.insert_user(matc_sym::Variable::scalar("x")).unwrap();
        let tokens = tokenize_line("x = y").unwrap();
        let statement = parse_line(tokens, 7, &mut symbols).unwrap();
        let err = analyze(&[statement], &symbols).unwrap_err();
        assert_eq!(err.line, 7);
    }
}
