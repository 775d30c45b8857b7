use std::collections::BTreeMap;

use crate::error::{SymbolError, SymbolResult};
use crate::variable::Variable;

/// A flat, global, single-scope name→[`Variable`] environment.
///
/// MatLang has no block scoping: every declaration, whether written by the
/// user or synthesised by the code generator, lives in this one table for
/// the duration of compilation. Provenance is tracked by which constructor
/// callers use rather than by the table itself, so a stray generator bug
/// can't silently shadow a user declaration: [`SymbolTable::insert_user`]
/// and [`SymbolTable::insert_temp`] both funnel into the same private
/// `insert`, but only `matc-par` calls the former and only `matc-gen` calls
/// the latter.
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: BTreeMap<String, Variable>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user-written declaration (`scalar`/`vector`/`matrix`).
    pub fn insert_user(&mut self, variable: Variable) -> SymbolResult<()> {
        self.insert(variable)
    }

    /// Registers a generator-synthesised temporary (`_E4_<n>`).
    pub fn insert_temp(&mut self, variable: Variable) -> SymbolResult<()> {
        self.insert(variable)
    }

    fn insert(&mut self, variable: Variable) -> SymbolResult<()> {
        if self.variables.contains_key(&variable.name) {
            return Err(SymbolError::AlreadyDeclared(variable.name));
        }
        log::debug!("symbol table: insert {} : {}", variable.name, variable);
        self.variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> SymbolResult<Variable> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| SymbolError::NotDeclared(name.to_string()))
    }

    /// Debug dump, mirroring the original's `SymbolTable::print` helper.
    pub fn print(&self) -> String {
        let mut out = String::from("\t\t\tSYMBOL TABLE\n");
        out.push_str(&"=".repeat(40));
        out.push('\n');
        for (name, var) in &self.variables {
            out.push_str(&format!("{name}: {var}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::{Dimensions, VariableKind};

    #[test]
    fn insert_then_lookup_round_trips() {
        let mut table = SymbolTable::new();
        table.insert_user(Variable::scalar("x")).unwrap();
        let found = table.lookup("x").unwrap();
        assert_eq!(found.kind, VariableKind::Scalar);
    }

    #[test]
    fn duplicate_insert_is_an_error() {
        let mut table = SymbolTable::new();
        table.insert_user(Variable::scalar("x")).unwrap();
        let err = table.insert_user(Variable::scalar("x")).unwrap_err();
        assert_eq!(err, SymbolError::AlreadyDeclared("x".to_string()));
    }

    #[test]
    fn missing_lookup_is_an_error() {
        let table = SymbolTable::new();
        let err = table.lookup("ghost").unwrap_err();
        assert_eq!(err, SymbolError::NotDeclared("ghost".to_string()));
    }

    #[test]
    fn temp_and_user_inserts_share_the_same_namespace() {
        let mut table = SymbolTable::new();
        table.insert_user(Variable::scalar("_E4_0")).unwrap();
        let err = table
            .insert_temp(Variable::scalar("_E4_0"))
            .unwrap_err();
        assert_eq!(err, SymbolError::AlreadyDeclared("_E4_0".to_string()));
    }

    #[test]
    fn matrix_lookup_preserves_dimensions() {
        let mut table = SymbolTable::new();
        let dim = Dimensions::new(2, 3);
        table.insert_user(Variable::matrix("A", dim)).unwrap();
        let found = table.lookup("A").unwrap();
        assert_eq!(found.dim, dim);
        assert!(found.is_matrix());
    }
}
