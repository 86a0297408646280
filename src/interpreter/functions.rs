use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Block;

/// A stored function body, shared (not first-class) via `FunctionTable`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub params: Vec<String>,
    pub body: Block,
}

/// Process-wide mapping from function name to definition. Redefinition replaces the prior
/// binding outright, so only the most recent definition of a given name is ever callable.
#[derive(Default)]
pub struct FunctionTable(HashMap<String, Rc<FunctionDef>>);

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: String, params: Vec<String>, body: Block) {
        self.0.insert(name, Rc::new(FunctionDef { params, body }));
    }

    pub fn get(&self, name: &str) -> Option<Rc<FunctionDef>> {
        self.0.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redefining_a_function_replaces_the_prior_binding() {
        let mut table = FunctionTable::new();
        table.define("f".into(), vec!["x".into()], vec![]);
        table.define("f".into(), vec!["x".into(), "y".into()], vec![]);
        assert_eq!(table.get("f").unwrap().params, vec!["x", "y"]);
    }
}
