use std::collections::HashMap;

use log::trace;

use crate::lexer::tokens::TokenKind;

/// Names known to the semantic pass, with the kind of value each was bound from.
///
/// `const` bindings record the kind of their right hand side, function
/// parameters record `Integer`. Entries are never removed during a run.
#[derive(Debug, Default)]
pub struct DeclarationTable {
    variable_lookup: HashMap<String, TokenKind>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        DeclarationTable {
            variable_lookup: HashMap::new(),
        }
    }

    /// Records a declaration, replacing any earlier one with the same name.
    pub fn declare_variable(&mut self, variable_name: String, kind: TokenKind) -> Option<TokenKind> {
        trace!("declared `{}` as {}", variable_name, kind);
        self.variable_lookup.insert(variable_name, kind)
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<TokenKind> {
        self.variable_lookup.get(variable_name).copied()
    }

    pub fn is_declared(&self, variable_name: &str) -> bool {
        self.variable_lookup.contains_key(variable_name)
    }

    pub fn len(&self) -> usize {
        self.variable_lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variable_lookup.is_empty()
    }
}
