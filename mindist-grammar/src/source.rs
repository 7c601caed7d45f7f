//! Source of interned symbols.

use std::collections::HashMap;
use std::sync::Arc;

use crate::symbol::{Role, Symbol, SymbolKind, Terminal};

/// Name of a symbol, shared between the source and the parse trees built from it.
pub type SymbolName = Arc<str>;

/// A source of numeric symbols. Every symbol is recorded together with its name and kind,
/// and names are interned: asking twice for the same name yields the same symbol.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: Vec<SymbolName>,
    kinds: Vec<SymbolKind>,
    by_name: HashMap<SymbolName, Symbol>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol with the given name, generating it if it doesn't exist yet.
    ///
    /// # Panics
    ///
    /// Panics if the name is already taken by a symbol of a different kind.
    pub fn intern(&mut self, name: &str, kind: SymbolKind) -> Symbol {
        if let Some(&sym) = self.by_name.get(name) {
            assert_eq!(
                self.kinds[sym.usize()],
                kind,
                "symbol {} interned with two different kinds",
                name
            );
            return sym;
        }
        let sym = Symbol::from(self.names.len());
        let name: SymbolName = name.into();
        self.names.push(name.clone());
        self.kinds.push(kind);
        self.by_name.insert(name, sym);
        sym
    }

    /// Returns the terminal symbol for a single character.
    pub fn terminal(&mut self, c: char) -> Symbol {
        self.intern(&c.to_string(), SymbolKind::Terminal(Terminal::Char(c)))
    }

    /// Looks a symbol up by name.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of the given symbol.
    pub fn name_of(&self, sym: Symbol) -> &SymbolName {
        &self.names[sym.usize()]
    }

    /// Returns the kind of the given symbol.
    pub fn kind_of(&self, sym: Symbol) -> SymbolKind {
        self.kinds[sym.usize()]
    }

    /// Returns the role of the given symbol, or `None` for terminals.
    pub fn role_of(&self, sym: Symbol) -> Option<Role> {
        self.kinds[sym.usize()].role()
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut source = SymbolSource::new();
        let e = source.intern("<E>", SymbolKind::Nonterminal(Role::Plain));
        let one = source.terminal('1');
        assert_eq!(source.intern("<E>", SymbolKind::Nonterminal(Role::Plain)), e);
        assert_eq!(source.terminal('1'), one);
        assert_eq!(source.num_syms(), 2);
        assert_eq!(&**source.name_of(one), "1");
        assert_eq!(source.get("<E>"), Some(e));
        assert_eq!(source.get("<F>"), None);
    }

    #[test]
    #[should_panic]
    fn test_intern_rejects_kind_mismatch() {
        let mut source = SymbolSource::new();
        source.intern("<$>", SymbolKind::Nonterminal(Role::Empty));
        source.intern("<$>", SymbolKind::Nonterminal(Role::Plain));
    }
}
