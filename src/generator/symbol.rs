use super::value::Value;

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub register: Value,
}

#[derive(Debug, Clone)]
pub struct FunctionSymbol {
    pub symbol: Symbol,
    pub parameter_count: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, register: Value, parameter_count: usize) -> FunctionSymbol {
        FunctionSymbol {
            symbol: Symbol { name: name.into(), register },
            parameter_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.symbol.name
    }

    pub fn register(&self) -> &Value {
        &self.symbol.register
    }
}

/// A name-to-entry table with insertion-chaining semantics: inserting a
/// name that already exists does not remove the prior entry, it shadows it
/// for lookup. `find` returns the most-recently-inserted match; `clear`
/// drops everything. Implemented as a flat append-only vector rather than
/// a `HashMap` specifically so re-insertion under the same name keeps the
/// earlier entry reachable once the later one is gone — observable via
/// `insert`/`find` even though nothing in this generator currently removes
/// an entry (see spec.md §8 property 6).
pub struct SymbolTable<T> {
    entries: Vec<(String, T)>,
}

impl<T> SymbolTable<T> {
    pub fn new() -> Self {
        SymbolTable { entries: Vec::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: T) {
        self.entries.push((name.into(), entry));
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        self.entries.iter().rev().find(|(n, _)| n == name).map(|(_, entry)| entry)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_most_recent_insertion() {
        let mut table = SymbolTable::new();
        table.insert("x", 1);
        table.insert("x", 2);
        assert_eq!(table.find("x"), Some(&2));
    }

    #[test]
    fn shadowed_entry_is_not_deleted() {
        let mut table = SymbolTable::new();
        table.insert("x", 1);
        table.insert("x", 2);
        table.insert("y", 3);
        // Still two "x" entries underneath; nothing here removes the
        // first one, only `find` stops seeing it once a later one shadows
        // it. This is the contract spec.md §8 property 6 asks for.
        assert_eq!(table.entries.iter().filter(|(n, _)| n == "x").count(), 2);
        assert_eq!(table.find("y"), Some(&3));
    }

    #[test]
    fn clear_removes_everything() {
        let mut table = SymbolTable::new();
        table.insert("x", 1);
        table.clear();
        assert_eq!(table.find("x"), None);
    }
}
