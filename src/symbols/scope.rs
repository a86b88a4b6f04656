//! Lexical scope representation.
//!
//! A scope owns one bucket per symbol kind it can hold. Indices are handed
//! out per bucket, so the n-th `local` is `local n-1` no matter how many
//! arguments came before it.

use std::{collections::HashMap, fmt::Display};

/// Storage class of a named variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Static,
    Field,
    Argument,
    Local,
}

impl SymbolKind {
    /// The scope a symbol of this kind lives in.
    pub fn scope(&self) -> ScopeKind {
        match self {
            SymbolKind::Static | SymbolKind::Field => ScopeKind::Class,
            SymbolKind::Argument | SymbolKind::Local => ScopeKind::Subroutine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Static => "static",
            SymbolKind::Field => "field",
            SymbolKind::Argument => "argument",
            SymbolKind::Local => "local",
        }
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Class,
    Subroutine,
}

impl ScopeKind {
    /// Kinds held by this scope, in lookup order.
    pub fn kinds(&self) -> &'static [SymbolKind] {
        match self {
            ScopeKind::Class => &[SymbolKind::Static, SymbolKind::Field],
            ScopeKind::Subroutine => &[SymbolKind::Argument, SymbolKind::Local],
        }
    }
}

/// One resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: String,
    pub kind: SymbolKind,
    pub index: u16,
}

#[derive(Debug, Clone)]
pub struct Scope {
    kind: ScopeKind,
    buckets: HashMap<SymbolKind, HashMap<String, Symbol>>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        let buckets = kind
            .kinds()
            .iter()
            .map(|symbol_kind| (*symbol_kind, HashMap::new()))
            .collect();

        Self { kind, buckets }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Adds `name` to the bucket for `kind` and returns the index it got.
    ///
    /// `kind` must belong to this scope. Redefinition is not checked; the
    /// newer entry replaces the older one but keeps counting from the bucket
    /// size before insertion.
    pub fn insert(&mut self, name: &str, ty: &str, kind: SymbolKind) -> u16 {
        let bucket = self.buckets.entry(kind).or_default();
        let index = bucket.len() as u16;
        bucket.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty: ty.to_string(),
                kind,
                index,
            },
        );
        index
    }

    /// Lookup a name within this scope only, honouring bucket order.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.kind
            .kinds()
            .iter()
            .filter_map(|kind| self.buckets.get(kind))
            .find_map(|bucket| bucket.get(name))
    }

    pub fn count(&self, kind: SymbolKind) -> u16 {
        self.buckets.get(&kind).map_or(0, |bucket| bucket.len() as u16)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(HashMap::is_empty)
    }
}
