use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::scope::{Scope, ScopeKind, Symbol, SymbolKind};

/// Name resolution for one class.
///
/// The table is a stack of scopes. The bottom entry is always the class
/// scope; a subroutine scope sits on top of it while a subroutine is being
/// compiled. Lookups walk from the top of the stack down, so subroutine
/// names shadow class names.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Class), Scope::new(ScopeKind::Subroutine)],
        }
    }

    /// Drops every argument and local and opens a fresh subroutine scope.
    pub fn start_subroutine(&mut self) {
        self.scopes
            .retain(|scope| scope.kind() != ScopeKind::Subroutine);
        self.scopes.push(Scope::new(ScopeKind::Subroutine));
    }

    /// Registers `name` with the next free index of its kind.
    pub fn define(&mut self, name: &str, ty: &str, kind: SymbolKind) -> u16 {
        let scope_kind = kind.scope();
        let slot = match self
            .scopes
            .iter()
            .rposition(|scope| scope.kind() == scope_kind)
        {
            Some(slot) => slot,
            None => {
                self.scopes.push(Scope::new(scope_kind));
                self.scopes.len() - 1
            }
        };

        let index = self.scopes[slot].insert(name, ty, kind);

        trace!(name, ty, %kind, index, "defined symbol");
        index
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// `None` when the name is not defined in any visible scope.
    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        self.lookup(name).map(|symbol| symbol.kind)
    }

    pub fn type_of(&self, name: &str) -> Result<&str, ErrorImpl> {
        self.lookup(name)
            .map(|symbol| symbol.ty.as_str())
            .ok_or_else(|| ErrorImpl::UndefinedSymbol {
                name: name.to_string(),
            })
    }

    pub fn index_of(&self, name: &str) -> Result<u16, ErrorImpl> {
        self.lookup(name)
            .map(|symbol| symbol.index)
            .ok_or_else(|| ErrorImpl::UndefinedSymbol {
                name: name.to_string(),
            })
    }

    /// Resolves `name` or fails with `UndefinedSymbol` at `position`.
    pub fn resolve(&self, name: &str, position: &Position) -> Result<&Symbol, Error> {
        self.lookup(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedSymbol {
                    name: name.to_string(),
                },
                position.clone(),
            )
        })
    }

    /// Number of symbols of `kind` in the innermost scope that holds it.
    pub fn var_count(&self, kind: SymbolKind) -> u16 {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.kind() == kind.scope())
            .map_or(0, |scope| scope.count(kind))
    }

    /// True when no symbol of any kind has been defined.
    pub fn is_empty(&self) -> bool {
        self.scopes.iter().all(Scope::is_empty)
    }
}
