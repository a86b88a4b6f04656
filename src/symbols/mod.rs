//! Symbol table for one class.
//!
//! Two scope levels exist at a time: the class scope (statics and fields)
//! and the subroutine scope (arguments and locals). The parser defines
//! names as it meets declarations and queries the table to annotate every
//! variable use.

pub mod scope;
pub mod symbol_table;

pub use scope::{Scope, ScopeKind, Symbol, SymbolKind};
pub use symbol_table::SymbolTable;

#[cfg(test)]
mod tests;
