//! Parser module for building the annotated parse tree.
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of Jack tokens into a parse tree. It handles:
//!
//! - Class structure (fields, statics, subroutines, parameters, locals)
//! - Statement parsing dispatched on the leading keyword
//! - Flat left-to-right expressions and the identifier lookahead in terms
//! - Symbol definition and resolution for every variable identifier
//! - Driving a code emitter in evaluation order
//!
//! Each grammar production is one function taking the shared `Parser`.

pub mod class;
pub mod expr;
pub mod parser;
pub mod stmt;
