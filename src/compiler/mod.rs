//! Code generation module for the compiler.
//!
//! This module contains the code-emission interface the parser drives and
//! the per-unit pipeline built on top of it. It handles:
//!
//! - The `Emitter` trait with VM segments and arithmetic commands
//! - A null emitter for tree-only analysis
//! - The text VM writer
//! - Running lexer, parser and emitter over one compilation unit

pub mod compiler;
pub mod emitter;
pub mod vm_writer;
