#![allow(clippy::module_inception)]

use std::sync::Arc;

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;

extern crate regex;

pub use compiler::compiler::{analyze, compile, AnalyzedUnit, CompiledUnit};
pub use errors::errors::{format_error, Error, ErrorImpl, ErrorKind, LexicalError};

/// Byte offset into a compilation unit, tagged with the unit's file name.
///
/// The file name is shared through an `Arc` so that errors produced by one
/// unit can be handed to another thread when a batch is compiled in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the 1-based line number, the full text of that line and the
/// column of `position` within it.
///
/// Positions past the end of `content` resolve to the last line.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = String::new();

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        last_line = line.to_string();
        start = end;
        line_number += 1;
    }

    let line_number = (line_number - 1).max(1);
    let line_pos = last_line.trim_end_matches('\n').len();
    (line_number, last_line, line_pos)
}
