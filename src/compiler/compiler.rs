//! Per-unit compilation pipeline.
//!
//! A compilation unit is the text of one `.jack` file holding exactly one
//! class. Every unit gets its own token stream, symbol table and emitter, so
//! units share no state and may be compiled in any order or in parallel.

use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::Node,
    errors::errors::Error,
    lexer::{lexer::tokenize, stream::TokenStream, tokens::Token},
    parser::parser::parse,
};

use super::{
    emitter::{Emitter, NullEmitter},
    vm_writer::VmWriter,
};

/// Front-end output for one unit: the tokens and the annotated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedUnit {
    /// Name of the class declared by the unit
    pub class_name: String,
    /// Every token of the unit in source order
    pub tokens: Vec<Token>,
    /// The `class` node
    pub tree: Node,
}

/// Full output for one unit, including the generated VM program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    pub class_name: String,
    pub tokens: Vec<Token>,
    pub tree: Node,
    /// Newline-terminated VM text
    pub vm: String,
}

/// Runs the lexer and parser over `source` with the given emitter.
fn run_unit<E: Emitter>(
    source: String,
    file: Option<String>,
    emitter: E,
) -> Result<(String, Vec<Token>, Node, E), Error> {
    let file_name = Arc::new(file.clone().unwrap_or_else(|| String::from("shell")));
    debug!(file = %file_name, "compiling unit");

    let tokens = tokenize(source, file)?;
    let stream = TokenStream::new(tokens.clone(), file_name);

    let (parser, result) = parse(stream, emitter);
    let tree = result?;
    let class_name = parser.class_name().to_string();

    Ok((class_name, tokens, tree, parser.into_emitter()))
}

/// Tokenizes and parses one unit without generating code.
///
/// # Errors
///
/// Returns the first lexical or syntax error of the unit. No partial tree is
/// produced.
pub fn analyze(source: String, file: Option<String>) -> Result<AnalyzedUnit, Error> {
    let (class_name, tokens, tree, _) = run_unit(source, file, NullEmitter)?;

    debug!(class = %class_name, tokens = tokens.len(), "analyzed unit");
    Ok(AnalyzedUnit {
        class_name,
        tokens,
        tree,
    })
}

/// Tokenizes and parses one unit and renders its VM program.
///
/// # Errors
///
/// Same as [`analyze`]: the first error aborts the unit.
pub fn compile(source: String, file: Option<String>) -> Result<CompiledUnit, Error> {
    let (class_name, tokens, tree, writer) = run_unit(source, file, VmWriter::new())?;

    debug!(
        class = %class_name,
        tokens = tokens.len(),
        instructions = writer.len(),
        "compiled unit"
    );
    Ok(CompiledUnit {
        class_name,
        tokens,
        tree,
        vm: writer.output(),
    })
}
