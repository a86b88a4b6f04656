//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts Jack source
//! code into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Classification of keywords, symbols, identifiers and constants
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//! - A cursor over the tokens with one-token lookahead and pushback

pub mod lexer;
pub mod stream;
pub mod tokens;

#[cfg(test)]
mod tests;
