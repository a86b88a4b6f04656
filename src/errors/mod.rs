//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - The lexical, grammar, symbol and end-of-input error families
//! - Caret-style diagnostic rendering

pub mod errors;
