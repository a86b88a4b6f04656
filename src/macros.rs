//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_SPAN!` - Creates a Span covering a byte range of one file
//! - `MK_LEXICAL_HANDLER!` - Creates a lexer handler that rejects its match
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Span instance.
///
/// # Arguments
///
/// * `$file` - The `Arc<String>` file name
/// * `$start` - Start byte offset
/// * `$end` - End byte offset (exclusive)
///
/// # Example
///
/// ```ignore
/// let span = MK_SPAN!(lexer.file, lexer.pos, lexer.pos + 5);
/// ```
#[macro_export]
macro_rules! MK_SPAN {
    ($file:expr, $start:expr, $end:expr) => {
        Span {
            start: Position($start as u32, Arc::clone(&$file)),
            end: Position($end as u32, Arc::clone(&$file)),
        }
    };
}

/// Creates a lexer handler for a pattern that only matches malformed input.
///
/// The generated handler reports the given `LexicalError` at the position
/// where the match starts.
///
/// # Arguments
///
/// * `$error` - The LexicalError value to report
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\"").unwrap(),
///     handler: MK_LEXICAL_HANDLER!(LexicalError::UnterminatedString),
/// }
/// ```
#[macro_export]
macro_rules! MK_LEXICAL_HANDLER {
    ($error:expr) => {
        |lexer: &mut Lexer, _matched: &str| -> Result<(), Error> {
            Err(Error::new(
                ErrorImpl::LexicalError($error),
                Position(lexer.pos as u32, Arc::clone(&lexer.file)),
            ))
        }
    };
}
