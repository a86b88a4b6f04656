use std::fmt::Display;

use thiserror::Error;

use crate::{get_line_at_position, Position};

/// A compilation error together with the place in the source where it was
/// detected. Every error aborts the unit it was raised in.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::LexicalError(_) => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ErrorImpl::UndefinedSymbol { .. } => ErrorKind::UndefinedSymbol,
            ErrorImpl::EndOfInput => ErrorKind::EndOfInput,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::LexicalError(LexicalError::UnterminatedString) => "UnterminatedString",
            ErrorImpl::LexicalError(LexicalError::UnterminatedComment) => "UnterminatedComment",
            ErrorImpl::LexicalError(LexicalError::IntegerOutOfRange { .. }) => "IntegerOutOfRange",
            ErrorImpl::LexicalError(LexicalError::UnrecognisedToken { .. }) => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UndefinedSymbol { .. } => "UndefinedSymbol",
            ErrorImpl::EndOfInput => "EndOfInput",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LexicalError(LexicalError::UnterminatedString) => ErrorTip::Suggestion(
                String::from("String constants must be closed with `\"` on the same line"),
            ),
            ErrorImpl::LexicalError(LexicalError::UnterminatedComment) => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::LexicalError(LexicalError::IntegerOutOfRange { token }) => {
                ErrorTip::Suggestion(format!(
                    "Invalid number: `{}`, integer constants must lie in 0..=32767",
                    token
                ))
            }
            ErrorImpl::LexicalError(LexicalError::UnrecognisedToken { .. }) => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                found, expected
            )),
            ErrorImpl::UndefinedSymbol { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", name))
            }
            ErrorImpl::EndOfInput => ErrorTip::Suggestion(String::from(
                "Source ended before the class definition was complete",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    UnexpectedToken,
    UndefinedSymbol,
    EndOfInput,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("lexical error: {0}")]
    LexicalError(#[from] LexicalError),
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("symbol {name:?} is not defined")]
    UndefinedSymbol { name: String },
    #[error("unexpected end of input")]
    EndOfInput,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("integer constant {token:?} is out of range")]
    IntegerOutOfRange { token: String },
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
}

/// Renders a caret diagnostic for `error` against the unit's source text.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `;`, expected identifier)
/// -> Main.jack
///    |
/// 20 | let a = ;
///    | --------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
