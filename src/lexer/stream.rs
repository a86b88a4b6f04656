use std::sync::Arc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::tokens::Token;

/// A materialized token sequence with a cursor.
///
/// `pos` is the index of the next token to hand out. Pushback just moves the
/// cursor back by one, and at most once between two advances.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    pushed_back: bool,
    file: Arc<String>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, file: Arc<String>) -> Self {
        TokenStream {
            tokens,
            pos: 0,
            pushed_back: false,
            file,
        }
    }

    /// The next unconsumed token. Has no side effects.
    pub fn peek(&self) -> Result<&Token, Error> {
        self.tokens
            .get(self.pos)
            .ok_or_else(|| self.end_of_input())
    }

    /// Consumes the next token and makes it current.
    pub fn advance(&mut self) -> Result<&Token, Error> {
        if self.pos >= self.tokens.len() {
            return Err(self.end_of_input());
        }

        self.pos += 1;
        self.pushed_back = false;
        Ok(&self.tokens[self.pos - 1])
    }

    /// Returns the current token to the front of the stream.
    pub fn pushback(&mut self) -> Result<(), Error> {
        if self.pos == 0 || self.pushed_back {
            return Err(self.end_of_input());
        }

        self.pos -= 1;
        self.pushed_back = true;
        Ok(())
    }

    /// The most recently advanced token, unless it was pushed back.
    pub fn current(&self) -> Option<&Token> {
        if self.pushed_back || self.pos == 0 {
            return None;
        }
        self.tokens.get(self.pos - 1)
    }

    pub fn has_more_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn file(&self) -> &Arc<String> {
        &self.file
    }

    /// Position just past the last consumed token, used for errors raised
    /// once the input has run out.
    pub fn get_position(&self) -> Position {
        let offset = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end.0,
            None => 0,
        };
        Position(offset, Arc::clone(&self.file))
    }

    fn end_of_input(&self) -> Error {
        Error::new(ErrorImpl::EndOfInput, self.get_position())
    }
}
