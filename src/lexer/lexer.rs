use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl, LexicalError},
    Position, Span, MK_LEXICAL_HANDLER, MK_SPAN,
};

use super::{
    stream::TokenStream,
    tokens::{Token, TokenKind},
};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: comments must be tried before the `/` symbol, and the
    // unterminated forms only fire when the well-formed ones did not.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"(?s)^/\*.*?\*/").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: MK_LEXICAL_HANDLER!(LexicalError::UnterminatedComment) },
        RegexPattern { regex: Regex::new(r#"^"[^"\n]*""#).unwrap(), handler: token_handler },
        RegexPattern { regex: Regex::new(r#"^""#).unwrap(), handler: MK_LEXICAL_HANDLER!(LexicalError::UnterminatedString) },
        RegexPattern { regex: Regex::new(r"^[{}()\[\].,;+\-*/&|<>=~]").unwrap(), handler: token_handler },
        RegexPattern { regex: Regex::new(r#"^[^\s{}()\[\].,;+\-*/&|<>=~"]+"#).unwrap(), handler: word_handler },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Arc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span_of(&self, matched: &str) -> Span {
        MK_SPAN!(self.file, self.pos, self.pos + matched.len())
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn token_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let span = lexer.span_of(matched);
    match Token::new(matched.to_string(), span) {
        Some(token) => lexer.push(token),
        None => {
            return Err(Error::new(
                ErrorImpl::LexicalError(LexicalError::UnrecognisedToken {
                    token: matched.to_string(),
                }),
                Position(lexer.pos as u32, Arc::clone(&lexer.file)),
            ))
        }
    }

    lexer.advance_n(matched.len());
    Ok(())
}

/// Keywords, identifiers and integer constants all arrive here as a run of
/// non-delimiter characters and are told apart by classification.
fn word_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    if TokenKind::classify(matched).is_none() && matched.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::new(
            ErrorImpl::LexicalError(LexicalError::IntegerOutOfRange {
                token: matched.to_string(),
            }),
            Position(lexer.pos as u32, Arc::clone(&lexer.file)),
        ));
    }

    token_handler(lexer, matched)
}

/// Splits `source` into tokens, dropping whitespace and both comment forms.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            let found = pattern
                .regex
                .find(lex.remainder())
                .map(|m| m.as_str().to_string());

            if let Some(text) = found {
                (pattern.handler)(&mut lex, &text)?;
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.remainder().chars().next().map(String::from).unwrap_or_default();
            return Err(Error::new(
                ErrorImpl::LexicalError(LexicalError::UnrecognisedToken { token }),
                Position(lex.pos as u32, Arc::clone(&lex.file)),
            ));
        }
    }

    debug!(file = %lex.file, tokens = lex.tokens.len(), "tokenized unit");
    Ok(lex.tokens)
}

/// Tokenizes `source` and wraps the result in a [`TokenStream`].
pub fn token_stream(source: String, file: Option<String>) -> Result<TokenStream, Error> {
    let file_name = Arc::new(file.clone().unwrap_or_else(|| String::from("shell")));
    let tokens = tokenize(source, file)?;
    Ok(TokenStream::new(tokens, file_name))
}
