//! Parser state and entry point.
//!
//! The parser is a plain recursive descent over a [`TokenStream`]. Each
//! production is a free function taking `&mut Parser<E>`; those live in
//! `class`, `stmt` and `expr`. While it builds the tree the parser keeps the
//! class's [`SymbolTable`] current and drives the emitter `E` in evaluation
//! order.

use tracing::debug;

use crate::{
    ast::{Node, Resolution},
    compiler::emitter::Emitter,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        stream::TokenStream,
        tokens::{Keyword, Token},
    },
    symbols::{Symbol, SymbolTable},
};

use super::class::parse_class;

/// All mutable state for compiling one class. A fresh parser is built for
/// every compilation unit.
pub struct Parser<E: Emitter> {
    /// Tokens of the unit being parsed
    tokens: TokenStream,
    /// Names visible at the current point of the class
    symbols: SymbolTable,
    /// Name of the class being compiled, set by the class header
    class_name: String,
    /// Receives generated instructions
    emitter: E,
    /// Next free id for control-flow labels in the current subroutine
    label_id: usize,
}

impl<E: Emitter> Parser<E> {
    pub fn new(tokens: TokenStream, emitter: E) -> Self {
        Parser {
            tokens,
            symbols: SymbolTable::new(),
            class_name: String::new(),
            emitter,
            label_id: 0,
        }
    }

    /// The next token, without consuming it.
    pub fn peek(&self) -> Result<&Token, Error> {
        self.tokens.peek()
    }

    pub fn peek_is_symbol(&self, symbol: char) -> Result<bool, Error> {
        Ok(self.peek()?.is_symbol(symbol))
    }

    pub fn peek_is_keyword(&self, keywords: &[Keyword]) -> Result<bool, Error> {
        let token = self.peek()?;
        Ok(keywords.iter().any(|keyword| token.is_keyword(*keyword)))
    }

    /// Consumes the next token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        self.tokens.advance().cloned()
    }

    /// Un-consumes the token returned by the last `advance`.
    pub fn pushback(&mut self) -> Result<(), Error> {
        self.tokens.pushback()
    }

    pub fn expect_symbol(&mut self, symbol: char) -> Result<Token, Error> {
        let token = self.advance()?;
        if token.is_symbol(symbol) {
            Ok(token)
        } else {
            Err(unexpected(&format!("`{}`", symbol), &token))
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, Error> {
        let token = self.advance()?;
        if token.is_keyword(keyword) {
            Ok(token)
        } else {
            Err(unexpected(&format!("`{}`", keyword), &token))
        }
    }

    pub fn expect_identifier(&mut self) -> Result<Token, Error> {
        let token = self.advance()?;
        if token.is_identifier() {
            Ok(token)
        } else {
            Err(unexpected("identifier", &token))
        }
    }

    /// Looks `token` up as a variable and builds its annotated leaf.
    pub fn variable_use(&self, token: Token) -> Result<(Node, Symbol), Error> {
        let symbol = self
            .symbols
            .resolve(token.value(), &token.span.start)?
            .clone();
        let node = Node::resolved(token, Resolution::variable(symbol.kind, false, symbol.index));
        Ok((node, symbol))
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn set_class_name(&mut self, name: &str) {
        self.class_name = name.to_string();
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    /// Restarts label numbering; labels only need to be unique per function.
    pub fn reset_labels(&mut self) {
        self.label_id = 0;
    }

    pub fn next_label_id(&mut self) -> usize {
        let id = self.label_id;
        self.label_id += 1;
        id
    }

    pub fn has_tokens(&self) -> bool {
        self.tokens.has_more_tokens()
    }
}

/// Builds the `UnexpectedToken` error for `found`.
pub fn unexpected(expected: &str, found: &Token) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            expected: expected.to_string(),
            found: found.value().to_string(),
        },
        found.span.start.clone(),
    )
}

/// Parses one compilation unit: exactly one class spanning all tokens.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with its symbol table and emitter after parsing)
/// - Result containing either the `class` node or the first Error
pub fn parse<E: Emitter>(tokens: TokenStream, emitter: E) -> (Parser<E>, Result<Node, Error>) {
    let mut parser = Parser::new(tokens, emitter);

    let result = parse_class(&mut parser).and_then(|class| {
        if parser.has_tokens() {
            let trailing = parser.peek()?;
            return Err(unexpected("end of input", trailing));
        }
        Ok(class)
    });

    if result.is_ok() {
        debug!(class = %parser.class_name, "parsed class");
    }

    (parser, result)
}
