use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

/// Largest value an integer constant may take.
pub const MAX_INT: u16 = 32767;

/// Every character that forms a symbol token on its own.
pub const SYMBOLS: &str = "{}()[].,;+-*/&|<>=~";

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("class", Keyword::Class);
        map.insert("constructor", Keyword::Constructor);
        map.insert("function", Keyword::Function);
        map.insert("method", Keyword::Method);
        map.insert("field", Keyword::Field);
        map.insert("static", Keyword::Static);
        map.insert("var", Keyword::Var);
        map.insert("int", Keyword::Int);
        map.insert("char", Keyword::Char);
        map.insert("boolean", Keyword::Boolean);
        map.insert("void", Keyword::Void);
        map.insert("true", Keyword::True);
        map.insert("false", Keyword::False);
        map.insert("null", Keyword::Null);
        map.insert("this", Keyword::This);
        map.insert("let", Keyword::Let);
        map.insert("do", Keyword::Do);
        map.insert("if", Keyword::If);
        map.insert("else", Keyword::Else);
        map.insert("while", Keyword::While);
        map.insert("return", Keyword::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lexical class of a token. Derived from the lexeme, never stored.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntegerConstant,
    StringConstant,
}

impl TokenKind {
    /// Classifies a lexeme. Checked in order: keyword, symbol, integer
    /// constant, string constant, identifier. `None` means the lexeme is not
    /// a token at all; integers above [`MAX_INT`] are rejected here too.
    pub fn classify(lexeme: &str) -> Option<TokenKind> {
        if RESERVED_LOOKUP.contains_key(lexeme) {
            return Some(TokenKind::Keyword);
        }

        let mut chars = lexeme.chars();
        let first = chars.next()?;

        if chars.as_str().is_empty() && SYMBOLS.contains(first) {
            return Some(TokenKind::Symbol);
        }

        if lexeme.bytes().all(|b| b.is_ascii_digit()) {
            return match lexeme.parse::<u32>() {
                Ok(value) if value <= MAX_INT as u32 => Some(TokenKind::IntegerConstant),
                _ => None,
            };
        }

        if lexeme.len() >= 2
            && lexeme.starts_with('"')
            && lexeme.ends_with('"')
            && !lexeme[1..lexeme.len() - 1].contains(['"', '\n', '\r'])
        {
            return Some(TokenKind::StringConstant);
        }

        if !first.is_ascii_digit()
            && lexeme.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Some(TokenKind::Identifier);
        }

        None
    }

    /// Element tag used when the token is rendered.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A classified lexeme. Tokens can only be built from lexemes that
/// [`TokenKind::classify`] accepts, so `kind()` is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    pub span: Span,
}

impl Token {
    pub fn new(value: String, span: Span) -> Option<Token> {
        TokenKind::classify(&value)?;
        Some(Token { value, span })
    }

    /// The raw lexeme; string constants keep their quotes.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        match TokenKind::classify(&self.value) {
            Some(kind) => kind,
            None => unreachable!("token {:?} was classified on construction", self.value),
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        RESERVED_LOOKUP.get(self.value.as_str()).copied()
    }

    pub fn symbol(&self) -> Option<char> {
        match self.kind() {
            TokenKind::Symbol => self.value.chars().next(),
            _ => None,
        }
    }

    pub fn int_value(&self) -> Option<u16> {
        match self.kind() {
            TokenKind::IntegerConstant => self.value.parse().ok(),
            _ => None,
        }
    }

    /// Contents of a string constant without the surrounding quotes.
    pub fn string_value(&self) -> Option<&str> {
        match self.kind() {
            TokenKind::StringConstant => Some(&self.value[1..self.value.len() - 1]),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.symbol() == Some(symbol)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind() == TokenKind::Identifier
    }

    /// Text of the token as it appears in rendered output: string constants
    /// lose their quotes and `<`, `>`, `&` become entities.
    pub fn rendered_text(&self) -> String {
        match self.kind() {
            TokenKind::Symbol => match self.value.as_str() {
                "<" => String::from("&lt;"),
                ">" => String::from("&gt;"),
                "&" => String::from("&amp;"),
                other => String::from(other),
            },
            TokenKind::StringConstant => String::from(self.string_value().unwrap_or_default()),
            _ => self.value.clone(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
