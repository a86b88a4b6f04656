//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, symbols and identifiers
//! - Integer and string constants
//! - Comments and whitespace
//! - Lexical error cases
//! - The token stream cursor

use crate::errors::errors::{ErrorImpl, ErrorKind, LexicalError};

use super::{
    lexer::{token_stream, tokenize},
    tokens::{Keyword, TokenKind},
};

fn lex(source: &str) -> Vec<super::tokens::Token> {
    tokenize(source.to_string(), Some("Test.jack".to_string())).unwrap()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = lex("class constructor function method field static var int char boolean void true false null this let do if else while return");

    assert_eq!(tokens.len(), 21);
    assert!(tokens.iter().all(|t| t.kind() == TokenKind::Keyword));
    assert_eq!(tokens[0].keyword(), Some(Keyword::Class));
    assert_eq!(tokens[3].keyword(), Some(Keyword::Method));
    assert_eq!(tokens[14].keyword(), Some(Keyword::This));
    assert_eq!(tokens[20].keyword(), Some(Keyword::Return));
}

#[test]
fn test_tokenize_symbols() {
    let tokens = lex("{ } ( ) [ ] . , ; + - * / & | < > = ~");

    assert_eq!(tokens.len(), 19);
    assert!(tokens.iter().all(|t| t.kind() == TokenKind::Symbol));
    assert_eq!(tokens[0].symbol(), Some('{'));
    assert_eq!(tokens[18].symbol(), Some('~'));
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo bar baz_123 _underscore CamelCase classy");

    assert!(tokens.iter().all(|t| t.kind() == TokenKind::Identifier));
    assert_eq!(tokens[2].value(), "baz_123");
    assert_eq!(tokens[3].value(), "_underscore");
    assert_eq!(tokens[5].value(), "classy");
}

#[test]
fn test_tokenize_integers() {
    let tokens = lex("0 42 32767");

    assert!(tokens.iter().all(|t| t.kind() == TokenKind::IntegerConstant));
    assert_eq!(tokens[0].int_value(), Some(0));
    assert_eq!(tokens[1].int_value(), Some(42));
    assert_eq!(tokens[2].int_value(), Some(32767));
}

#[test]
fn test_integer_out_of_range() {
    let error = tokenize("let x = 32768;".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(
        error.get_error(),
        &ErrorImpl::LexicalError(LexicalError::IntegerOutOfRange {
            token: "32768".to_string()
        })
    );
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_tokenize_strings() {
    let tokens = lex(r#""hello" "" "two words // not a comment""#);

    assert!(tokens.iter().all(|t| t.kind() == TokenKind::StringConstant));
    assert_eq!(tokens[0].value(), "\"hello\"");
    assert_eq!(tokens[0].string_value(), Some("hello"));
    assert_eq!(tokens[1].string_value(), Some(""));
    assert_eq!(tokens[2].string_value(), Some("two words // not a comment"));
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("do f(\"abc\n\");".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::LexicalError(LexicalError::UnterminatedString)
    );
    assert_eq!(error.get_position().0, 5);
}

#[test]
fn test_tokenize_comments() {
    let tokens = lex("// line comment\nlet /* block\n comment */ x /** doc */ = 5; // trailing");

    let values: Vec<&str> = tokens.iter().map(|t| t.value()).collect();
    assert_eq!(values, vec!["let", "x", "=", "5", ";"]);
}

#[test]
fn test_unterminated_comment() {
    let error = tokenize("let x /* never closed".to_string(), None).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::LexicalError(LexicalError::UnterminatedComment)
    );
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_unrecognized_token() {
    let error = tokenize("let x = @;".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");

    let error = tokenize("let 9lives = 1;".to_string(), None).unwrap_err();
    assert_eq!(
        error.get_error(),
        &ErrorImpl::LexicalError(LexicalError::UnrecognisedToken {
            token: "9lives".to_string()
        })
    );
}

#[test]
fn test_tokenize_without_spaces() {
    let tokens = lex("let a[i]=x+1;");

    let values: Vec<&str> = tokens.iter().map(|t| t.value()).collect();
    assert_eq!(values, vec!["let", "a", "[", "i", "]", "=", "x", "+", "1", ";"]);
}

#[test]
fn test_token_spans() {
    let tokens = lex("  let  x");

    assert_eq!(tokens[0].span.start.0, 2);
    assert_eq!(tokens[0].span.end.0, 5);
    assert_eq!(tokens[1].span.start.0, 7);
    assert_eq!(tokens[1].span.start.1.as_str(), "Test.jack");
}

#[test]
fn test_classify_is_total() {
    let cases = [
        ("while", Some(TokenKind::Keyword)),
        ("<", Some(TokenKind::Symbol)),
        ("007", Some(TokenKind::IntegerConstant)),
        ("\"hi\"", Some(TokenKind::StringConstant)),
        ("hi", Some(TokenKind::Identifier)),
        ("99999", None),
        ("\"a\nb\"", None),
        ("a-b", None),
        ("", None),
    ];

    for (lexeme, expected) in cases {
        assert_eq!(TokenKind::classify(lexeme), expected, "lexeme {:?}", lexeme);
    }
}

#[test]
fn test_rendered_text_escapes_only_symbols() {
    let tokens = lex(r#"< > & = "a<b""#);

    assert_eq!(tokens[0].rendered_text(), "&lt;");
    assert_eq!(tokens[1].rendered_text(), "&gt;");
    assert_eq!(tokens[2].rendered_text(), "&amp;");
    assert_eq!(tokens[3].rendered_text(), "=");
    assert_eq!(tokens[4].rendered_text(), "a<b");
    assert!(tokens[0].is_symbol('<'));
}

#[test]
fn test_stream_peek_and_advance() {
    let mut stream = token_stream("let x;".to_string(), None).unwrap();

    assert_eq!(stream.peek().unwrap().value(), "let");
    assert_eq!(stream.peek().unwrap().value(), "let");
    assert!(stream.current().is_none());

    assert_eq!(stream.advance().unwrap().value(), "let");
    assert_eq!(stream.current().unwrap().value(), "let");
    assert_eq!(stream.peek().unwrap().value(), "x");

    stream.advance().unwrap();
    stream.advance().unwrap();
    assert!(!stream.has_more_tokens());

    let error = stream.peek().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::EndOfInput);
    assert_eq!(error.get_position().0, 6);
    assert_eq!(stream.advance().unwrap_err().kind(), ErrorKind::EndOfInput);
}

#[test]
fn test_stream_pushback() {
    let mut stream = token_stream("foo . bar".to_string(), None).unwrap();

    assert_eq!(stream.advance().unwrap().value(), "foo");
    stream.pushback().unwrap();
    assert_eq!(stream.peek().unwrap().value(), "foo");
    assert!(stream.current().is_none());

    assert_eq!(stream.advance().unwrap().value(), "foo");
    assert_eq!(stream.advance().unwrap().value(), ".");
}

#[test]
fn test_stream_pushback_misuse() {
    let mut stream = token_stream("a b".to_string(), None).unwrap();

    assert_eq!(stream.pushback().unwrap_err().kind(), ErrorKind::EndOfInput);

    stream.advance().unwrap();
    stream.advance().unwrap();
    stream.pushback().unwrap();
    assert_eq!(stream.pushback().unwrap_err().kind(), ErrorKind::EndOfInput);
    assert_eq!(stream.peek().unwrap().value(), "b");
}
