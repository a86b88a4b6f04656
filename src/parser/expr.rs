use crate::{
    ast::{Node, Production, Resolution},
    compiler::emitter::{Command, Emitter, Segment},
    errors::errors::Error,
    lexer::tokens::{Keyword, Token, TokenKind},
};

use super::parser::{unexpected, Parser};

const BINARY_OPERATORS: &str = "+-*/&|<>=";

/// Emits the instruction for a binary operator whose operands are already
/// on the stack.
fn emit_binary_operator<E: Emitter>(emitter: &mut E, operator: char) {
    match operator {
        '+' => emitter.apply_operator(Command::Add),
        '-' => emitter.apply_operator(Command::Sub),
        '*' => emitter.call("Math.multiply", 2),
        '/' => emitter.call("Math.divide", 2),
        '&' => emitter.apply_operator(Command::And),
        '|' => emitter.apply_operator(Command::Or),
        '<' => emitter.apply_operator(Command::Lt),
        '>' => emitter.apply_operator(Command::Gt),
        '=' => emitter.apply_operator(Command::Eq),
        _ => {}
    }
}

/// expression → term (op term)*
///
/// No precedence: operators are applied strictly left to right, each one
/// right after its right-hand term.
pub fn parse_expression<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![parse_term(parser)?];

    loop {
        let operator = match parser.peek()?.symbol() {
            Some(symbol) if BINARY_OPERATORS.contains(symbol) => symbol,
            _ => break,
        };

        children.push(Node::leaf(parser.advance()?));
        children.push(parse_term(parser)?);
        emit_binary_operator(parser.emitter_mut(), operator);
    }

    Ok(Node::branch(Production::Expression, children))
}

fn emit_string_constant<E: Emitter>(emitter: &mut E, value: &str) {
    emitter.push_value(Segment::Constant, value.chars().count() as u16);
    emitter.call("String.new", 1);
    for c in value.chars() {
        emitter.push_value(Segment::Constant, c as u32 as u16);
        emitter.call("String.appendChar", 2);
    }
}

/// term → integerConstant | stringConstant | keywordConstant | varName |
/// varName '[' expression ']' | subroutineCall | '(' expression ')' |
/// unaryOp term
pub fn parse_term<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let token = parser.advance()?;
    let mut children = vec![];

    match token.kind() {
        TokenKind::IntegerConstant => {
            let value = token.int_value().unwrap_or_default();
            parser.emitter_mut().push_value(Segment::Constant, value);
            children.push(Node::leaf(token));
        }
        TokenKind::StringConstant => {
            let value = token.string_value().unwrap_or_default().to_string();
            emit_string_constant(parser.emitter_mut(), &value);
            children.push(Node::leaf(token));
        }
        TokenKind::Keyword => {
            let emitter = parser.emitter_mut();
            match token.keyword() {
                Some(Keyword::True) => {
                    emitter.push_value(Segment::Constant, 0);
                    emitter.apply_operator(Command::Not);
                }
                Some(Keyword::False | Keyword::Null) => {
                    emitter.push_value(Segment::Constant, 0);
                }
                Some(Keyword::This) => emitter.push_value(Segment::Pointer, 0),
                _ => return Err(unexpected("term", &token)),
            }
            children.push(Node::leaf(token));
        }
        TokenKind::Symbol if token.is_symbol('(') => {
            children.push(Node::leaf(token));
            children.push(parse_expression(parser)?);
            children.push(Node::leaf(parser.expect_symbol(')')?));
        }
        TokenKind::Symbol if token.is_symbol('-') || token.is_symbol('~') => {
            let command = if token.is_symbol('-') {
                Command::Neg
            } else {
                Command::Not
            };
            children.push(Node::leaf(token));
            children.push(parse_term(parser)?);
            parser.emitter_mut().apply_operator(command);
        }
        TokenKind::Identifier => parse_identifier_term(parser, token, &mut children)?,
        _ => return Err(unexpected("term", &token)),
    }

    Ok(Node::branch(Production::Term, children))
}

/// The one ambiguous spot of the grammar. One token of lookahead decides:
/// `[` is an array access, `(` or `.` a subroutine call, anything else a
/// plain variable.
fn parse_identifier_term<E: Emitter>(
    parser: &mut Parser<E>,
    token: Token,
    children: &mut Vec<Node>,
) -> Result<(), Error> {
    let (is_index, is_call) = {
        let next = parser.peek()?;
        (next.is_symbol('['), next.is_symbol('(') || next.is_symbol('.'))
    };

    if is_index {
        let (name_node, symbol) = parser.variable_use(token)?;
        children.push(name_node);
        parser
            .emitter_mut()
            .push_value(symbol.kind.into(), symbol.index);

        children.push(Node::leaf(parser.advance()?));
        children.push(parse_expression(parser)?);
        children.push(Node::leaf(parser.expect_symbol(']')?));

        let emitter = parser.emitter_mut();
        emitter.apply_operator(Command::Add);
        emitter.pop_value(Segment::Pointer, 1);
        emitter.push_value(Segment::That, 0);
    } else if is_call {
        parser.pushback()?;
        children.extend(parse_subroutine_call(parser)?);
    } else {
        let (name_node, symbol) = parser.variable_use(token)?;
        children.push(name_node);
        parser
            .emitter_mut()
            .push_value(symbol.kind.into(), symbol.index);
    }

    Ok(())
}

/// subroutineCall → subroutineName '(' expressionList ')' |
/// (className | varName) '.' subroutineName '(' expressionList ')'
///
/// Returns the call's nodes unwrapped so callers can splice them into their
/// own production.
pub fn parse_subroutine_call<E: Emitter>(parser: &mut Parser<E>) -> Result<Vec<Node>, Error> {
    let first = parser.expect_identifier()?;
    let mut children = vec![];

    let (function_name, implicit_args) = if parser.peek_is_symbol('.')? {
        let qualifier = first.value().to_string();
        let starts_uppercase = qualifier.starts_with(|c: char| c.is_ascii_uppercase());
        let object = if starts_uppercase {
            None
        } else {
            parser.symbols().lookup(&qualifier).cloned()
        };

        let (target_class, implicit_args) = match object {
            Some(symbol) => {
                parser
                    .emitter_mut()
                    .push_value(symbol.kind.into(), symbol.index);
                children.push(Node::resolved(
                    first,
                    Resolution::variable(symbol.kind, false, symbol.index),
                ));
                (symbol.ty, 1)
            }
            None => {
                children.push(Node::resolved(first, Resolution::class(false)));
                (qualifier, 0)
            }
        };

        children.push(Node::leaf(parser.advance()?));
        let name = parser.expect_identifier()?;
        let function_name = format!("{}.{}", target_class, name.value());
        children.push(Node::resolved(name, Resolution::subroutine(false)));

        (function_name, implicit_args)
    } else {
        let function_name = format!("{}.{}", parser.class_name(), first.value());
        children.push(Node::resolved(first, Resolution::subroutine(false)));
        parser.emitter_mut().push_value(Segment::Pointer, 0);

        (function_name, 1)
    };

    children.push(Node::leaf(parser.expect_symbol('(')?));
    let (list, arg_count) = parse_expression_list(parser)?;
    children.push(list);
    children.push(Node::leaf(parser.expect_symbol(')')?));

    parser
        .emitter_mut()
        .call(&function_name, arg_count + implicit_args);

    Ok(children)
}

/// expressionList → (expression (',' expression)*)?
///
/// Returns the node and the number of expressions in it.
pub fn parse_expression_list<E: Emitter>(parser: &mut Parser<E>) -> Result<(Node, u16), Error> {
    let mut children = vec![];
    let mut count = 0;

    if !parser.peek_is_symbol(')')? {
        loop {
            children.push(parse_expression(parser)?);
            count += 1;

            if !parser.peek_is_symbol(',')? {
                break;
            }
            children.push(Node::leaf(parser.advance()?));
        }
    }

    Ok((Node::branch(Production::ExpressionList, children), count))
}
