use crate::{
    ast::{Node, Production},
    compiler::emitter::{Command, Emitter, Segment},
    errors::errors::Error,
    lexer::tokens::Keyword,
};

use super::{
    expr::{parse_expression, parse_subroutine_call},
    parser::Parser,
};

pub type StmtHandler<E> = fn(&mut Parser<E>) -> Result<Node, Error>;

/// Statement dispatch is decided by the leading keyword alone.
pub fn stmt_lookup<E: Emitter>(keyword: Keyword) -> Option<StmtHandler<E>> {
    match keyword {
        Keyword::Let => Some(parse_let_stmt),
        Keyword::If => Some(parse_if_stmt),
        Keyword::While => Some(parse_while_stmt),
        Keyword::Do => Some(parse_do_stmt),
        Keyword::Return => Some(parse_return_stmt),
        _ => None,
    }
}

/// statements → statement*
pub fn parse_statements<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![];

    while let Some(handler) = parser.peek()?.keyword().and_then(stmt_lookup::<E>) {
        children.push(handler(parser)?);
    }

    Ok(Node::branch(Production::Statements, children))
}

/// '{' statements '}', with both braces appended to `children`.
fn parse_block<E: Emitter>(parser: &mut Parser<E>, children: &mut Vec<Node>) -> Result<(), Error> {
    children.push(Node::leaf(parser.expect_symbol('{')?));
    children.push(parse_statements(parser)?);
    children.push(Node::leaf(parser.expect_symbol('}')?));
    Ok(())
}

/// letStatement → 'let' varName ('[' expression ']')? '=' expression ';'
pub fn parse_let_stmt<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::Let)?)];

    let name = parser.expect_identifier()?;
    let (name_node, symbol) = parser.variable_use(name)?;
    children.push(name_node);

    let is_array = parser.peek_is_symbol('[')?;
    if is_array {
        parser
            .emitter_mut()
            .push_value(symbol.kind.into(), symbol.index);
        children.push(Node::leaf(parser.advance()?));
        children.push(parse_expression(parser)?);
        children.push(Node::leaf(parser.expect_symbol(']')?));
        parser.emitter_mut().apply_operator(Command::Add);
    }

    children.push(Node::leaf(parser.expect_symbol('=')?));
    children.push(parse_expression(parser)?);
    children.push(Node::leaf(parser.expect_symbol(';')?));

    let emitter = parser.emitter_mut();
    if is_array {
        emitter.pop_value(Segment::Temp, 0);
        emitter.pop_value(Segment::Pointer, 1);
        emitter.push_value(Segment::Temp, 0);
        emitter.pop_value(Segment::That, 0);
    } else {
        emitter.pop_value(symbol.kind.into(), symbol.index);
    }

    Ok(Node::branch(Production::LetStatement, children))
}

/// ifStatement → 'if' '(' expression ')' '{' statements '}'
/// ('else' '{' statements '}')?
pub fn parse_if_stmt<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::If)?)];

    let id = parser.next_label_id();
    let else_label = format!("IF_ELSE{}", id);
    let end_label = format!("IF_END{}", id);

    children.push(Node::leaf(parser.expect_symbol('(')?));
    children.push(parse_expression(parser)?);
    children.push(Node::leaf(parser.expect_symbol(')')?));

    parser.emitter_mut().jump_if_false(&else_label);
    parse_block(parser, &mut children)?;

    if parser.peek_is_keyword(&[Keyword::Else])? {
        parser.emitter_mut().jump(&end_label);
        parser.emitter_mut().define_label(&else_label);

        children.push(Node::leaf(parser.advance()?));
        parse_block(parser, &mut children)?;

        parser.emitter_mut().define_label(&end_label);
    } else {
        parser.emitter_mut().define_label(&else_label);
    }

    Ok(Node::branch(Production::IfStatement, children))
}

/// whileStatement → 'while' '(' expression ')' '{' statements '}'
pub fn parse_while_stmt<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::While)?)];

    let id = parser.next_label_id();
    let exp_label = format!("WHILE_EXP{}", id);
    let end_label = format!("WHILE_END{}", id);

    parser.emitter_mut().define_label(&exp_label);

    children.push(Node::leaf(parser.expect_symbol('(')?));
    children.push(parse_expression(parser)?);
    children.push(Node::leaf(parser.expect_symbol(')')?));

    parser.emitter_mut().jump_if_false(&end_label);
    parse_block(parser, &mut children)?;
    parser.emitter_mut().jump(&exp_label);
    parser.emitter_mut().define_label(&end_label);

    Ok(Node::branch(Production::WhileStatement, children))
}

/// doStatement → 'do' subroutineCall ';'
pub fn parse_do_stmt<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::Do)?)];

    children.extend(parse_subroutine_call(parser)?);
    children.push(Node::leaf(parser.expect_symbol(';')?));

    // Discard the return value.
    parser.emitter_mut().pop_value(Segment::Temp, 0);

    Ok(Node::branch(Production::DoStatement, children))
}

/// returnStatement → 'return' expression? ';'
pub fn parse_return_stmt<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::Return)?)];

    if parser.peek_is_symbol(';')? {
        parser.emitter_mut().push_value(Segment::Constant, 0);
    } else {
        children.push(parse_expression(parser)?);
    }

    children.push(Node::leaf(parser.expect_symbol(';')?));
    parser.emitter_mut().return_from_function();

    Ok(Node::branch(Production::ReturnStatement, children))
}
