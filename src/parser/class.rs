use tracing::trace;

use crate::{
    ast::{Node, Production, Resolution},
    compiler::emitter::{Emitter, Segment},
    errors::errors::Error,
    lexer::tokens::{Keyword, TokenKind},
    symbols::SymbolKind,
};

use super::{
    parser::{unexpected, Parser},
    stmt::parse_statements,
};

/// class → 'class' className '{' classVarDec* subroutineDec* '}'
pub fn parse_class<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::Class)?)];

    let name = parser.expect_identifier()?;
    parser.set_class_name(name.value());
    children.push(Node::resolved(name, Resolution::class(true)));

    children.push(Node::leaf(parser.expect_symbol('{')?));

    while parser.peek_is_keyword(&[Keyword::Static, Keyword::Field])? {
        children.push(parse_class_var_dec(parser)?);
    }

    while parser.peek_is_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method])? {
        children.push(parse_subroutine_dec(parser)?);
    }

    children.push(Node::leaf(parser.expect_symbol('}')?));

    Ok(Node::branch(Production::Class, children))
}

/// type → 'int' | 'char' | 'boolean' | className
///
/// Returns the node and the type name as written.
fn parse_type<E: Emitter>(parser: &mut Parser<E>) -> Result<(Node, String), Error> {
    let token = parser.advance()?;
    let ty = token.value().to_string();

    match token.kind() {
        TokenKind::Keyword
            if matches!(
                token.keyword(),
                Some(Keyword::Int | Keyword::Char | Keyword::Boolean)
            ) =>
        {
            Ok((Node::leaf(token), ty))
        }
        TokenKind::Identifier => Ok((Node::resolved(token, Resolution::class(false)), ty)),
        _ => Err(unexpected("type", &token)),
    }
}

/// Parses `varName (',' varName)* ';'`, defining each name as it goes.
fn parse_var_names<E: Emitter>(
    parser: &mut Parser<E>,
    ty: &str,
    kind: SymbolKind,
    children: &mut Vec<Node>,
) -> Result<(), Error> {
    loop {
        let name = parser.expect_identifier()?;
        let index = parser.symbols_mut().define(name.value(), ty, kind);
        children.push(Node::resolved(name, Resolution::variable(kind, true, index)));

        let separator = parser.advance()?;
        if separator.is_symbol(',') {
            children.push(Node::leaf(separator));
        } else if separator.is_symbol(';') {
            children.push(Node::leaf(separator));
            return Ok(());
        } else {
            return Err(unexpected("`,` or `;`", &separator));
        }
    }
}

/// classVarDec → ('static'|'field') type varName (',' varName)* ';'
fn parse_class_var_dec<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let keyword = parser.advance()?;
    let kind = match keyword.keyword() {
        Some(Keyword::Static) => SymbolKind::Static,
        Some(Keyword::Field) => SymbolKind::Field,
        _ => return Err(unexpected("`static` or `field`", &keyword)),
    };

    let mut children = vec![Node::leaf(keyword)];
    let (type_node, ty) = parse_type(parser)?;
    children.push(type_node);

    parse_var_names(parser, &ty, kind, &mut children)?;

    Ok(Node::branch(Production::ClassVarDec, children))
}

/// subroutineDec → ('constructor'|'function'|'method') (type|'void')
/// subroutineName '(' parameterList ')' subroutineBody
fn parse_subroutine_dec<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let keyword_token = parser.advance()?;
    let subroutine_kind = match keyword_token.keyword() {
        Some(keyword @ (Keyword::Constructor | Keyword::Function | Keyword::Method)) => keyword,
        _ => {
            return Err(unexpected(
                "`constructor`, `function` or `method`",
                &keyword_token,
            ))
        }
    };

    parser.symbols_mut().start_subroutine();
    parser.reset_labels();
    if subroutine_kind == Keyword::Method {
        let class_name = parser.class_name().to_string();
        parser
            .symbols_mut()
            .define("this", &class_name, SymbolKind::Argument);
    }

    let mut children = vec![Node::leaf(keyword_token)];

    if parser.peek_is_keyword(&[Keyword::Void])? {
        children.push(Node::leaf(parser.advance()?));
    } else {
        children.push(parse_type(parser)?.0);
    }

    let name = parser.expect_identifier()?;
    let function_name = format!("{}.{}", parser.class_name(), name.value());
    children.push(Node::resolved(name, Resolution::subroutine(true)));

    children.push(Node::leaf(parser.expect_symbol('(')?));
    children.push(parse_parameter_list(parser)?);
    children.push(Node::leaf(parser.expect_symbol(')')?));

    children.push(parse_subroutine_body(parser, subroutine_kind, &function_name)?);

    trace!(function = %function_name, "compiled subroutine");
    Ok(Node::branch(Production::SubroutineDec, children))
}

/// parameterList → ((type varName) (',' type varName)*)?
fn parse_parameter_list<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![];

    if parser.peek_is_symbol(')')? {
        return Ok(Node::branch(Production::ParameterList, children));
    }

    loop {
        let (type_node, ty) = parse_type(parser)?;
        children.push(type_node);

        let name = parser.expect_identifier()?;
        let index = parser
            .symbols_mut()
            .define(name.value(), &ty, SymbolKind::Argument);
        children.push(Node::resolved(
            name,
            Resolution::variable(SymbolKind::Argument, true, index),
        ));

        if !parser.peek_is_symbol(',')? {
            break;
        }
        children.push(Node::leaf(parser.advance()?));
    }

    Ok(Node::branch(Production::ParameterList, children))
}

/// subroutineBody → '{' varDec* statements '}'
///
/// The function header can only be emitted once every local is known, so
/// it goes out between the declarations and the statements.
fn parse_subroutine_body<E: Emitter>(
    parser: &mut Parser<E>,
    subroutine_kind: Keyword,
    function_name: &str,
) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_symbol('{')?)];

    while parser.peek_is_keyword(&[Keyword::Var])? {
        children.push(parse_var_dec(parser)?);
    }

    let locals = parser.symbols().var_count(SymbolKind::Local);
    let fields = parser.symbols().var_count(SymbolKind::Field);
    let emitter = parser.emitter_mut();
    emitter.declare_function(function_name, locals);
    match subroutine_kind {
        Keyword::Constructor => {
            emitter.push_value(Segment::Constant, fields);
            emitter.call("Memory.alloc", 1);
            emitter.pop_value(Segment::Pointer, 0);
        }
        Keyword::Method => {
            emitter.push_value(Segment::Argument, 0);
            emitter.pop_value(Segment::Pointer, 0);
        }
        _ => {}
    }

    children.push(parse_statements(parser)?);
    children.push(Node::leaf(parser.expect_symbol('}')?));

    Ok(Node::branch(Production::SubroutineBody, children))
}

/// varDec → 'var' type varName (',' varName)* ';'
fn parse_var_dec<E: Emitter>(parser: &mut Parser<E>) -> Result<Node, Error> {
    let mut children = vec![Node::leaf(parser.expect_keyword(Keyword::Var)?)];

    let (type_node, ty) = parse_type(parser)?;
    children.push(type_node);

    parse_var_names(parser, &ty, SymbolKind::Local, &mut children)?;

    Ok(Node::branch(Production::VarDec, children))
}
