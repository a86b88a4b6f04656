use crate::errors::errors::ErrorImpl;

use super::{ScopeKind, SymbolKind, SymbolTable};

#[test]
fn test_indices_are_per_kind() {
    let mut table = SymbolTable::new();

    assert_eq!(table.define("count", "int", SymbolKind::Static), 0);
    assert_eq!(table.define("x", "int", SymbolKind::Field), 0);
    assert_eq!(table.define("y", "int", SymbolKind::Field), 1);
    assert_eq!(table.define("total", "int", SymbolKind::Static), 1);

    assert_eq!(table.index_of("count"), Ok(0));
    assert_eq!(table.index_of("total"), Ok(1));
    assert_eq!(table.index_of("x"), Ok(0));
    assert_eq!(table.index_of("y"), Ok(1));
    assert_eq!(table.var_count(SymbolKind::Field), 2);
    assert_eq!(table.var_count(SymbolKind::Static), 2);
}

#[test]
fn test_indices_follow_declaration_order() {
    let mut table = SymbolTable::new();
    table.start_subroutine();

    let names = ["a", "b", "c", "d", "e"];
    for name in names {
        table.define(name, "int", SymbolKind::Local);
    }
    table.define("arg", "int", SymbolKind::Argument);

    for (expected, name) in names.iter().enumerate() {
        assert_eq!(table.index_of(name), Ok(expected as u16));
    }
    assert_eq!(table.index_of("arg"), Ok(0));
    assert_eq!(table.var_count(SymbolKind::Local), 5);
}

#[test]
fn test_kind_and_type_lookup() {
    let mut table = SymbolTable::new();
    table.define("game", "Game", SymbolKind::Field);
    table.start_subroutine();
    table.define("i", "int", SymbolKind::Local);

    assert_eq!(table.kind_of("game"), Some(SymbolKind::Field));
    assert_eq!(table.type_of("game"), Ok("Game"));
    assert_eq!(table.kind_of("i"), Some(SymbolKind::Local));
    assert_eq!(table.type_of("i"), Ok("int"));
    assert_eq!(table.kind_of("missing"), None);
}

#[test]
fn test_undefined_symbol() {
    let table = SymbolTable::new();

    assert_eq!(
        table.type_of("ghost"),
        Err(ErrorImpl::UndefinedSymbol {
            name: "ghost".to_string()
        })
    );
    assert!(table.index_of("ghost").is_err());
}

#[test]
fn test_subroutine_scope_shadows_class_scope() {
    let mut table = SymbolTable::new();
    table.define("x", "int", SymbolKind::Field);
    table.start_subroutine();
    table.define("x", "boolean", SymbolKind::Argument);

    assert_eq!(table.kind_of("x"), Some(SymbolKind::Argument));
    assert_eq!(table.type_of("x"), Ok("boolean"));

    table.start_subroutine();
    assert_eq!(table.kind_of("x"), Some(SymbolKind::Field));
    assert_eq!(table.type_of("x"), Ok("int"));
}

#[test]
fn test_argument_found_before_local() {
    let mut table = SymbolTable::new();
    table.start_subroutine();
    table.define("v", "int", SymbolKind::Local);
    table.define("v", "char", SymbolKind::Argument);

    assert_eq!(table.kind_of("v"), Some(SymbolKind::Argument));
}

#[test]
fn test_start_subroutine_discards_previous_scope() {
    let mut table = SymbolTable::new();
    table.define("s", "int", SymbolKind::Static);
    table.start_subroutine();
    table.define("a", "int", SymbolKind::Argument);
    table.define("l", "int", SymbolKind::Local);

    table.start_subroutine();
    table.start_subroutine();

    assert_eq!(table.kind_of("a"), None);
    assert_eq!(table.kind_of("l"), None);
    assert_eq!(table.kind_of("s"), Some(SymbolKind::Static));
    assert_eq!(table.var_count(SymbolKind::Argument), 0);
    assert_eq!(table.define("b", "int", SymbolKind::Argument), 0);
}

#[test]
fn test_method_this_takes_argument_zero() {
    let mut table = SymbolTable::new();
    table.define("x", "int", SymbolKind::Field);
    table.define("y", "int", SymbolKind::Field);

    table.start_subroutine();
    table.define("this", "Point", SymbolKind::Argument);
    table.define("v", "int", SymbolKind::Argument);

    assert_eq!(table.kind_of("this"), Some(SymbolKind::Argument));
    assert_eq!(table.index_of("this"), Ok(0));
    assert_eq!(table.index_of("v"), Ok(1));
    assert_eq!(table.type_of("this"), Ok("Point"));
}

#[test]
fn test_is_empty() {
    let mut table = SymbolTable::new();
    assert!(table.is_empty());

    table.start_subroutine();
    assert!(table.is_empty());

    table.define("i", "int", SymbolKind::Local);
    assert!(!table.is_empty());
}

#[test]
fn test_kind_scopes() {
    assert_eq!(SymbolKind::Static.scope(), ScopeKind::Class);
    assert_eq!(SymbolKind::Field.scope(), ScopeKind::Class);
    assert_eq!(SymbolKind::Argument.scope(), ScopeKind::Subroutine);
    assert_eq!(SymbolKind::Local.scope(), ScopeKind::Subroutine);
}
