//! Integration tests for end-to-end compilation.
//!
//! These tests run complete Jack classes through the public pipeline:
//! tokenization, parsing with symbol annotation, VM generation and
//! rendering.

use jackc::{
    analyze,
    ast::{render_tokens, render_tree, Production, RenderOptions},
    compile, format_error, ErrorKind,
};

const SQUARE: &str = r#"
/** A square on the screen. */
class Square {
    field int x, y;
    field int size;
    static int created;

    constructor Square new(int ax, int ay, int asize) {
        let x = ax;
        let y = ay;
        let size = asize;
        let created = created + 1;
        do draw();
        return this;
    }

    method void draw() {
        do Screen.setColor(true);
        do Screen.drawRectangle(x, y, x + size, y + size);
        return;
    }

    method void incSize() {
        if (((y + size) < 254) & ((x + size) < 510)) {
            do erase();
            let size = size + 2;
            do draw();
        }
        return;
    }

    method void erase() {
        do Screen.setColor(false);
        do Screen.drawRectangle(x, y, x + size, y + size);
        return;
    }

    method void dispose() {
        do Memory.deAlloc(this);
        return;
    }
}
"#;

const MAIN: &str = r#"
class Main {
    function void main() {
        var Array a;
        var int length, i, sum;
        let length = Keyboard.readInt("HOW MANY NUMBERS? ");
        let a = Array.new(length);
        let i = 0;
        while (i < length) {
            let a[i] = Keyboard.readInt("ENTER THE NEXT NUMBER: ");
            let i = i + 1;
        }
        let i = 0;
        let sum = 0;
        while (i < length) {
            let sum = sum + a[i];
            let i = i + 1;
        }
        do Output.printString("THE AVERAGE IS: ");
        do Output.printInt(sum / length);
        do Output.println();
        return;
    }
}
"#;

#[test]
fn test_compile_square() {
    let unit = compile(SQUARE.to_string(), Some("Square.jack".to_string())).unwrap();

    assert_eq!(unit.class_name, "Square");
    assert_eq!(unit.tree.find_all(Production::SubroutineDec).len(), 5);

    let functions: Vec<&str> = unit
        .vm
        .lines()
        .filter(|line| line.starts_with("function "))
        .collect();
    assert_eq!(
        functions,
        [
            "function Square.new 0",
            "function Square.draw 0",
            "function Square.incSize 0",
            "function Square.erase 0",
            "function Square.dispose 0",
        ]
    );

    let vm: Vec<&str> = unit.vm.lines().collect();
    assert_eq!(
        &vm[..4],
        [
            "function Square.new 0",
            "push constant 3",
            "call Memory.alloc 1",
            "pop pointer 0",
        ]
    );
    assert!(vm.contains(&"call Screen.drawRectangle 4"));
    assert!(vm.contains(&"call Memory.deAlloc 1"));
    assert!(vm.contains(&"call Square.draw 1"));
    assert!(vm.contains(&"if-goto IF_ELSE0"));
}

#[test]
fn test_compile_average() {
    let unit = compile(MAIN.to_string(), Some("Main.jack".to_string())).unwrap();
    let vm: Vec<&str> = unit.vm.lines().collect();

    assert_eq!(vm[0], "function Main.main 4");
    assert!(vm.contains(&"call Array.new 1"));
    assert!(vm.contains(&"call Math.divide 2"));
    assert!(vm.contains(&"label WHILE_EXP1"));
    assert_eq!(vm.last(), Some(&"return"));
    assert!(unit.vm.ends_with('\n'));
}

#[test]
fn test_tree_round_trips_tokens() {
    for source in [SQUARE, MAIN] {
        let unit = analyze(source.to_string(), None).unwrap();
        let from_tree: Vec<&str> = unit.tree.tokens().iter().map(|t| t.value()).collect();
        let from_lexer: Vec<&str> = unit.tokens.iter().map(|t| t.value()).collect();
        assert_eq!(from_tree, from_lexer);
    }
}

#[test]
fn test_annotated_rendering() {
    let unit = analyze(SQUARE.to_string(), Some("Square.jack".to_string())).unwrap();
    let xml = render_tree(&unit.tree, &RenderOptions::default());

    assert!(xml.starts_with("<class>\n  <keyword> class </keyword>\n"));
    assert!(xml.contains(
        "<identifier category=\"class\" declaration=\"true\"> Square </identifier>"
    ));
    assert!(xml.contains(
        "<identifier category=\"field\" declaration=\"true\" index=\"2\"> size </identifier>"
    ));
    assert!(xml.contains(
        "<identifier category=\"static\" declaration=\"false\" index=\"0\"> created </identifier>"
    ));
    assert!(xml.contains(
        "<identifier category=\"subroutine\" declaration=\"true\"> incSize </identifier>"
    ));
    assert!(xml.contains("<symbol> &lt; </symbol>"));
    assert!(xml.contains("<symbol> &amp; </symbol>"));
    assert!(xml.ends_with("</class>\n"));
}

#[test]
fn test_plain_rendering() {
    let unit = analyze(MAIN.to_string(), None).unwrap();
    let options = RenderOptions {
        annotate: false,
        indent: 2,
    };
    let xml = render_tree(&unit.tree, &options);

    assert!(!xml.contains("category="));
    assert!(xml.contains("<identifier> sum </identifier>"));
    assert!(xml.contains("<stringConstant> THE AVERAGE IS:  </stringConstant>"));
}

#[test]
fn test_token_dump() {
    let unit = analyze("class Main { field int x; }".to_string(), None).unwrap();

    assert_eq!(
        render_tokens(&unit.tokens),
        "<tokens>\n\
         <keyword> class </keyword>\n\
         <identifier> Main </identifier>\n\
         <symbol> { </symbol>\n\
         <keyword> field </keyword>\n\
         <keyword> int </keyword>\n\
         <identifier> x </identifier>\n\
         <symbol> ; </symbol>\n\
         <symbol> } </symbol>\n\
         </tokens>\n"
    );
}

#[test]
fn test_units_are_independent() {
    let first = compile(SQUARE.to_string(), None).unwrap();
    let second = compile(MAIN.to_string(), None).unwrap();
    let again = compile(SQUARE.to_string(), None).unwrap();

    assert_eq!(first, again);
    assert_ne!(first.vm, second.vm);
}

#[test]
fn test_parallel_units() {
    let handles: Vec<_> = [SQUARE, MAIN]
        .into_iter()
        .map(|source| std::thread::spawn(move || compile(source.to_string(), None)))
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

#[test]
fn test_error_diagnostic() {
    let source = "class Main {\n  function void main() {\n    let = 5;\n  }\n}\n";
    let error = compile(source.to_string(), Some("Main.jack".to_string())).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedToken);
    let report = format_error(&error, source);
    assert!(report.contains("Main.jack"));
    assert!(report.contains("let = 5;"));
}

#[test]
fn test_integer_out_of_range() {
    let error = analyze(
        "class Main { function int f() { return 32768; } }".to_string(),
        None,
    )
    .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
}
