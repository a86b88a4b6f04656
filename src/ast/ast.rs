use std::fmt::Display;

use crate::{
    lexer::tokens::{Token, TokenKind},
    symbols::SymbolKind,
};

/// Grammar productions that become interior nodes of the parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Production {
    pub fn tag(&self) -> &'static str {
        match self {
            Production::Class => "class",
            Production::ClassVarDec => "classVarDec",
            Production::SubroutineDec => "subroutineDec",
            Production::ParameterList => "parameterList",
            Production::SubroutineBody => "subroutineBody",
            Production::VarDec => "varDec",
            Production::Statements => "statements",
            Production::LetStatement => "letStatement",
            Production::IfStatement => "ifStatement",
            Production::WhileStatement => "whileStatement",
            Production::DoStatement => "doStatement",
            Production::ReturnStatement => "returnStatement",
            Production::Expression => "expression",
            Production::Term => "term",
            Production::ExpressionList => "expressionList",
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// What an identifier denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Static,
    Field,
    Argument,
    Local,
    Class,
    Subroutine,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Static => "static",
            Category::Field => "field",
            Category::Argument => "argument",
            Category::Local => "local",
            Category::Class => "class",
            Category::Subroutine => "subroutine",
        }
    }
}

impl From<SymbolKind> for Category {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Static => Category::Static,
            SymbolKind::Field => Category::Field,
            SymbolKind::Argument => Category::Argument,
            SymbolKind::Local => Category::Local,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolution metadata attached to identifier leaves.
///
/// `index` is only present for variable categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub category: Category,
    pub is_declaration: bool,
    pub index: Option<u16>,
}

impl Resolution {
    pub fn variable(kind: SymbolKind, is_declaration: bool, index: u16) -> Self {
        Resolution {
            category: kind.into(),
            is_declaration,
            index: Some(index),
        }
    }

    pub fn class(is_declaration: bool) -> Self {
        Resolution {
            category: Category::Class,
            is_declaration,
            index: None,
        }
    }

    pub fn subroutine(is_declaration: bool) -> Self {
        Resolution {
            category: Category::Subroutine,
            is_declaration,
            index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub token: Token,
    pub resolution: Option<Resolution>,
}

impl Leaf {
    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

/// A node of the parse tree. Branches keep their children in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Branch {
        production: Production,
        children: Vec<Node>,
    },
    Leaf(Leaf),
}

impl Node {
    pub fn branch(production: Production, children: Vec<Node>) -> Self {
        Node::Branch {
            production,
            children,
        }
    }

    pub fn leaf(token: Token) -> Self {
        Node::Leaf(Leaf {
            token,
            resolution: None,
        })
    }

    pub fn resolved(token: Token, resolution: Resolution) -> Self {
        Node::Leaf(Leaf {
            token,
            resolution: Some(resolution),
        })
    }

    pub fn production(&self) -> Option<Production> {
        match self {
            Node::Branch { production, .. } => Some(*production),
            Node::Leaf(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch { children, .. } => children,
            Node::Leaf(_) => &[],
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch { .. } => None,
        }
    }

    /// All leaf tokens in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Node::Leaf(leaf) => out.push(&leaf.token),
            Node::Branch { children, .. } => {
                for child in children {
                    child.collect_tokens(out);
                }
            }
        }
    }

    /// Depth-first search for every branch tagged `production`.
    pub fn find_all(&self, production: Production) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_branches(production, &mut out);
        out
    }

    fn collect_branches<'a>(&'a self, production: Production, out: &mut Vec<&'a Node>) {
        if let Node::Branch {
            production: own,
            children,
        } = self
        {
            if *own == production {
                out.push(self);
            }
            for child in children {
                child.collect_branches(production, out);
            }
        }
    }

    /// Every leaf carrying resolution metadata, in source order.
    pub fn resolved_leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        self.collect_resolved(&mut out);
        out
    }

    fn collect_resolved<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            Node::Leaf(leaf) if leaf.resolution.is_some() => out.push(leaf),
            Node::Leaf(_) => {}
            Node::Branch { children, .. } => {
                for child in children {
                    child.collect_resolved(out);
                }
            }
        }
    }
}
