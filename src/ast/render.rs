//! XML-like rendering of parse trees and token dumps.

use crate::lexer::tokens::Token;

use super::ast::{Leaf, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attach `category`, `declaration` and `index` attributes to
    /// identifier leaves.
    pub annotate: bool,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            annotate: true,
            indent: 2,
        }
    }
}

pub fn render_tree(node: &Node, options: &RenderOptions) -> String {
    let mut out = String::new();
    render_node(node, options, 0, &mut out);
    out
}

fn render_node(node: &Node, options: &RenderOptions, depth: usize, out: &mut String) {
    let padding = " ".repeat(depth * options.indent);

    match node {
        Node::Leaf(leaf) => {
            out.push_str(&padding);
            out.push_str(&render_leaf(leaf, options.annotate));
            out.push('\n');
        }
        Node::Branch {
            production,
            children,
        } => {
            out.push_str(&format!("{}<{}>\n", padding, production.tag()));
            for child in children {
                render_node(child, options, depth + 1, out);
            }
            out.push_str(&format!("{}</{}>\n", padding, production.tag()));
        }
    }
}

fn render_leaf(leaf: &Leaf, annotate: bool) -> String {
    let tag = leaf.kind().tag();
    let text = leaf.token.rendered_text();

    match leaf.resolution {
        Some(resolution) if annotate => {
            let index = match resolution.index {
                Some(index) => format!(" index=\"{}\"", index),
                None => String::new(),
            };
            format!(
                "<{} category=\"{}\" declaration=\"{}\"{}> {} </{}>",
                tag, resolution.category, resolution.is_declaration, index, text, tag
            )
        }
        _ => format!("<{}> {} </{}>", tag, text, tag),
    }
}

/// Flat token dump wrapped in `<tokens>`.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::from("<tokens>\n");
    for token in tokens {
        let tag = token.kind().tag();
        out.push_str(&format!("<{}> {} </{}>\n", tag, token.rendered_text(), tag));
    }
    out.push_str("</tokens>\n");
    out
}
