/// Parse tree module
/// Contains the annotated syntax tree produced by the parser
///
/// Submodules:
/// - ast: Node, Production and identifier resolution types
/// - render: XML-like rendering of trees and token dumps
pub mod ast;
pub mod render;

pub use ast::{Category, Leaf, Node, Production, Resolution};
pub use render::{render_tokens, render_tree, RenderOptions};
