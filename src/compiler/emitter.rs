//! The instruction-set interface the parser drives while it walks a class.

use std::fmt::Display;

use crate::symbols::SymbolKind;

/// Memory segments of the stack machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

impl From<SymbolKind> for Segment {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Static => Segment::Static,
            SymbolKind::Field => Segment::This,
            SymbolKind::Argument => Segment::Argument,
            SymbolKind::Local => Segment::Local,
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Arithmetic and logical stack commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Sub => "sub",
            Command::Neg => "neg",
            Command::Eq => "eq",
            Command::Gt => "gt",
            Command::Lt => "lt",
            Command::And => "and",
            Command::Or => "or",
            Command::Not => "not",
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sink for generated instructions.
///
/// The parser only promises to call these in evaluation order; what an
/// implementation does with them is its own business.
pub trait Emitter {
    fn push_value(&mut self, segment: Segment, index: u16);
    fn pop_value(&mut self, segment: Segment, index: u16);
    fn apply_operator(&mut self, command: Command);
    fn define_label(&mut self, name: &str);
    fn jump(&mut self, label: &str);
    /// Pops the top of the stack and jumps when it is false (zero).
    fn jump_if_false(&mut self, label: &str);
    fn call(&mut self, name: &str, arg_count: u16);
    fn declare_function(&mut self, name: &str, local_count: u16);
    fn return_from_function(&mut self);
}

/// Discards everything. Used when only the parse tree is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEmitter;

impl Emitter for NullEmitter {
    fn push_value(&mut self, _segment: Segment, _index: u16) {}
    fn pop_value(&mut self, _segment: Segment, _index: u16) {}
    fn apply_operator(&mut self, _command: Command) {}
    fn define_label(&mut self, _name: &str) {}
    fn jump(&mut self, _label: &str) {}
    fn jump_if_false(&mut self, _label: &str) {}
    fn call(&mut self, _name: &str, _arg_count: u16) {}
    fn declare_function(&mut self, _name: &str, _local_count: u16) {}
    fn return_from_function(&mut self) {}
}
