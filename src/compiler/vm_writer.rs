use super::emitter::{Command, Emitter, Segment};

/// Emitter that renders the stack-machine text format, one command per line.
#[derive(Debug, Default, Clone)]
pub struct VmWriter {
    lines: Vec<String>,
}

impl VmWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The program text, newline-terminated.
    pub fn output(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn write(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl Emitter for VmWriter {
    fn push_value(&mut self, segment: Segment, index: u16) {
        self.write(format!("push {} {}", segment, index));
    }

    fn pop_value(&mut self, segment: Segment, index: u16) {
        self.write(format!("pop {} {}", segment, index));
    }

    fn apply_operator(&mut self, command: Command) {
        self.write(command.to_string());
    }

    fn define_label(&mut self, name: &str) {
        self.write(format!("label {}", name));
    }

    fn jump(&mut self, label: &str) {
        self.write(format!("goto {}", label));
    }

    // The machine only has a jump-if-true, so the condition is inverted first.
    fn jump_if_false(&mut self, label: &str) {
        self.apply_operator(Command::Not);
        self.write(format!("if-goto {}", label));
    }

    fn call(&mut self, name: &str, arg_count: u16) {
        self.write(format!("call {} {}", name, arg_count));
    }

    fn declare_function(&mut self, name: &str, local_count: u16) {
        self.write(format!("function {} {}", name, local_count));
    }

    fn return_from_function(&mut self) {
        self.write(String::from("return"));
    }
}
