//! file: core/src/ir/printer.rs
//! description: textual rendering of operator trees.
//!
//! Produces the generic-operator form:
//!
//! ```text
//! %0 = "py.binOp"(%x, %y) {op="add"} : (!_.int, !_.int) -> !_.Any
//! ```
//!
//! Nested regions are printed inside `({ ... }, { ... })` with four spaces
//! of indentation per level. Attribute keys are sorted, so rendering the
//! same tree always yields the same text.
//!
use std::fmt::{self, Write};

use super::op::{AttrValue, Block, Operator, Region};

const INDENT: &str = "    ";

/// Render an operator tree to text.
pub fn render_ir(op: &Operator) -> String {
    let mut printer = Printer::new();
    printer.render_operator(op, "");
    printer.finish()
}

/// Accumulates rendered text. Writing into a `String` cannot fail, so the
/// `fmt::Result`s below are discarded.
pub struct Printer {
    out: String,
}

impl Printer {
    pub fn new() -> Self {
        Printer { out: String::new() }
    }

    pub fn finish(self) -> String {
        self.out
    }

    pub fn render_operator(&mut self, op: &Operator, indent: &str) {
        self.out.push_str(indent);
        if !op.return_names.is_empty() {
            let names: Vec<&str> = op.return_names.iter().map(|v| v.as_str()).collect();
            let _ = write!(self.out, "{} = ", names.join(", "));
        }
        let args: Vec<&str> = op.arguments.iter().map(|v| v.as_str()).collect();
        let _ = write!(self.out, "\"{}\"({})", op.opcode(), args.join(", "));

        self.render_regions(&op.regions, indent);

        if !op.attributes.is_empty() {
            self.out.push(' ');
            self.render_attributes(op);
        }

        let arg_types: Vec<String> = op.argument_types.iter().map(|t| t.to_string()).collect();
        let _ = write!(self.out, " : ({}) -> ", arg_types.join(", "));
        if op.return_names.is_empty() {
            self.out.push_str("()");
        } else if op.return_types.is_empty() {
            let defaults = vec!["!_.Any"; op.return_names.len()];
            self.out.push_str(&defaults.join(", "));
        } else {
            let ret: Vec<String> = op.return_types.iter().map(|t| t.to_string()).collect();
            self.out.push_str(&ret.join(", "));
        }
    }

    fn render_regions(&mut self, regions: &[Region], indent: &str) {
        if regions.is_empty() {
            return;
        }
        self.out.push_str(" (");
        for (i, region) in regions.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.render_region(region, indent);
        }
        self.out.push(')');
    }

    fn render_region(&mut self, region: &Region, indent: &str) {
        self.out.push_str("{\n");
        for block in &region.blocks {
            self.render_block(block, indent);
        }
        self.out.push_str(indent);
        self.out.push('}');
    }

    fn render_block(&mut self, block: &Block, indent: &str) {
        if let Some(label) = &block.label {
            let params: Vec<String> = label.params.iter().map(|(v, t)| format!("{}: {}", v, t)).collect();
            let _ = writeln!(self.out, "{}{}({}):", indent, label.name, params.join(", "));
        }
        let nested = format!("{}{}", indent, INDENT);
        for op in &block.items {
            self.render_operator(op, &nested);
            self.out.push('\n');
        }
    }

    fn render_attributes(&mut self, op: &Operator) {
        let mut keys: Vec<&String> = op.attributes.keys().collect();
        keys.sort();
        self.out.push('{');
        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "{}={}", key, op.attributes[key]);
        }
        self.out.push('}');
    }
}

impl Default for Printer {
    fn default() -> Self {
        Printer::new()
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "\"{}\"", escape(s)),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::BigInt(digits) => write!(f, "{}", digits),
            AttrValue::Float(v) => write!(f, "{:?}", v),
            AttrValue::Bool(v) => write!(f, "{}", v),
            AttrValue::Unit => write!(f, "unit"),
            AttrValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            AttrValue::FunctionType(ft) => write!(f, "{}", ft),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_ir(self))
    }
}
