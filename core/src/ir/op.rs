use std::collections::HashMap;
use std::fmt;

use super::value::{SimpleType, ValueId};

/// Namespace an opcode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// Module and function scaffolding.
    Builtin,
    /// Expressions and statements of the source language.
    Py,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Builtin => write!(f, "builtin"),
            Dialect::Py => write!(f, "py"),
        }
    }
}

/// Structured `(t1, t2) -> t3` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeAttr {
    pub types: Vec<SimpleType>,
    pub returns: SimpleType,
}

impl fmt::Display for FunctionTypeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, t) in self.types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", t)?;
        }
        write!(f, ") -> {}", self.returns)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    /// Integer wider than `i64`, as decimal digits.
    BigInt(String),
    Float(f64),
    Bool(bool),
    Unit,
    List(Vec<AttrValue>),
    FunctionType(FunctionTypeAttr),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<FunctionTypeAttr> for AttrValue {
    fn from(v: FunctionTypeAttr) -> Self {
        AttrValue::FunctionType(v)
    }
}

/// Label on a function entry block; the parameters are the formals.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLabel {
    pub name: String,
    pub params: Vec<(ValueId, SimpleType)>,
}

impl BlockLabel {
    pub fn new(name: &str, params: Vec<(ValueId, SimpleType)>) -> Self {
        BlockLabel { name: name.to_string(), params }
    }
}

/// Operators in execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub items: Vec<Operator>,
    pub label: Option<BlockLabel>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    pub blocks: Vec<Block>,
}

/// A single instruction. `return_names`/`return_types` and
/// `arguments`/`argument_types` are parallel sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub name: String,
    pub dialect: Dialect,
    pub return_names: Vec<ValueId>,
    pub return_types: Vec<SimpleType>,
    pub arguments: Vec<ValueId>,
    pub argument_types: Vec<SimpleType>,
    pub attributes: HashMap<String, AttrValue>,
    pub regions: Vec<Region>,
}

impl Operator {
    pub fn new(dialect: Dialect, name: &str) -> Self {
        Operator {
            name: name.to_string(),
            dialect,
            return_names: Vec::new(),
            return_types: Vec::new(),
            arguments: Vec::new(),
            argument_types: Vec::new(),
            attributes: HashMap::new(),
            regions: Vec::new(),
        }
    }

    pub fn py(name: &str) -> Self {
        Operator::new(Dialect::Py, name)
    }

    pub fn builtin(name: &str) -> Self {
        Operator::new(Dialect::Builtin, name)
    }

    /// `dialect.name` as it appears in the printed form.
    pub fn opcode(&self) -> String {
        format!("{}.{}", self.dialect, self.name)
    }

    pub fn push_argument(&mut self, value: ValueId, ty: SimpleType) {
        self.arguments.push(value);
        self.argument_types.push(ty);
    }

    pub fn set_result(&mut self, value: ValueId, ty: SimpleType) {
        self.return_names = vec![value];
        self.return_types = vec![ty];
    }

    pub fn result(&self) -> Option<(&ValueId, &SimpleType)> {
        self.return_names.first().zip(self.return_types.first())
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Attach a new region holding one block built from `ops`.
    pub fn push_region(&mut self, ops: Vec<Operator>, label: Option<BlockLabel>) {
        let block = Block { items: ops, label };
        self.regions.push(Region { blocks: vec![block] });
    }

    /// Visit this operator and every nested operator, pre-order.
    pub fn walk<F: FnMut(&Operator)>(&self, f: &mut F) {
        f(self);
        for region in &self.regions {
            for block in &region.blocks {
                for op in &block.items {
                    op.walk(f);
                }
            }
        }
    }

    /// Operators of the first block of region `index`.
    pub fn region_ops(&self, index: usize) -> &[Operator] {
        self.regions
            .get(index)
            .and_then(|r| r.blocks.first())
            .map(|b| b.items.as_slice())
            .unwrap_or(&[])
    }
}
