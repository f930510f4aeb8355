use std::fmt;

/// Name of one SSA-produced or block-parameter value, sigil included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(String);

impl ValueId {
    pub fn new(name: impl Into<String>) -> Self {
        ValueId(name.into())
    }

    /// `%name`: first definition of a variable, or a block parameter.
    pub fn named(var: &str) -> Self {
        ValueId(format!("%{}", var))
    }

    /// `%name.n`: a later definition or a load of `var`.
    pub fn versioned(var: &str, n: usize) -> Self {
        ValueId(format!("%{}.{}", var, n))
    }

    /// `%n`: an anonymous expression result.
    pub fn numbered(n: usize) -> Self {
        ValueId(format!("%{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Printable type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleType {
    /// No value.
    Unit,
    Named(String),
    /// Subscripted annotation such as `List[int]`.
    Generic { ctor: String, args: Vec<SimpleType> },
    Unknown,
}

impl SimpleType {
    pub fn named(name: &str) -> Self {
        SimpleType::Named(name.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SimpleType::Unknown)
    }
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleType::Unit => write!(f, "()"),
            SimpleType::Named(name) => write!(f, "!_.{}", name),
            SimpleType::Generic { ctor, args } => {
                write!(f, "!_.{}<", ctor)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            SimpleType::Unknown => write!(f, "!_.Any"),
        }
    }
}
