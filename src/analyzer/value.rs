//! Attribute Values
//!
//! The statically evaluated value of a top-level Python binding. Anything
//! the evaluator cannot reduce is kept as [`AttrValue::Opaque`] so lookups
//! still see that the attribute exists.

/// Python sequence flavour, only relevant for textual rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    Tuple,
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    /// Float literal, kept as its source text
    Float(String),
    Bool(bool),
    /// Python `None`
    Null,
    Seq { kind: SeqKind, items: Vec<AttrValue> },
    /// A zero-argument callable with its return value, when it could be
    /// evaluated
    Callable(Option<Box<AttrValue>>),
    Opaque,
}

impl AttrValue {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    pub fn tuple(items: Vec<AttrValue>) -> Self {
        Self::Seq {
            kind: SeqKind::Tuple,
            items,
        }
    }

    pub fn list(items: Vec<AttrValue>) -> Self {
        Self::Seq {
            kind: SeqKind::List,
            items,
        }
    }

    pub fn callable(returns: Option<AttrValue>) -> Self {
        Self::Callable(returns.map(Box::new))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    /// Invoke with no arguments. Values that are not callable are returned
    /// as they are.
    pub fn call(&self) -> AttrValue {
        match self {
            Self::Callable(Some(ret)) => (**ret).clone(),
            Self::Callable(None) => Self::Opaque,
            other => other.clone(),
        }
    }

    /// Textual form, as Python's `str()` would render it
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            other => other.to_repr(),
        }
    }

    /// Literal form, as Python's `repr()` would render it
    pub fn to_repr(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(quote_str(s)),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(text) => Some(text.clone()),
            Self::Bool(true) => Some("True".to_string()),
            Self::Bool(false) => Some("False".to_string()),
            Self::Null => Some("None".to_string()),
            Self::Seq { kind, items } => {
                let parts = items
                    .iter()
                    .map(AttrValue::to_repr)
                    .collect::<Option<Vec<_>>>()?;
                let body = parts.join(", ");
                Some(match kind {
                    SeqKind::List => format!("[{}]", body),
                    SeqKind::Tuple if parts.len() == 1 => format!("({},)", body),
                    SeqKind::Tuple => format!("({})", body),
                })
            }
            Self::Callable(_) | Self::Opaque => None,
        }
    }
}

/// Quote a string the way Python's `repr()` does for plain text
pub fn quote_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
