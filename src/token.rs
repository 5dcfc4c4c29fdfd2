//! XML token model shared by both codec directions.
//!
//! Deliberately namespace-UNAWARE: a prefix is the part of a qualified name
//! before the first `:`, nothing is resolved against declarations, and
//! `xmlns`/`xmlns:p` travel as ordinary attributes. This mirrors the wire
//! format, which stores prefixes literally.

/// A possibly-prefixed XML name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Prefix before the first `:`, empty for unprefixed names.
    pub prefix: String,
    /// Local part.
    pub local: String,
}

impl Name {
    /// Name with an explicit prefix.
    pub fn new(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
        }
    }

    /// Unprefixed name.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            local: local.into(),
        }
    }

    /// True when a prefix is present.
    pub fn is_prefixed(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Serialized form: `prefix:local` or bare `local`.
    pub fn qualified(&self) -> String {
        if self.prefix.is_empty() {
            self.local.clone()
        } else {
            format!("{}:{}", self.prefix, self.local)
        }
    }
}

/// One attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: Name,
    pub value: String,
}

impl Attribute {
    pub fn new(name: Name, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// One XML token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    StartElement {
        name: Name,
        attributes: Vec<Attribute>,
    },
    EndElement,
    CharData(String),
    Comment(String),
}
