//! XML token → text serialization for the decoder side.
//!
//! Streaming: every token is appended to the output immediately, so a
//! failed decode still yields the prefix serialized so far, and an unclosed
//! element at end of input is visible as an open tag. Start tags are always
//! written in full form (`<doc></doc>`, never `<doc/>`).

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape};

use crate::token::{Attribute, Name};

/// Accumulating token serializer.
#[derive(Default)]
pub struct XmlSerializer {
    out: String,
}

impl XmlSerializer {
    /// Creates an empty serializer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a start tag with its attributes.
    pub fn start_element(&mut self, name: &Name, attributes: &[Attribute]) {
        self.out.push('<');
        self.push_name(name);
        for attr in attributes {
            self.out.push(' ');
            self.push_name(&attr.name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attribute(&attr.value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    /// Appends the end tag for `name`.
    pub fn end_element(&mut self, name: &Name) {
        self.out.push_str("</");
        self.push_name(name);
        self.out.push('>');
    }

    /// Appends escaped character data.
    pub fn char_data(&mut self, text: &str) {
        self.out.push_str(&escape_text(text));
    }

    /// Appends a comment (comment content is never escaped).
    pub fn comment(&mut self, text: &str) {
        self.out.push_str("<!--");
        self.out.push_str(text);
        self.out.push_str("-->");
    }

    fn push_name(&mut self, name: &Name) {
        if name.is_prefixed() {
            self.out.push_str(&name.prefix);
            self.out.push(':');
        }
        self.out.push_str(&name.local);
    }

    /// Bisher serialisierter Text (für Partial Output bei Fehlern).
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Returns the serialized document.
    pub fn into_string(self) -> String {
        self.out
    }
}

/// `&`, `<`, `>` in character data.
fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Zusätzlich `"` und `'` in Attributwerten.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value)
}
