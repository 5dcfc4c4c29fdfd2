//! NBFX stream encoder.
//!
//! Reads XML tokens and writes one record per token, choosing the most
//! compact opcode the dictionary allows. Character data uses a one-token
//! lookahead: if the next token is the closing tag, the text record's
//! with-end variant swallows it. The lookahead is a single pushback slot —
//! at most one token is ever held.
//!
//! Empty character data followed by a closing tag is written as a plain
//! EndElement instead of EmptyTextWithEndElement (0xA9); both are one byte,
//! and the decoder's output is identical.

use std::io::Read;
use std::rc::Rc;

use log::trace;

use crate::bytestream::ByteWriter;
use crate::dictionary::{self, Dictionary};
use crate::records::{
    self, prefix_index, AttributeKind, ElementKind, RecordKind, TextKind,
};
use crate::string;
use crate::token::{Attribute, Name, XmlToken};
use crate::typed_value;
use crate::xml::XmlTokenReader;
use crate::{Error, Result};

/// An encode failure together with the bytes produced before the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    /// Bis zum Fehler geschriebene Bytes.
    pub partial: Vec<u8>,
    /// Die eigentliche Fehlerursache.
    pub error: Error,
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// XML → NBFX encoder.
///
/// Holds only the shared dictionary; per-call state (token buffer, output)
/// lives inside [`Encoder::encode`], so one encoder can be reused and
/// cloned cheaply.
#[derive(Clone, Default)]
pub struct Encoder {
    dict: Rc<Dictionary>,
}

impl Encoder {
    /// Encoder with an empty dictionary (raw NBFX).
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with a caller-supplied dictionary (e.g. the NBFS table).
    pub fn with_dictionary<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: AsRef<str>,
    {
        Self {
            dict: Rc::new(Dictionary::from_entries(entries)),
        }
    }

    pub(crate) fn from_dictionary(dict: Dictionary) -> Self {
        Self { dict: Rc::new(dict) }
    }

    /// Consumes the XML token stream read from `xml` and returns the
    /// encoded bytes.
    ///
    /// On failure the [`EncodeError`] carries the bytes written so far.
    pub fn encode(&self, xml: impl Read) -> std::result::Result<Vec<u8>, EncodeError> {
        let mut session = Session {
            tokens: XmlTokenReader::new(xml),
            lookahead: None,
            writer: ByteWriter::new(),
            dict: self.dict.as_ref(),
        };
        match session.run() {
            Ok(()) => Ok(session.writer.into_vec()),
            Err(error) => Err(EncodeError {
                partial: session.writer.into_vec(),
                error,
            }),
        }
    }
}

struct Session<'d, R: Read> {
    tokens: XmlTokenReader<R>,
    /// Single-slot pushback for the fusion lookahead.
    lookahead: Option<XmlToken>,
    writer: ByteWriter,
    dict: &'d Dictionary,
}

impl<R: Read> Session<'_, R> {
    fn run(&mut self) -> Result<()> {
        while let Some(token) = self.next_token()? {
            match token {
                XmlToken::StartElement { name, attributes } => {
                    self.encode_start_element(&name, &attributes)?;
                }
                XmlToken::EndElement => self.writer.write_u8(records::END_ELEMENT),
                XmlToken::CharData(text) => self.encode_char_data(&text)?,
                XmlToken::Comment(text) => self.encode_comment(&text)?,
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<XmlToken>> {
        match self.lookahead.take() {
            Some(token) => Ok(Some(token)),
            None => self.tokens.next_token(),
        }
    }

    fn push_back(&mut self, token: XmlToken) {
        debug_assert!(self.lookahead.is_none(), "pushback slot already occupied");
        self.lookahead = Some(token);
    }

    fn encode_start_element(&mut self, name: &Name, attributes: &[Attribute]) -> Result<()> {
        let kind = self.select_element(name);
        trace!("start element {} as {}", name.qualified(), RecordKind::Element(kind).name());
        self.writer.write_u8(RecordKind::Element(kind).opcode());
        match kind {
            ElementKind::Short => string::write_string(&mut self.writer, &name.local)?,
            ElementKind::Full => {
                string::write_string(&mut self.writer, &name.prefix)?;
                string::write_string(&mut self.writer, &name.local)?;
            }
            ElementKind::ShortDictionary => {
                dictionary::write_string(&mut self.writer, self.dict, &name.local)?;
            }
            ElementKind::Dictionary => {
                string::write_string(&mut self.writer, &name.prefix)?;
                dictionary::write_string(&mut self.writer, self.dict, &name.local)?;
            }
            ElementKind::PrefixDictionary(_) => {
                dictionary::write_string(&mut self.writer, self.dict, &name.local)?;
            }
            ElementKind::Prefix(_) => string::write_string(&mut self.writer, &name.local)?,
        }
        for attribute in attributes {
            self.encode_attribute(attribute)?;
        }
        Ok(())
    }

    fn select_element(&self, name: &Name) -> ElementKind {
        let dict_name = self.dict.addressable(&name.local);
        if name.prefix.is_empty() {
            if dict_name {
                ElementKind::ShortDictionary
            } else {
                ElementKind::Short
            }
        } else if let Some(index) = prefix_index(&name.prefix) {
            if dict_name {
                ElementKind::PrefixDictionary(index)
            } else {
                ElementKind::Prefix(index)
            }
        } else if dict_name {
            ElementKind::Dictionary
        } else {
            ElementKind::Full
        }
    }

    fn encode_attribute(&mut self, attribute: &Attribute) -> Result<()> {
        let kind = self.select_attribute(attribute);
        self.writer.write_u8(RecordKind::Attribute(kind).opcode());
        let name = &attribute.name;
        match kind {
            AttributeKind::Short => {
                string::write_string(&mut self.writer, &name.local)?;
                self.encode_attribute_value(&attribute.value)?;
            }
            AttributeKind::Full => {
                string::write_string(&mut self.writer, &name.prefix)?;
                string::write_string(&mut self.writer, &name.local)?;
                self.encode_attribute_value(&attribute.value)?;
            }
            AttributeKind::ShortDictionary => {
                dictionary::write_string(&mut self.writer, self.dict, &name.local)?;
                self.encode_attribute_value(&attribute.value)?;
            }
            AttributeKind::Dictionary => {
                string::write_string(&mut self.writer, &name.prefix)?;
                dictionary::write_string(&mut self.writer, self.dict, &name.local)?;
                self.encode_attribute_value(&attribute.value)?;
            }
            AttributeKind::ShortXmlns => {
                string::write_string(&mut self.writer, &attribute.value)?;
            }
            AttributeKind::Xmlns => {
                string::write_string(&mut self.writer, &name.local)?;
                string::write_string(&mut self.writer, &attribute.value)?;
            }
            AttributeKind::ShortDictionaryXmlns => {
                dictionary::write_string(&mut self.writer, self.dict, &attribute.value)?;
            }
            AttributeKind::DictionaryXmlns => {
                string::write_string(&mut self.writer, &name.local)?;
                dictionary::write_string(&mut self.writer, self.dict, &attribute.value)?;
            }
            AttributeKind::PrefixDictionary(_) => {
                dictionary::write_string(&mut self.writer, self.dict, &name.local)?;
                self.encode_attribute_value(&attribute.value)?;
            }
            AttributeKind::Prefix(_) => {
                string::write_string(&mut self.writer, &name.local)?;
                self.encode_attribute_value(&attribute.value)?;
            }
        }
        Ok(())
    }

    fn select_attribute(&self, attribute: &Attribute) -> AttributeKind {
        let name = &attribute.name;
        let is_xmlns =
            name.prefix == "xmlns" || (name.prefix.is_empty() && name.local == "xmlns");
        let dict_name = self.dict.addressable(&name.local);
        let dict_value = self.dict.addressable(&attribute.value);
        if name.prefix.is_empty() {
            if is_xmlns {
                if dict_value {
                    AttributeKind::ShortDictionaryXmlns
                } else {
                    AttributeKind::ShortXmlns
                }
            } else if dict_name {
                AttributeKind::ShortDictionary
            } else {
                AttributeKind::Short
            }
        } else if let Some(index) = prefix_index(&name.prefix) {
            if dict_name {
                AttributeKind::PrefixDictionary(index)
            } else {
                AttributeKind::Prefix(index)
            }
        } else if is_xmlns {
            if dict_value {
                AttributeKind::DictionaryXmlns
            } else {
                AttributeKind::Xmlns
            }
        } else if dict_name {
            AttributeKind::Dictionary
        } else {
            AttributeKind::Full
        }
    }

    /// Attribute values are always the plain text record (never with-end).
    fn encode_attribute_value(&mut self, value: &str) -> Result<()> {
        let kind = typed_value::classify(value, self.dict)?;
        self.writer.write_u8(kind.base_opcode());
        typed_value::write_payload(kind, &mut self.writer, self.dict, value)
    }

    /// Character data with the fusion lookahead: a following EndElement is
    /// folded into the record's with-end variant and consumed.
    fn encode_char_data(&mut self, text: &str) -> Result<()> {
        let with_end = match self.next_token()? {
            Some(XmlToken::EndElement) => true,
            Some(other) => {
                self.push_back(other);
                false
            }
            None => false,
        };
        let kind = typed_value::classify(text, self.dict)?;
        if kind == TextKind::Empty && with_end {
            // <doc></doc> statt EmptyTextWithEndElement; gleiche Länge.
            self.writer.write_u8(records::END_ELEMENT);
            return Ok(());
        }
        trace!("text as {}{}", kind.name(), if with_end { "+end" } else { "" });
        self.writer.write_u8(kind.base_opcode() | u8::from(with_end));
        typed_value::write_payload(kind, &mut self.writer, self.dict, text)
    }

    fn encode_comment(&mut self, text: &str) -> Result<()> {
        self.writer.write_u8(records::COMMENT);
        string::write_string(&mut self.writer, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(xml: &str) -> std::result::Result<Vec<u8>, EncodeError> {
        Encoder::new().encode(xml.as_bytes())
    }

    fn encode_ok(xml: &str) -> Vec<u8> {
        encode(xml).unwrap()
    }

    #[test]
    fn short_element() {
        assert_eq!(encode_ok("<doc></doc>"), [0x40, 0x03, 0x64, 0x6F, 0x63, 0x01]);
    }

    #[test]
    fn fusion_folds_end_element() {
        assert_eq!(encode_ok("<abc>true</abc>"), [0x40, 0x03, 0x61, 0x62, 0x63, 0x87]);
        assert_eq!(encode_ok("<abc>0</abc>"), [0x40, 0x03, 0x61, 0x62, 0x63, 0x81]);
    }

    /// Text NOT followed by an end tag keeps the plain variant, and the
    /// peeked token is pushed back intact.
    #[test]
    fn no_fusion_before_sibling() {
        assert_eq!(
            encode_ok("<a>x<b></b></a>"),
            [0x40, 0x01, 0x61, 0x98, 0x01, 0x78, 0x40, 0x01, 0x62, 0x01, 0x01]
        );
    }

    #[test]
    fn comment_between_text_and_end_blocks_fusion() {
        assert_eq!(
            encode_ok("<a>x<!--c--></a>"),
            [0x40, 0x01, 0x61, 0x98, 0x01, 0x78, 0x02, 0x01, 0x63, 0x01]
        );
    }

    /// Empty elements never use EmptyTextWithEndElement.
    #[test]
    fn empty_element_is_start_plus_end() {
        assert_eq!(encode_ok("<doc/>"), [0x40, 0x03, 0x64, 0x6F, 0x63, 0x01]);
    }

    #[test]
    fn prefix_dictionary_element() {
        let encoder = Encoder::with_dictionary([(2u32, "Foo")]);
        assert_eq!(encoder.encode("<b:Foo>".as_bytes()).unwrap(), [0x45, 0x02]);
        assert_eq!(encoder.encode("<s:Foo>".as_bytes()).unwrap(), [0x56, 0x02]);
    }

    #[test]
    fn str_literal_addresses_dictionary() {
        assert_eq!(encode_ok("<str14></str14>"), [0x42, 0x0E, 0x01]);
    }

    #[test]
    fn multi_char_prefix_uses_full_forms() {
        assert_eq!(
            encode_ok("<pre:doc></pre:doc>"),
            [0x41, 0x03, 0x70, 0x72, 0x65, 0x03, 0x64, 0x6F, 0x63, 0x01]
        );
        let encoder = Encoder::with_dictionary([(14u32, "doc")]);
        assert_eq!(
            encoder.encode("<pre:doc></pre:doc>".as_bytes()).unwrap(),
            [0x43, 0x03, 0x70, 0x72, 0x65, 0x0E, 0x01]
        );
    }

    #[test]
    fn xmlns_selection() {
        // literal value
        assert_eq!(
            encode_ok("<doc xmlns=\"http://abc\"></doc>"),
            [
                0x40, 0x03, 0x64, 0x6F, 0x63, 0x08, 0x0A, 0x68, 0x74, 0x74, 0x70, 0x3A, 0x2F,
                0x2F, 0x61, 0x62, 0x63, 0x01
            ]
        );
        // str<N> value picks the dictionary form
        assert_eq!(
            encode_ok("<doc xmlns=\"str4\"></doc>"),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x0A, 0x04, 0x01]
        );
        assert_eq!(
            encode_ok("<doc xmlns:p=\"str4\"></doc>"),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x0B, 0x01, 0x70, 0x04, 0x01]
        );
    }

    /// Dictionary-xmlns selection keys off the VALUE, for the prefixed form
    /// too.
    #[test]
    fn xmlns_dictionary_value_hit() {
        let encoder = Encoder::with_dictionary([(4u32, "http://abc")]);
        assert_eq!(
            encoder.encode("<doc xmlns:p=\"http://abc\"></doc>".as_bytes()).unwrap(),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x0B, 0x01, 0x70, 0x04, 0x01]
        );
    }

    #[test]
    fn attribute_families() {
        // ShortAttribute
        assert_eq!(
            encode_ok("<doc attr=\"false\"></doc>"),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x04, 0x04, 0x61, 0x74, 0x74, 0x72, 0x84, 0x01]
        );
        // PrefixAttributeK
        assert_eq!(
            encode_ok("<doc k:attr=\"true\"></doc>"),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x30, 0x04, 0x61, 0x74, 0x74, 0x72, 0x86, 0x01]
        );
        // ShortDictionaryAttribute über str<N>
        assert_eq!(
            encode_ok("<doc str8=\"true\"></doc>"),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x06, 0x08, 0x86, 0x01]
        );
    }

    #[test]
    fn dictionary_keys_use_varint() {
        assert_eq!(
            encode_ok("<doc str416=\"0\"></doc>"),
            [0x40, 0x03, 0x64, 0x6F, 0x63, 0x06, 0xA0, 0x03, 0x80, 0x01]
        );
    }

    #[test]
    fn comment_document() {
        assert_eq!(
            encode_ok("<!--comment-->"),
            [0x02, 0x07, 0x63, 0x6F, 0x6D, 0x6D, 0x65, 0x6E, 0x74]
        );
    }

    #[test]
    fn malformed_xml_reports_parse_error() {
        let err = encode("<doc").unwrap_err();
        assert!(matches!(err.error, Error::XmlParse(_)));
    }

    /// Partial bytes survive a mid-stream failure.
    #[test]
    fn partial_output_on_error() {
        let err = encode("<doc>&nope;</doc>").unwrap_err();
        assert_eq!(err.partial, [0x40, 0x03, 0x64, 0x6F, 0x63]);
        assert!(matches!(err.error, Error::XmlParse(_)));
    }

    #[test]
    fn encoder_is_reusable() {
        let encoder = Encoder::new();
        assert_eq!(encoder.encode("<a/>".as_bytes()).unwrap(), [0x40, 0x01, 0x61, 0x01]);
        assert_eq!(encoder.encode("<b/>".as_bytes()).unwrap(), [0x40, 0x01, 0x62, 0x01]);
    }
}
