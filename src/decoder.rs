//! NBFX stream decoder.
//!
//! Single pass over the byte source: read a record tag, dispatch by family,
//! emit XML tokens into the serializer. Start elements collect their
//! attribute records until a non-attribute record appears; that record is
//! carried into the next iteration instead of being re-read. Text records
//! with the with-end bit synthesize the EndElement themselves.
//!
//! Clean EOF in record position terminates decoding normally — streams are
//! not required to close their elements (a lone `56 02` decodes to
//! `<s:Envelope>`). EOF inside a payload is a truncation error, and any
//! error carries the XML serialized so far.

use std::io::Read;
use std::rc::Rc;

use log::{trace, warn};

use crate::bytestream::ByteReader;
use crate::dictionary::{self, Dictionary};
use crate::multi_byte_int31;
use crate::records::{prefix_letter, AttributeKind, ElementKind, RecordKind, TextKind};
use crate::string;
use crate::token::{Attribute, Name};
use crate::typed_value;
use crate::xml_serializer::XmlSerializer;
use crate::{Error, Result};

/// A decode failure together with the XML produced before the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Bis zum Fehler serialisiertes XML.
    pub partial: String,
    /// Die eigentliche Fehlerursache.
    pub error: Error,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// NBFX → XML decoder.
///
/// Holds only the shared dictionary; per-call state (element stack, output)
/// lives inside [`Decoder::decode`], so one decoder can be reused and
/// cloned cheaply.
#[derive(Clone, Default)]
pub struct Decoder {
    dict: Rc<Dictionary>,
}

impl Decoder {
    /// Decoder with an empty dictionary (raw NBFX).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder with a caller-supplied dictionary (e.g. the NBFS table).
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

    /// Consumes the byte source to EOF and returns the serialized XML.
    ///
    /// On failure the [`DecodeError`] carries the partial document.
    pub fn decode(&self, input: impl Read) -> std::result::Result<String, DecodeError> {
        let mut session = Session {
            reader: ByteReader::new(input),
            dict: self.dict.as_ref(),
            xml: XmlSerializer::new(),
            stack: Vec::new(),
        };
        match session.run() {
            Ok(()) => Ok(session.xml.into_string()),
            Err(error) => Err(DecodeError {
                partial: session.xml.into_string(),
                error,
            }),
        }
    }
}

/// One open element; arrays re-emit the full start tag, so attributes are
/// kept alongside the name.
#[derive(Clone)]
struct OpenElement {
    name: Name,
    attributes: Vec<Attribute>,
}

struct Session<'d, R: Read> {
    reader: ByteReader<R>,
    dict: &'d Dictionary,
    xml: XmlSerializer,
    stack: Vec<OpenElement>,
}

impl<R: Read> Session<'_, R> {
    fn run(&mut self) -> Result<()> {
        let mut pending: Option<RecordKind> = None;
        loop {
            let record = match pending.take() {
                Some(record) => record,
                None => match self.next_record()? {
                    Some(record) => record,
                    None => break,
                },
            };
            match record {
                RecordKind::Element(kind) => pending = self.decode_element(kind)?,
                RecordKind::EndElement => self.end_element()?,
                RecordKind::Text { kind, with_end } => self.decode_text(kind, with_end)?,
                RecordKind::Comment => self.decode_comment()?,
                RecordKind::Array => self.decode_array()?,
                RecordKind::Attribute(_) => {
                    return Err(Error::unexpected(
                        "element, end-element or text",
                        record.name(),
                    ));
                }
            }
        }
        if !self.stack.is_empty() {
            warn!("input ended with {} open element(s)", self.stack.len());
        }
        Ok(())
    }

    fn next_record(&mut self) -> Result<Option<RecordKind>> {
        let Some(op) = self.reader.read_opcode()? else {
            return Ok(None);
        };
        let record = RecordKind::from_opcode(op).ok_or(Error::UnknownRecord(op))?;
        trace!("record {}", record.name());
        Ok(Some(record))
    }

    fn next_record_required(&mut self) -> Result<RecordKind> {
        self.next_record()?
            .ok_or(Error::TruncatedInput { expected: 1, actual: 0 })
    }

    /// Decodes one start element: name fields, then attribute collection.
    /// The first non-attribute record is returned to the caller instead of
    /// being consumed.
    fn decode_element(&mut self, kind: ElementKind) -> Result<Option<RecordKind>> {
        let name = self.read_element_name(kind)?;
        let mut attributes = Vec::new();
        let mut carried = None;
        while let Some(record) = self.next_record()? {
            match record {
                RecordKind::Attribute(attr_kind) => {
                    attributes.push(self.decode_attribute(attr_kind)?);
                }
                other => {
                    carried = Some(other);
                    break;
                }
            }
        }
        self.xml.start_element(&name, &attributes);
        self.stack.push(OpenElement { name, attributes });
        Ok(carried)
    }

    fn read_element_name(&mut self, kind: ElementKind) -> Result<Name> {
        Ok(match kind {
            ElementKind::Short => Name::local(string::read_string(&mut self.reader)?),
            ElementKind::Full => {
                let prefix = string::read_string(&mut self.reader)?;
                let local = string::read_string(&mut self.reader)?;
                Name::new(prefix, local)
            }
            ElementKind::ShortDictionary => {
                Name::local(dictionary::read_string(&mut self.reader, self.dict)?)
            }
            ElementKind::Dictionary => {
                let prefix = string::read_string(&mut self.reader)?;
                let local = dictionary::read_string(&mut self.reader, self.dict)?;
                Name::new(prefix, local)
            }
            ElementKind::PrefixDictionary(i) => Name::new(
                prefix_letter(i).to_string(),
                dictionary::read_string(&mut self.reader, self.dict)?,
            ),
            ElementKind::Prefix(i) => Name::new(
                prefix_letter(i).to_string(),
                string::read_string(&mut self.reader)?,
            ),
        })
    }

    fn decode_attribute(&mut self, kind: AttributeKind) -> Result<Attribute> {
        Ok(match kind {
            AttributeKind::Short => {
                let local = string::read_string(&mut self.reader)?;
                let value = self.read_text_value()?;
                Attribute::new(Name::local(local), value)
            }
            AttributeKind::Full => {
                let prefix = string::read_string(&mut self.reader)?;
                let local = string::read_string(&mut self.reader)?;
                let value = self.read_text_value()?;
                Attribute::new(Name::new(prefix, local), value)
            }
            AttributeKind::ShortDictionary => {
                let local = dictionary::read_string(&mut self.reader, self.dict)?;
                let value = self.read_text_value()?;
                Attribute::new(Name::local(local), value)
            }
            AttributeKind::Dictionary => {
                let prefix = string::read_string(&mut self.reader)?;
                let local = dictionary::read_string(&mut self.reader, self.dict)?;
                let value = self.read_text_value()?;
                Attribute::new(Name::new(prefix, local), value)
            }
            AttributeKind::ShortXmlns => {
                let value = string::read_string(&mut self.reader)?;
                Attribute::new(Name::local("xmlns"), value)
            }
            AttributeKind::Xmlns => {
                let local = string::read_string(&mut self.reader)?;
                let value = string::read_string(&mut self.reader)?;
                Attribute::new(Name::new("xmlns", local), value)
            }
            AttributeKind::ShortDictionaryXmlns => {
                let value = dictionary::read_string(&mut self.reader, self.dict)?;
                Attribute::new(Name::local("xmlns"), value)
            }
            AttributeKind::DictionaryXmlns => {
                let local = string::read_string(&mut self.reader)?;
                let value = dictionary::read_string(&mut self.reader, self.dict)?;
                Attribute::new(Name::new("xmlns", local), value)
            }
            AttributeKind::PrefixDictionary(i) => {
                let local = dictionary::read_string(&mut self.reader, self.dict)?;
                let value = self.read_text_value()?;
                Attribute::new(Name::new(prefix_letter(i).to_string(), local), value)
            }
            AttributeKind::Prefix(i) => {
                let local = string::read_string(&mut self.reader)?;
                let value = self.read_text_value()?;
                Attribute::new(Name::new(prefix_letter(i).to_string(), local), value)
            }
        })
    }

    /// Attribute values are one text record; its with-end bit is meaningless
    /// in value position and ignored.
    fn read_text_value(&mut self) -> Result<String> {
        let record = self.next_record_required()?;
        let RecordKind::Text { kind, .. } = record else {
            return Err(Error::unexpected("text", record.name()));
        };
        typed_value::read_payload(kind, &mut self.reader, self.dict)
    }

    fn decode_text(&mut self, kind: TextKind, with_end: bool) -> Result<()> {
        let text = typed_value::read_payload(kind, &mut self.reader, self.dict)?;
        self.xml.char_data(&text);
        if with_end {
            self.end_element()?;
        }
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        let element = self.stack.pop().ok_or(Error::StackUnderflow)?;
        self.xml.end_element(&element.name);
        Ok(())
    }

    fn decode_comment(&mut self) -> Result<()> {
        let text = string::read_string(&mut self.reader)?;
        self.xml.comment(&text);
        Ok(())
    }

    /// Array record (0x03): start-element template, EndElement, one item
    /// text record, MultiByteInt31 count, then that many payloads. Each item
    /// becomes one sibling element; the first reuses the template already
    /// emitted and on the stack.
    fn decode_array(&mut self) -> Result<()> {
        let record = self.next_record_required()?;
        let RecordKind::Element(element_kind) = record else {
            return Err(Error::unexpected("element", record.name()));
        };
        match self.decode_element(element_kind)? {
            Some(RecordKind::EndElement) => {}
            Some(other) => return Err(Error::unexpected("end-element", other.name())),
            None => return Err(Error::TruncatedInput { expected: 1, actual: 0 }),
        }

        let record = self.next_record_required()?;
        let RecordKind::Text { kind: item_kind, .. } = record else {
            return Err(Error::unexpected("text", record.name()));
        };
        let count = multi_byte_int31::read(&mut self.reader)?;

        let template = match self.stack.last() {
            Some(element) => element.clone(),
            None => return Err(Error::StackUnderflow),
        };
        for i in 0..count {
            if i > 0 {
                self.xml.start_element(&template.name, &template.attributes);
                self.stack.push(template.clone());
            }
            let text = typed_value::read_payload(item_kind, &mut self.reader, self.dict)?;
            self.xml.char_data(&text);
            self.end_element()?;
        }
        Ok(())
    }
}
