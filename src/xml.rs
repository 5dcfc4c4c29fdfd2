//! XML pull tokenizer for the encoder side.
//!
//! Built on quick-xml, deliberately namespace-UNAWARE: qualified names are
//! split lexically at the first `:` and namespace declarations travel as
//! ordinary attributes (`xmlns:p="…"` has prefix `xmlns`, local `p`;
//! `xmlns="…"` has an empty prefix and local `xmlns`). Empty-element tags
//! are expanded to start+end token pairs, adjacent character data (text,
//! CDATA, resolved entity references) is coalesced into one token, and the
//! XML declaration, processing instructions and DOCTYPE are skipped — the
//! token model has no representation for them.

use std::collections::VecDeque;
use std::io::{BufReader, Read};

use memchr::memchr;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::token::{Attribute, Name, XmlToken};
use crate::{Error, Result};

/// Pull reader producing [`XmlToken`]s from a byte source.
pub struct XmlTokenReader<R: Read> {
    reader: Reader<BufReader<R>>,
    buf: Vec<u8>,
    /// CharData-Coalescing: gepufferter Text bis zum nächsten Strukturevent.
    pending_text: Option<String>,
    /// Bereits fertige Tokens (Flush kann zwei auf einmal erzeugen).
    ready: VecDeque<XmlToken>,
    at_eof: bool,
}

impl<R: Read> XmlTokenReader<R> {
    /// Creates a tokenizer over the given byte source.
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(BufReader::new(input));
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        Self {
            reader,
            buf: Vec::new(),
            pending_text: None,
            ready: VecDeque::new(),
            at_eof: false,
        }
    }

    /// Next token, `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<XmlToken>> {
        loop {
            if let Some(token) = self.ready.pop_front() {
                return Ok(Some(token));
            }
            if self.at_eof {
                return Ok(None);
            }
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => {
                    let token = start_element_token(&e)?;
                    self.flush_then(token);
                }
                Ok(Event::End(_)) => {
                    self.flush_then(XmlToken::EndElement);
                }
                // expand_empty_elements liefert Start+End; der Arm bleibt
                // für den Fall dass die Config je anders verdrahtet wird.
                Ok(Event::Empty(e)) => {
                    let token = start_element_token(&e)?;
                    self.flush_then(token);
                    self.ready.push_back(XmlToken::EndElement);
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .decode()
                        .map_err(|err| Error::XmlParse(err.to_string()))?
                        .into_owned();
                    self.append_text(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = bytes_to_str(e.as_ref())?.to_string();
                    self.append_text(&text);
                }
                Ok(Event::GeneralRef(e)) => {
                    let name = bytes_to_str(e.as_ref())?;
                    let resolved = resolve_reference(name)?;
                    self.append_text(&resolved);
                }
                Ok(Event::Comment(e)) => {
                    let text = bytes_to_str(e.as_ref())?.to_string();
                    self.flush_then(XmlToken::Comment(text));
                }
                // Kein Token-Gegenstück; Coalescing läuft darüber hinweg.
                Ok(Event::Decl(_) | Event::PI(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => {
                    self.at_eof = true;
                    if let Some(text) = self.pending_text.take() {
                        self.ready.push_back(XmlToken::CharData(text));
                    }
                }
                Err(e) => {
                    return Err(Error::XmlParse(format!(
                        "at byte {}: {e}",
                        self.reader.buffer_position()
                    )));
                }
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        match &mut self.pending_text {
            Some(pending) => pending.push_str(text),
            None => self.pending_text = Some(text.to_string()),
        }
    }

    fn flush_then(&mut self, token: XmlToken) {
        if let Some(text) = self.pending_text.take() {
            self.ready.push_back(XmlToken::CharData(text));
        }
        self.ready.push_back(token);
    }
}

fn start_element_token(e: &BytesStart<'_>) -> Result<XmlToken> {
    let name = split_qualified(e.name().as_ref())?;
    let mut attributes = Vec::new();
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| Error::XmlParse(err.to_string()))?;
        let attr_name = split_qualified(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|err| Error::XmlParse(err.to_string()))?;
        attributes.push(Attribute::new(attr_name, value.into_owned()));
    }
    Ok(XmlToken::StartElement { name, attributes })
}

/// Lexical prefix split at the first `:`; no namespace resolution.
fn split_qualified(raw: &[u8]) -> Result<Name> {
    let text = bytes_to_str(raw)?;
    match memchr(b':', raw) {
        Some(pos) => Ok(Name::new(&text[..pos], &text[pos + 1..])),
        None => Ok(Name::local(text)),
    }
}

fn bytes_to_str(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw).map_err(|_| Error::XmlParse("input is not UTF-8".to_string()))
}

/// Resolves `&name;` / `&#N;` / `&#xN;` to its character data.
fn resolve_reference(name: &str) -> Result<String> {
    if let Some(digits) = name.strip_prefix('#') {
        let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16)
        } else {
            digits.parse()
        }
        .map_err(|_| Error::XmlParse(format!("bad character reference '&{name};'")))?;
        let ch = char::from_u32(code)
            .ok_or_else(|| Error::XmlParse(format!("bad character reference '&{name};'")))?;
        return Ok(ch.to_string());
    }
    match resolve_predefined_entity(name) {
        Some(s) => Ok(s.to_string()),
        None => Err(Error::XmlParse(format!("unresolved entity '&{name};'"))),
    }
}
