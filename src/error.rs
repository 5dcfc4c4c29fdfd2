//! Central error types for the NBFX codec.
//!
//! Each variant names the wire construct it belongs to; record kinds are
//! referred to by their [MC-NBFX] record names and opcodes.

use core::fmt;
use std::borrow::Cow;

/// All failure modes of encoding and decoding NBFX streams.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A byte read in record position has no registered record.
    UnknownRecord(u8),
    /// A record of the wrong family appeared where a specific family is
    /// required (text record for an attribute value or array item, element
    /// record for an array template, EndElement after an array template).
    UnexpectedRecord {
        /// Was erwartet wurde (Record-Familie).
        expected: &'static str,
        /// Was gefunden wurde (Record-Name mit Opcode).
        found: Cow<'static, str>,
    },
    /// The input ended inside a record payload.
    TruncatedInput {
        /// Anzahl angeforderter Bytes.
        expected: usize,
        /// Anzahl tatsächlich gelesener Bytes.
        actual: usize,
    },
    /// A BoolText (0xB4) payload byte was neither 0 nor 1.
    InvalidBool(u8),
    /// A DateTimeText (0x96) timezone flag was 3 (only 0/1/2 are assigned).
    InvalidTimezone(u8),
    /// A DecimalText (0x94) scale byte exceeded 28.
    InvalidDecimalScale(u8),
    /// A DecimalText (0x94) sign byte was neither 0x00 nor 0x80.
    InvalidDecimalSign(u8),
    /// A MultiByteInt31 exceeded the 31-bit range (on write: the caller's
    /// value; on read: the accumulated wire value).
    MultiByteInt31Overflow(u64),
    /// A UnicodeChars length prefix was odd (UTF-16 payloads are counted in
    /// bytes and must cover whole code units).
    InvalidUnicodeLength(u64),
    /// A QNameDictionaryText (0xBC) prefix index exceeded 25 ('a'..='z').
    InvalidPrefixIndex(u8),
    /// A Chars payload or record string was not valid UTF-8.
    InvalidUtf8,
    /// A UnicodeChars payload contained an unpaired surrogate.
    InvalidUtf16,
    /// The encoder needed a dictionary key for a string that is neither in
    /// the dictionary nor of the synthetic `str<N>` form.
    DictionaryMiss(String),
    /// A text payload is too long for the widest length-prefixed record
    /// (Chars32/Bytes32 carry a 32-bit length).
    TextTooLong(usize),
    /// An EndElement (0x01) arrived, explicitly or fused into a text record,
    /// while no element was open.
    StackUnderflow,
    /// StartListText nesting exceeded the depth guard.
    ListDepthExceeded(usize),
    /// A UuidText/UniqueIdText value could not be parsed as a canonical UUID.
    InvalidUuid(String),
    /// A typed payload did not parse as the classified record's value type.
    /// Classification guarantees parseability, so this indicates a caller
    /// driving the payload writers directly with mismatched text.
    InvalidValue(String),
    /// The XML token source produced malformed input.
    XmlParse(String),
    /// Ein IO-Fehler der nicht EOF ist (Quelle oder Senke geschlossen).
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRecord(op) => write!(f, "Unknown record {op:#04x}"),
            Self::UnexpectedRecord { expected, found } => {
                write!(f, "expected {expected} record, found {found}")
            }
            Self::TruncatedInput { expected, actual } => {
                write!(f, "truncated input: needed {expected} bytes, got {actual}")
            }
            Self::InvalidBool(b) => write!(f, "BoolText byte must be 0 or 1, got {b:#04x}"),
            Self::InvalidTimezone(tz) => write!(f, "DateTimeText timezone flag {tz} is reserved"),
            Self::InvalidDecimalScale(s) => {
                write!(f, "DecimalText scale {s} exceeds maximum 28")
            }
            Self::InvalidDecimalSign(s) => {
                write!(f, "DecimalText sign byte must be 0x00 or 0x80, got {s:#04x}")
            }
            Self::MultiByteInt31Overflow(v) => {
                write!(f, "MultiByteInt31 value {v} exceeds 2^31-1")
            }
            Self::InvalidUnicodeLength(len) => {
                write!(f, "UnicodeChars byte length {len} is odd")
            }
            Self::InvalidPrefixIndex(idx) => {
                write!(f, "QNameDictionaryText prefix index {idx} exceeds 25")
            }
            Self::InvalidUtf8 => write!(f, "string payload is not valid UTF-8"),
            Self::InvalidUtf16 => write!(f, "UTF-16 payload contains an unpaired surrogate"),
            Self::DictionaryMiss(s) => {
                write!(f, "'{s}' is neither in the dictionary nor of the str<N> form")
            }
            Self::TextTooLong(len) => {
                write!(f, "text of {len} bytes does not fit a 32-bit length prefix")
            }
            Self::StackUnderflow => write!(f, "EndElement with no open element"),
            Self::ListDepthExceeded(depth) => {
                write!(f, "list nesting exceeds maximum depth {depth}")
            }
            Self::InvalidUuid(s) => write!(f, "'{s}' is not a canonical UUID"),
            Self::InvalidValue(msg) => write!(f, "invalid typed value: {msg}"),
            Self::XmlParse(msg) => write!(f, "XML parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Erstellt einen `UnexpectedRecord` Fehler mit Kontext.
    pub(crate) fn unexpected(expected: &'static str, found: impl Into<Cow<'static, str>>) -> Self {
        Self::UnexpectedRecord {
            expected,
            found: found.into(),
        }
    }

    /// Mappt einen `io::Error` auf [`Error::Io`].
    pub(crate) fn io(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
