//! Shared string dictionary ([MC-NBFX] DictionaryString, [MC-NBFS] static table).
//!
//! A finite bidirectional mapping between non-negative integer keys and
//! strings, agreed on out of band by producer and consumer. The dictionary is
//! immutable for the lifetime of a codec session; codecs hold it behind `Rc`
//! so cloning a codec is cheap.
//!
//! Keys absent from the table decode to the synthetic literal `str<N>`
//! (key 14 → `"str14"`), which lets a stream survive dictionary gaps. The
//! encoder recognizes the same `str<N>` shape and writes the numeric key
//! back without consulting the table.

use std::io::Read;
use std::rc::Rc;

use crate::FastHashMap;
use crate::bytestream::{ByteReader, ByteWriter};
use crate::multi_byte_int31;
use crate::{Error, Result};

/// Bidirectional key ↔ string table.
#[derive(Clone, Default)]
pub struct Dictionary {
    by_key: FastHashMap<u32, Rc<str>>,
    by_value: FastHashMap<Rc<str>, u32>,
}

impl Dictionary {
    /// Creates an empty dictionary (raw NBFX, no shared strings).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dictionary from key/string pairs.
    ///
    /// Einträge deren Key ODER Wert bereits vorhanden ist werden verworfen
    /// (first wins) — beide Richtungen müssen eindeutig bleiben.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for (key, value) in entries {
            dict.insert(key, value.as_ref());
        }
        dict
    }

    fn insert(&mut self, key: u32, value: &str) {
        if self.by_key.contains_key(&key) || self.by_value.contains_key(value) {
            return;
        }
        let rc: Rc<str> = value.into();
        self.by_key.insert(key, Rc::clone(&rc));
        self.by_value.insert(rc, key);
    }

    /// Exact key lookup.
    pub fn get(&self, key: u32) -> Option<&str> {
        self.by_key.get(&key).map(AsRef::as_ref)
    }

    /// Key lookup with the `str<N>` fallback for gaps.
    pub fn lookup(&self, key: u32) -> String {
        match self.by_key.get(&key) {
            Some(s) => s.to_string(),
            None => format!("str{key}"),
        }
    }

    /// Inverse lookup; exact matches only.
    pub fn key_of(&self, value: &str) -> Option<u32> {
        self.by_value.get(value).copied()
    }

    /// True if `key` is mapped.
    pub fn contains_key(&self, key: u32) -> bool {
        self.by_key.contains_key(&key)
    }

    /// Anzahl Einträge.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// True wenn die Tabelle leer ist.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// True if the encoder can address `value` through a dictionary record:
    /// either an exact table hit, or an unshadowed `str<N>` literal.
    ///
    /// Ein `str<N>` dessen Key N in der Tabelle belegt ist zählt NICHT —
    /// Key N würde zum Tabellenwert dekodieren, nicht zurück zu `strN`.
    pub fn addressable(&self, value: &str) -> bool {
        if self.by_value.contains_key(value) {
            return true;
        }
        match parse_str_key(value) {
            Some(key) => !self.by_key.contains_key(&key),
            None => false,
        }
    }
}

/// Parses the synthetic `str<N>` shape: the literal prefix `str` followed by
/// one or more ASCII digits forming a value in MultiByteInt31 range.
pub(crate) fn parse_str_key(value: &str) -> Option<u32> {
    let digits = value.strip_prefix("str")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|&n| n <= multi_byte_int31::MAX)
}

/// Reads a DictionaryString: MultiByteInt31 key, resolved via [`Dictionary::lookup`].
pub(crate) fn read_string<R: Read>(
    reader: &mut ByteReader<R>,
    dict: &Dictionary,
) -> Result<String> {
    let key = multi_byte_int31::read(reader)?;
    Ok(dict.lookup(key))
}

/// Writes a DictionaryString key for `value`.
///
/// Table hits write their key; `str<N>` literals write N without consulting
/// the table; anything else is [`Error::DictionaryMiss`].
pub(crate) fn write_string(
    writer: &mut ByteWriter,
    dict: &Dictionary,
    value: &str,
) -> Result<()> {
    if let Some(key) = dict.key_of(value) {
        return multi_byte_int31::write(writer, key);
    }
    if let Some(key) = parse_str_key(value) {
        return multi_byte_int31::write(writer, key);
    }
    Err(Error::DictionaryMiss(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hits_and_gaps() {
        let dict = Dictionary::from_entries([(2u32, "Envelope"), (8, "Header")]);
        assert_eq!(dict.lookup(2), "Envelope");
        assert_eq!(dict.lookup(8), "Header");
        assert_eq!(dict.lookup(14), "str14");
        assert_eq!(dict.get(14), None);
    }

    #[test]
    fn inverse_lookup_is_exact() {
        let dict = Dictionary::from_entries([(2u32, "Envelope")]);
        assert_eq!(dict.key_of("Envelope"), Some(2));
        assert_eq!(dict.key_of("envelope"), None);
        assert_eq!(dict.key_of("str2"), None);
    }

    #[test]
    fn duplicate_entries_first_wins() {
        let dict = Dictionary::from_entries([(2u32, "Envelope"), (4, "Envelope"), (2, "Other")]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.key_of("Envelope"), Some(2));
        assert_eq!(dict.lookup(4), "str4");
    }

    #[test]
    fn str_key_shape() {
        assert_eq!(parse_str_key("str0"), Some(0));
        assert_eq!(parse_str_key("str154"), Some(154));
        assert_eq!(parse_str_key("str"), None);
        assert_eq!(parse_str_key("strawberry"), None);
        assert_eq!(parse_str_key("str+4"), None);
        assert_eq!(parse_str_key("str12x"), None);
        assert_eq!(parse_str_key("Str4"), None);
        // 2^31 passt nicht mehr in MultiByteInt31
        assert_eq!(parse_str_key("str2147483647"), Some(0x7FFF_FFFF));
        assert_eq!(parse_str_key("str2147483648"), None);
    }

    #[test]
    fn addressable_respects_shadowing() {
        let dict = Dictionary::from_entries([(4u32, "http://abc")]);
        assert!(dict.addressable("http://abc"));
        assert!(dict.addressable("str8"));
        // Key 4 ist belegt: "str4" würde zu "http://abc" dekodieren.
        assert!(!dict.addressable("str4"));
        assert!(!dict.addressable("other"));
    }

    #[test]
    fn write_string_table_hit() {
        let dict = Dictionary::from_entries([(416u32, "Action")]);
        let mut w = ByteWriter::new();
        write_string(&mut w, &dict, "Action").unwrap();
        assert_eq!(w.into_vec(), vec![0xA0, 0x03]);
    }

    #[test]
    fn write_string_str_literal() {
        let dict = Dictionary::new();
        let mut w = ByteWriter::new();
        write_string(&mut w, &dict, "str154").unwrap();
        assert_eq!(w.into_vec(), vec![0x9A, 0x01]);
    }

    #[test]
    fn write_string_miss() {
        let dict = Dictionary::new();
        let mut w = ByteWriter::new();
        assert_eq!(
            write_string(&mut w, &dict, "Envelope").unwrap_err(),
            Error::DictionaryMiss("Envelope".to_string())
        );
    }

    #[test]
    fn read_string_round_trip() {
        let dict = Dictionary::from_entries([(145u32, "To")]);
        let mut r = ByteReader::new(&[0x91, 0x01][..]);
        assert_eq!(read_string(&mut r, &dict).unwrap(), "To");
        let mut r = ByteReader::new(&[0x0E][..]);
        assert_eq!(read_string(&mut r, &dict).unwrap(), "str14");
    }
}
