//! Text-record payload dispatch: read, write, classify.
//!
//! Every text record's payload passes through here; the per-type wire
//! formats live in their own modules. The classifier implements the
//! encoder's cascade: it tries the literal singletons, list decomposition,
//! UUID shapes, the numeric widths, base64, the dictionary and the QName
//! shape before falling back to length-prefixed characters.
//!
//! Classification is two-pass by construction: a text is only given a typed
//! record when re-rendering the parsed value reproduces the text exactly,
//! so decoding an encoded document always restores the original characters.

use std::io::Read;

use crate::binary;
use crate::bytestream::{ByteReader, ByteWriter};
use crate::dictionary::{self, Dictionary};
use crate::float;
use crate::integer;
use crate::records::{prefix_index, prefix_letter, RecordKind, TextKind};
use crate::string;
use crate::uuid;
use crate::{datetime, decimal, timespan};
use crate::{Error, Result};

/// Nesting guard for StartListText payloads.
const MAX_LIST_DEPTH: usize = 64;

/// Reads the payload of a text record and renders it as character data.
pub fn read_payload<R: Read>(
    kind: TextKind,
    reader: &mut ByteReader<R>,
    dict: &Dictionary,
) -> Result<String> {
    read_payload_at(kind, reader, dict, 0)
}

fn read_payload_at<R: Read>(
    kind: TextKind,
    reader: &mut ByteReader<R>,
    dict: &Dictionary,
    depth: usize,
) -> Result<String> {
    match kind {
        TextKind::Zero => Ok("0".to_string()),
        TextKind::One => Ok("1".to_string()),
        TextKind::False => Ok("false".to_string()),
        TextKind::True => Ok("true".to_string()),
        TextKind::Empty | TextKind::EndList => Ok(String::new()),
        TextKind::Int8 => integer::read_i8(reader),
        TextKind::Int16 => integer::read_i16(reader),
        TextKind::Int32 => integer::read_i32(reader),
        TextKind::Int64 => integer::read_i64(reader),
        TextKind::UInt64 => integer::read_u64(reader),
        TextKind::Float => float::read_f32(reader),
        TextKind::Double => float::read_f64(reader),
        TextKind::Decimal => decimal::read(reader),
        TextKind::DateTime => datetime::read(reader),
        TextKind::TimeSpan => timespan::read(reader),
        TextKind::Chars8 => {
            let len = reader.read_u8()?;
            string::read_utf8(reader, len as usize)
        }
        TextKind::Chars16 => {
            let len = reader.read_u16_le()?;
            string::read_utf8(reader, len as usize)
        }
        TextKind::Chars32 => {
            let len = reader.read_u32_le()?;
            string::read_utf8(reader, len as usize)
        }
        TextKind::Bytes8 => {
            let len = reader.read_u8()?;
            binary::read_base64(reader, len as usize)
        }
        TextKind::Bytes16 => {
            let len = reader.read_u16_le()?;
            binary::read_base64(reader, len as usize)
        }
        TextKind::Bytes32 => {
            let len = reader.read_u32_le()?;
            binary::read_base64(reader, len as usize)
        }
        TextKind::UnicodeChars8 => {
            let len = reader.read_u8()?;
            string::read_utf16(reader, u64::from(len))
        }
        TextKind::UnicodeChars16 => {
            let len = reader.read_u16_le()?;
            string::read_utf16(reader, u64::from(len))
        }
        TextKind::UnicodeChars32 => {
            let len = reader.read_u32_le()?;
            string::read_utf16(reader, u64::from(len))
        }
        TextKind::Dictionary => dictionary::read_string(reader, dict),
        TextKind::Uuid => uuid::read(reader),
        TextKind::UniqueId => uuid::read_unique_id(reader),
        TextKind::Bool => match reader.read_u8()? {
            0 => Ok("false".to_string()),
            1 => Ok("true".to_string()),
            b => Err(Error::InvalidBool(b)),
        },
        TextKind::QNameDictionary => {
            let idx = reader.read_u8()?;
            if idx > 25 {
                return Err(Error::InvalidPrefixIndex(idx));
            }
            let name = dictionary::read_string(reader, dict)?;
            Ok(format!("{}:{name}", prefix_letter(idx)))
        }
        TextKind::StartList => read_list(reader, dict, depth),
    }
}

/// Reads list items until EndList and joins them with single spaces.
fn read_list<R: Read>(
    reader: &mut ByteReader<R>,
    dict: &Dictionary,
    depth: usize,
) -> Result<String> {
    if depth >= MAX_LIST_DEPTH {
        return Err(Error::ListDepthExceeded(MAX_LIST_DEPTH));
    }
    let mut items = Vec::new();
    loop {
        let op = reader.read_u8()?;
        let record =
            RecordKind::from_opcode(op).ok_or(Error::UnknownRecord(op))?;
        let RecordKind::Text { kind, .. } = record else {
            return Err(Error::unexpected("text", record.name()));
        };
        // Das With-End-Bit hat innerhalb einer Liste keine Bedeutung.
        if kind == TextKind::EndList {
            break;
        }
        items.push(read_payload_at(kind, reader, dict, depth + 1)?);
    }
    Ok(items.join(" "))
}

/// Writes the payload of a previously classified text record.
pub fn write_payload(
    kind: TextKind,
    writer: &mut ByteWriter,
    dict: &Dictionary,
    text: &str,
) -> Result<()> {
    match kind {
        TextKind::Zero
        | TextKind::One
        | TextKind::False
        | TextKind::True
        | TextKind::Empty
        | TextKind::EndList => Ok(()),
        TextKind::Int8 | TextKind::Int16 | TextKind::Int32 | TextKind::Int64 => {
            integer::write_signed(writer, kind, text)
        }
        TextKind::UInt64 => integer::write_u64(writer, text),
        TextKind::Float => float::write_f32(writer, text),
        TextKind::Double => float::write_f64(writer, text),
        TextKind::Chars8 => {
            let len = u8::try_from(text.len())
                .map_err(|_| Error::InvalidValue(format!("{} bytes in Chars8", text.len())))?;
            writer.write_u8(len);
            writer.write_bytes(text.as_bytes());
            Ok(())
        }
        TextKind::Chars16 => {
            let len = u16::try_from(text.len())
                .map_err(|_| Error::InvalidValue(format!("{} bytes in Chars16", text.len())))?;
            writer.write_u16_le(len);
            writer.write_bytes(text.as_bytes());
            Ok(())
        }
        TextKind::Chars32 => {
            let len = u32::try_from(text.len()).map_err(|_| Error::TextTooLong(text.len()))?;
            writer.write_u32_le(len);
            writer.write_bytes(text.as_bytes());
            Ok(())
        }
        TextKind::Bytes8 | TextKind::Bytes16 | TextKind::Bytes32 => {
            let bytes = binary::decode_canonical(text)
                .ok_or_else(|| Error::InvalidValue(format!("'{text}' is not canonical base64")))?;
            match kind {
                TextKind::Bytes8 => writer.write_u8(bytes.len() as u8),
                TextKind::Bytes16 => writer.write_u16_le(bytes.len() as u16),
                _ => writer.write_u32_le(bytes.len() as u32),
            }
            writer.write_bytes(&bytes);
            Ok(())
        }
        TextKind::Dictionary => dictionary::write_string(writer, dict, text),
        TextKind::Uuid => uuid::write(writer, text),
        TextKind::UniqueId => uuid::write_unique_id(writer, text),
        TextKind::QNameDictionary => {
            let (prefix, name) = text
                .split_once(':')
                .ok_or_else(|| Error::InvalidValue(format!("'{text}' is not a QName")))?;
            let idx = prefix_index(prefix)
                .ok_or_else(|| Error::InvalidValue(format!("'{prefix}' is not a QName prefix")))?;
            writer.write_u8(idx);
            dictionary::write_string(writer, dict, name)
        }
        TextKind::StartList => write_list(writer, dict, text),
        TextKind::Decimal
        | TextKind::DateTime
        | TextKind::TimeSpan
        | TextKind::Bool
        | TextKind::UnicodeChars8
        | TextKind::UnicodeChars16
        | TextKind::UnicodeChars32 => Err(Error::InvalidValue(format!(
            "{} is a decode-only record",
            kind.name()
        ))),
    }
}

/// Writes a StartListText payload: one text record per space-separated item,
/// closed by EndList. Items cannot contain spaces, so recursion stops here.
fn write_list(writer: &mut ByteWriter, dict: &Dictionary, text: &str) -> Result<()> {
    for item in text.split(' ') {
        let kind = classify(item, dict)?;
        writer.write_u8(kind.base_opcode());
        write_payload(kind, writer, dict, item)?;
    }
    writer.write_u8(crate::records::END_LIST_TEXT);
    Ok(())
}

/// Picks the most compact text record that reproduces `text` exactly.
///
/// Reihenfolge der Kaskade (erste Regel gewinnt): leere/literale Singles,
/// Liste, UUID-Formen, vorzeichenbehaftete Breiten, UInt64, Float/Double,
/// Base64, Dictionary, QName, Chars.
pub fn classify(text: &str, dict: &Dictionary) -> Result<TextKind> {
    match text {
        "" => return Ok(TextKind::Empty),
        "0" => return Ok(TextKind::Zero),
        "1" => return Ok(TextKind::One),
        "false" => return Ok(TextKind::False),
        "true" => return Ok(TextKind::True),
        _ => {}
    }
    if text.contains(' ') {
        return Ok(TextKind::StartList);
    }
    if uuid::is_uuid(text) {
        return Ok(TextKind::Uuid);
    }
    if uuid::is_unique_id(text) {
        return Ok(TextKind::UniqueId);
    }
    if let Some(kind) = integer::classify_signed(text) {
        return Ok(kind);
    }
    if let Some(kind) = integer::classify_unsigned(text) {
        return Ok(kind);
    }
    if float::is_exact_f32(text) {
        return Ok(TextKind::Float);
    }
    if float::is_exact_f64(text) {
        return Ok(TextKind::Double);
    }
    if let Some(bytes) = binary::decode_canonical(text) {
        return bytes_kind(bytes.len());
    }
    if dict.addressable(text) {
        return Ok(TextKind::Dictionary);
    }
    if let Some((prefix, name)) = text.split_once(':')
        && prefix_index(prefix).is_some()
        && dict.addressable(name)
    {
        return Ok(TextKind::QNameDictionary);
    }
    chars_kind(text.len())
}

fn bytes_kind(len: usize) -> Result<TextKind> {
    if len <= 0xFF {
        Ok(TextKind::Bytes8)
    } else if len < 0xFFFF {
        Ok(TextKind::Bytes16)
    } else if len < 0xFFFF_FFFF {
        Ok(TextKind::Bytes32)
    } else {
        Err(Error::TextTooLong(len))
    }
}

fn chars_kind(len: usize) -> Result<TextKind> {
    if len <= 0xFF {
        Ok(TextKind::Chars8)
    } else if len < 0xFFFF {
        Ok(TextKind::Chars16)
    } else if len < 0xFFFF_FFFF {
        Ok(TextKind::Chars32)
    } else {
        Err(Error::TextTooLong(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> Dictionary {
        Dictionary::new()
    }

    fn classify_empty(text: &str) -> TextKind {
        classify(text, &empty()).unwrap()
    }

    fn read(kind: TextKind, bytes: &[u8]) -> Result<String> {
        read_with(kind, bytes, &empty())
    }

    fn read_with(kind: TextKind, bytes: &[u8], dict: &Dictionary) -> Result<String> {
        let mut r = ByteReader::new(bytes);
        read_payload(kind, &mut r, dict)
    }

    #[test]
    fn literal_singletons() {
        assert_eq!(classify_empty(""), TextKind::Empty);
        assert_eq!(classify_empty("0"), TextKind::Zero);
        assert_eq!(classify_empty("1"), TextKind::One);
        assert_eq!(classify_empty("false"), TextKind::False);
        assert_eq!(classify_empty("true"), TextKind::True);
    }

    #[test]
    fn uuid_shapes_win_over_chars() {
        assert_eq!(
            classify_empty("33221100-5544-7766-8899-aabbccddeeff"),
            TextKind::Uuid
        );
        assert_eq!(
            classify_empty("urn:uuid:33221100-5544-7766-8899-aabbccddeeff"),
            TextKind::UniqueId
        );
    }

    #[test]
    fn numeric_cascade() {
        assert_eq!(classify_empty("123"), TextKind::Int8);
        assert_eq!(classify_empty("-34"), TextKind::Int8);
        assert_eq!(classify_empty("2147483647"), TextKind::Int32);
        assert_eq!(classify_empty("18446744073709551615"), TextKind::UInt64);
        assert_eq!(classify_empty("1.1"), TextKind::Float);
        assert_eq!(classify_empty("2.71828182845905"), TextKind::Double);
        assert_eq!(classify_empty("INF"), TextKind::Float);
    }

    #[test]
    fn base64_before_chars() {
        assert_eq!(classify_empty("AAECAwQFBgc="), TextKind::Bytes8);
        // "hello" ist kein gültiges Base64 (Länge 5)
        assert_eq!(classify_empty("hello"), TextKind::Chars8);
    }

    #[test]
    fn dictionary_and_qname() {
        let dict = Dictionary::from_entries([(910u32, "SomeType")]);
        assert_eq!(classify("SomeType", &dict).unwrap(), TextKind::Dictionary);
        assert_eq!(classify("str56", &dict).unwrap(), TextKind::Dictionary);
        assert_eq!(classify("i:str910", &empty()).unwrap(), TextKind::QNameDictionary);
        assert_eq!(classify("i:SomeType", &dict).unwrap(), TextKind::QNameDictionary);
        // Name weder im Dictionary noch str<N>: kein QName-Record
        assert_eq!(classify("i:Other", &dict).unwrap(), TextKind::Chars8);
        // Prefix muss ein einzelner Kleinbuchstabe sein
        assert_eq!(classify("pre:str910", &empty()).unwrap(), TextKind::Chars8);
    }

    /// str<N> with a populated key N must not classify as Dictionary: key N
    /// decodes to the table string, not back to `strN`.
    #[test]
    fn shadowed_str_literal_falls_to_chars() {
        let dict = Dictionary::from_entries([(4u32, "http://abc")]);
        assert_eq!(classify("str4", &dict).unwrap(), TextKind::Chars8);
        assert_eq!(classify("str8", &dict).unwrap(), TextKind::Dictionary);
    }

    #[test]
    fn chars_width_thresholds() {
        assert_eq!(classify_empty(&"x".repeat(255)), TextKind::Chars8);
        assert_eq!(classify_empty(&"x".repeat(256)), TextKind::Chars16);
        assert_eq!(classify_empty(&"x".repeat(0xFFFE)), TextKind::Chars16);
        assert_eq!(classify_empty(&"x".repeat(0xFFFF)), TextKind::Chars32);
    }

    #[test]
    fn list_classification() {
        assert_eq!(classify_empty("123 hello true"), TextKind::StartList);
        assert_eq!(classify_empty(" "), TextKind::StartList);
    }

    #[test]
    fn list_write_and_read() {
        let dict = empty();
        let mut w = ByteWriter::new();
        write_payload(TextKind::StartList, &mut w, &dict, "123 hello true").unwrap();
        assert_eq!(
            w.as_slice(),
            &[0x88, 0x7B, 0x98, 0x05, 0x68, 0x65, 0x6C, 0x6C, 0x6F, 0x86, 0xA6]
        );
        assert_eq!(
            read_with(TextKind::StartList, w.as_slice(), &dict).unwrap(),
            "123 hello true"
        );
    }

    #[test]
    fn list_preserves_consecutive_spaces() {
        let dict = empty();
        let mut w = ByteWriter::new();
        write_payload(TextKind::StartList, &mut w, &dict, "a  b").unwrap();
        assert_eq!(
            read_with(TextKind::StartList, w.as_slice(), &dict).unwrap(),
            "a  b"
        );
    }

    #[test]
    fn list_rejects_non_text_records() {
        // ShortElement inside a list payload
        let err = read_with(TextKind::StartList, &[0x40], &empty()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedRecord { expected: "text", .. }));
    }

    #[test]
    fn list_terminates_on_either_end_list_opcode() {
        assert_eq!(read_with(TextKind::StartList, &[0xA7], &empty()).unwrap(), "");
        assert_eq!(read_with(TextKind::StartList, &[0xA6], &empty()).unwrap(), "");
    }

    #[test]
    fn nested_lists_are_depth_limited() {
        // 0xA4 öffnet jeweils eine weitere Liste, ohne je zu schließen.
        let bytes = vec![0xA4u8; MAX_LIST_DEPTH + 1];
        let err = read_with(TextKind::StartList, &bytes, &empty()).unwrap_err();
        assert_eq!(err, Error::ListDepthExceeded(MAX_LIST_DEPTH));
    }

    #[test]
    fn bool_payloads() {
        assert_eq!(read(TextKind::Bool, &[0x00]).unwrap(), "false");
        assert_eq!(read(TextKind::Bool, &[0x01]).unwrap(), "true");
        assert_eq!(read(TextKind::Bool, &[0x02]).unwrap_err(), Error::InvalidBool(2));
    }

    #[test]
    fn qname_payload() {
        let mut w = ByteWriter::new();
        write_payload(TextKind::QNameDictionary, &mut w, &empty(), "i:str910").unwrap();
        assert_eq!(w.as_slice(), &[0x08, 0x8E, 0x07]);
        assert_eq!(
            read(TextKind::QNameDictionary, &[0x08, 0x8E, 0x07]).unwrap(),
            "i:str910"
        );
    }

    #[test]
    fn qname_prefix_index_validated() {
        assert_eq!(
            read(TextKind::QNameDictionary, &[26, 0x00]).unwrap_err(),
            Error::InvalidPrefixIndex(26)
        );
    }

    #[test]
    fn decode_only_kinds_refuse_to_write() {
        let mut w = ByteWriter::new();
        for kind in [
            TextKind::Decimal,
            TextKind::DateTime,
            TextKind::TimeSpan,
            TextKind::Bool,
            TextKind::UnicodeChars8,
        ] {
            assert!(matches!(
                write_payload(kind, &mut w, &empty(), "x"),
                Err(Error::InvalidValue(_))
            ));
        }
    }

    #[test]
    fn unicode_chars_payloads() {
        assert_eq!(
            read(TextKind::UnicodeChars8, &[0x06, 0x75, 0x00, 0x6E, 0x00, 0x69, 0x00]).unwrap(),
            "uni"
        );
        assert_eq!(
            read(
                TextKind::UnicodeChars16,
                &[0x08, 0x00, 0x75, 0x00, 0x6E, 0x00, 0x69, 0x00, 0x32, 0x00]
            )
            .unwrap(),
            "uni2"
        );
        assert_eq!(
            read(
                TextKind::UnicodeChars32,
                &[0x04, 0x00, 0x00, 0x00, 0x33, 0x00, 0x32, 0x00]
            )
            .unwrap(),
            "32"
        );
    }

    #[test]
    fn chars_payload_round_trip() {
        let dict = empty();
        let mut w = ByteWriter::new();
        write_payload(TextKind::Chars8, &mut w, &dict, "hello").unwrap();
        assert_eq!(w.as_slice(), &[0x05, 0x68, 0x65, 0x6C, 0x6C, 0x6F]);

        let text = "b".repeat(257);
        let mut w = ByteWriter::new();
        write_payload(TextKind::Chars16, &mut w, &dict, &text).unwrap();
        assert_eq!(&w.as_slice()[..2], &[0x01, 0x01]);
        assert_eq!(read_with(TextKind::Chars16, w.as_slice(), &dict).unwrap(), text);
    }

    #[test]
    fn bytes_payload_round_trip() {
        let dict = empty();
        let mut w = ByteWriter::new();
        write_payload(TextKind::Bytes8, &mut w, &dict, "AAECAwQFBgc=").unwrap();
        assert_eq!(
            w.as_slice(),
            &[0x08, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]
        );
        assert_eq!(
            read_with(TextKind::Bytes8, w.as_slice(), &dict).unwrap(),
            "AAECAwQFBgc="
        );
    }

    #[test]
    fn dictionary_payload_uses_varint_key() {
        let dict = Dictionary::from_entries([(56u32, "Namespace")]);
        let mut w = ByteWriter::new();
        write_payload(TextKind::Dictionary, &mut w, &dict, "Namespace").unwrap();
        assert_eq!(w.as_slice(), &[0x38]);
        assert_eq!(
            read_with(TextKind::Dictionary, &[0x38], &dict).unwrap(),
            "Namespace"
        );
        assert_eq!(read_with(TextKind::Dictionary, &[0x38], &empty()).unwrap(), "str56");
    }
}
