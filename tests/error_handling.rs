//! Error taxonomy through the public API: every failure family, plus the
//! partial-output contract and source-agnostic streaming.

use std::io::Read;

use rnbfx::{Decoder, Encoder, Error};

fn decode_err(bytes: &[u8]) -> (String, Error) {
    let err = Decoder::new().decode(bytes).unwrap_err();
    (err.partial, err.error)
}

// === Unknown opcodes ===

#[test]
fn unassigned_opcodes_fail_with_their_byte() {
    for op in [0x00u8, 0x78, 0x7F, 0xBE, 0xFF] {
        let (_, error) = decode_err(&[op]);
        assert_eq!(error, Error::UnknownRecord(op));
        assert_eq!(error.to_string(), format!("Unknown record {op:#04x}"));
    }
}

#[test]
fn unknown_opcode_inside_attribute_collection() {
    let (partial, error) = decode_err(&[0x40, 0x01, 0x61, 0xFE]);
    assert_eq!(error, Error::UnknownRecord(0xFE));
    // Das Startelement war noch nicht emittiert (Attribute unvollständig).
    assert_eq!(partial, "");
}

// === Unexpected record families ===

#[test]
fn attribute_record_at_document_level() {
    let (_, error) = decode_err(&[0x06, 0x08]);
    assert!(matches!(error, Error::UnexpectedRecord { .. }));
}

#[test]
fn array_template_must_be_an_element() {
    let (_, error) = decode_err(&[0x03, 0x98, 0x01, 0x78]);
    assert!(matches!(error, Error::UnexpectedRecord { expected: "element", .. }));
}

#[test]
fn attribute_value_must_be_a_text_record() {
    // ShortAttribute "a", dann ein EndElement statt eines Text-Records.
    let (_, error) = decode_err(&[0x40, 0x01, 0x64, 0x04, 0x01, 0x61, 0x01]);
    assert!(matches!(error, Error::UnexpectedRecord { expected: "text", .. }));
}

#[test]
fn list_items_must_be_text_records() {
    // StartListText, dann ShortElement.
    let (_, error) = decode_err(&[0x40, 0x01, 0x64, 0xA4, 0x40]);
    assert!(matches!(error, Error::UnexpectedRecord { expected: "text", .. }));
}

// === Truncation ===

#[test]
fn truncated_payloads() {
    // Name kürzer als Längenfeld
    let (_, error) = decode_err(&[0x40, 0x05, 0x64, 0x6F]);
    assert!(matches!(error, Error::TruncatedInput { .. }));
    // Int32 mit nur zwei Payload-Bytes
    let (_, error) = decode_err(&[0x40, 0x01, 0x61, 0x8C, 0x15, 0xCD]);
    assert!(matches!(error, Error::TruncatedInput { .. }));
    // UUID mit 15 von 16 Bytes
    let mut bytes = vec![0x40, 0x01, 0x61, 0xB0];
    bytes.extend_from_slice(&[0u8; 15]);
    let (_, error) = decode_err(&bytes);
    assert_eq!(error, Error::TruncatedInput { expected: 16, actual: 15 });
    // Varint bricht mitten im Continuation ab
    let (_, error) = decode_err(&[0x42, 0x9A]);
    assert!(matches!(error, Error::TruncatedInput { .. }));
}

/// EOF in record position is NOT an error, even mid-document.
#[test]
fn eof_between_records_is_clean() {
    assert_eq!(
        Decoder::new().decode(&[0x40, 0x01, 0x61][..]).unwrap(),
        "<a>"
    );
}

// === Invalid encodings ===

#[test]
fn bool_byte_out_of_range() {
    let (_, error) = decode_err(&[0x40, 0x01, 0x61, 0xB4, 0x07]);
    assert_eq!(error, Error::InvalidBool(7));
}

#[test]
fn reserved_timezone_flag() {
    let mut bytes = vec![0x40, 0x01, 0x61, 0x96];
    bytes.extend_from_slice(&(3u64 << 62).to_le_bytes());
    let (_, error) = decode_err(&bytes);
    assert_eq!(error, Error::InvalidTimezone(3));
}

#[test]
fn decimal_scale_and_sign_validation() {
    let mut payload = [0u8; 16];
    payload[2] = 29;
    let mut bytes = vec![0x40, 0x01, 0x61, 0x94];
    bytes.extend_from_slice(&payload);
    let (_, error) = decode_err(&bytes);
    assert_eq!(error, Error::InvalidDecimalScale(29));

    payload[2] = 0;
    payload[3] = 0x7F;
    let mut bytes = vec![0x40, 0x01, 0x61, 0x94];
    bytes.extend_from_slice(&payload);
    let (_, error) = decode_err(&bytes);
    assert_eq!(error, Error::InvalidDecimalSign(0x7F));
}

#[test]
fn dictionary_key_overflows_31_bits() {
    // 0x7F bei Shift 28 ergibt einen Wert jenseits von 2^31-1.
    let (_, error) = decode_err(&[0x42, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
    assert!(matches!(error, Error::MultiByteInt31Overflow(_)));
}

#[test]
fn odd_utf16_length() {
    let (_, error) = decode_err(&[0x40, 0x01, 0x61, 0xB6, 0x03, 0x75, 0x00, 0x6E]);
    assert_eq!(error, Error::InvalidUnicodeLength(3));
}

#[test]
fn invalid_utf8_in_chars() {
    let (_, error) = decode_err(&[0x40, 0x01, 0x61, 0x98, 0x02, 0xFF, 0xFE]);
    assert_eq!(error, Error::InvalidUtf8);
}

#[test]
fn qname_prefix_index_out_of_range() {
    let (_, error) = decode_err(&[0x40, 0x01, 0x61, 0xBC, 0x1A, 0x00]);
    assert_eq!(error, Error::InvalidPrefixIndex(26));
}

// === Stack discipline ===

#[test]
fn end_element_without_open_element() {
    let (_, error) = decode_err(&[0x01]);
    assert_eq!(error, Error::StackUnderflow);
    // Auch über das fusionierte With-End-Bit.
    let (partial, error) = decode_err(&[0x83]);
    assert_eq!(error, Error::StackUnderflow);
    assert_eq!(partial, "1");
}

// === Partial output contracts ===

#[test]
fn decode_partial_is_a_document_prefix() {
    let err = Decoder::new()
        .decode(&[0x40, 0x01, 0x61, 0x99, 0x02, 0x68, 0x69, 0xBE][..])
        .unwrap_err();
    assert_eq!(err.partial, "<a>hi</a>");
    assert_eq!(err.error, Error::UnknownRecord(0xBE));
}

#[test]
fn encode_partial_is_a_byte_prefix() {
    let err = Encoder::new()
        .encode("<a>hi</a><b>&broken;</b>".as_bytes())
        .unwrap_err();
    assert_eq!(err.partial, [0x40, 0x01, 0x61, 0x99, 0x02, 0x68, 0x69, 0x40, 0x01, 0x62]);
    assert!(matches!(err.error, Error::XmlParse(_)));
}

// === Streaming sources ===

/// Delivers one byte per read call; the decoder must behave identically to
/// a slice source.
struct TrickleReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Read for TrickleReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.pos == self.data.len() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.data[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

#[test]
fn one_byte_reads_decode_identically() {
    let bytes = [
        0x40, 0x03, 0x64, 0x6F, 0x63, 0x04, 0x04, 0x61, 0x74, 0x74, 0x72, 0x84, 0x99, 0x05,
        0x68, 0x65, 0x6C, 0x6C, 0x6F,
    ];
    let from_slice = Decoder::new().decode(&bytes[..]).unwrap();
    let from_trickle = Decoder::new()
        .decode(TrickleReader { data: &bytes, pos: 0 })
        .unwrap();
    assert_eq!(from_slice, from_trickle);
    assert_eq!(from_slice, "<doc attr=\"false\">hello</doc>");
}

#[test]
fn one_byte_reads_encode_identically() {
    let xml = "<doc attr=\"false\">hello</doc>";
    let from_slice = Encoder::new().encode(xml.as_bytes()).unwrap();
    let from_trickle = Encoder::new()
        .encode(TrickleReader { data: xml.as_bytes(), pos: 0 })
        .unwrap();
    assert_eq!(from_slice, from_trickle);
}
