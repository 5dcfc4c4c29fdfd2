//! Every accepted varint re-encodes to its canonical form, and every
//! canonical form decodes back to the same value.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rnbfx::bytestream::{ByteReader, ByteWriter};
use rnbfx::multi_byte_int31;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    if let Ok(value) = multi_byte_int31::read(&mut reader) {
        let mut writer = ByteWriter::new();
        multi_byte_int31::write(&mut writer, value).unwrap();
        let canonical = writer.into_vec();
        assert!(canonical.len() <= 5);

        let mut reader = ByteReader::new(&canonical[..]);
        assert_eq!(multi_byte_int31::read(&mut reader).unwrap(), value);
    }
});
