//! Arbitrary bytes must never panic the decoder; a decoded document must
//! re-decode identically (the decoder is deterministic).

#![no_main]

use libfuzzer_sys::fuzz_target;
use rnbfx::Decoder;

fuzz_target!(|data: &[u8]| {
    let decoder = Decoder::new();
    if let Ok(xml) = decoder.decode(data) {
        let again = decoder.decode(data).unwrap();
        assert_eq!(xml, again);
    }
});
