//! Any XML the encoder accepts must decode back to the identical document.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rnbfx::{Decoder, Encoder};

fuzz_target!(|xml: &str| {
    let encoder = Encoder::new();
    if let Ok(bytes) = encoder.encode(xml.as_bytes()) {
        let decoder = Decoder::new();
        let decoded = decoder
            .decode(&bytes[..])
            .expect("encoder output must decode");
        let re_encoded = encoder
            .encode(decoded.as_bytes())
            .expect("decoded XML must re-encode");
        assert_eq!(re_encoded, bytes);
    }
});
