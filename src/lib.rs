//! rnbfx – Microsoft .NET Binary XML Format ([MC-NBFX]) codec,
//! including the SOAP profile with the well-known dictionary ([MC-NBFS]).
//!
//! An [`Encoder`] turns an XML token stream into the compact record-tagged
//! binary form; a [`Decoder`] turns the binary form back into XML text. The
//! two directions are exact inverses for every document the encoder accepts.
//!
//! # Beispiel
//!
//! ```
//! use rnbfx::{Decoder, Encoder};
//!
//! let encoder = Encoder::new();
//! let bytes = encoder.encode("<doc>true</doc>".as_bytes()).unwrap();
//! assert_eq!(bytes, [0x40, 0x03, 0x64, 0x6F, 0x63, 0x87]);
//!
//! let decoder = Decoder::new();
//! let xml = decoder.decode(&bytes[..]).unwrap();
//! assert_eq!(xml, "<doc>true</doc>");
//! ```
//!
//! With a dictionary shared between producer and consumer, names and values
//! compress to one- or two-byte records:
//!
//! ```
//! use rnbfx::Decoder;
//!
//! let decoder = Decoder::with_dictionary([(2, "Envelope".to_string())]);
//! assert_eq!(decoder.decode(&[0x56, 0x02][..]).unwrap(), "<s:Envelope>");
//! ```

pub mod binary;
pub mod bytestream;
pub mod datetime;
pub mod decimal;
pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod error;
pub mod float;
pub mod integer;
pub mod multi_byte_int31;
pub mod nbfs;
pub mod records;
pub mod string;
pub mod timespan;
pub mod token;
pub mod typed_value;
pub mod uuid;
pub mod xml;
pub mod xml_serializer;

pub use error::{Error, Result};

/// HashMap mit ahash (schneller, nicht DoS-resistent — für interne Datenstrukturen).
pub(crate) type FastHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

// Public API: Codecs
pub use decoder::{DecodeError, Decoder};
pub use encoder::{EncodeError, Encoder};

// Public API: Dictionary
pub use dictionary::Dictionary;

// Public API: Token model
pub use token::{Attribute, Name, XmlToken};
