//! Record registry ([MC-NBFX] record types).
//!
//! Every wire record starts with a one-byte type tag. The tag space is
//! partitioned into miscellaneous records (EndElement, Comment, Array),
//! attribute records (0x04..=0x3F), element records (0x40..=0x77) and text
//! records (0x80..=0xBD). The A–Z sub-families (26 consecutive opcodes whose
//! only difference is an implicit one-letter prefix) are represented by a
//! single variant carrying the prefix index, not 26 declarations.
//!
//! Text records come in pairs: the even opcode carries the value alone, the
//! odd opcode additionally closes the enclosing element.

// Miscellaneous records.
pub const END_ELEMENT: u8 = 0x01;
pub const COMMENT: u8 = 0x02;
pub const ARRAY: u8 = 0x03;

// Attribute records.
pub const SHORT_ATTRIBUTE: u8 = 0x04;
pub const ATTRIBUTE: u8 = 0x05;
pub const SHORT_DICTIONARY_ATTRIBUTE: u8 = 0x06;
pub const DICTIONARY_ATTRIBUTE: u8 = 0x07;
pub const SHORT_XMLNS_ATTRIBUTE: u8 = 0x08;
pub const XMLNS_ATTRIBUTE: u8 = 0x09;
pub const SHORT_DICTIONARY_XMLNS_ATTRIBUTE: u8 = 0x0A;
pub const DICTIONARY_XMLNS_ATTRIBUTE: u8 = 0x0B;
pub const PREFIX_DICTIONARY_ATTRIBUTE_A: u8 = 0x0C;
pub const PREFIX_ATTRIBUTE_A: u8 = 0x26;

// Element records.
pub const SHORT_ELEMENT: u8 = 0x40;
pub const ELEMENT: u8 = 0x41;
pub const SHORT_DICTIONARY_ELEMENT: u8 = 0x42;
pub const DICTIONARY_ELEMENT: u8 = 0x43;
pub const PREFIX_DICTIONARY_ELEMENT_A: u8 = 0x44;
pub const PREFIX_ELEMENT_A: u8 = 0x5E;

// Text records (even base opcodes; +1 is the with-end-element variant).
pub const ZERO_TEXT: u8 = 0x80;
pub const ONE_TEXT: u8 = 0x82;
pub const FALSE_TEXT: u8 = 0x84;
pub const TRUE_TEXT: u8 = 0x86;
pub const INT8_TEXT: u8 = 0x88;
pub const INT16_TEXT: u8 = 0x8A;
pub const INT32_TEXT: u8 = 0x8C;
pub const INT64_TEXT: u8 = 0x8E;
pub const FLOAT_TEXT: u8 = 0x90;
pub const DOUBLE_TEXT: u8 = 0x92;
pub const DECIMAL_TEXT: u8 = 0x94;
pub const DATE_TIME_TEXT: u8 = 0x96;
pub const CHARS8_TEXT: u8 = 0x98;
pub const CHARS16_TEXT: u8 = 0x9A;
pub const CHARS32_TEXT: u8 = 0x9C;
pub const BYTES8_TEXT: u8 = 0x9E;
pub const BYTES16_TEXT: u8 = 0xA0;
pub const BYTES32_TEXT: u8 = 0xA2;
pub const START_LIST_TEXT: u8 = 0xA4;
pub const END_LIST_TEXT: u8 = 0xA6;
pub const EMPTY_TEXT: u8 = 0xA8;
pub const DICTIONARY_TEXT: u8 = 0xAA;
pub const UNIQUE_ID_TEXT: u8 = 0xAC;
pub const TIME_SPAN_TEXT: u8 = 0xAE;
pub const UUID_TEXT: u8 = 0xB0;
pub const UINT64_TEXT: u8 = 0xB2;
pub const BOOL_TEXT: u8 = 0xB4;
pub const UNICODE_CHARS8_TEXT: u8 = 0xB6;
pub const UNICODE_CHARS16_TEXT: u8 = 0xB8;
pub const UNICODE_CHARS32_TEXT: u8 = 0xBA;
pub const QNAME_DICTIONARY_TEXT: u8 = 0xBC;

/// Start-element record forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// 0x40: literal name, no prefix.
    Short,
    /// 0x41: literal prefix, literal name.
    Full,
    /// 0x42: dictionary name, no prefix.
    ShortDictionary,
    /// 0x43: literal prefix, dictionary name.
    Dictionary,
    /// 0x44 + index: one-letter prefix `'a' + index`, dictionary name.
    PrefixDictionary(u8),
    /// 0x5E + index: one-letter prefix `'a' + index`, literal name.
    Prefix(u8),
}

/// Attribute record forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// 0x04: literal name, no prefix.
    Short,
    /// 0x05: literal prefix, literal name.
    Full,
    /// 0x06: dictionary name, no prefix.
    ShortDictionary,
    /// 0x07: literal prefix, dictionary name.
    Dictionary,
    /// 0x08: default namespace declaration, literal value.
    ShortXmlns,
    /// 0x09: prefixed namespace declaration, literal value.
    Xmlns,
    /// 0x0A: default namespace declaration, dictionary value.
    ShortDictionaryXmlns,
    /// 0x0B: prefixed namespace declaration, dictionary value.
    DictionaryXmlns,
    /// 0x0C + index: one-letter prefix, dictionary name.
    PrefixDictionary(u8),
    /// 0x26 + index: one-letter prefix, literal name.
    Prefix(u8),
}

/// Scalar payload carried by a text record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Zero,
    One,
    False,
    True,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
    DateTime,
    Chars8,
    Chars16,
    Chars32,
    Bytes8,
    Bytes16,
    Bytes32,
    StartList,
    EndList,
    Empty,
    Dictionary,
    UniqueId,
    TimeSpan,
    Uuid,
    UInt64,
    Bool,
    UnicodeChars8,
    UnicodeChars16,
    UnicodeChars32,
    QNameDictionary,
}

impl TextKind {
    /// Even base opcode of the pair.
    pub fn base_opcode(self) -> u8 {
        match self {
            Self::Zero => ZERO_TEXT,
            Self::One => ONE_TEXT,
            Self::False => FALSE_TEXT,
            Self::True => TRUE_TEXT,
            Self::Int8 => INT8_TEXT,
            Self::Int16 => INT16_TEXT,
            Self::Int32 => INT32_TEXT,
            Self::Int64 => INT64_TEXT,
            Self::Float => FLOAT_TEXT,
            Self::Double => DOUBLE_TEXT,
            Self::Decimal => DECIMAL_TEXT,
            Self::DateTime => DATE_TIME_TEXT,
            Self::Chars8 => CHARS8_TEXT,
            Self::Chars16 => CHARS16_TEXT,
            Self::Chars32 => CHARS32_TEXT,
            Self::Bytes8 => BYTES8_TEXT,
            Self::Bytes16 => BYTES16_TEXT,
            Self::Bytes32 => BYTES32_TEXT,
            Self::StartList => START_LIST_TEXT,
            Self::EndList => END_LIST_TEXT,
            Self::Empty => EMPTY_TEXT,
            Self::Dictionary => DICTIONARY_TEXT,
            Self::UniqueId => UNIQUE_ID_TEXT,
            Self::TimeSpan => TIME_SPAN_TEXT,
            Self::Uuid => UUID_TEXT,
            Self::UInt64 => UINT64_TEXT,
            Self::Bool => BOOL_TEXT,
            Self::UnicodeChars8 => UNICODE_CHARS8_TEXT,
            Self::UnicodeChars16 => UNICODE_CHARS16_TEXT,
            Self::UnicodeChars32 => UNICODE_CHARS32_TEXT,
            Self::QNameDictionary => QNAME_DICTIONARY_TEXT,
        }
    }

    fn from_base_opcode(op: u8) -> Option<Self> {
        Some(match op {
            ZERO_TEXT => Self::Zero,
            ONE_TEXT => Self::One,
            FALSE_TEXT => Self::False,
            TRUE_TEXT => Self::True,
            INT8_TEXT => Self::Int8,
            INT16_TEXT => Self::Int16,
            INT32_TEXT => Self::Int32,
            INT64_TEXT => Self::Int64,
            FLOAT_TEXT => Self::Float,
            DOUBLE_TEXT => Self::Double,
            DECIMAL_TEXT => Self::Decimal,
            DATE_TIME_TEXT => Self::DateTime,
            CHARS8_TEXT => Self::Chars8,
            CHARS16_TEXT => Self::Chars16,
            CHARS32_TEXT => Self::Chars32,
            BYTES8_TEXT => Self::Bytes8,
            BYTES16_TEXT => Self::Bytes16,
            BYTES32_TEXT => Self::Bytes32,
            START_LIST_TEXT => Self::StartList,
            END_LIST_TEXT => Self::EndList,
            EMPTY_TEXT => Self::Empty,
            DICTIONARY_TEXT => Self::Dictionary,
            UNIQUE_ID_TEXT => Self::UniqueId,
            TIME_SPAN_TEXT => Self::TimeSpan,
            UUID_TEXT => Self::Uuid,
            UINT64_TEXT => Self::UInt64,
            BOOL_TEXT => Self::Bool,
            UNICODE_CHARS8_TEXT => Self::UnicodeChars8,
            UNICODE_CHARS16_TEXT => Self::UnicodeChars16,
            UNICODE_CHARS32_TEXT => Self::UnicodeChars32,
            QNAME_DICTIONARY_TEXT => Self::QNameDictionary,
            _ => return None,
        })
    }

    /// Record name without the with-end suffix (`"ZeroText"`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "ZeroText",
            Self::One => "OneText",
            Self::False => "FalseText",
            Self::True => "TrueText",
            Self::Int8 => "Int8Text",
            Self::Int16 => "Int16Text",
            Self::Int32 => "Int32Text",
            Self::Int64 => "Int64Text",
            Self::Float => "FloatText",
            Self::Double => "DoubleText",
            Self::Decimal => "DecimalText",
            Self::DateTime => "DateTimeText",
            Self::Chars8 => "Chars8Text",
            Self::Chars16 => "Chars16Text",
            Self::Chars32 => "Chars32Text",
            Self::Bytes8 => "Bytes8Text",
            Self::Bytes16 => "Bytes16Text",
            Self::Bytes32 => "Bytes32Text",
            Self::StartList => "StartListText",
            Self::EndList => "EndListText",
            Self::Empty => "EmptyText",
            Self::Dictionary => "DictionaryText",
            Self::UniqueId => "UniqueIdText",
            Self::TimeSpan => "TimeSpanText",
            Self::Uuid => "UuidText",
            Self::UInt64 => "UInt64Text",
            Self::Bool => "BoolText",
            Self::UnicodeChars8 => "UnicodeChars8Text",
            Self::UnicodeChars16 => "UnicodeChars16Text",
            Self::UnicodeChars32 => "UnicodeChars32Text",
            Self::QNameDictionary => "QNameDictionaryText",
        }
    }
}

/// One decoded record type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    EndElement,
    Comment,
    Array,
    Element(ElementKind),
    Attribute(AttributeKind),
    Text { kind: TextKind, with_end: bool },
}

impl RecordKind {
    /// Maps an opcode byte to its record, `None` for unassigned bytes
    /// (0x00, 0x78..=0x7F, 0xBE..).
    pub fn from_opcode(op: u8) -> Option<Self> {
        Some(match op {
            END_ELEMENT => Self::EndElement,
            COMMENT => Self::Comment,
            ARRAY => Self::Array,
            SHORT_ATTRIBUTE => Self::Attribute(AttributeKind::Short),
            ATTRIBUTE => Self::Attribute(AttributeKind::Full),
            SHORT_DICTIONARY_ATTRIBUTE => Self::Attribute(AttributeKind::ShortDictionary),
            DICTIONARY_ATTRIBUTE => Self::Attribute(AttributeKind::Dictionary),
            SHORT_XMLNS_ATTRIBUTE => Self::Attribute(AttributeKind::ShortXmlns),
            XMLNS_ATTRIBUTE => Self::Attribute(AttributeKind::Xmlns),
            SHORT_DICTIONARY_XMLNS_ATTRIBUTE => {
                Self::Attribute(AttributeKind::ShortDictionaryXmlns)
            }
            DICTIONARY_XMLNS_ATTRIBUTE => Self::Attribute(AttributeKind::DictionaryXmlns),
            0x0C..=0x25 => {
                Self::Attribute(AttributeKind::PrefixDictionary(op - PREFIX_DICTIONARY_ATTRIBUTE_A))
            }
            0x26..=0x3F => Self::Attribute(AttributeKind::Prefix(op - PREFIX_ATTRIBUTE_A)),
            SHORT_ELEMENT => Self::Element(ElementKind::Short),
            ELEMENT => Self::Element(ElementKind::Full),
            SHORT_DICTIONARY_ELEMENT => Self::Element(ElementKind::ShortDictionary),
            DICTIONARY_ELEMENT => Self::Element(ElementKind::Dictionary),
            0x44..=0x5D => {
                Self::Element(ElementKind::PrefixDictionary(op - PREFIX_DICTIONARY_ELEMENT_A))
            }
            0x5E..=0x77 => Self::Element(ElementKind::Prefix(op - PREFIX_ELEMENT_A)),
            0x80..=0xBD => Self::Text {
                kind: TextKind::from_base_opcode(op & !1)?,
                with_end: op & 1 == 1,
            },
            _ => return None,
        })
    }

    /// Inverse of [`RecordKind::from_opcode`].
    pub fn opcode(&self) -> u8 {
        match *self {
            Self::EndElement => END_ELEMENT,
            Self::Comment => COMMENT,
            Self::Array => ARRAY,
            Self::Element(kind) => match kind {
                ElementKind::Short => SHORT_ELEMENT,
                ElementKind::Full => ELEMENT,
                ElementKind::ShortDictionary => SHORT_DICTIONARY_ELEMENT,
                ElementKind::Dictionary => DICTIONARY_ELEMENT,
                ElementKind::PrefixDictionary(i) => PREFIX_DICTIONARY_ELEMENT_A + i,
                ElementKind::Prefix(i) => PREFIX_ELEMENT_A + i,
            },
            Self::Attribute(kind) => match kind {
                AttributeKind::Short => SHORT_ATTRIBUTE,
                AttributeKind::Full => ATTRIBUTE,
                AttributeKind::ShortDictionary => SHORT_DICTIONARY_ATTRIBUTE,
                AttributeKind::Dictionary => DICTIONARY_ATTRIBUTE,
                AttributeKind::ShortXmlns => SHORT_XMLNS_ATTRIBUTE,
                AttributeKind::Xmlns => XMLNS_ATTRIBUTE,
                AttributeKind::ShortDictionaryXmlns => SHORT_DICTIONARY_XMLNS_ATTRIBUTE,
                AttributeKind::DictionaryXmlns => DICTIONARY_XMLNS_ATTRIBUTE,
                AttributeKind::PrefixDictionary(i) => PREFIX_DICTIONARY_ATTRIBUTE_A + i,
                AttributeKind::Prefix(i) => PREFIX_ATTRIBUTE_A + i,
            },
            Self::Text { kind, with_end } => kind.base_opcode() | u8::from(with_end),
        }
    }

    /// Display name with opcode, for error messages
    /// (`"PrefixDictionaryElementS (0x56)"`).
    pub fn name(&self) -> String {
        let op = self.opcode();
        match *self {
            Self::EndElement => format!("EndElement ({op:#04x})"),
            Self::Comment => format!("Comment ({op:#04x})"),
            Self::Array => format!("Array ({op:#04x})"),
            Self::Element(kind) => match kind {
                ElementKind::Short => format!("ShortElement ({op:#04x})"),
                ElementKind::Full => format!("Element ({op:#04x})"),
                ElementKind::ShortDictionary => format!("ShortDictionaryElement ({op:#04x})"),
                ElementKind::Dictionary => format!("DictionaryElement ({op:#04x})"),
                ElementKind::PrefixDictionary(i) => {
                    format!("PrefixDictionaryElement{} ({op:#04x})", prefix_letter_upper(i))
                }
                ElementKind::Prefix(i) => {
                    format!("PrefixElement{} ({op:#04x})", prefix_letter_upper(i))
                }
            },
            Self::Attribute(kind) => match kind {
                AttributeKind::Short => format!("ShortAttribute ({op:#04x})"),
                AttributeKind::Full => format!("Attribute ({op:#04x})"),
                AttributeKind::ShortDictionary => format!("ShortDictionaryAttribute ({op:#04x})"),
                AttributeKind::Dictionary => format!("DictionaryAttribute ({op:#04x})"),
                AttributeKind::ShortXmlns => format!("ShortXmlnsAttribute ({op:#04x})"),
                AttributeKind::Xmlns => format!("XmlnsAttribute ({op:#04x})"),
                AttributeKind::ShortDictionaryXmlns => {
                    format!("ShortDictionaryXmlnsAttribute ({op:#04x})")
                }
                AttributeKind::DictionaryXmlns => format!("DictionaryXmlnsAttribute ({op:#04x})"),
                AttributeKind::PrefixDictionary(i) => {
                    format!("PrefixDictionaryAttribute{} ({op:#04x})", prefix_letter_upper(i))
                }
                AttributeKind::Prefix(i) => {
                    format!("PrefixAttribute{} ({op:#04x})", prefix_letter_upper(i))
                }
            },
            Self::Text { kind, with_end } => {
                if with_end {
                    format!("{}WithEndElement ({op:#04x})", kind.name())
                } else {
                    format!("{} ({op:#04x})", kind.name())
                }
            }
        }
    }
}

/// Implicit prefix of an A–Z record: `'a' + index`.
pub fn prefix_letter(index: u8) -> char {
    debug_assert!(index < 26, "prefix index {index} out of range");
    (b'a' + index) as char
}

fn prefix_letter_upper(index: u8) -> char {
    (b'A' + index) as char
}

/// Prefix index of a single lowercase ASCII letter, `None` otherwise.
pub fn prefix_index(prefix: &str) -> Option<u8> {
    match prefix.as_bytes() {
        [b] if b.is_ascii_lowercase() => Some(b - b'a'),
        _ => None,
    }
}
