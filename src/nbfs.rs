//! NBFS profile ([MC-NBFS]): NBFX with the well-known SOAP dictionary.
//!
//! The wire semantics are identical to raw NBFX; the only difference is the
//! static dictionary both sides agree on, which compresses the SOAP/WS-*
//! vocabulary to one- or two-byte dictionary records. Static entries use
//! the even keys; odd keys are reserved for session dictionaries negotiated
//! out of band, which this codec treats as gaps (`str<N>`).

use crate::decoder::Decoder;
use crate::dictionary::Dictionary;
use crate::encoder::Encoder;

/// The static [MC-NBFS] dictionary: SOAP 1.1/1.2, WS-Addressing,
/// WS-ReliableMessaging, XML Signature/Encryption and WS-Security
/// vocabulary.
pub const DICTIONARY: &[(u32, &str)] = &[
    (0, "mustUnderstand"),
    (2, "Envelope"),
    (4, "http://www.w3.org/2003/05/soap-envelope"),
    (6, "http://www.w3.org/2005/08/addressing"),
    (8, "Header"),
    (10, "Action"),
    (12, "To"),
    (14, "Body"),
    (16, "Algorithm"),
    (18, "RelatesTo"),
    (20, "http://www.w3.org/2005/08/addressing/anonymous"),
    (22, "URI"),
    (24, "Reference"),
    (26, "MessageID"),
    (28, "Id"),
    (30, "Identifier"),
    (32, "http://schemas.xmlsoap.org/ws/2005/02/rm"),
    (34, "Transforms"),
    (36, "Transform"),
    (38, "DigestMethod"),
    (40, "DigestValue"),
    (42, "Address"),
    (44, "ReplyTo"),
    (46, "SequenceAcknowledgement"),
    (48, "AcknowledgementRange"),
    (50, "Upper"),
    (52, "Lower"),
    (54, "BufferRemaining"),
    (56, "http://schemas.microsoft.com/ws/2006/05/rm"),
    (58, "http://schemas.xmlsoap.org/ws/2005/02/rm/SequenceAcknowledgement"),
    (60, "SecurityTokenReference"),
    (62, "Sequence"),
    (64, "MessageNumber"),
    (66, "http://www.w3.org/2000/09/xmldsig#"),
    (68, "http://www.w3.org/2000/09/xmldsig#enveloped-signature"),
    (70, "KeyInfo"),
    (72, "Signature"),
    (74, "SignedInfo"),
    (76, "CanonicalizationMethod"),
    (78, "SignatureMethod"),
    (80, "SignatureValue"),
    (82, "KeyIdentifier"),
    (84, "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd"),
    (86, "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd"),
    (88, "http://docs.oasis-open.org/wss/oasis-wss-soap-message-security-1.1#EncryptedKeySHA1"),
    (90, "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-x509-token-profile-1.0#X509v3"),
    (92, "EncryptedKey"),
    (94, "EncryptionMethod"),
    (96, "CipherData"),
    (98, "CipherValue"),
    (100, "http://www.w3.org/2001/04/xmlenc#"),
    (102, "DataReference"),
    (104, "EncryptedData"),
    (106, "http://www.w3.org/2001/04/xmlenc#aes128-cbc"),
    (108, "http://www.w3.org/2001/04/xmlenc#kw-aes128"),
    (110, "http://www.w3.org/2001/04/xmlenc#aes192-cbc"),
    (112, "http://www.w3.org/2001/04/xmlenc#kw-aes192"),
    (114, "http://www.w3.org/2001/04/xmlenc#aes256-cbc"),
    (116, "http://www.w3.org/2001/04/xmlenc#kw-aes256"),
    (118, "http://www.w3.org/2001/04/xmlenc#des-cbc"),
    (120, "http://www.w3.org/2000/09/xmldsig#dsa-sha1"),
    (122, "http://www.w3.org/2000/09/xmldsig#rsa-sha1"),
    (124, "http://www.w3.org/2000/09/xmldsig#sha1"),
    (126, "http://www.w3.org/2001/04/xmlenc#sha256"),
    (128, "http://www.w3.org/2001/04/xmlenc#sha512"),
    (130, "http://www.w3.org/2001/04/xmlenc#rsa-1_5"),
    (132, "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p"),
    (134, "http://www.w3.org/2001/10/xml-exc-c14n#"),
    (136, "http://www.w3.org/2001/10/xml-exc-c14n#WithComments"),
    (138, "http://www.w3.org/2000/09/xmldsig#hmac-sha1"),
    (140, "http://www.w3.org/2001/04/xmldsig-more#hmac-sha256"),
    (142, "http://schemas.xmlsoap.org/ws/2005/02/sc/dk/p_sha1"),
    (144, "http://www.w3.org/2001/04/xmlenc#ripemd160"),
    (146, "http://www.w3.org/2001/04/xmlenc#kw-tripledes"),
    (148, "http://www.w3.org/2001/04/xmlenc#tripledes-cbc"),
    (150, "http://schemas.xmlsoap.org/2005/02/trust/spnego#GSS_Wrap"),
    (152, "http://schemas.xmlsoap.org/2005/02/trust/tlsnego#TLS_Wrap"),
    (154, "http://schemas.xmlsoap.org/ws/2005/02/sc"),
    (156, "http://schemas.xmlsoap.org/ws/2005/02/sc/dk"),
    (158, "http://schemas.xmlsoap.org/ws/2005/02/sc/sct"),
    (160, "http://schemas.xmlsoap.org/ws/2005/02/trust/RST/SCT"),
    (162, "http://schemas.xmlsoap.org/ws/2005/02/trust/RSTR/SCT"),
    (164, "SecurityContextToken"),
    (166, "DerivedKeyToken"),
    (168, "Nonce"),
    (170, "Offset"),
    (172, "Length"),
    (174, "Label"),
    (176, "Generation"),
    (178, "Created"),
    (180, "Expires"),
    (182, "Timestamp"),
    (184, "Username"),
    (186, "UsernameToken"),
    (188, "Password"),
    (190, "PasswordText"),
    (192, "BinarySecurityToken"),
    (194, "EncodingType"),
    (196, "ValueType"),
    (198, "Security"),
    (200, "http://schemas.xmlsoap.org/ws/2005/02/trust"),
    (202, "RequestSecurityToken"),
    (204, "RequestSecurityTokenResponse"),
    (206, "RequestType"),
    (208, "TokenType"),
    (210, "RequestedSecurityToken"),
    (212, "RequestedProofToken"),
    (214, "RequestedTokenCancelled"),
    (216, "Entropy"),
    (218, "BinarySecret"),
    (220, "KeySize"),
    (222, "Lifetime"),
    (224, "ComputedKey"),
    (226, "http://schemas.xmlsoap.org/ws/2005/02/trust/CK/PSHA1"),
    (228, "http://schemas.xmlsoap.org/ws/2005/02/trust/Issue"),
    (230, "http://schemas.xmlsoap.org/ws/2005/02/trust/Renew"),
    (232, "http://schemas.xmlsoap.org/ws/2005/02/trust/Cancel"),
    (234, "SignatureConfirmation"),
    (236, "Value"),
    (238, "Fault"),
    (240, "MustUnderstand"),
    (242, "Sender"),
    (244, "Receiver"),
    (246, "Code"),
    (248, "Reason"),
    (250, "Text"),
    (252, "Detail"),
    (254, "Subcode"),
    (256, "NotUnderstood"),
    (258, "qname"),
    (260, "http://schemas.xmlsoap.org/soap/envelope/"),
    (262, "http://schemas.xmlsoap.org/ws/2004/08/addressing"),
    (264, "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous"),
    (266, "http://schemas.xmlsoap.org/ws/2004/08/addressing/fault"),
    (268, "http://www.w3.org/2005/08/addressing/fault"),
    (270, "FaultTo"),
    (272, "From"),
    (274, "EndpointReference"),
    (276, "ReferenceParameters"),
    (278, "IsReferenceParameter"),
    (280, "ServiceName"),
    (282, "PortName"),
    (284, "PortType"),
    (286, "Metadata"),
];

/// Decoder over the well-known NBFS dictionary.
pub fn decoder() -> Decoder {
    Decoder::from_dictionary(dictionary())
}

/// Encoder over the well-known NBFS dictionary.
pub fn encoder() -> Encoder {
    Encoder::from_dictionary(dictionary())
}

/// The static table as a [`Dictionary`].
pub fn dictionary() -> Dictionary {
    Dictionary::from_entries(DICTIONARY.iter().copied())
}
