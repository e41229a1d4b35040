//! Decode the textual content of a knock into payload bytes.
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use log::warn;
use strum::{Display, EnumString};

const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How the content of a knock is written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PayloadEncoding {
    /// The UTF-8 bytes of the text.
    #[default]
    Raw,
    /// Pairs of hexadecimal digits, a trailing odd digit is ignored.
    Hex,
    /// Standard base64, padding optional.
    Base64,
}

impl PayloadEncoding {
    /// Decode `content`. Invalid content decodes to an empty payload.
    ///
    /// ```
    /// use portknock::payload::PayloadEncoding;
    ///
    /// assert_eq!(PayloadEncoding::Hex.decode("abcd"), vec![0xAB, 0xCD]);
    /// assert_eq!(PayloadEncoding::Base64.decode("aGk"), b"hi".to_vec());
    /// assert!(PayloadEncoding::Hex.decode("zz").is_empty());
    /// ```
    pub fn decode(&self, content: &str) -> Vec<u8> {
        let decoded = match self {
            PayloadEncoding::Raw => return content.as_bytes().to_vec(),
            PayloadEncoding::Hex => {
                let bytes = content.as_bytes();
                hex::decode(&bytes[..bytes.len() & !1]).map_err(|error| error.to_string())
            }
            PayloadEncoding::Base64 => BASE64.decode(content).map_err(|error| error.to_string()),
        };
        decoded.unwrap_or_else(|error| {
            warn!("cannot decode {} content={:?} error={}", self, content, error);
            Vec::new()
        })
    }
}
