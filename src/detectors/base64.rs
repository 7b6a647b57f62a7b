use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DecodedText, DetectorId, Preview};
use ::base64::Engine as _;
use ::base64::alphabet;
use ::base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;
use std::sync::LazyLock;

/// Standard alphabet, padding optional, stray trailing bits tolerated.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Shortest input considered; shorter alphanumeric words are too ambiguous.
pub const MIN_LEN: usize = 8;

static BASE64_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").expect("static regex"));

/// Decode standard Base64 with optional padding.
pub fn forgiving_decode(input: &str) -> Result<Vec<u8>, DetectError> {
    Ok(FORGIVING.decode(input)?)
}

/// Decode a Base64URL segment (`-`/`_` alphabet, padding optional).
pub fn decode_url_safe(segment: &str) -> Result<Vec<u8>, DetectError> {
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    forgiving_decode(&standard)
}

fn is_printable_ascii(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| (0x20..=0x7e).contains(b))
}

pub struct Base64Detector {
    max_bytes: usize,
}

impl Base64Detector {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for Base64Detector {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_PARSE_BYTES)
    }
}

impl Detector for Base64Detector {
    fn id(&self) -> DetectorId {
        DetectorId::Base64
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        if val.len() < MIN_LEN || val.contains(' ') || !BASE64_SHAPE.is_match(val) {
            return Ok(None);
        }
        input.ensure_within(self.max_bytes)?;

        let bytes = forgiving_decode(val)?;
        // Ordinary words often satisfy the alphabet; their decodings do not
        // come out as printable text.
        if !is_printable_ascii(&bytes) {
            return Ok(None);
        }
        let decoded = String::from_utf8(bytes)?;
        Ok(Some(Preview::Base64(DecodedText { decoded })))
    }
}
