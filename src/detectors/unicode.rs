use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DecodedText, DetectorId, Preview};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Runs of consecutive `\uXXXX` escapes, so surrogate pairs decode together.
static ESCAPE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\\u[0-9a-fA-F]{4})+").expect("static regex"));

fn decode_run(run: &str) -> String {
    // Each escape is exactly six ASCII bytes.
    let units = run
        .as_bytes()
        .chunks(6)
        .filter_map(|escape| std::str::from_utf8(&escape[2..]).ok())
        .filter_map(|hex| u16::from_str_radix(hex, 16).ok());
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Replace every `\uXXXX` escape; anything else is left untouched.
pub fn decode_unicode_escapes(val: &str) -> String {
    ESCAPE_RUN
        .replace_all(val, |caps: &Captures| decode_run(&caps[0]))
        .into_owned()
}

pub struct UnicodeEscapeDetector {
    max_bytes: usize,
}

impl UnicodeEscapeDetector {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for UnicodeEscapeDetector {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_PARSE_BYTES)
    }
}

impl Detector for UnicodeEscapeDetector {
    fn id(&self) -> DetectorId {
        DetectorId::UnicodeEscape
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        if !ESCAPE_RUN.is_match(val) {
            return Ok(None);
        }
        input.ensure_within(self.max_bytes)?;

        let decoded = decode_unicode_escapes(val);
        if decoded == val {
            return Ok(None);
        }
        Ok(Some(Preview::UnicodeEscape(DecodedText { decoded })))
    }
}
