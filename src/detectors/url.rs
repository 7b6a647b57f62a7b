use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DecodedText, DetectorId, Preview};
use regex::Regex;
use std::sync::LazyLock;

static PERCENT_TRIPLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").expect("static regex"));

// Every `%` must start a triplet; a bare `%` or `%zz` makes the whole input
// undecodable.
static WELL_FORMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[^%]|%[0-9A-Fa-f]{2})*$").expect("static regex"));

/// Strict percent-decoding. `+` stays a `+`.
pub fn percent_decode(val: &str) -> Result<String, DetectError> {
    if !WELL_FORMED.is_match(val) {
        return Err(DetectError::MalformedPercentEncoding);
    }
    Ok(urlencoding::decode(val)?.into_owned())
}

pub struct UrlEncodedDetector {
    max_bytes: usize,
}

impl UrlEncodedDetector {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for UrlEncodedDetector {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_PARSE_BYTES)
    }
}

impl Detector for UrlEncodedDetector {
    fn id(&self) -> DetectorId {
        DetectorId::UrlEncoded
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        if !PERCENT_TRIPLET.is_match(val) {
            return Ok(None);
        }
        input.ensure_within(self.max_bytes)?;

        let decoded = percent_decode(val)?;
        if decoded == val {
            return Ok(None);
        }
        Ok(Some(Preview::UrlEncoded(DecodedText { decoded })))
    }
}
