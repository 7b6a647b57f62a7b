use crate::detectors::base64::decode_url_safe;
use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{ClaimTime, DetectorId, JwtPreview, Preview};
use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// Registered claims holding NumericDate values.
const TIME_CLAIMS: [&str; 3] = ["iat", "nbf", "exp"];

fn decode_segment(segment: &str) -> Result<Value, DetectError> {
    let bytes = decode_url_safe(segment)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn claim_times(payload: &Value) -> Vec<ClaimTime> {
    TIME_CLAIMS
        .iter()
        .filter_map(|claim| {
            let secs = payload.get(*claim)?.as_i64()?;
            let at = DateTime::from_timestamp(secs, 0)?;
            Some(ClaimTime {
                claim: (*claim).to_string(),
                iso8601: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            })
        })
        .collect()
}

pub struct JwtDetector {
    max_bytes: usize,
}

impl JwtDetector {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for JwtDetector {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_PARSE_BYTES)
    }
}

impl Detector for JwtDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Jwt
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        let segments: Vec<&str> = val.split('.').collect();
        // `ey` is how a Base64URL-encoded `{"` begins.
        if segments.len() != 3 || !val.starts_with("ey") {
            return Ok(None);
        }
        input.ensure_within(self.max_bytes)?;

        let header = decode_segment(segments[0])?;
        let payload = decode_segment(segments[1])?;
        let claim_times = claim_times(&payload);

        Ok(Some(Preview::Jwt(JwtPreview {
            header,
            payload,
            signature: segments[2].to_string(),
            claim_times,
        })))
    }
}
