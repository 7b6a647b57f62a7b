use crate::schema::{DetectorId, Preview};
use thiserror::Error;

pub mod base64;
pub mod clock;
pub mod color;
pub mod hash;
pub mod json;
pub mod jwt;
pub mod number;
pub mod qrcode;
pub mod sql;
pub mod text_stats;
pub mod timestamp;
pub mod unicode;
pub mod url;

pub mod test_utils;

pub use self::base64::Base64Detector;
pub use clock::Clock;
pub use color::ColorDetector;
pub use hash::{HashAlgorithm, HashDetector};
pub use json::JsonDetector;
pub use jwt::JwtDetector;
pub use number::NumberBaseDetector;
pub use qrcode::QrCodeDetector;
pub use sql::SqlDetector;
pub use text_stats::TextStatsDetector;
pub use timestamp::TimestampDetector;
pub use unicode::UnicodeEscapeDetector;
pub use url::UrlEncodedDetector;

/// Default upper bound on input fed to the parsing detectors.
pub const DEFAULT_MAX_PARSE_BYTES: usize = 1024 * 1024;

/// A single independent heuristic.
///
/// `Ok(None)` means the input is well formed but outside the heuristic
/// (semantic mismatch). `Err` means a parse failure. The engine treats both
/// the same way: the detector contributes nothing to the pass.
pub trait Detector: Send + Sync {
    fn id(&self) -> DetectorId;
    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError>;

    fn name(&self) -> &'static str {
        self.id().as_str()
    }
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid base64: {0}")]
    Base64(#[from] ::base64::DecodeError),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("malformed percent-encoding")]
    MalformedPercentEncoding,
    #[error("invalid integer literal: {0}")]
    Number(#[from] num_bigint::ParseBigIntError),
    #[error("invalid integer: {0}")]
    Integer(#[from] std::num::ParseIntError),
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
    #[error("input is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
}

/// The trimmed text every detector sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionInput {
    text: String,
}

impl DetectionInput {
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Fail with `InputTooLarge` when the input exceeds `limit` bytes.
    pub fn ensure_within(&self, limit: usize) -> Result<(), DetectError> {
        if self.len() > limit {
            return Err(DetectError::InputTooLarge {
                len: self.len(),
                limit,
            });
        }
        Ok(())
    }
}

impl AsRef<str> for DetectionInput {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
