use crate::detectors::hash::HashAlgorithm;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCHEMA_VERSION: &str = "0.1.0";

/// Stable identifier of a detector. Label and priority are fixed per id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DetectorId {
    Json,
    Jwt,
    Sql,
    Color,
    Timestamp,
    UnicodeEscape,
    Base64,
    UrlEncoded,
    NumberBase,
    TextStats,
    Qrcode,
    HashDigest,
}

impl DetectorId {
    pub const ALL: [DetectorId; 12] = [
        DetectorId::Json,
        DetectorId::Jwt,
        DetectorId::Sql,
        DetectorId::Color,
        DetectorId::Timestamp,
        DetectorId::UnicodeEscape,
        DetectorId::Base64,
        DetectorId::UrlEncoded,
        DetectorId::NumberBase,
        DetectorId::TextStats,
        DetectorId::Qrcode,
        DetectorId::HashDigest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DetectorId::Json => "json",
            DetectorId::Jwt => "jwt",
            DetectorId::Sql => "sql",
            DetectorId::Color => "color",
            DetectorId::Timestamp => "timestamp",
            DetectorId::UnicodeEscape => "unicode-escape",
            DetectorId::Base64 => "base64",
            DetectorId::UrlEncoded => "url-encoded",
            DetectorId::NumberBase => "number-base",
            DetectorId::TextStats => "text-stats",
            DetectorId::Qrcode => "qrcode",
            DetectorId::HashDigest => "hash-digest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetectorId::Json => "JSON",
            DetectorId::Jwt => "JWT Token",
            DetectorId::Sql => "SQL Formatter",
            DetectorId::Color => "Color",
            DetectorId::Timestamp => "Timestamp",
            DetectorId::UnicodeEscape => "Unicode Decoded",
            DetectorId::Base64 => "Base64 Decoded",
            DetectorId::UrlEncoded => "URL Decoded",
            DetectorId::NumberBase => "Number Base",
            DetectorId::TextStats => "Text Statistics",
            DetectorId::Qrcode => "QR Code",
            DetectorId::HashDigest => "Hashes",
        }
    }

    /// Display weight; higher sorts first. These values are a product decision.
    pub fn priority(self) -> i32 {
        match self {
            DetectorId::Json | DetectorId::Jwt => 100,
            DetectorId::Sql | DetectorId::Color => 95,
            DetectorId::Timestamp => 90,
            DetectorId::UnicodeEscape | DetectorId::Base64 => 85,
            DetectorId::UrlEncoded => 80,
            DetectorId::NumberBase => 70,
            DetectorId::TextStats => 10,
            DetectorId::Qrcode | DetectorId::HashDigest => 5,
        }
    }

    /// Baseline detectors that fire for every non-empty input.
    pub fn is_always_on(self) -> bool {
        matches!(
            self,
            DetectorId::TextStats | DetectorId::Qrcode | DetectorId::HashDigest
        )
    }
}

impl fmt::Display for DetectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DetectorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetectorId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown detector: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JsonPreview {
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClaimTime {
    pub claim: String,
    pub iso8601: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JwtPreview {
    pub header: serde_json::Value,
    pub payload: serde_json::Value,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claim_times: Vec<ClaimTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SqlPreview {
    pub formatted: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorNotation {
    Hex,
    Rgb,
    Hsl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColorPreview {
    pub value: String,
    pub notation: ColorNotation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb: Option<[u32; 3]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    Seconds,
    Milliseconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimestampPreview {
    pub unit: TimestampUnit,
    pub epoch_millis: i64,
    pub iso8601: String,
    pub local: String,
    pub relative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecodedText {
    pub decoded: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumberPreview {
    pub decimal: String,
    pub hexadecimal: String,
    pub octal: String,
    pub binary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextStats {
    pub chars: usize,
    pub chars_no_whitespace: usize,
    pub words: usize,
    pub lines: usize,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QrPreview {
    /// Modules per side; 0 when nothing was encoded.
    pub width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ec_level: Option<String>,
    pub rendered: String,
    /// The text fits under the character ceiling but not in any QR symbol.
    pub too_large: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DigestEntry {
    pub algorithm: HashAlgorithm,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HashPreview {
    pub digests: Vec<DigestEntry>,
}

impl HashPreview {
    pub fn get(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.digests
            .iter()
            .find(|d| d.algorithm == algorithm)
            .map(|d| d.hex.as_str())
    }
}

/// Renderable payload of a detection, one variant per detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Preview {
    Json(JsonPreview),
    Jwt(JwtPreview),
    Sql(SqlPreview),
    Color(ColorPreview),
    Timestamp(TimestampPreview),
    UnicodeEscape(DecodedText),
    Base64(DecodedText),
    UrlEncoded(DecodedText),
    NumberBase(NumberPreview),
    TextStats(TextStats),
    Qrcode(QrPreview),
    HashDigest(HashPreview),
}

impl Preview {
    pub fn id(&self) -> DetectorId {
        match self {
            Preview::Json(_) => DetectorId::Json,
            Preview::Jwt(_) => DetectorId::Jwt,
            Preview::Sql(_) => DetectorId::Sql,
            Preview::Color(_) => DetectorId::Color,
            Preview::Timestamp(_) => DetectorId::Timestamp,
            Preview::UnicodeEscape(_) => DetectorId::UnicodeEscape,
            Preview::Base64(_) => DetectorId::Base64,
            Preview::UrlEncoded(_) => DetectorId::UrlEncoded,
            Preview::NumberBase(_) => DetectorId::NumberBase,
            Preview::TextStats(_) => DetectorId::TextStats,
            Preview::Qrcode(_) => DetectorId::Qrcode,
            Preview::HashDigest(_) => DetectorId::HashDigest,
        }
    }

    /// Decoded text for the decoding detectors.
    pub fn decoded_text(&self) -> Option<&str> {
        match self {
            Preview::UnicodeEscape(d) | Preview::Base64(d) | Preview::UrlEncoded(d) => {
                Some(&d.decoded)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionResult {
    pub id: DetectorId,
    pub label: String,
    pub priority: i32,
    pub content: Preview,
}

impl From<Preview> for DetectionResult {
    fn from(content: Preview) -> Self {
        let id = content.id();
        Self {
            id,
            label: id.label().to_string(),
            priority: id.priority(),
            content,
        }
    }
}

/// Priority-sorted results of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResultSet {
    pub version: String,
    pub results: Vec<DetectionResult>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            results: Vec::new(),
        }
    }

    /// Sort by priority descending. The sort is stable, so equal priorities
    /// keep registration order.
    pub fn from_unsorted(mut results: Vec<DetectionResult>) -> Self {
        results.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self {
            version: SCHEMA_VERSION.to_string(),
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectionResult> {
        self.results.iter()
    }

    pub fn ids(&self) -> Vec<DetectorId> {
        self.results.iter().map(|r| r.id).collect()
    }

    pub fn contains(&self, id: DetectorId) -> bool {
        self.results.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: DetectorId) -> Option<&DetectionResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// True when anything beyond the always-on baseline matched.
    pub fn has_specific_match(&self) -> bool {
        self.results.iter().any(|r| !r.id.is_always_on())
    }

    /// Keep only the given detectors, preserving order.
    pub fn retain_ids(&mut self, ids: &[DetectorId]) {
        self.results.retain(|r| ids.contains(&r.id));
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a DetectionResult;
    type IntoIter = std::slice::Iter<'a, DetectionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
