//! Dedicated single-purpose tools the preview can hand off to.
//!
//! The tools themselves live outside this crate; this module only names them
//! so a front end can offer a fallback when nothing specific was detected.

use crate::schema::DetectorId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    JsonFormatter,
    SqlFormatter,
    Timestamp,
    ColorPalette,
    Base64,
    HashGenerator,
    UrlEncoder,
    UuidGenerator,
    NumberBase,
    DiffViewer,
    TextInspector,
    RandomString,
    UnicodeConverter,
    JwtDecoder,
    QrCodeGenerator,
    FullscreenColor,
}

impl ToolId {
    /// Catalog in display order.
    pub const ALL: [ToolId; 16] = [
        ToolId::JsonFormatter,
        ToolId::SqlFormatter,
        ToolId::Timestamp,
        ToolId::ColorPalette,
        ToolId::Base64,
        ToolId::HashGenerator,
        ToolId::UrlEncoder,
        ToolId::UuidGenerator,
        ToolId::NumberBase,
        ToolId::DiffViewer,
        ToolId::TextInspector,
        ToolId::RandomString,
        ToolId::UnicodeConverter,
        ToolId::JwtDecoder,
        ToolId::QrCodeGenerator,
        ToolId::FullscreenColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::JsonFormatter => "json-formatter",
            ToolId::SqlFormatter => "sql-formatter",
            ToolId::Timestamp => "timestamp",
            ToolId::ColorPalette => "color-palette",
            ToolId::Base64 => "base64",
            ToolId::HashGenerator => "hash-generator",
            ToolId::UrlEncoder => "url-encoder",
            ToolId::UuidGenerator => "uuid-generator",
            ToolId::NumberBase => "number-base",
            ToolId::DiffViewer => "diff-viewer",
            ToolId::TextInspector => "text-inspector",
            ToolId::RandomString => "random-string",
            ToolId::UnicodeConverter => "unicode-converter",
            ToolId::JwtDecoder => "jwt-decoder",
            ToolId::QrCodeGenerator => "qr-code-generator",
            ToolId::FullscreenColor => "fullscreen-color",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolId::JsonFormatter => "JSON",
            ToolId::SqlFormatter => "SQL Formatter",
            ToolId::Timestamp => "Datetime",
            ToolId::ColorPalette => "Color",
            ToolId::Base64 => "Base64",
            ToolId::HashGenerator => "Hash Gen",
            ToolId::UrlEncoder => "URL Encoding",
            ToolId::UuidGenerator => "UUID",
            ToolId::NumberBase => "Number Base",
            ToolId::DiffViewer => "Text Diff",
            ToolId::TextInspector => "Char Counter",
            ToolId::RandomString => "Random String",
            ToolId::UnicodeConverter => "Unicode",
            ToolId::JwtDecoder => "JWT Decoder",
            ToolId::QrCodeGenerator => "QR Code",
            ToolId::FullscreenColor => "Fullscreen Color",
        }
    }

    /// The dedicated tool that handles a detector's format in depth.
    pub fn for_detector(id: DetectorId) -> ToolId {
        match id {
            DetectorId::Json => ToolId::JsonFormatter,
            DetectorId::Jwt => ToolId::JwtDecoder,
            DetectorId::Sql => ToolId::SqlFormatter,
            DetectorId::Color => ToolId::ColorPalette,
            DetectorId::Timestamp => ToolId::Timestamp,
            DetectorId::UnicodeEscape => ToolId::UnicodeConverter,
            DetectorId::Base64 => ToolId::Base64,
            DetectorId::UrlEncoded => ToolId::UrlEncoder,
            DetectorId::NumberBase => ToolId::NumberBase,
            DetectorId::TextStats => ToolId::TextInspector,
            DetectorId::Qrcode => ToolId::QrCodeGenerator,
            DetectorId::HashDigest => ToolId::HashGenerator,
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolId::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tool: {}", s))
    }
}
