use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, Preview, QrPreview};
use ::qrcode::{EcLevel, QrCode};
use tracing::debug;

/// Longest input, in characters, that gets a symbol preview.
pub const DEFAULT_MAX_CHARS: usize = 2000;

pub struct QrCodeDetector {
    max_chars: usize,
}

impl QrCodeDetector {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Default for QrCodeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl Detector for QrCodeDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Qrcode
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        // Over the ceiling the preview omits itself rather than failing.
        if input.char_count() > self.max_chars {
            return Ok(None);
        }

        // Under the ceiling the result is always present; data that fits no
        // symbol yields an empty rendering instead.
        let Some((code, level)) = encode(input.as_str()) else {
            debug!(bytes = input.len(), "input exceeds QR capacity");
            return Ok(Some(Preview::Qrcode(QrPreview {
                width: 0,
                ec_level: None,
                rendered: String::new(),
                too_large: true,
            })));
        };
        let rendered = code
            .render::<char>()
            .quiet_zone(false)
            .module_dimensions(2, 1)
            .dark_color('█')
            .light_color(' ')
            .build();

        Ok(Some(Preview::Qrcode(QrPreview {
            width: code.width(),
            ec_level: Some(level.to_string()),
            rendered,
            too_large: false,
        })))
    }
}

/// Encode at level M, dropping to L when the data only fits there.
fn encode(text: &str) -> Option<(QrCode, &'static str)> {
    [(EcLevel::M, "M"), (EcLevel::L, "L")]
        .into_iter()
        .find_map(|(level, name)| {
            QrCode::with_error_correction_level(text, level)
                .ok()
                .map(|code| (code, name))
        })
}
