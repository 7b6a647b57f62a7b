use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, Preview, TextStats};

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            chars_no_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
            words: text.split_whitespace().count(),
            lines: count_lines(text),
            bytes: text.len(),
        }
    }
}

/// Line count over CR, LF and CRLF breaks. Never less than one.
fn count_lines(text: &str) -> usize {
    let mut lines = 1;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => lines += 1,
            '\r' => {
                chars.next_if_eq(&'\n');
                lines += 1;
            }
            _ => {}
        }
    }
    lines
}

#[derive(Default)]
pub struct TextStatsDetector;

impl TextStatsDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for TextStatsDetector {
    fn id(&self) -> DetectorId {
        DetectorId::TextStats
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        Ok(Some(Preview::TextStats(TextStats::of(input.as_str()))))
    }
}
