use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{ColorNotation, ColorPreview, DetectorId, Preview};
use regex::Regex;
use std::sync::LazyLock;

static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("static regex"));

// Components are not range-checked: rgb(999,999,999) still counts.
static RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^rgb\(\s*([0-9]+)\s*,\s*([0-9]+)\s*,\s*([0-9]+)\s*\)$").expect("static regex")
});

fn expand_hex(digits: &str) -> String {
    if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    }
}

fn hex_to_rgb(digits: &str) -> Option<[u32; 3]> {
    let expanded = expand_hex(digits);
    let channel = |i: usize| u32::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn rgb_to_hex(rgb: [u32; 3]) -> Option<String> {
    if rgb.iter().any(|c| *c > 255) {
        return None;
    }
    Some(format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]))
}

#[derive(Default)]
pub struct ColorDetector;

impl ColorDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for ColorDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Color
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();

        let preview = if let Some(caps) = HEX.captures(val) {
            let digits = &caps[1];
            ColorPreview {
                value: val.to_string(),
                notation: ColorNotation::Hex,
                hex: Some(format!("#{}", expand_hex(digits).to_uppercase())),
                rgb: hex_to_rgb(digits),
            }
        } else if let Some(caps) = RGB.captures(val) {
            let channel = |i: usize| caps[i].parse::<u32>().ok();
            let rgb = match (channel(1), channel(2), channel(3)) {
                (Some(r), Some(g), Some(b)) => Some([r, g, b]),
                _ => None,
            };
            ColorPreview {
                value: val.to_string(),
                notation: ColorNotation::Rgb,
                hex: rgb.and_then(rgb_to_hex),
                rgb,
            }
        } else if val.starts_with("hsl(") {
            ColorPreview {
                value: val.to_string(),
                notation: ColorNotation::Hsl,
                hex: None,
                rgb: None,
            }
        } else {
            return Ok(None);
        };

        Ok(Some(Preview::Color(preview)))
    }
}
