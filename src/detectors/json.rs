use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, JsonPreview, Preview};

/// Cheap structural check before paying for a full parse.
fn has_json_delimiters(val: &str) -> bool {
    (val.starts_with('{') || val.starts_with('[')) && (val.ends_with('}') || val.ends_with(']'))
}

pub struct JsonDetector {
    max_bytes: usize,
}

impl JsonDetector {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for JsonDetector {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_PARSE_BYTES)
    }
}

impl Detector for JsonDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Json
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        if !has_json_delimiters(val) {
            return Ok(None);
        }
        input.ensure_within(self.max_bytes)?;

        let parsed: serde_json::Value = serde_json::from_str(val)?;
        let formatted = serde_json::to_string_pretty(&parsed)?;
        Ok(Some(Preview::Json(JsonPreview { formatted })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(s: &str) -> Result<Option<Preview>, DetectError> {
        JsonDetector::default().detect(&DetectionInput::new(s))
    }

    #[test]
    fn pretty_prints_objects_in_source_order() {
        let preview = detect(r#"{"b":1,"a":[true,null]}"#).unwrap().unwrap();
        match preview {
            Preview::Json(json) => assert_eq!(
                json.formatted,
                "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
            ),
            other => panic!("unexpected preview: {:?}", other),
        }
    }

    #[test]
    fn accepts_arrays() {
        assert!(detect("[1, 2, 3]").unwrap().is_some());
        assert!(detect("[]").unwrap().is_some());
    }

    #[test]
    fn skips_parse_without_delimiters() {
        assert!(detect("42").unwrap().is_none());
        assert!(detect("\"quoted\"").unwrap().is_none());
        assert!(detect("{ not closed").unwrap().is_none());
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        assert!(matches!(detect("{a:1}"), Err(DetectError::Json(_))));
        assert!(matches!(detect("{\"a\":1]"), Err(DetectError::Json(_))));
    }

    #[test]
    fn oversized_input_is_rejected_before_parsing() {
        let detector = JsonDetector::new(4);
        let result = detector.detect(&DetectionInput::new(r#"{"a":1}"#));
        assert!(matches!(result, Err(DetectError::InputTooLarge { .. })));
    }
}
