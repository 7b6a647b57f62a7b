use crate::detectors::{Clock, DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, Preview, TimestampPreview, TimestampUnit};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

static EPOCH_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,13}$").expect("static regex"));

/// Coarse "3d ago" / "5m from now" description.
pub fn describe_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = now.timestamp_millis() - at.timestamp_millis();
    let seconds = diff_ms.unsigned_abs() / 1000;
    let suffix = if diff_ms > 0 { "ago" } else { "from now" };
    match seconds {
        s if s < 60 => format!("{}s {}", s, suffix),
        s if s < 3_600 => format!("{}m {}", s / 60, suffix),
        s if s < 86_400 => format!("{}h {}", s / 3_600, suffix),
        s => format!("{}d {}", s / 86_400, suffix),
    }
}

#[derive(Default)]
pub struct TimestampDetector {
    clock: Clock,
}

impl TimestampDetector {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }
}

impl Detector for TimestampDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Timestamp
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        if !EPOCH_DIGITS.is_match(val) {
            return Ok(None);
        }

        let number: i64 = val.parse()?;
        let (unit, millis) = if val.len() == 13 {
            (TimestampUnit::Milliseconds, number)
        } else {
            (TimestampUnit::Seconds, number * 1000)
        };
        let at = DateTime::from_timestamp_millis(millis)
            .ok_or(DetectError::TimestampOutOfRange(millis))?;

        Ok(Some(Preview::Timestamp(TimestampPreview {
            unit,
            epoch_millis: millis,
            iso8601: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            local: at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string(),
            relative: describe_relative(at, self.clock.now()),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_at(s: &str, now_secs: i64) -> Option<TimestampPreview> {
        let detector = TimestampDetector::new(Clock::fixed_at_secs(now_secs));
        match detector.detect(&DetectionInput::new(s)).unwrap() {
            Some(Preview::Timestamp(ts)) => Some(ts),
            Some(other) => panic!("unexpected preview: {:?}", other),
            None => None,
        }
    }

    #[test]
    fn ten_digits_are_seconds() {
        let ts = detect_at("1700000000", 1_700_000_000).unwrap();
        assert_eq!(ts.unit, TimestampUnit::Seconds);
        assert_eq!(ts.epoch_millis, 1_700_000_000_000);
        assert_eq!(ts.iso8601, "2023-11-14T22:13:20.000Z");
        assert_eq!(ts.relative, "0s from now");
    }

    #[test]
    fn thirteen_digits_are_milliseconds() {
        let ts = detect_at("1700000000123", 1_700_000_000).unwrap();
        assert_eq!(ts.unit, TimestampUnit::Milliseconds);
        assert_eq!(ts.epoch_millis, 1_700_000_000_123);
        assert_eq!(ts.iso8601, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn eleven_and_twelve_digits_are_seconds() {
        let ts = detect_at("17000000000", 0).unwrap();
        assert_eq!(ts.unit, TimestampUnit::Seconds);
        assert_eq!(ts.epoch_millis, 17_000_000_000_000);
        let ts = detect_at("999999999999", 0).unwrap();
        assert_eq!(ts.unit, TimestampUnit::Seconds);
    }

    #[test]
    fn length_bounds() {
        assert!(detect_at("170000000", 0).is_none());
        assert!(detect_at("17000000000000", 0).is_none());
        assert!(detect_at("17000000a0", 0).is_none());
        assert!(detect_at("-1700000000", 0).is_none());
    }

    #[test]
    fn relative_descriptions() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let later = |secs: i64| DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap();
        assert_eq!(describe_relative(at, later(45)), "45s ago");
        assert_eq!(describe_relative(at, later(125)), "2m ago");
        assert_eq!(describe_relative(at, later(7_200)), "2h ago");
        assert_eq!(describe_relative(at, later(3 * 86_400 + 5)), "3d ago");
        assert_eq!(describe_relative(at, later(-90)), "1m from now");
    }
}
