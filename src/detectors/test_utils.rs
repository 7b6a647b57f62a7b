use crate::detectors::{Clock, DetectionInput, Detector};
use crate::engine::DetectionEngine;
use crate::schema::{DetectorId, Preview};

/// Fixed "now" used by test engines: 2023-11-14T22:13:20Z.
pub const TEST_NOW_SECS: i64 = 1_700_000_000;

/// Build the default engine with a pinned clock
///
/// Shared by unit and integration tests so timestamp previews, and with them
/// whole result sets, are reproducible.
///
/// # Example
///
/// ```rust
/// use devpeek::detectors::test_utils::fixed_clock_engine;
///
/// let engine = fixed_clock_engine();
/// let results = engine.evaluate("1700000000");
/// assert_eq!(results.len(), 5);
/// ```
pub fn fixed_clock_engine() -> DetectionEngine {
    DetectionEngine::builder()
        .clock(Clock::fixed_at_secs(TEST_NOW_SECS))
        .build()
}

/// Run a single detector and unwrap the failure case into `None`
///
/// Useful when a test only cares whether the detector contributes to a pass.
///
/// # Example
///
/// ```rust
/// use devpeek::detectors::ColorDetector;
/// use devpeek::detectors::test_utils::run_detector;
///
/// assert!(run_detector(&ColorDetector::new(), "#fff").is_some());
/// assert!(run_detector(&ColorDetector::new(), "#ffff").is_none());
/// ```
pub fn run_detector<D: Detector>(detector: &D, text: &str) -> Option<Preview> {
    detector.detect(&DetectionInput::new(text)).ok().flatten()
}

/// Ids of the results the fixed-clock engine produces for `text`, in order.
pub fn ranked_ids(text: &str) -> Vec<DetectorId> {
    fixed_clock_engine().evaluate(text).ids()
}
