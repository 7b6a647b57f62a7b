use crate::config::Config;
use crate::detectors::{
    Base64Detector, Clock, ColorDetector, DEFAULT_MAX_PARSE_BYTES, DetectionInput, Detector,
    HashAlgorithm, HashDetector, JsonDetector, JwtDetector, NumberBaseDetector, QrCodeDetector,
    SqlDetector, TextStatsDetector, TimestampDetector, UnicodeEscapeDetector, UrlEncodedDetector,
    qrcode::DEFAULT_MAX_CHARS,
};
use crate::schema::{DetectionResult, DetectorId, ResultSet};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace, warn};

thread_local! {
    static IN_DETECTOR: Cell<bool> = const { Cell::new(false) };
}

/// True while the current thread is inside a detector's `detect` call.
///
/// Lets a process-wide panic hook stay quiet for panics the engine is about
/// to catch, while still reporting any other panic.
pub fn is_running_detector() -> bool {
    IN_DETECTOR.with(Cell::get)
}

struct DetectorScope {
    previous: bool,
}

impl DetectorScope {
    fn enter() -> Self {
        Self {
            previous: IN_DETECTOR.replace(true),
        }
    }
}

impl Drop for DetectorScope {
    fn drop(&mut self) {
        IN_DETECTOR.set(self.previous);
    }
}

pub struct DetectionEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectionEngine {
    /// An engine with no detectors registered.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn register<D: Detector + 'static>(mut self, detector: D) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// The full detector catalog with default limits and the system clock.
    pub fn with_defaults() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self::builder()
            .qr_max_chars(config.limits.qr_max_chars)
            .max_parse_bytes(config.limits.max_parse_bytes)
            .extra_hashes(&config.hash.extra)
            .build()
    }

    /// Registered detector ids in registration order.
    pub fn detector_ids(&self) -> Vec<DetectorId> {
        self.detectors.iter().map(|d| d.id()).collect()
    }

    /// Run every detector against the trimmed input and rank the matches.
    ///
    /// Empty input short-circuits without invoking any detector. A detector
    /// that fails, or panics, contributes nothing and the pass carries on.
    pub fn evaluate(&self, raw: &str) -> ResultSet {
        let input = DetectionInput::new(raw);
        if input.is_empty() {
            return ResultSet::empty();
        }

        let mut results = Vec::with_capacity(self.detectors.len());
        for detector in &self.detectors {
            if let Some(result) = self.run_isolated(detector.as_ref(), &input) {
                results.push(result);
            }
        }

        let set = ResultSet::from_unsorted(results);
        trace!(
            input_bytes = input.len(),
            matched = ?set.ids(),
            "evaluation pass complete"
        );
        set
    }

    fn run_isolated(&self, detector: &dyn Detector, input: &DetectionInput) -> Option<DetectionResult> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _scope = DetectorScope::enter();
            detector.detect(input)
        }));
        match outcome {
            Ok(Ok(Some(preview))) => {
                if cfg!(debug_assertions) && preview.id() != detector.id() {
                    warn!(
                        detector = detector.name(),
                        produced = preview.id().as_str(),
                        "detector produced a preview for another id"
                    );
                }
                Some(preview.into())
            }
            Ok(Ok(None)) => None,
            Ok(Err(error)) => {
                debug!(detector = detector.name(), %error, "detector did not match");
                None
            }
            Err(_) => {
                debug!(detector = detector.name(), "detector panicked; treating as no match");
                None
            }
        }
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configures the default detector catalog.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    clock: Clock,
    qr_max_chars: usize,
    max_parse_bytes: usize,
    extra_hashes: Vec<HashAlgorithm>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            clock: Clock::System,
            qr_max_chars: DEFAULT_MAX_CHARS,
            max_parse_bytes: DEFAULT_MAX_PARSE_BYTES,
            extra_hashes: Vec::new(),
        }
    }
}

impl EngineBuilder {
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn qr_max_chars(mut self, max_chars: usize) -> Self {
        self.qr_max_chars = max_chars;
        self
    }

    pub fn max_parse_bytes(mut self, max_bytes: usize) -> Self {
        self.max_parse_bytes = max_bytes;
        self
    }

    pub fn extra_hashes(mut self, algorithms: &[HashAlgorithm]) -> Self {
        self.extra_hashes = algorithms.to_vec();
        self
    }

    /// Registration order decides ties between equal priorities.
    pub fn build(self) -> DetectionEngine {
        let limit = self.max_parse_bytes;
        DetectionEngine::new()
            .register(JsonDetector::new(limit))
            .register(SqlDetector::new(limit))
            .register(TimestampDetector::new(self.clock))
            .register(ColorDetector::new())
            .register(JwtDetector::new(limit))
            .register(UrlEncodedDetector::new(limit))
            .register(UnicodeEscapeDetector::new(limit))
            .register(Base64Detector::new(limit))
            .register(NumberBaseDetector::new())
            .register(TextStatsDetector::new())
            .register(QrCodeDetector::new(self.qr_max_chars))
            .register(HashDetector::new(&self.extra_hashes))
    }
}
