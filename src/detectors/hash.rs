use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, DigestEntry, HashPreview, Preview};
use md5::Md5;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Always computed by the preview, whatever the configuration says.
    pub const BASELINE: [HashAlgorithm; 2] = [HashAlgorithm::Md5, HashAlgorithm::Sha256];

    pub fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Lowercase hex digest of `bytes`.
    pub fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Md5 => hex::encode(Md5::digest(bytes)),
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
            HashAlgorithm::Sha384 => hex::encode(Sha384::digest(bytes)),
            HashAlgorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct HashDetector {
    algorithms: Vec<HashAlgorithm>,
}

impl HashDetector {
    /// MD5 and SHA-256 first, then any extra algorithms in the order given.
    pub fn new(extra: &[HashAlgorithm]) -> Self {
        let mut algorithms = HashAlgorithm::BASELINE.to_vec();
        for algorithm in extra {
            if !algorithms.contains(algorithm) {
                algorithms.push(*algorithm);
            }
        }
        Self { algorithms }
    }

    pub fn algorithms(&self) -> &[HashAlgorithm] {
        &self.algorithms
    }
}

impl Default for HashDetector {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Detector for HashDetector {
    fn id(&self) -> DetectorId {
        DetectorId::HashDigest
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let bytes = input.as_str().as_bytes();
        let digests = self
            .algorithms
            .iter()
            .map(|algorithm| DigestEntry {
                algorithm: *algorithm,
                hex: algorithm.hex_digest(bytes),
            })
            .collect();
        Ok(Some(Preview::HashDigest(HashPreview { digests })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digests(detector: &HashDetector, s: &str) -> HashPreview {
        match detector.detect(&DetectionInput::new(s)).unwrap() {
            Some(Preview::HashDigest(h)) => h,
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn baseline_digests_of_hello() {
        let h = digests(&HashDetector::default(), "hello");
        assert_eq!(h.digests.len(), 2);
        assert_eq!(
            h.get(HashAlgorithm::Md5),
            Some("5d41402abc4b2a76b9719d911017c592")
        );
        assert_eq!(
            h.get(HashAlgorithm::Sha256),
            Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
        );
    }

    #[test]
    fn extra_algorithms_are_appended_once() {
        let detector = HashDetector::new(&[
            HashAlgorithm::Sha1,
            HashAlgorithm::Md5,
            HashAlgorithm::Sha512,
            HashAlgorithm::Sha1,
        ]);
        assert_eq!(
            detector.algorithms(),
            &[
                HashAlgorithm::Md5,
                HashAlgorithm::Sha256,
                HashAlgorithm::Sha1,
                HashAlgorithm::Sha512
            ]
        );
        let h = digests(&detector, "hello");
        assert_eq!(
            h.get(HashAlgorithm::Sha1),
            Some("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d")
        );
        assert_eq!(h.get(HashAlgorithm::Sha512).map(str::len), Some(128));
    }

    #[test]
    fn algorithm_names_deserialize_lowercase() {
        let algos: Vec<HashAlgorithm> = serde_json::from_str(r#"["sha384","md5"]"#).unwrap();
        assert_eq!(algos, vec![HashAlgorithm::Sha384, HashAlgorithm::Md5]);
        assert_eq!(HashAlgorithm::Sha384.to_string(), "SHA-384");
    }
}
