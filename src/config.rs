use crate::detectors::{DEFAULT_MAX_PARSE_BYTES, HashAlgorithm, qrcode::DEFAULT_MAX_CHARS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "DEVPEEK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub hash: HashConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Inputs longer than this (in characters) get no QR preview.
    pub qr_max_chars: usize,
    /// Inputs larger than this (in bytes) skip the parsing detectors.
    pub max_parse_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HashConfig {
    /// Digests computed in addition to MD5 and SHA-256.
    pub extra: Vec<HashAlgorithm>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub show_fallback_tools: bool,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            qr_max_chars: DEFAULT_MAX_CHARS,
            max_parse_bytes: DEFAULT_MAX_PARSE_BYTES,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_fallback_tools: true,
        }
    }
}

impl Config {
    /// Load from `$DEVPEEK_CONFIG` or the user config dir, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_file_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "ignoring config file");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|mut path| {
            path.push("devpeek");
            path.push("config.toml");
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.limits.qr_max_chars, 2000);
        assert_eq!(config.limits.max_parse_bytes, 1024 * 1024);
        assert!(config.hash.extra.is_empty());
        assert!(config.output.show_fallback_tools);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();

        assert!(toml_str.contains("[limits]"));
        assert!(toml_str.contains("[hash]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("qr_max_chars = 2000"));
        assert!(toml_str.contains("show_fallback_tools = true"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
[limits]
qr_max_chars = 500
max_parse_bytes = 4096

[hash]
extra = ["sha1", "sha512"]

[output]
show_fallback_tools = false
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.limits.qr_max_chars, 500);
        assert_eq!(config.limits.max_parse_bytes, 4096);
        assert_eq!(
            config.hash.extra,
            vec![HashAlgorithm::Sha1, HashAlgorithm::Sha512]
        );
        assert!(!config.output.show_fallback_tools);
    }

    #[test]
    fn test_config_partial_deserialization() {
        let toml_str = r#"
[limits]
qr_max_chars = 10
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.limits.qr_max_chars, 10);
        // Missing keys and sections fall back to defaults
        assert_eq!(config.limits.max_parse_bytes, DEFAULT_MAX_PARSE_BYTES);
        assert!(config.hash.extra.is_empty());
        assert!(config.output.show_fallback_tools);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[hash]\nextra = [\"crc32\"]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
