use devpeek::config::CONFIG_ENV;
use devpeek::detectors::HashAlgorithm;
use devpeek::{Config, DetectionEngine, DetectorId};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn load_reads_path_from_env() {
    let file = config_file("[limits]\nqr_max_chars = 10\n\n[hash]\nextra = [\"sha512\"]\n");
    temp_env::with_var(CONFIG_ENV, Some(file.path()), || {
        let config = Config::load();
        assert_eq!(config.limits.qr_max_chars, 10);
        assert_eq!(config.limits.max_parse_bytes, 1024 * 1024);
        assert_eq!(config.hash.extra, vec![HashAlgorithm::Sha512]);
        assert!(config.output.show_fallback_tools);
    });
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    temp_env::with_var(CONFIG_ENV, Some("/nonexistent/devpeek/config.toml"), || {
        assert_eq!(Config::load(), Config::default());
    });
}

#[test]
#[serial]
fn invalid_file_falls_back_to_defaults() {
    let file = config_file("[limits]\nqr_max_chars = \"lots\"\n");
    temp_env::with_var(CONFIG_ENV, Some(file.path()), || {
        assert_eq!(Config::load(), Config::default());
    });
}

#[test]
#[serial]
fn loaded_limits_shape_the_engine() {
    let file = config_file("[limits]\nqr_max_chars = 4\nmax_parse_bytes = 4\n");
    temp_env::with_var(CONFIG_ENV, Some(file.path()), || {
        let engine = DetectionEngine::from_config(&Config::load());

        let ids = engine.evaluate("{\"a\":1}").ids();
        assert!(!ids.contains(&DetectorId::Json));
        assert!(!ids.contains(&DetectorId::Qrcode));
        assert!(ids.contains(&DetectorId::TextStats));
        assert!(ids.contains(&DetectorId::HashDigest));

        assert!(engine.evaluate("abc").contains(DetectorId::Qrcode));
    });
}
