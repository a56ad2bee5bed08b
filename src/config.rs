use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};

/// Harness settings, loaded from `config/<env>.yaml`.
///
/// These only cover how the harness itself behaves (logging, default paths).
/// Workload parameters live in the suite configuration JSON.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HarnessConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Mirror logs into `log_dir/log_file`
    pub file_logging: bool,
    /// Suite configuration used when `--config` is not given
    pub suite_config: String,
    /// Where to write the `{name: seconds}` timing map, if anywhere
    pub results_path: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "xbench.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            file_logging: false,
            suite_config: "config/test.json".to_string(),
            results_path: None,
        }
    }
}

impl HarnessConfig {
    pub fn settings_path(env: &str) -> PathBuf {
        PathBuf::from(format!("config/{}.yaml", env))
    }

    /// Load `config/<env>.yaml`, falling back to defaults when it does not exist.
    pub fn load(env: &str) -> Result<Self> {
        let path = Self::settings_path(env);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|source| HarnessError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = HarnessConfig::from_yaml_str("log_level: debug\nuse_json: true\n").unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.use_json);
        assert_eq!(config.suite_config, "config/test.json");
        assert_eq!(config.results_path, None);
    }

    #[test]
    fn test_results_path() {
        let config = HarnessConfig::from_yaml_str("results_path: /tmp/results.json\n").unwrap();
        assert_eq!(config.results_path.as_deref(), Some("/tmp/results.json"));
    }

    #[test]
    fn test_missing_env_falls_back_to_defaults() {
        let config = HarnessConfig::load("no-such-environment").unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "log_level: [unterminated\n").unwrap();
        let err = HarnessConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, HarnessError::Settings { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }
}
