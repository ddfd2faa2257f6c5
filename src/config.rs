//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$XRAY_EVIDENCE_CONFIG` (environment variable)
//! 2. `~/.config/xray-evidence/config.toml` (Linux/macOS)
//!    `%APPDATA%\xray-evidence\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "XRAY_EVIDENCE_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Evidence resolution defaults.
    pub evidence: EvidenceConfig,
    /// Test execution metadata written into reports.
    pub report: ReportConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Evidence resolution defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Directory relative locators are resolved against when the command
    /// line does not say otherwise.
    pub base_dir: Option<PathBuf>,
    /// Let a batch manifest list the same test key more than once.
    pub allow_duplicate_ids: bool,
}

/// Test execution metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Test plan the execution belongs to.
    pub test_plan_key: Option<String>,
    /// Existing test execution to update instead of creating a new one.
    pub test_execution_key: Option<String>,
    /// Fix version reported as `info.version`.
    pub fix_version: Option<String>,
    /// Test environments reported as `info.testEnvironments`.
    pub test_environments: Vec<String>,
    /// Execution summary.
    pub summary: Option<String>,
    /// Execution description.
    pub description: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

// ── Load ────────────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Config::default(),
    }
}

/// Load configuration from a specific file, falling back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "Loaded config");
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config, using defaults"
                );
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to read config file, using defaults"
            );
            Config::default()
        }
    }
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("xray-evidence").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xray-evidence")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert!(cfg.evidence.base_dir.is_none());
        assert!(!cfg.evidence.allow_duplicate_ids);
        assert!(cfg.report.test_environments.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[report]
test_plan_key = "JIRA-10"
test_environments = ["linux", "ci"]
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.report.test_plan_key.as_deref(), Some("JIRA-10"));
        assert_eq!(cfg.report.test_environments, ["linux", "ci"]);
        // Other fields use defaults
        assert_eq!(cfg.general.log_level, "warn");
        assert!(cfg.report.fix_version.is_none());
    }

    #[test]
    fn test_load_from_file_and_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(
            &good,
            "[evidence]\nbase_dir = \"/srv/tests\"\nallow_duplicate_ids = true\n",
        )
        .unwrap();
        let cfg = load_config_from(&good);
        assert_eq!(cfg.evidence.base_dir, Some(PathBuf::from("/srv/tests")));
        assert!(cfg.evidence.allow_duplicate_ids);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[general\nlog_level = ").unwrap();
        assert_eq!(load_config_from(&bad).general.log_level, "warn");

        let missing = dir.path().join("missing.toml");
        assert_eq!(load_config_from(&missing).general.log_level, "warn");
    }
}
