//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTOs mapped from TOML. No validation and no defaults
//! beyond "empty": resolving empty paths is the caller's job.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Settings JSON file (may be empty, meaning "use the app data dir")
    pub settings_path: PathBuf,

    /// Directory for rolling log files (may be empty)
    pub log_dir: PathBuf,

    /// Write logs to `log_dir` in addition to stdout
    pub log_to_file: bool,

    /// Number of synthetic entries the in-memory backend starts with
    pub seed_entries: usize,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            settings_path: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("settings_path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_dir: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_to_file: toml_value
                .get("logging")
                .and_then(|l| l.get("to_file"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            seed_entries: toml_value
                .get("backend")
                .and_then(|b| b.get("seed_entries"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as usize,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig
    pub fn empty() -> Self {
        Self {
            settings_path: PathBuf::new(),
            log_dir: PathBuf::new(),
            log_to_file: false,
            seed_entries: 0,
        }
    }

    /// Fills paths from a base data directory, e.g. one resolved with `dirs`.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join("settings.json"),
            log_dir: data_dir.join("logs"),
            log_to_file: false,
            seed_entries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [storage]
            settings_path = "/tmp/clipshelf/settings.json"

            [logging]
            dir = "/tmp/clipshelf/logs"
            to_file = true

            [backend]
            seed_entries = 200
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.settings_path, PathBuf::from("/tmp/clipshelf/settings.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/clipshelf/logs"));
        assert!(config.log_to_file);
        assert_eq!(config.seed_entries, 200);
    }

    #[test]
    fn test_from_toml_missing_values_are_empty_facts() {
        let toml_value: Value = toml::from_str("").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_negative_seed_count_is_read_as_zero() {
        let toml_value: Value = toml::from_str("[backend]\nseed_entries = -3").unwrap();
        assert_eq!(AppConfig::from_toml(&toml_value).unwrap().seed_entries, 0);
    }

    #[test]
    fn test_with_system_defaults_creates_paths_under_data_dir() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/tmp/test"));
        assert_eq!(config.settings_path, PathBuf::from("/tmp/test/settings.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/test/logs"));
    }
}
