//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read the TOML configuration file / 读取 TOML 配置文件
//! - Map it onto the `AppConfig` DTO / 映射为 AppConfig DTO
//! - Report I/O and parsing errors with context / 报告带上下文的错误
//!
//! Empty paths are resolved later by the wiring, not here.

use anyhow::Context;
use std::path::Path;

use cs_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            [storage]
            settings_path = "/data/settings.json"

            [logging]
            dir = "/data/logs"
            to_file = true

            [backend]
            seed_entries = 120
        "#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.settings_path, PathBuf::from("/data/settings.json"));
        assert_eq!(config.log_dir, PathBuf::from("/data/logs"));
        assert!(config.log_to_file);
        assert_eq!(config.seed_entries, 120);
    }

    /// Missing sections are facts, not errors
    /// 缺失的部分不是错误
    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let file = write_config("[storage]\n");

        let config = load_config(file.path()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let file = write_config("[storage\nsettings_path = 1");

        let err = load_config(file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let err = load_config(Path::new("/this/path/does/not/exist/config.toml")).unwrap_err();

        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }
}
