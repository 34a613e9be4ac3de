use std::path::{Path, PathBuf};

use filekeep_log::FileSinkConfig;
use filekeep_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{FileKeepError, FileKeepResult};

/// Top-level configuration, usually loaded from a TOML file:
///
/// ```toml
/// [store.json]
/// format = "indented"
/// indent_width = 4
///
/// [log]
/// path = "logs/app.log"
/// min_level = "warning"
/// log_time = true
/// filter = "info,filekeep_store=debug"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// Logging section of [`Config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; no file sink is available when unset.
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub sink: FileSinkConfig,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: None,
            sink: FileSinkConfig::default(),
            filter: "info".into(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> FileKeepResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> FileKeepResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FileKeepError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekeep_codec::JsonFormat;
    use filekeep_log::LogLevel;

    #[test]
    fn default_config() {
        let c = Config::default();
        assert_eq!(c.store.json.format, JsonFormat::Compact);
        assert!(c.log.path.is_none());
        assert_eq!(c.log.sink.min_level, LogLevel::Trace);
        assert_eq!(c.log.filter, "info");
    }

    #[test]
    fn parses_full_document() {
        let c = Config::from_toml_str(
            r#"
            [store.json]
            format = "indented"
            indent_width = 4

            [log]
            path = "logs/app.log"
            min_level = "warning"
            log_time = false
            filter = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(c.store.json.format, JsonFormat::Indented);
        assert_eq!(c.store.json.indent_width, 4);
        assert_eq!(c.log.path, Some(PathBuf::from("logs/app.log")));
        assert_eq!(c.log.sink.min_level, LogLevel::Warning);
        assert!(!c.log.sink.log_time);
        assert_eq!(c.log.filter, "debug");
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = Config::from_toml_str("[log]\nmin_level = \"loud\"").unwrap_err();
        assert!(matches!(err, FileKeepError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, FileKeepError::ConfigRead { .. }));
    }
}
