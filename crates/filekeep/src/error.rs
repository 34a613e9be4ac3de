use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileKeepError {
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("no log path configured")]
    NoLogPath,

    #[error("store error: {0}")]
    Store(#[from] filekeep_store::StoreError),

    #[error("log error: {0}")]
    Log(#[from] filekeep_log::LogError),

    #[error("tracing init failed: {0}")]
    Telemetry(String),
}

pub type FileKeepResult<T> = Result<T, FileKeepError>;
