use serde::{Deserialize, Serialize};

use crate::level::LogLevel;

/// Configuration for a [`FileSink`](crate::FileSink).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// Records below this severity are dropped without touching the file.
    pub min_level: LogLevel,
    /// Prefix each line with `[yyyy-MM-dd hh:mm:ss] ` in local time.
    pub log_time: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Trace,
            log_time: true,
        }
    }
}
