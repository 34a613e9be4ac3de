use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use filekeep_lock::BlockingLockRegistry;
use tracing::debug;

use crate::config::FileSinkConfig;
use crate::error::LogResult;
use crate::sink::FileSink;

/// Hands out one [`FileSink`] per category, all writing to the same file
/// and drawing locks from the same registry.
#[derive(Debug)]
pub struct FileSinkProvider {
    path: PathBuf,
    config: FileSinkConfig,
    locks: Arc<BlockingLockRegistry>,
    sinks: DashMap<String, Arc<FileSink>>,
}

impl FileSinkProvider {
    /// Create a provider with its own lock registry.
    pub fn new(path: impl Into<PathBuf>, config: FileSinkConfig) -> Self {
        Self::with_registry(path, config, Arc::new(BlockingLockRegistry::new()))
    }

    /// Create a provider that shares `locks` with other providers or sinks.
    pub fn with_registry(
        path: impl Into<PathBuf>,
        config: FileSinkConfig,
        locks: Arc<BlockingLockRegistry>,
    ) -> Self {
        Self {
            path: path.into(),
            config,
            locks,
            sinks: DashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn registry(&self) -> &Arc<BlockingLockRegistry> {
        &self.locks
    }

    /// Return the sink for `category`, creating it on first request.
    pub fn create_sink(&self, category: &str) -> LogResult<Arc<FileSink>> {
        if let Some(existing) = self.sinks.get(category) {
            return Ok(Arc::clone(existing.value()));
        }
        let entry = self
            .sinks
            .entry(category.to_owned())
            .or_try_insert_with(|| {
                debug!(category, path = %self.path.display(), "creating file sink");
                FileSink::new(
                    category,
                    &self.path,
                    self.config.clone(),
                    Arc::clone(&self.locks),
                )
                .map(Arc::new)
            })?;
        Ok(Arc::clone(entry.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;

    #[test]
    fn same_category_returns_same_sink() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileSinkProvider::new(dir.path().join("p.log"), FileSinkConfig::default());

        let a = provider.create_sink("http").unwrap();
        let b = provider.create_sink("http").unwrap();
        let c = provider.create_sink("db").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(c.category(), "db");
    }

    #[test]
    fn categories_share_one_file_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.log");
        let provider = FileSinkProvider::new(
            &path,
            FileSinkConfig {
                log_time: false,
                ..Default::default()
            },
        );

        provider.create_sink("a").unwrap().write(LogLevel::Information, "from a").unwrap();
        provider.create_sink("b").unwrap().write(LogLevel::Information, "from b").unwrap();

        assert_eq!(provider.registry().len(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["from a", "from b"]);
    }

    #[test]
    fn empty_path_fails_on_first_sink() {
        let provider = FileSinkProvider::new("", FileSinkConfig::default());
        assert!(provider.create_sink("x").is_err());
    }
}
