use std::path::Path;
use std::sync::Arc;

use filekeep_lock::{AsyncLockRegistry, BlockingLockRegistry};
use filekeep_log::{FileLayer, FileSink, FileSinkProvider};
use filekeep_store::JsonFileStore;
use tracing::info;

use crate::config::Config;
use crate::error::{FileKeepError, FileKeepResult};

/// Owner of a process's lock registries and configuration.
///
/// Stores and sinks obtained from one `FileKeep` share its registries;
/// stores or sinks built elsewhere do not exclude them.
#[derive(Debug)]
pub struct FileKeep {
    config: Config,
    store_locks: Arc<AsyncLockRegistry>,
    log_locks: Arc<BlockingLockRegistry>,
    sinks: Option<FileSinkProvider>,
}

impl FileKeep {
    pub fn new(config: Config) -> Self {
        let log_locks = Arc::new(BlockingLockRegistry::new());
        let sinks = config.log.path.as_ref().map(|path| {
            FileSinkProvider::with_registry(path, config.log.sink.clone(), Arc::clone(&log_locks))
        });
        Self {
            config,
            store_locks: Arc::new(AsyncLockRegistry::new()),
            log_locks,
            sinks,
        }
    }

    /// Load the configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FileKeepResult<Self> {
        let path = path.as_ref();
        let config = Config::load(path)?;
        info!(config = %path.display(), "loaded filekeep config");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store_registry(&self) -> &Arc<AsyncLockRegistry> {
        &self.store_locks
    }

    pub fn log_registry(&self) -> &Arc<BlockingLockRegistry> {
        &self.log_locks
    }

    /// A store over `tokio::fs` using the configured encoding options and the
    /// shared store registry.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::with_registry(Arc::clone(&self.store_locks))
            .with_config(self.config.store.clone())
    }

    /// The sink for `category` on the configured log file.
    pub fn file_sink(&self, category: &str) -> FileKeepResult<Arc<FileSink>> {
        let provider = self.sinks.as_ref().ok_or(FileKeepError::NoLogPath)?;
        Ok(provider.create_sink(category)?)
    }

    /// A tracing layer on the configured log file, or `None` if no log path
    /// is configured.
    pub fn file_layer(&self) -> FileKeepResult<Option<FileLayer>> {
        match &self.sinks {
            Some(provider) => Ok(Some(FileLayer::new(provider.create_sink("tracing")?))),
            None => Ok(None),
        }
    }
}

impl Default for FileKeep {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
