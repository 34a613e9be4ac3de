//! filekeep: JSON file persistence and file logging with per-file locks.
//!
//! This is the entry point for applications. A [`FileKeep`] owns the two
//! lock registries of a process (one suspending, for the store; one blocking,
//! for log sinks) and hands out stores and sinks that share them, so every
//! component built from one `FileKeep` excludes every other on the same key.
//!
//! ```no_run
//! # async fn demo() -> filekeep::FileKeepResult<()> {
//! let keep = filekeep::FileKeep::load("filekeep.toml")?;
//! filekeep::init_tracing(&keep)?;
//!
//! let store = keep.store();
//! store.save("settings.json", &vec!["a", "b"]).await?;
//! let names: Vec<String> = store.try_read("settings.json").await;
//! # let _ = names;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod keep;
pub mod telemetry;

pub use config::{Config, LogConfig};
pub use error::{FileKeepError, FileKeepResult};
pub use keep::FileKeep;
pub use telemetry::init_tracing;

// Re-export key types
pub use filekeep_codec::{select_token, CodecError, JsonFormat, JsonOptions};
pub use filekeep_lock::{
    AsyncLockRegistry, BlockingLockRegistry, CaseFoldedAbsoluteKey, KeyStrategy, LockRegistry,
    RawPathKey,
};
pub use filekeep_log::{FileLayer, FileSink, FileSinkConfig, FileSinkProvider, LogError, LogLevel};
pub use filekeep_store::{
    FileBackend, JsonFileStore, StoreConfig, StoreError, TokioFileBackend,
};
