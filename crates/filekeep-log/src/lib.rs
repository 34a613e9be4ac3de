//! Append-only file logging for filekeep.
//!
//! A [`FileSink`] appends one formatted line per call to a log file. Any
//! number of sinks, in any number of categories, may point at the same file:
//! each append holds the file's lock from a shared
//! [`BlockingLockRegistry`](filekeep_lock::BlockingLockRegistry), keyed by
//! the absolute, case-folded path, so lines from different sinks never
//! interleave.
//!
//! Writes are synchronous. Each call opens the file in append mode, writes,
//! flushes, and closes it; there is no buffering and no retry.
//!
//! # Modules
//!
//! - [`level`] — [`LogLevel`]
//! - [`config`] — [`FileSinkConfig`]
//! - [`sink`] — [`FileSink`]
//! - [`provider`] — [`FileSinkProvider`], one sink per category over one file
//! - [`layer`] — [`FileLayer`], a `tracing-subscriber` layer over a sink

pub mod config;
pub mod error;
pub mod layer;
pub mod level;
pub mod provider;
pub mod sink;

pub use config::FileSinkConfig;
pub use error::{LogError, LogResult};
pub use layer::FileLayer;
pub use level::LogLevel;
pub use provider::FileSinkProvider;
pub use sink::FileSink;
