//! JSON file persistence for filekeep.
//!
//! [`JsonFileStore`] saves any `Serialize` value to a file as JSON text and
//! reads it back into any `DeserializeOwned` type. Files are fully replaced
//! on save; there is no temp-file-and-rename, no header, and no caching of
//! decoded values between calls.
//!
//! # Two families of operations
//!
//! - **Strict**: [`save`](JsonFileStore::save) and
//!   [`read`](JsonFileStore::read) surface every error and take **no lock**.
//!   Two concurrent strict saves to one path can interleave.
//! - **Locked**: [`save_locked`](JsonFileStore::save_locked),
//!   [`read_locked`](JsonFileStore::read_locked) and their best-effort
//!   projections [`try_save`](JsonFileStore::try_save) /
//!   [`try_read`](JsonFileStore::try_read) hold the path's lock from the
//!   shared [`AsyncLockRegistry`](filekeep_lock::AsyncLockRegistry) for the
//!   whole operation, so locked callers on one key never overlap.
//!
//! # Modules
//!
//! - [`backend`] — the [`FileBackend`] seam and its `tokio::fs` implementation
//! - [`config`] — [`StoreConfig`]
//! - [`error`] — [`StoreError`]
//! - [`store`] — [`JsonFileStore`]

pub mod backend;
pub mod config;
pub mod error;
pub mod store;

pub use backend::{FileBackend, TokioFileBackend};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::JsonFileStore;
