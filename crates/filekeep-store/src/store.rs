use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use filekeep_codec::{self as codec, JsonOptions};
use filekeep_lock::{AsyncLockRegistry, KeyStrategy, RawPathKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use crate::backend::{FileBackend, TokioFileBackend};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Saves and reads typed values as JSON files.
///
/// The strict operations ([`save`](Self::save), [`read`](Self::read)) never
/// take a lock. The locked operations key the injected
/// [`AsyncLockRegistry`] by the path, using [`RawPathKey`] unless another
/// [`KeyStrategy`] is configured; with the raw strategy `data/a.json` and
/// `/srv/app/data/a.json` are different keys even when they name one file.
pub struct JsonFileStore<B = TokioFileBackend> {
    backend: B,
    locks: Arc<AsyncLockRegistry>,
    keys: Arc<dyn KeyStrategy>,
    config: StoreConfig,
}

impl JsonFileStore<TokioFileBackend> {
    /// Create a store over `tokio::fs` with its own private lock registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(AsyncLockRegistry::new()))
    }

    /// Create a store over `tokio::fs` that shares `locks` with other users.
    pub fn with_registry(locks: Arc<AsyncLockRegistry>) -> Self {
        Self::with_backend(TokioFileBackend, locks)
    }
}

impl Default for JsonFileStore<TokioFileBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: FileBackend> JsonFileStore<B> {
    /// Create a store over an arbitrary backend.
    pub fn with_backend(backend: B, locks: Arc<AsyncLockRegistry>) -> Self {
        Self {
            backend,
            locks,
            keys: Arc::new(RawPathKey),
            config: StoreConfig::default(),
        }
    }

    /// Replace the store configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the path-to-key derivation used by the locked operations.
    pub fn with_key_strategy(mut self, keys: impl KeyStrategy + 'static) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The registry the locked operations draw their locks from.
    pub fn registry(&self) -> &Arc<AsyncLockRegistry> {
        &self.locks
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ---- Strict, unlocked ----

    /// Encode `value` with the configured options and replace the file at
    /// `path` with the result.
    ///
    /// Takes no lock. A crash mid-write can leave a truncated file.
    pub async fn save<T>(&self, path: impl AsRef<Path>, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.save_with(path, value, &self.config.json).await
    }

    /// Like [`save`](Self::save) with per-call encoding options.
    pub async fn save_with<T>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        options: &JsonOptions,
    ) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidPath);
        }

        let bytes = codec::encode(value, options)?;
        self.backend.write(path, &bytes).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "saved");
        Ok(())
    }

    /// Read the file at `path` and decode it into `T`.
    ///
    /// A missing file is [`StoreError::NotFound`]; an empty or malformed file
    /// is [`StoreError::Codec`]. Takes no lock.
    pub async fn read<T>(&self, path: impl AsRef<Path>) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidPath);
        }

        let bytes = match self.backend.read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let value = codec::decode(&bytes)?;

        debug!(path = %path.display(), bytes = bytes.len(), "read");
        Ok(value)
    }

    // ---- Locked, typed ----

    /// [`save`](Self::save) while holding the path's lock.
    pub async fn save_locked<T>(&self, path: impl AsRef<Path>, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.save_locked_with(path, value, &self.config.json).await
    }

    /// [`save_with`](Self::save_with) while holding the path's lock.
    pub async fn save_locked_with<T>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        options: &JsonOptions,
    ) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();
        let _guard = self.lock_for(path).await?;
        self.save_with(path, value, options).await
    }

    /// [`read`](Self::read) while holding the path's lock.
    pub async fn read_locked<T>(&self, path: impl AsRef<Path>) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        let path = path.as_ref();
        let _guard = self.lock_for(path).await?;
        self.read(path).await
    }

    // ---- Locked, best effort ----

    /// [`save_locked`](Self::save_locked), reporting only success or failure.
    ///
    /// An empty path returns `false` without touching the registry or the
    /// backend.
    pub async fn try_save<T>(&self, path: impl AsRef<Path>, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        self.try_save_with(path, value, &self.config.json).await
    }

    /// [`try_save`](Self::try_save) with per-call encoding options.
    pub async fn try_save_with<T>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
        options: &JsonOptions,
    ) -> bool
    where
        T: Serialize + ?Sized,
    {
        let path = path.as_ref();
        match self.save_locked_with(path, value, options).await {
            Ok(()) => true,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "try_save failed");
                false
            }
        }
    }

    /// [`read_locked`](Self::read_locked), returning `T::default()` on any
    /// failure.
    ///
    /// The default is ambiguous: it is returned for a missing file, a decode
    /// failure, an empty path, and a file that legitimately holds the default
    /// value. Use [`read_locked`](Self::read_locked) to tell them apart.
    pub async fn try_read<T>(&self, path: impl AsRef<Path>) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = path.as_ref();
        match self.read_locked(path).await {
            Ok(value) => value,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "try_read failed");
                T::default()
            }
        }
    }

    /// Wait for and hold the lock keyed by `path`.
    ///
    /// The owned guard releases on drop, which covers success, error
    /// returns, unwinding, and the caller's future being dropped.
    async fn lock_for(&self, path: &Path) -> StoreResult<OwnedMutexGuard<()>> {
        let key = self.keys.key_for(path).ok_or(StoreError::InvalidPath)?;
        let lock = self.locks.acquire_or_create(&key);
        Ok(lock.lock_owned().await)
    }
}

impl<B: fmt::Debug> fmt::Debug for JsonFileStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("backend", &self.backend)
            .field("locks", &self.locks)
            .field("keys", &self.keys.name())
            .field("config", &self.config)
            .finish()
    }
}
