use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Whole-file byte access used by [`JsonFileStore`](crate::JsonFileStore).
///
/// Implementations must read the complete file and replace the complete
/// file; partial reads or appends are not part of the contract.
#[async_trait]
pub trait FileBackend: Send + Sync {
    /// Read the entire file.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate the file and write `contents` to it.
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// [`FileBackend`] over `tokio::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioFileBackend;

#[async_trait]
impl FileBackend for TokioFileBackend {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.json");
        let backend = TokioFileBackend;

        backend.write(&path, b"a much longer first version").await.unwrap();
        backend.write(&path, b"short").await.unwrap();
        assert_eq!(backend.read(&path).await.unwrap(), b"short");
    }

    #[tokio::test]
    async fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokioFileBackend.read(&dir.path().join("nope")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
