use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};

use chrono::{DateTime, Local};
use filekeep_lock::{full_path, BlockingLockRegistry, CaseFoldedAbsoluteKey, KeyStrategy};

use crate::config::FileSinkConfig;
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;

/// `yyyy-MM-dd hh:mm:ss`, 12-hour clock.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Appends log lines to one file.
///
/// The path is resolved to an absolute path with `.` and `..` collapsed when
/// the sink is created. The lock key is that path upper-cased, so
/// `logs/App.log`, `logs/old/../app.log` and `/srv/LOGS/app.log` (from
/// `/srv`) share a lock.
#[derive(Debug)]
pub struct FileSink {
    category: String,
    path: PathBuf,
    key: String,
    config: FileSinkConfig,
    locks: Arc<BlockingLockRegistry>,
}

impl FileSink {
    /// Create a sink for `category` writing to `path`.
    pub fn new(
        category: impl Into<String>,
        path: impl AsRef<Path>,
        config: FileSinkConfig,
        locks: Arc<BlockingLockRegistry>,
    ) -> LogResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LogError::InvalidPath("path is empty".into()));
        }
        let path = full_path(path)
            .ok_or_else(|| LogError::InvalidPath(format!("cannot resolve {}", path.display())))?;
        let key = CaseFoldedAbsoluteKey
            .key_for(&path)
            .ok_or_else(|| LogError::InvalidPath(path.display().to_string()))?;

        Ok(Self {
            category: category.into(),
            path,
            key,
            config,
            locks,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Absolute path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registry key guarding the log file.
    pub fn lock_key(&self) -> &str {
        &self.key
    }

    pub fn config(&self) -> &FileSinkConfig {
        &self.config
    }

    /// Returns `true` if a record at `level` would be written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.config.min_level
    }

    /// Append `message` as one line if `level` is enabled.
    ///
    /// Below the minimum level this returns immediately: no lock is taken
    /// and the file is not opened.
    pub fn write(&self, level: LogLevel, message: &str) -> LogResult<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        let line = self.format_line(Local::now(), message);

        let lock = self.locks.acquire_or_create(&self.key);
        // The mutex guards no data, so a poisoned lock is still usable.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn format_line(&self, now: DateTime<Local>, message: &str) -> String {
        if self.config.log_time {
            format!("[{}] {message}{LINE_ENDING}", now.format(TIMESTAMP_FORMAT))
        } else {
            format!("{message}{LINE_ENDING}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::thread;
    use std::time::Duration;

    fn sink(path: &Path, config: FileSinkConfig, locks: &Arc<BlockingLockRegistry>) -> FileSink {
        FileSink::new("test", path, config, Arc::clone(locks)).unwrap()
    }

    fn untimed() -> FileSinkConfig {
        FileSinkConfig {
            log_time: false,
            ..Default::default()
        }
    }

    #[test]
    fn appends_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let locks = Arc::new(BlockingLockRegistry::new());
        let sink = sink(&path, untimed(), &locks);

        sink.write(LogLevel::Information, "first").unwrap();
        sink.write(LogLevel::Error, "second").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, format!("first{LINE_ENDING}second{LINE_ENDING}"));
    }

    #[test]
    fn timestamp_prefix_uses_twelve_hour_clock() {
        let dir = tempfile::tempdir().unwrap();
        let locks = Arc::new(BlockingLockRegistry::new());
        let sink = sink(&dir.path().join("t.log"), FileSinkConfig::default(), &locks);

        let at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            sink.format_line(at, "hello"),
            format!("[2024-03-05 02:07:09] hello{LINE_ENDING}")
        );
    }

    #[test]
    fn written_line_carries_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.log");
        let locks = Arc::new(BlockingLockRegistry::new());
        sink(&path, FileSinkConfig::default(), &locks)
            .write(LogLevel::Warning, "stamped")
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        // "[yyyy-MM-dd hh:mm:ss] " is 22 characters.
        assert!(text.starts_with('['));
        assert_eq!(&text[20..22], "] ");
        assert!(text.ends_with(&format!("stamped{LINE_ENDING}")));
    }

    #[test]
    fn below_minimum_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiet.log");
        let locks = Arc::new(BlockingLockRegistry::new());
        let sink = sink(
            &path,
            FileSinkConfig {
                min_level: LogLevel::Warning,
                log_time: false,
            },
            &locks,
        );

        assert!(!sink.enabled(LogLevel::Information));
        sink.write(LogLevel::Information, "dropped").unwrap();

        assert!(!path.exists());
        assert!(locks.is_empty());

        sink.write(LogLevel::Warning, "kept").unwrap();
        assert_eq!(locks.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("kept{LINE_ENDING}"));
    }

    #[test]
    fn path_is_resolved_to_absolute() {
        let locks = Arc::new(BlockingLockRegistry::new());
        let sink = FileSink::new("c", "relative.log", untimed(), locks).unwrap();
        assert!(sink.path().is_absolute());
        assert!(sink.lock_key().ends_with("RELATIVE.LOG"));
    }

    #[test]
    fn empty_path_is_rejected() {
        let locks = Arc::new(BlockingLockRegistry::new());
        let err = FileSink::new("c", "", untimed(), locks).unwrap_err();
        assert!(matches!(err, LogError::InvalidPath(_)));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let locks = Arc::new(BlockingLockRegistry::new());
        let sink = sink(&dir.path().join("nope").join("x.log"), untimed(), &locks);

        let err = sink.write(LogLevel::Error, "lost").unwrap_err();
        assert!(matches!(err, LogError::Io(_)));

        // The lock was released on the error path.
        let lock = locks.acquire_or_create(sink.lock_key());
        assert!(lock.try_lock().is_ok());
    }

    #[test]
    fn casing_variants_share_one_key() {
        let dir = tempfile::tempdir().unwrap();
        let locks = Arc::new(BlockingLockRegistry::new());
        let lower = sink(&dir.path().join("app.log"), untimed(), &locks);
        let upper = sink(&dir.path().join("APP.LOG"), untimed(), &locks);

        assert_eq!(lower.lock_key(), upper.lock_key());
        lower.write(LogLevel::Error, "a").unwrap();
        upper.write(LogLevel::Error, "b").unwrap();
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn dot_segments_share_one_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let locks = Arc::new(BlockingLockRegistry::new());
        let direct = sink(&dir.path().join("app.log"), untimed(), &locks);
        let detour = sink(&dir.path().join("sub").join("..").join("app.log"), untimed(), &locks);

        assert_eq!(direct.lock_key(), detour.lock_key());
        assert_eq!(direct.path(), detour.path());
        direct.write(LogLevel::Error, "a").unwrap();
        detour.write(LogLevel::Error, "b").unwrap();
        assert_eq!(locks.len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.log")).unwrap(),
            format!("a{LINE_ENDING}b{LINE_ENDING}")
        );
    }

    #[test]
    fn casing_variant_waits_for_held_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("held.log");
        let locks = Arc::new(BlockingLockRegistry::new());
        let holder = sink(&path, untimed(), &locks);
        let writer = sink(&dir.path().join("HELD.log"), untimed(), &locks);

        let lock = locks.acquire_or_create(holder.lock_key());
        let guard = lock.lock().unwrap();

        let handle = thread::spawn(move || writer.write(LogLevel::Error, "late"));
        thread::sleep(Duration::from_millis(100));
        assert!(!handle.is_finished());
        assert!(!dir.path().join("HELD.log").exists());

        drop(guard);
        handle.join().unwrap().unwrap();
        assert!(dir.path().join("HELD.log").exists());
    }

    #[test]
    fn concurrent_sinks_never_interleave_lines() {
        const THREADS: usize = 8;
        const LINES: usize = 50;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let locks = Arc::new(BlockingLockRegistry::new());

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let sink = sink(&path, untimed(), &locks);
                thread::spawn(move || {
                    let payload = t.to_string().repeat(200);
                    for _ in 0..LINES {
                        sink.write(LogLevel::Information, &payload).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), THREADS * LINES);
        for line in lines {
            let first = line.chars().next().unwrap();
            assert_eq!(line.len(), 200);
            assert!(line.chars().all(|c| c == first));
        }
    }
}
