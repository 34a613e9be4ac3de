//! Derivation of registry keys from file paths.
//!
//! Consumers pick the strategy that matches how they identify a file:
//!
//! - [`RawPathKey`] uses the path exactly as the caller wrote it. Two
//!   spellings of one file (relative vs. absolute, different casing) get two
//!   different keys and therefore do not exclude each other.
//! - [`CaseFoldedAbsoluteKey`] resolves the path against the current working
//!   directory, collapses `.` and `..` lexically and upper-cases the result,
//!   so spellings that differ only in casing, dot segments or relative vs.
//!   absolute form share one key. Symlinks are not resolved.

use std::path::{Component, Path, PathBuf};

/// Maps a path to the registry key that guards it.
pub trait KeyStrategy: Send + Sync {
    /// Returns `None` when the path has no meaningful key (e.g. it is empty).
    fn key_for(&self, path: &Path) -> Option<String>;

    /// Short name used in `Debug` output of the types holding a strategy.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Key is the literal path text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawPathKey;

impl KeyStrategy for RawPathKey {
    fn key_for(&self, path: &Path) -> Option<String> {
        if path.as_os_str().is_empty() {
            return None;
        }
        Some(path.to_string_lossy().into_owned())
    }

    fn name(&self) -> &'static str {
        "raw_path"
    }
}

/// Key is the absolute path, upper-cased.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaseFoldedAbsoluteKey;

impl KeyStrategy for CaseFoldedAbsoluteKey {
    fn key_for(&self, path: &Path) -> Option<String> {
        if path.as_os_str().is_empty() {
            return None;
        }
        let full = full_path(path)?;
        Some(fold_case(&full))
    }

    fn name(&self) -> &'static str {
        "case_folded_absolute"
    }
}

/// Absolute form of `path` with `.` and `..` collapsed lexically.
///
/// `..` at the root stays at the root. Returns `None` for an empty path or
/// when the current directory cannot be read.
pub fn full_path(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    let absolute = std::path::absolute(path).ok()?;
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// Upper-case the textual form of an already absolute path.
pub(crate) fn fold_case(path: &Path) -> String {
    path.to_string_lossy().to_uppercase()
}
