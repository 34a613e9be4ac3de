//! Per-key lock registry for filekeep.
//!
//! A [`LockRegistry`] maps a resource key to a dedicated lock object. Locks
//! are created on first reference and never removed, so every caller that
//! asks for the same key through the same registry gets the same lock for
//! the lifetime of the registry.
//!
//! # Modules
//!
//! - [`registry`] — [`LockRegistry`] and the two primitive flavours
//!   ([`AsyncLockRegistry`], [`BlockingLockRegistry`])
//! - [`key`] — [`KeyStrategy`] implementations that derive keys from paths
//!
//! # Guarantees
//!
//! 1. At most one lock exists per key per registry instance.
//! 2. Concurrent first-time lookups of one key resolve to the same lock.
//! 3. Different keys never contend with each other.
//! 4. Registries are explicit values; there is no process-wide instance.
//!    Two registries never serialize against each other, and nothing here
//!    protects against writers in other processes.

pub mod key;
pub mod registry;

pub use key::{full_path, CaseFoldedAbsoluteKey, KeyStrategy, RawPathKey};
pub use registry::{AsyncLockRegistry, BlockingLockRegistry, LockRegistry};
