//! JSON codec used by the filekeep persistence layer.
//!
//! Every value filekeep writes to disk goes through this crate: values are
//! encoded to UTF-8 JSON text with no header, checksum, or version marker,
//! and decoded back into any `DeserializeOwned` type.
//!
//! # Key Types
//!
//! - [`JsonFormat`] — Compact (default) or indented output
//! - [`JsonOptions`] — Per-store or per-call formatting settings
//! - [`CodecError`] — Encode, decode, and token-selection failures
//!
//! # Operations
//!
//! - [`encode`] / [`decode`] — byte-level round trip
//! - [`stringify`] / [`parse`] — string-level round trip
//! - [`select_token`] — decode a nested value addressed by a path

pub mod error;
pub mod format;
pub mod json;
pub mod token;

pub use error::{CodecError, CodecResult};
pub use format::{JsonFormat, JsonOptions};
pub use json::{decode, encode, parse, stringify};
pub use token::select_token;
