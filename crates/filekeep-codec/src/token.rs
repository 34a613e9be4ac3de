//! Typed selection of a nested value inside a JSON document.
//!
//! Two token syntaxes are accepted:
//!
//! - a dotted path with optional array indices, optionally rooted at `$`:
//!   `user.addresses[0].city`, `$.items[2]`
//! - a JSON pointer (RFC 6901) when the token starts with `/`:
//!   `/user/addresses/0/city`
//!
//! The empty token and `$` both address the document root.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CodecError, CodecResult};

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Parse `json` and decode the value addressed by `token` into `T`.
pub fn select_token<T: DeserializeOwned>(json: &str, token: &str) -> CodecResult<T> {
    let root: Value = serde_json::from_str(json).map_err(CodecError::Decode)?;

    let selected = if token.starts_with('/') {
        root.pointer(token)
    } else {
        let segments = parse_path(token)?;
        walk(&root, &segments)
    };

    let value = selected.ok_or_else(|| CodecError::TokenNotFound(token.to_string()))?;
    T::deserialize(value).map_err(CodecError::Decode)
}

fn walk<'a>(root: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |node, segment| match segment {
        Segment::Key(key) => node.as_object()?.get(key),
        Segment::Index(idx) => node.as_array()?.get(*idx),
    })
}

fn parse_path(token: &str) -> CodecResult<Vec<Segment>> {
    let invalid = |reason: &str| CodecError::InvalidToken {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let body = match token.strip_prefix('$') {
        Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
        None => token,
    };

    let mut segments = Vec::new();
    let mut key = String::new();
    // Set after a '.' until the next key character arrives.
    let mut expect_key = false;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if expect_key || (key.is_empty() && segments.is_empty()) {
                    return Err(invalid("empty path segment"));
                }
                if !key.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut key)));
                }
                expect_key = true;
            }
            '[' => {
                if expect_key {
                    return Err(invalid("index must follow a key"));
                }
                if !key.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut key)));
                }
                let mut digits = String::new();
                let mut closed = false;
                for d in chars.by_ref() {
                    if d == ']' {
                        closed = true;
                        break;
                    }
                    digits.push(d);
                }
                if !closed {
                    return Err(invalid("unclosed '['"));
                }
                let idx = digits
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid("index is not a non-negative integer"))?;
                segments.push(Segment::Index(idx));
            }
            ']' => return Err(invalid("unexpected ']'")),
            c => {
                if !expect_key && key.is_empty() && matches!(segments.last(), Some(Segment::Index(_))) {
                    return Err(invalid("expected '.' or '[' after index"));
                }
                expect_key = false;
                key.push(c);
            }
        }
    }

    if expect_key {
        return Err(invalid("trailing '.'"));
    }
    if !key.is_empty() {
        segments.push(Segment::Key(key));
    }
    Ok(segments)
}
