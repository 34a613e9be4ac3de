use serde::{Deserialize, Serialize};

/// Layout of the emitted JSON text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// One member per line, nested levels indented.
    Indented,
}

/// Formatting options applied when encoding.
///
/// Decoding is format-agnostic: compact and indented documents decode to the
/// same value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Output layout.
    pub format: JsonFormat,
    /// Spaces per nesting level when `format` is [`JsonFormat::Indented`].
    pub indent_width: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            format: JsonFormat::Compact,
            indent_width: 2,
        }
    }
}

impl JsonOptions {
    /// Compact output (the default).
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output with the default indent width.
    pub fn indented() -> Self {
        Self {
            format: JsonFormat::Indented,
            ..Default::default()
        }
    }

    /// Override the indent width.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}
