use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{CodecError, CodecResult};
use crate::format::{JsonFormat, JsonOptions};

/// Encode a value to JSON bytes using the given options.
pub fn encode<T: Serialize + ?Sized>(value: &T, options: &JsonOptions) -> CodecResult<Vec<u8>> {
    match options.format {
        JsonFormat::Compact => serde_json::to_vec(value).map_err(CodecError::Encode),
        JsonFormat::Indented => {
            let indent = vec![b' '; options.indent_width];
            let mut buf = Vec::with_capacity(128);
            let mut ser = serde_json::Serializer::with_formatter(
                &mut buf,
                PrettyFormatter::with_indent(&indent),
            );
            value.serialize(&mut ser).map_err(CodecError::Encode)?;
            Ok(buf)
        }
    }
}

/// Decode JSON bytes into `T`.
///
/// Empty input is a decode error, not an empty value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

/// Encode a value to a JSON string.
pub fn stringify<T: Serialize + ?Sized>(value: &T, options: &JsonOptions) -> CodecResult<String> {
    match options.format {
        JsonFormat::Compact => serde_json::to_string(value).map_err(CodecError::Encode),
        JsonFormat::Indented => Ok(String::from_utf8(encode(value, options)?)?),
    }
}

/// Decode a JSON string into `T`.
pub fn parse<T: DeserializeOwned>(text: &str) -> CodecResult<T> {
    decode(text.as_bytes())
}
