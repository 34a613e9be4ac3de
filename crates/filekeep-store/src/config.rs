use filekeep_codec::JsonOptions;
use serde::{Deserialize, Serialize};

/// Configuration for a [`JsonFileStore`](crate::JsonFileStore).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Encoding options used when a call does not pass its own.
    pub json: JsonOptions,
}
