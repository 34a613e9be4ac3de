use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{FileKeepError, FileKeepResult};
use crate::keep::FileKeep;

/// Install the global tracing subscriber.
///
/// - Respects `RUST_LOG` if set, otherwise uses `log.filter` from the config
/// - Writes compact human-readable output to stderr
/// - Also appends to the configured log file when `log.path` is set
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(keep: &FileKeep) -> FileKeepResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&keep.config().log.filter))
        .map_err(|e| FileKeepError::Telemetry(e.to_string()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .with(keep.file_layer()?)
        .try_init()
        .map_err(|e| FileKeepError::Telemetry(e.to_string()))
}
