//! Bridge from `tracing` events to a [`FileSink`].

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::level::LogLevel;
use crate::sink::FileSink;

/// `tracing-subscriber` layer that appends every enabled event to a sink.
///
/// Lines read `<message> key=value ...`; the sink adds the timestamp. Append
/// failures cannot be returned from a layer and are reported on stderr
/// instead.
#[derive(Clone, Debug)]
pub struct FileLayer {
    sink: Arc<FileSink>,
}

impl FileLayer {
    pub fn new(sink: Arc<FileSink>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &Arc<FileSink> {
        &self.sink
    }
}

impl<S: Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = LogLevel::from(*metadata.level());
        if !self.sink.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let line = visitor.finish();

        if let Err(e) = self.sink.write(level, &line) {
            eprintln!("filekeep: failed to append to {}: {e}", self.sink.path().display());
        }
    }
}

/// Collects the `message` field and renders the rest as `key=value`.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: String,
}

impl FieldVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}
