//! Render `tracing` events as logfmt.
//!
//! Events are reduced to a [`RenderedLog`]: level, target, message and the
//! remaining fields as `key=value` pairs. Fields stay separate so callers can
//! match on them without parsing the rendered line.

use std::fmt::{Debug, Write};

use tracing::{
    Event,
    field::{Field, Visit},
};

/// A rendered tracing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field, or the rendered fields when there is none.
    pub message: String,
    /// Non-message fields in recording order.
    pub fields: Vec<(String, String)>,
}

impl RenderedLog {
    /// Value of a non-message field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Single logfmt line: `level=.. target=.. msg=".." key=value ...`.
    pub fn to_logfmt(&self) -> String {
        let mut line = format!(
            "level={} target={} msg={:?}",
            self.level.to_ascii_lowercase(),
            self.target,
            self.message
        );
        for (k, v) in &self.fields {
            let _ignored = write!(&mut line, " {k}={v}");
        }
        line
    }
}

/// Field visitor splitting out the message.
#[derive(Default)]
struct FieldCollector {
    /// Captured `message` field, if present.
    message: Option<String>,
    /// Remaining fields.
    fields: Vec<(String, String)>,
}

impl FieldCollector {
    /// Store one rendered value.
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.push(field, value.to_string());
        } else {
            self.push(field, format!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.push(field, format!("{value:?}"));
    }
}

/// Render a tracing event.
///
/// Without a `message` field the message is the fields joined as
/// `key=value` pairs.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta = event.metadata();
    let mut collector = FieldCollector::default();
    event.record(&mut collector);
    let message = collector.message.unwrap_or_else(|| {
        collector
            .fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ")
    });
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message,
        fields: collector.fields,
    }
}
