//! Diagnostics Module
//!
//! Best-effort warning delivery for the pool layer, either through a
//! structured logger or as interpolated plain text.

use std::fmt::Debug;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::warn;

/// Context attached to a diagnostic message.
pub type Context = Map<String, Value>;

// == Logger Trait ==
/// Structured logging sink.
pub trait Logger: Debug + Send + Sync {
    /// Records a warning. Implementations must not panic.
    fn warning(&self, message: &str, context: &Context);
}

// == Tracing Logger ==
/// Logger that forwards warnings to `tracing`, keeping the context as a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warning(&self, message: &str, context: &Context) {
        let context = Value::Object(context.clone());
        warn!(target: "cache_item", context = %context, "{}", message);
    }
}

// == Diagnostics ==
/// Diagnostics strategy, chosen when the owning collaborator is built.
#[derive(Debug, Clone)]
pub enum Diagnostics {
    /// Forward message and context unchanged
    Structured(Arc<dyn Logger>),
    /// Substitute `{placeholder}`s with scalar context values and emit the text
    PlainText,
}

impl Diagnostics {
    /// Structured diagnostics backed by `tracing`.
    pub fn tracing() -> Self {
        Diagnostics::Structured(Arc::new(TracingLogger))
    }

    /// Structured diagnostics when a logger is available, plain text otherwise.
    pub fn from_logger(logger: Option<Arc<dyn Logger>>) -> Self {
        logger.map_or(Diagnostics::PlainText, Diagnostics::Structured)
    }

    // == Warn ==
    /// Emits a warning. Never fails.
    pub fn warn(&self, message: &str, context: &Context) {
        match self {
            Diagnostics::Structured(logger) => logger.warning(message, context),
            Diagnostics::PlainText => {
                warn!(target: "cache_item", "{}", interpolate(message, context));
            }
        }
    }
}

// == Interpolate ==
/// Replaces each `{key}` in `message` with the matching scalar context value.
///
/// Strings are inserted verbatim, numbers and booleans in their JSON form.
/// `null`, arrays and objects are not scalars and leave their placeholder as is.
pub fn interpolate(message: &str, context: &Context) -> String {
    let mut rendered = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];

        let replacement = tail.find('}').and_then(|close| {
            let name = &tail[1..close];
            scalar_text(context.get(name)?).map(|text| (text, close))
        });

        match replacement {
            Some((text, close)) => {
                rendered.push_str(&text);
                rest = &tail[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
