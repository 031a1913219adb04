//! Human-readable `=== ... ===` blocks for the request and response traces.
//!
//! The layout is informal and not meant to be parsed.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::models::RequestEvent;

/// Writes whatever `content` writes between an `=== title ===` heading and a closing rule
/// of the same width.
pub fn write_block(
    f: &mut Formatter<'_>,
    title: &str,
    content: impl FnOnce(&mut Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    let heading = format!("=== {title} ===");
    writeln!(f, "{heading}")?;
    content(f)?;
    write!(f, "{}", "=".repeat(heading.len()))
}

/// Field-by-field dump of a [RequestEvent] as seen by the invocation handler.
pub struct InvocationReport<'a>(pub &'a RequestEvent);

impl Display for InvocationReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let event = self.0;
        write_block(f, "API Gateway Request", |f| {
            writeln!(f, "Path: {}", event.path())?;
            writeln!(f, "HTTPMethod: {}", event.http_method())?;
            writeln!(f, "Headers: {:?}", event.headers())?;
            writeln!(f, "QueryStringParameters: {:?}", event.query_string_parameters())?;
            writeln!(f, "PathParameters: {:?}", event.path_parameters())?;
            writeln!(f, "Body: {}", event.body())
        })
    }
}

/// Any serializable value pretty-printed as JSON inside a titled block.
pub struct JsonReport<'a, T> {
    title: &'a str,
    value: &'a T,
}

impl<'a, T: Serialize> JsonReport<'a, T> {
    pub fn new(title: &'a str, value: &'a T) -> Self {
        Self { title, value }
    }
}

impl<T: Serialize> Display for JsonReport<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_block(f, self.title, |f| match serde_json::to_string_pretty(self.value) {
            Ok(json) => writeln!(f, "{json}"),
            Err(e) => writeln!(f, "<unserializable: {e}>"),
        })
    }
}
