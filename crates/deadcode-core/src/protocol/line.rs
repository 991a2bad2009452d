//! Line decoding (panic-free).
//!
//! Rules per line:
//! - exactly one `:` splits the name/tag segment from the value segment;
//! - the name/tag segment splits on `,`; the first part is the name, the
//!   others are `key=value` tags split on the first `=`;
//! - the value segment holds exactly one `|`; the left side is a signed
//!   integer delta, the right side the opaque kind token.

use std::collections::HashMap;

use crate::error::{DeadCodeError, Result};

use super::{AUTOLOADED_METRIC, CLASS_TAG, COUNTER_KIND, NAMESPACE_SEPARATOR, WIRE_SEPARATOR};

/// One decoded event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    /// Metric name (e.g. `autoloaded`).
    pub name: String,
    /// Tag key -> value.
    pub tags: HashMap<String, String>,
    /// Signed delta.
    pub delta: i64,
    /// Kind token after `|` (e.g. `c`).
    pub kind: String,
}

impl Metric {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Counter increment records are the only kind the collector consumes.
    pub fn is_counter(&self) -> bool {
        self.kind == COUNTER_KIND
    }

    /// Store key for an `autoloaded` counter carrying a `class` tag.
    ///
    /// Wire separators are translated back to namespace separators, so
    /// `Foo/Bar` becomes `Foo\Bar`.
    pub fn autoloaded_unit(&self) -> Option<String> {
        if self.name != AUTOLOADED_METRIC || !self.is_counter() {
            return None;
        }
        self.tag(CLASS_TAG)
            .map(|class| class.replace(WIRE_SEPARATOR, &NAMESPACE_SEPARATOR.to_string()))
    }
}

/// Decode a single line.
pub fn parse_line(input: &str) -> Result<Metric> {
    let input = input.strip_suffix('\r').unwrap_or(input);

    let mut colon_parts = input.split(':');
    let (Some(head), Some(value), None) = (colon_parts.next(), colon_parts.next(), colon_parts.next())
    else {
        return Err(DeadCodeError::MalformedLine(
            "expected exactly one ':' separator".into(),
        ));
    };

    let mut comma_parts = head.split(',');
    let name = comma_parts.next().unwrap_or_default().to_string();
    let tags = comma_parts
        .map(|tag| match tag.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (tag.to_string(), String::new()),
        })
        .collect();

    let mut pipe_parts = value.split('|');
    let (Some(delta), Some(kind), None) = (pipe_parts.next(), pipe_parts.next(), pipe_parts.next())
    else {
        return Err(DeadCodeError::MalformedLine(
            "expected exactly one '|' separator".into(),
        ));
    };

    let delta = delta
        .parse::<i64>()
        .map_err(|e| DeadCodeError::MalformedLine(format!("invalid delta {delta:?}: {e}")))?;

    Ok(Metric {
        name,
        tags,
        delta,
        kind: kind.to_string(),
    })
}

/// Decode every line of a payload, skipping the ones that do not parse.
pub fn parse_batch(input: &str) -> Vec<Metric> {
    let mut metrics = Vec::new();
    for line in input.split('\n') {
        if line.trim().is_empty() {
            tracing::trace!("skipping blank line");
            continue;
        }
        match parse_line(line) {
            Ok(metric) => metrics.push(metric),
            Err(e) => tracing::debug!(line = %line, error = %e, "skipping metric"),
        }
    }
    metrics
}
