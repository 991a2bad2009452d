//! Emitting side of the protocol.
//!
//! Instrumented clients buffer autoload events and flush them in as few
//! datagrams as possible. Every payload is newline-terminated and stays below
//! the packet size unless a single line alone exceeds it.

use super::{AUTOLOADED_METRIC, CLASS_TAG, COUNTER_KIND, NAMESPACE_SEPARATOR, WIRE_SEPARATOR};

/// Render one autoload counter line for `unit`.
pub fn autoload_line(unit: &str, delta: i64) -> String {
    let class = unit.replace(NAMESPACE_SEPARATOR, &WIRE_SEPARATOR.to_string());
    format!("{AUTOLOADED_METRIC},{CLASS_TAG}={class}:{delta}|{COUNTER_KIND}")
}

/// Group lines into datagram payloads of less than `packet_size` bytes.
pub fn pack_lines<I, S>(lines: I, packet_size: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut payloads = Vec::new();
    let mut current = String::new();

    for line in lines {
        let line = line.as_ref();
        let needed = line.len() + 1;
        if !current.is_empty() && current.len() + needed >= packet_size {
            payloads.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }

    if !current.is_empty() {
        payloads.push(current);
    }
    payloads
}
