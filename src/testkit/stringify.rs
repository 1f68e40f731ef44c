use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Sentinel indent used to mark collapsible whitespace in the pretty output.
const INDENT_SENTINEL: &[u8] = b">>>>";

/// Produce a stable single-line rendering of a JSON value.
///
/// The value is pretty-printed with a sentinel indent, then every newline
/// together with its sentinel run is collapsed to a single space. The result
/// keeps element order as-is (order-sensitive, not key-normalized), so
/// structurally identical inputs always compare equal as text. Used for
/// text-based snapshot comparison in tests.
pub fn stringify(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT_SENTINEL);
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .expect("serializing a Value to memory cannot fail");
    let pretty = String::from_utf8(out).expect("serde_json emits UTF-8");

    collapse_indents(&pretty)
}

fn collapse_indents(pretty: &str) -> String {
    let mut collapsed = String::with_capacity(pretty.len());
    let mut chars = pretty.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            while chars.peek() == Some(&'>') {
                chars.next();
            }
            collapsed.push(' ');
        } else {
            collapsed.push(c);
        }
    }

    collapsed
}
