//! HTML rendering for the bucket browser pages.
//!
//! Pages are small enough to build as strings. Every bucket name, key and
//! value is escaped before it reaches the markup.

use std::fmt::Write;

use serde::Serialize;

const HEAD: &str = r#"<html><head><meta charset="UTF-8"></head><body>"#;
const TAIL: &str = "</body></html>";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encode a single path segment (RFC 3986 unreserved set kept).
pub fn encode_path_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// Re-indent a JSON document with tabs. `None` if the bytes are not JSON.
fn indent_json(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser).ok()?;
    String::from_utf8(out).ok()
}

/// Display form of a stored value: indented JSON, or the raw text when the
/// bytes are not JSON.
pub fn pretty_value(bytes: &[u8]) -> String {
    indent_json(bytes).unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

/// Index page listing every bucket with a link to its content view.
pub fn bucket_list_page(buckets: &[String]) -> String {
    let mut html = String::from(HEAD);
    html.push_str("<h1>Bucket list:</h1>");
    for name in buckets {
        let _ = write!(
            html,
            r#"<div><a href="/bucket/{}">{}</a></div>"#,
            encode_path_segment(name),
            escape_html(name)
        );
    }
    html.push_str(TAIL);
    html
}

/// Content view of one bucket, records in key order.
pub fn bucket_page(bucket: &str, entries: &[(String, Vec<u8>)]) -> String {
    let mut html = String::from(HEAD);
    let _ = write!(html, "<h1>Bucket's \"{}\" content:</h1>", escape_html(bucket));
    for (key, value) in entries {
        let _ = write!(
            html,
            "<div><h2>{}:</h2><pre>{}</pre></div>",
            escape_html(key),
            escape_html(&pretty_value(value))
        );
    }
    html.push_str(TAIL);
    html
}

pub fn error_page(message: &str) -> String {
    format!("{HEAD}<h1>Error</h1><p>{}</p>{TAIL}", escape_html(message))
}
