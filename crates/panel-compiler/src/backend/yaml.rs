//! Block-style YAML rendering of JSON trees.
//!
//! Only the subset the generated configs need: block maps and sequences,
//! flow sequences of numbers, `!lambda |-` blocks for strings produced by
//! `emit::lambda`, and double-quoted scalars whenever a plain scalar would be
//! re-read as something else.

use serde_json::{Map, Value};

const LAMBDA_TAG: &str = "!lambda ";

/// Words a YAML 1.1 reader resolves to booleans or null.
const RESERVED: &[&str] = &[
    "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~",
];

/// Appends the lines of `value` rendered at `indent`.
pub fn write_value(out: &mut Vec<String>, indent: usize, value: &Value) {
    match value {
        Value::Object(map) => write_map(out, indent, map),
        Value::Array(items) => write_seq(out, indent, items),
        scalar => out.push(format!("{}{}", pad(indent), scalar_text(scalar))),
    }
}

/// Renders a whole document.
#[must_use]
pub fn to_yaml(value: &Value) -> String {
    let mut out = Vec::new();
    write_value(&mut out, 0, value);
    let mut text = out.join("\n");
    text.push('\n');
    text
}

pub fn write_map(out: &mut Vec<String>, indent: usize, map: &Map<String, Value>) {
    if map.is_empty() {
        out.push(format!("{}{{}}", pad(indent)));
        return;
    }
    for (key, value) in map {
        write_entry(out, indent, key, value);
    }
}

/// One `key: value` entry, nesting collections below the key.
pub fn write_entry(out: &mut Vec<String>, indent: usize, key: &str, value: &Value) {
    let lead = format!("{}{}:", pad(indent), key_text(key));
    match value {
        Value::String(text) if text.starts_with(LAMBDA_TAG) => {
            out.push(format!("{lead} !lambda |-"));
            push_block(out, indent + 2, &text[LAMBDA_TAG.len()..]);
        }
        Value::Object(map) if !map.is_empty() => {
            out.push(lead);
            write_map(out, indent + 2, map);
        }
        Value::Array(items) if !items.is_empty() && !is_flow(items) => {
            out.push(lead);
            write_seq(out, indent + 2, items);
        }
        other => out.push(format!("{lead} {}", inline_text(other))),
    }
}

pub fn write_seq(out: &mut Vec<String>, indent: usize, items: &[Value]) {
    if items.is_empty() {
        out.push(format!("{}[]", pad(indent)));
        return;
    }
    for item in items {
        match item {
            Value::String(text) if text.starts_with(LAMBDA_TAG) => {
                out.push(format!("{}- !lambda |-", pad(indent)));
                push_block(out, indent + 2, &text[LAMBDA_TAG.len()..]);
            }
            Value::Object(map) if !map.is_empty() => {
                let start = out.len();
                write_map(out, indent + 2, map);
                merge_dash(out, start, indent);
            }
            Value::Array(inner) if !inner.is_empty() && !is_flow(inner) => {
                let start = out.len();
                write_seq(out, indent + 2, inner);
                merge_dash(out, start, indent);
            }
            other => out.push(format!("{}- {}", pad(indent), inline_text(other))),
        }
    }
}

/// Turns the first line written at `indent + 2` into the `- ` item line.
fn merge_dash(out: &mut [String], start: usize, indent: usize) {
    if let Some(first) = out.get_mut(start) {
        let body = first[indent + 2..].to_string();
        *first = format!("{}- {body}", pad(indent));
    }
}

fn push_block(out: &mut Vec<String>, indent: usize, code: &str) {
    for line in code.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.push(format!("{}{line}", pad(indent)));
        }
    }
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

fn is_flow(items: &[Value]) -> bool {
    items.iter().all(Value::is_number)
}

fn inline_text(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(scalar_text).collect();
            format!("[{}]", parts.join(", "))
        }
        scalar => scalar_text(scalar),
    }
}

fn key_text(key: &str) -> String {
    if needs_quotes(key) {
        quoted(key)
    } else {
        key.to_string()
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => {
            if needs_quotes(text) {
                quoted(text)
            } else {
                text.clone()
            }
        }
        Value::Array(_) | Value::Object(_) => inline_text(value),
    }
}

/// Whether a plain scalar would be read back as something other than the
/// same string.
#[must_use]
pub fn needs_quotes(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return true;
    };
    if !text.is_ascii() || text.chars().any(char::is_control) {
        return true;
    }
    if first.is_whitespace() || text.ends_with(char::is_whitespace) {
        return true;
    }
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return true;
    }
    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return true;
    }
    if RESERVED.contains(&text.to_ascii_lowercase().as_str()) {
        return true;
    }
    looks_numeric(text)
}

fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    if body.parse::<f64>().is_ok() {
        return true;
    }
    let lower = body.to_ascii_lowercase();
    for prefix in ["0x", "0o", "0b"] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_hexdigit());
        }
    }
    matches!(lower.as_str(), ".inf" | ".nan")
}

/// Double-quoted scalar; non-ASCII characters become `\UXXXXXXXX`.
#[must_use]
pub fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_ascii_control() => out.push_str(&format!("\\x{:02X}", u32::from(ch))),
            ch if !ch.is_ascii() => out.push_str(&format!("\\U{:08X}", u32::from(ch))),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use serde_json::json;

    #[test]
    fn scalars_that_need_quotes() {
        assert!(needs_quotes(""));
        assert!(needs_quotes("0xFFFFFF"));
        assert!(needs_quotes("on"));
        assert!(needs_quotes("12"));
        assert!(needs_quotes("{{ states('sensor.x') }}"));
        assert!(!needs_quotes("page_0"));
        assert!(!needs_quotes("ppb.ttf"));
        assert!(!needs_quotes("Hello world"));
    }

    #[test]
    fn glyphs_are_escaped() {
        assert_eq!(quoted("\u{F0595}"), "\"\\U000F0595\"");
    }

    #[test]
    fn nested_document() {
        let doc = json!({
            "pages": [
                {
                    "id": "page_0",
                    "widgets": [
                        { "label": { "id": "w1", "text": "!lambda return \"x\";", "x": 4 } }
                    ]
                }
            ],
            "points": [[1, 2], [3, 4]],
            "empty": []
        });
        expect![[r#"
            pages:
              - id: page_0
                widgets:
                  - label:
                      id: w1
                      text: !lambda |-
                        return "x";
                      x: 4
            points:
              - [1, 2]
              - [3, 4]
            empty: []
        "#]]
        .assert_eq(&to_yaml(&doc));
    }
}
