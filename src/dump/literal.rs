//! Literal serialization for default values.
//!
//! Scalars follow the emitted language's canonical spelling; arrays are written across several lines with one
//! entry per line, a trailing comma after every entry, and the closing `)` aligned with the line that opened it.

use classforge_core::conventions::INDENT_WIDTH;
use classforge_syntax::{Key, Value};

/// Serialize `value` as it appears on a line indented `level` steps deep.
pub fn export_value(value: &Value, level: usize) -> String {
    export_value_with_indent(value, level, INDENT_WIDTH)
}

/// Like [`export_value`] with a custom number of spaces per level.
pub fn export_value_with_indent(value: &Value, level: usize, width: usize) -> String {
    let mut out = String::new();
    let indent = " ".repeat(width);
    write_value(&mut out, value, level, &indent);
    out
}

fn write_value(out: &mut String, value: &Value, level: usize, indent: &str) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&export_float(*f)),
        Value::String(s) => out.push_str(&export_string(s)),
        Value::Array(entries) if entries.is_empty() => out.push_str("array()"),
        Value::Array(entries) => {
            out.push_str("array(\n");
            for (key, item) in entries {
                push_indent(out, level + 1, indent);
                write_key(out, key);
                out.push_str(" => ");
                write_value(out, item, level + 1, indent);
                out.push_str(",\n");
            }
            push_indent(out, level, indent);
            out.push(')');
        }
    }
}

fn write_key(out: &mut String, key: &Key) {
    match key {
        Key::Int(n) => out.push_str(&n.to_string()),
        Key::String(s) => out.push_str(&export_string(s)),
    }
}

fn push_indent(out: &mut String, level: usize, indent: &str) {
    for _ in 0..level {
        out.push_str(indent);
    }
}

/// Single-quoted string with `\` and `'` escaped.
pub fn export_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Shortest round-trip float spelling; always contains `.` or an exponent so it reads back as a float.
pub fn export_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    format!("{f:?}")
}
