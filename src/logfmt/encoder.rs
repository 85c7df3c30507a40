use super::Record;
use colored::Colorize;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Encode a record as a single logfmt line, without the trailing newline.
///
/// Keys that can't be represented in logfmt (empty, or containing spaces,
/// `=` or `"`) are left out.
pub fn encode_record(record: &Record) -> String {
    let mut line = String::new();
    for (key, value) in record.iter().filter(|(k, _)| is_valid_key(k)) {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(key);
        line.push('=');
        push_value(&mut line, value);
    }
    line
}

/// Write a record as a logfmt line followed by a newline.
///
/// With `color` set, keys are highlighted; whether escape codes are actually
/// emitted is left to `colored`'s terminal detection.
pub fn write_record<W: Write>(writer: &mut W, record: &Record, color: bool) -> io::Result<()> {
    if !color {
        return writeln!(writer, "{}", encode_record(record));
    }

    let mut first = true;
    for (key, value) in record.iter().filter(|(k, _)| is_valid_key(k)) {
        if !first {
            write!(writer, " ")?;
        }
        first = false;

        let mut encoded = String::new();
        push_value(&mut encoded, value);
        write!(writer, "{}{}{}", key.cyan(), "=".dimmed(), encoded)?;
    }
    writeln!(writer)
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(|c| c <= ' ' || c == '=' || c == '"')
}

fn needs_quotes(value: &str) -> bool {
    value.chars().any(|c| c <= ' ' || c == '=' || c == '"')
}

fn push_value(out: &mut String, value: &str) {
    if !needs_quotes(value) {
        out.push_str(value);
        return;
    }

    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
