//! Escaping for the three parsing passes ffmpeg applies to a `-vf` argument.
//!
//! 1. the filter graph parser splits filters and removes one level of quoting,
//! 2. the filter option parser splits `key=value` pairs on `:` and removes another level,
//! 3. drawtext expands `%{...}` sequences and `\x` escapes inside `text`.
//!
//! Values are escaped innermost first, so each pass undoes exactly one layer.

use crate::shot::metadata::FRAME_PLACEHOLDER;

/// Escape drawtext expansion characters, keeping the frame placeholder live.
pub fn escape_text_expansion(text: &str) -> String {
    text.split(FRAME_PLACEHOLDER)
        .map(|part| backslash_escape(part, &['\\', '%']))
        .collect::<Vec<_>>()
        .join(FRAME_PLACEHOLDER)
}

/// Escape a single filter option value (`key=<value>`).
pub fn escape_option_value(value: &str) -> String {
    backslash_escape(value, &['\\', '\'', ':'])
}

/// Escape a filter's argument string for the filter graph parser.
pub fn escape_graph_value(value: &str) -> String {
    backslash_escape(value, &['\\', '\'', '[', ']', ',', ';'])
}

/// Quote one argument for display in a POSIX shell.
pub fn shell_quote(arg: &str) -> String {
    let is_plain = !arg.is_empty()
        && arg
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_./=:@%+,".contains(&b));
    if is_plain {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

fn backslash_escape(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/graph/escape.rs"]
mod tests;
