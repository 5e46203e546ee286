//! iCalendar text escaping utilities.

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes backslash, comma, semicolon, and newlines. Carriage returns are
/// dropped so that `\r\n` in the input becomes a single `\n` escape.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Encodes a parameter value with RFC 6868 caret escapes.
///
/// The result never contains `"` or a line break, so it can be written
/// inside a quoted parameter value.
#[must_use]
pub fn encode_caret(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '"' => result.push_str("^'"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}
