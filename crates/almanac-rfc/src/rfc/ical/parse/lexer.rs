//! Content line tokenizer for iCalendar (RFC 5545 §3.1).
//!
//! Format: `name *(";" param) ":" value` with `param = name "=" value *("," value)`.

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{Parameter, Property};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Parses a single unfolded content line.
///
/// The value is everything after the first `:` outside a quoted parameter
/// value, taken verbatim.
///
/// ## Errors
/// Returns an error naming `line_num` if the name is empty, a parameter lacks
/// `=`, a quoted value is not closed, or no `:` separates the value.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<Property> {
    let mut chars = line.char_indices().peekable();

    // Property name (ends at ';' or ':')
    let mut separator = None;
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            separator = Some((i, c));
            break;
        }
        chars.next();
    }

    let Some((name_end, mut next)) = separator else {
        return Err(error(ParseErrorKind::MissingColon, line_num, line.len() + 1, line));
    };
    if name_end == 0 {
        return Err(error(ParseErrorKind::MissingPropertyName, line_num, 1, line));
    }

    let mut property = Property::new(&line[..name_end], "");
    chars.next(); // consume the separator

    while next == ';' {
        let (parameter, terminator) = parse_parameter(&mut chars, line, line_num)?;
        property.add_parameter(parameter);
        next = terminator;
    }

    // Value is everything after the colon
    let value_start = chars.peek().map_or(line.len(), |&(i, _)| i);
    property.value = line[value_start..].to_string();

    tracing::trace!(name = %property.name, line = line_num, "Parsed content line");
    Ok(property)
}

fn error(kind: ParseErrorKind, line_num: usize, column: usize, line: &str) -> ParseError {
    ParseError::new(kind, line_num, column).with_context(line.to_string())
}

/// Parses one parameter after its leading `;`.
///
/// Returns the parameter and the separator that ended it (`;` or `:`).
fn parse_parameter(chars: &mut Chars<'_>, line: &str, line_num: usize) -> ParseResult<(Parameter, char)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parameter name (ends at '=')
    let name_end = loop {
        match chars.peek() {
            Some(&(i, '=')) => {
                chars.next();
                break i;
            }
            Some(&(i, ';' | ':')) => {
                return Err(error(ParseErrorKind::MissingEquals, line_num, i + 1, line));
            }
            Some(_) => {
                chars.next();
            }
            None => {
                return Err(error(ParseErrorKind::MissingEquals, line_num, line.len() + 1, line));
            }
        }
    };

    if name_end == start {
        return Err(error(ParseErrorKind::InvalidParameter, line_num, start + 1, line));
    }

    let mut parameter = Parameter::with_values(&line[start..name_end], Vec::new());
    loop {
        let (value, quoted) = parse_parameter_value(chars, line, line_num)?;
        parameter.values.push(value);
        parameter.quoted |= quoted;

        match chars.next() {
            Some((_, ',')) => {}
            Some((_, c @ (';' | ':'))) => return Ok((parameter, c)),
            _ => {
                return Err(error(ParseErrorKind::MissingColon, line_num, line.len() + 1, line));
            }
        }
    }
}

/// Scans one parameter value, stopping before `,`, `;`, or `:` outside quotes.
///
/// Double quotes toggle quoting and are dropped from the value. Returns the
/// value and whether any quote was seen.
fn parse_parameter_value(chars: &mut Chars<'_>, line: &str, line_num: usize) -> ParseResult<(String, bool)> {
    let mut value = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut quote_start = 0;

    while let Some(&(i, c)) = chars.peek() {
        match c {
            '"' => {
                if !in_quotes {
                    quote_start = i;
                }
                in_quotes = !in_quotes;
                quoted = true;
            }
            ',' | ';' | ':' if !in_quotes => break,
            _ => value.push(c),
        }
        chars.next();
    }

    if in_quotes {
        return Err(error(ParseErrorKind::UnclosedQuote, line_num, quote_start + 1, line));
    }

    Ok((value, quoted))
}
