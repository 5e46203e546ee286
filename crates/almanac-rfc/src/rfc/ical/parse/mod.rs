//! iCalendar text reading.

mod error;
mod lexer;
mod reader;
pub mod values;

use std::io::BufRead;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::parse_content_line;
pub use reader::ComponentReader;

use crate::rfc::ical::core::Component;

/// Parses every top-level component in `input`.
///
/// Accepts CRLF or bare LF line endings.
///
/// ## Errors
/// Returns the first syntax error encountered.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<Component>> {
    tracing::debug!("Parsing iCalendar text");

    let components = components(input).collect::<ParseResult<Vec<_>>>()?;

    tracing::debug!(count = components.len(), "Parsed top-level components");
    Ok(components)
}

/// Lazily yields each top-level component of `input` as it closes.
pub fn components(input: &str) -> ComponentReader<impl Iterator<Item = std::io::Result<String>> + '_> {
    ComponentReader::new(input.lines().map(|line| Ok(line.to_string())))
}

/// Lazily yields each top-level component read from `reader`.
///
/// I/O failures surface as [`ParseErrorKind::Io`].
pub fn read_from<R: BufRead>(reader: R) -> ComponentReader<std::io::Lines<R>> {
    ComponentReader::new(reader.lines())
}
