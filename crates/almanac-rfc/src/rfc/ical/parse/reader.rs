//! Line-oriented component reader (RFC 5545 §3.1, §3.4).
//!
//! A single-pass state machine over physical lines with an explicit stack of
//! open components. Folded lines are unfolded into a pending buffer that is
//! parsed once the next non-continuation line arrives. Each top-level
//! component is yielded as soon as its `END` line is read, so concatenated
//! documents stream out one at a time.

use std::io;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::parse_content_line;
use crate::rfc::ical::core::Component;

const BEGIN: &str = "BEGIN:";
const END: &str = "END:";

/// Iterator over the top-level components of a line stream.
///
/// After the first error the iterator is exhausted.
#[derive(Debug)]
pub struct ComponentReader<I> {
    lines: I,
    line_num: usize,
    stack: Vec<Component>,
    /// Unfolded content line waiting to be parsed, with its first line number.
    pending: Option<(usize, String)>,
    done: bool,
}

impl<I> ComponentReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Creates a reader over lines without terminators (a trailing `\r` is
    /// tolerated).
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            line_num: 0,
            stack: Vec::new(),
            pending: None,
            done: false,
        }
    }

    /// Handles one physical line; returns a component when a root closes.
    fn feed(&mut self, raw: &str) -> ParseResult<Option<Component>> {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            match &mut self.pending {
                Some((_, buf)) => buf.push_str(rest),
                None => self.pending = Some((self.line_num, rest.to_string())),
            }
            return Ok(None);
        }

        self.flush()?;

        if let Some(name) = strip_prefix_ignore_case(line, BEGIN) {
            if name.is_empty() {
                return Err(self.error(ParseErrorKind::MissingComponentName, line));
            }
            tracing::trace!(component = name, depth = self.stack.len(), line = self.line_num, "BEGIN");
            self.stack.push(Component::new(name));
            return Ok(None);
        }

        if let Some(name) = strip_prefix_ignore_case(line, END) {
            return self.close(name, line);
        }

        self.pending = Some((self.line_num, line.to_string()));
        Ok(None)
    }

    /// Parses the pending content line into the innermost open component.
    fn flush(&mut self) -> ParseResult<()> {
        let Some((at, buf)) = self.pending.take() else {
            return Ok(());
        };

        let Some(top) = self.stack.last_mut() else {
            return Err(ParseError::new(ParseErrorKind::PropertyOutsideComponent, at, 1).with_context(buf));
        };
        top.add_property(parse_content_line(&buf, at)?);
        Ok(())
    }

    fn close(&mut self, name: &str, line: &str) -> ParseResult<Option<Component>> {
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::MissingComponentName, line));
        }

        let Some(top) = self.stack.last() else {
            return Err(self.error(ParseErrorKind::UnexpectedEnd, line));
        };
        if !top.is(name) {
            let context = format!("expected END:{}, found {line}", top.name);
            return Err(ParseError::new(ParseErrorKind::MismatchedComponent, self.line_num, 1).with_context(context));
        }

        let Some(component) = self.stack.pop() else {
            return Err(self.error(ParseErrorKind::UnexpectedEnd, line));
        };
        tracing::trace!(component = %component.name, depth = self.stack.len(), line = self.line_num, "END");

        match self.stack.last_mut() {
            Some(parent) => {
                parent.add_child(component);
                Ok(None)
            }
            None => {
                tracing::debug!(
                    component = %component.name,
                    properties = component.properties.len(),
                    children = component.children.len(),
                    "Read top-level component"
                );
                Ok(Some(component))
            }
        }
    }

    /// End of input: anything still open is an error.
    fn finish(&mut self) -> ParseResult<()> {
        if let Some((at, buf)) = self.pending.take() {
            return Err(ParseError::new(ParseErrorKind::UnterminatedProperty, at, 1).with_context(buf));
        }
        if let Some(open) = self.stack.last() {
            return Err(ParseError::new(ParseErrorKind::MissingEnd, self.line_num, 1)
                .with_context(format!("expected END:{}", open.name)));
        }
        Ok(())
    }

    fn error(&self, kind: ParseErrorKind, line: &str) -> ParseError {
        ParseError::new(kind, self.line_num, 1).with_context(line.to_string())
    }
}

impl<I> Iterator for ComponentReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = ParseResult<Component>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(next) = self.lines.next() else {
                self.done = true;
                return self.finish().err().map(Err);
            };
            self.line_num += 1;

            let outcome = match next {
                Ok(line) => self.feed(&line),
                Err(e) => Err(ParseError::new(ParseErrorKind::Io, self.line_num, 1).with_context(e.to_string())),
            };

            match outcome {
                Ok(None) => {}
                Ok(Some(component)) => return Some(Ok(component)),
                Err(e) => {
                    tracing::warn!(error = %e, "Stopped reading components");
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for ComponentReader<I> where I: Iterator<Item = io::Result<String>> {}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &line[prefix.len()..])
}
