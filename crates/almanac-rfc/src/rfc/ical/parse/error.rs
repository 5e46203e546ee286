//! iCalendar parsing error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for iCalendar parsing.
///
/// Errors raised while reading a stream carry a 1-based line and column.
/// Errors raised by the standalone value parsers have no position (line 0)
/// and carry the rejected value as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based, 0 when unknown).
    pub line: usize,
    /// Column number where the error occurred (1-based, 0 when unknown).
    pub column: usize,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Creates a position-less error for a rejected value.
    #[must_use]
    pub fn value(kind: ParseErrorKind, value: &str) -> Self {
        Self::new(kind, 0, 0).with_context(format!("{value:?}"))
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.line > 0 {
            write!(f, " at line {}, column {}", self.line, self.column)?;
        }
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Content line starts with `;` or `:`.
    MissingPropertyName,
    /// Content line has no `:` before its value.
    MissingColon,
    /// Parameter has no `=`.
    MissingEquals,
    /// Parameter name is empty.
    InvalidParameter,
    /// Unclosed quoted parameter value.
    UnclosedQuote,
    /// Content line appears before any `BEGIN`.
    PropertyOutsideComponent,
    /// `END` name differs from the open component.
    MismatchedComponent,
    /// `END` with no open component.
    UnexpectedEnd,
    /// `BEGIN:` or `END:` without a name.
    MissingComponentName,
    /// Input ended while a content line was still pending.
    UnterminatedProperty,
    /// Input ended with open components.
    MissingEnd,
    /// Invalid date format.
    InvalidDate,
    /// Invalid date-time format.
    InvalidDateTime,
    /// Invalid duration format.
    InvalidDuration,
    /// Reading from the underlying source failed.
    Io,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::MissingEquals => write!(f, "missing '=' in parameter"),
            Self::InvalidParameter => write!(f, "invalid parameter format"),
            Self::UnclosedQuote => write!(f, "unclosed quoted string"),
            Self::PropertyOutsideComponent => write!(f, "property outside of any component"),
            Self::MismatchedComponent => write!(f, "mismatched BEGIN/END"),
            Self::UnexpectedEnd => write!(f, "END without matching BEGIN"),
            Self::MissingComponentName => write!(f, "missing component name"),
            Self::UnterminatedProperty => write!(f, "unterminated property"),
            Self::MissingEnd => write!(f, "missing END line"),
            Self::InvalidDate => write!(f, "invalid date format"),
            Self::InvalidDateTime => write!(f, "invalid date-time format"),
            Self::InvalidDuration => write!(f, "invalid duration format"),
            Self::Io => write!(f, "read error"),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
