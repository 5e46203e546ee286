//! `VERSION` negotiation (RFC 5545 §3.7.4).

use std::fmt;

use crate::error::{CalendarError, CalendarResult};

/// A `major.minor` version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Version {
    major: u16,
    minor: u16,
}

const SUPPORTED: Version = Version { major: 2, minor: 0 };

impl Version {
    fn parse(s: &str) -> Option<Self> {
        let (major, minor) = s.split_once('.')?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(major) || !digits(minor) {
            return None;
        }
        Some(Self {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Checks a `VERSION` value of the form `max` or `min;max`.
///
/// ## Errors
/// Returns a validation error for a malformed value and
/// [`CalendarError::Unsupported`] when 2.0 lies outside `[min, max]`.
pub(crate) fn check(value: &str) -> CalendarResult<()> {
    let (min, max) = match value.split_once(';') {
        Some((min, max)) => (Version::parse(min), Version::parse(max)),
        None => {
            let max = Version::parse(value);
            (max, max)
        }
    };
    let (Some(min), Some(max)) = (min, max) else {
        return Err(CalendarError::invalid("VERSION", format!("malformed value {value:?}")));
    };

    if max < SUPPORTED || min > SUPPORTED {
        return Err(CalendarError::Unsupported(format!(
            "iCalendar version {value}, only {SUPPORTED} is supported"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_versions() {
        for value in ["2.0", "1.0;2.0", "2.0;2.1", "1.0;3.0"] {
            assert!(check(value).is_ok(), "{value}");
        }
    }

    #[test]
    fn rejects_other_versions_as_unsupported() {
        for value in ["1.0", "2.1", "3.0;4.0", "2.1;2.0"] {
            assert!(check(value).unwrap_err().is_unsupported(), "{value}");
        }
    }

    #[test]
    fn rejects_malformed_versions() {
        for value in ["", "2", "two.zero", "2.0;", ";2.0", "2.0;1.0;3.0", "2.x", " 2.0"] {
            let err = check(value).unwrap_err();
            assert!(matches!(err, CalendarError::Validation(_)), "{value}: {err}");
        }
    }
}
