//! Read, validate and rewrite iCalendar documents.

use almanac_model::timezone::TimeZoneProvider;
use almanac_service::calendar::CalendarSerializer;
use almanac_service::error::{CalendarError, CalendarResult};

/// Result of normalising one input.
#[derive(Debug, Default)]
pub struct Normalized {
    /// Re-serialised calendars, concatenated.
    pub output: String,
    pub calendars: usize,
    /// Calendars dropped because they failed validation.
    pub skipped: usize,
}

/// ## Summary
/// Re-serialises every calendar in `input`.
///
/// A calendar that fails validation is logged and left out; the rest of the
/// input is still processed.
///
/// ## Errors
/// Returns a syntax error, after which nothing further can be read, or an
/// error from re-serialising an accepted calendar.
#[tracing::instrument(skip(serializer, input), fields(input_len = input.len()))]
pub fn normalize<P: TimeZoneProvider>(
    serializer: &CalendarSerializer<P>,
    input: &str,
) -> CalendarResult<Normalized> {
    let mut normalized = Normalized::default();

    for (index, result) in serializer.deserialize_reader(input.as_bytes()).enumerate() {
        match result {
            Ok(calendar) => {
                normalized.output.push_str(&serializer.serialize_to_string(&calendar)?);
                normalized.calendars += 1;
            }
            Err(error @ CalendarError::Syntax(_)) => return Err(error),
            Err(error) => {
                tracing::warn!(index, %error, "Skipping calendar");
                normalized.skipped += 1;
            }
        }
    }

    tracing::debug!(
        calendars = normalized.calendars,
        skipped = normalized.skipped,
        "Normalised input"
    );
    Ok(normalized)
}
