//! Entity timestamps and their ISO-8601 text form.
//!
//! Timestamps are kept at microsecond precision so the text form written to
//! a snapshot parses back to an identical value.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::{DomainError, DomainResult};

/// Current time, truncated to microseconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Smallest step `BaseModel::touch` advances by when the clock hasn't moved.
pub fn tick() -> Duration {
    Duration::microseconds(1)
}

/// Render as RFC 3339 with microseconds, e.g. `2024-06-01T12:30:45.123456Z`.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an ISO-8601 date-time.
///
/// Accepts RFC 3339 with any offset, and naive date-times with no offset
/// (read as UTC).
pub fn parse(field: &str, text: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(6));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().trunc_subsecs(6))
        .map_err(|e| DomainError::validation(format!("{field}: invalid timestamp '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn now_has_microsecond_precision() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }

    #[test]
    fn format_then_parse_is_identity() {
        let ts = now();
        assert_eq!(parse("created_at", &format(&ts)).unwrap(), ts);
    }

    #[test]
    fn parses_naive_iso_as_utc() {
        let ts = parse("created_at", "2017-09-28T21:05:54.119427").unwrap();
        let expected = Utc.with_ymd_and_hms(2017, 9, 28, 21, 5, 54).unwrap()
            + Duration::microseconds(119_427);
        assert_eq!(ts, expected);
    }

    #[test]
    fn parses_offsets_into_utc() {
        let ts = parse("updated_at", "2020-01-01T02:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_a_validation_error() {
        let err = parse("created_at", "yesterday").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("created_at")));
    }
}
