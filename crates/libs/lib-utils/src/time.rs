//! # Time Utilities
//!
//! Utilities for time parsing and token expiry checks using chrono.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse RFC3339 string to UTC DateTime.
pub fn parse_utc(moment: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(moment)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::FailToDateParse(moment.to_string()))
}

/// Parse a backend timestamp.
///
/// Accepts RFC3339 and the offset-less ISO form (`2024-05-01T10:00:00.123456`),
/// which is read as UTC.
pub fn parse_timestamp(moment: &str) -> Result<DateTime<Utc>, Error> {
    if let Ok(dt) = parse_utc(moment) {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(moment, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::FailToDateParse(moment.to_string()))
}

/// Whether a unix `exp` timestamp (seconds) is at or before `now`.
pub fn is_expired(exp: i64, now: DateTime<Utc>) -> bool {
    exp <= now.timestamp()
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
