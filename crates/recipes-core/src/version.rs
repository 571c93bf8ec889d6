//! Recipe versions.
//!
//! A version is the last-modified timestamp of the stored object. It is never
//! persisted inside the document; readers attach it on the way out and sync
//! clients send the newest one they have seen back as a cutoff.

use jiff::Timestamp;
use jiff::civil::{Date, DateTime, Time};
use jiff::fmt::temporal::DateTimePrinter;
use jiff::tz::TimeZone;

use crate::error::CoreError;

/// Name of the derived field attached to documents on read.
pub const FIELD: &str = "version";

/// Parse a client supplied version cutoff.
///
/// Accepts RFC 3339 timestamps with `Z` or a numeric offset. A bare date-time
/// or date without an offset is taken to be UTC.
pub fn parse(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    let err = match raw.parse::<Timestamp>() {
        Ok(ts) => return Ok(ts),
        Err(e) => e,
    };

    let civil = raw
        .parse::<DateTime>()
        .or_else(|_| raw.parse::<Date>().map(|d| d.to_datetime(Time::midnight())));

    match civil {
        Ok(dt) => dt
            .to_zoned(TimeZone::UTC)
            .map(|zoned| zoned.timestamp())
            .map_err(|e| CoreError::InvalidVersion(e.to_string())),
        Err(_) => Err(CoreError::InvalidVersion(err.to_string())),
    }
}

/// Always nine fractional digits, so string order is time order.
static PRINTER: DateTimePrinter = DateTimePrinter::new().precision(Some(9));

/// Render a version for the wire.
pub fn format(version: Timestamp) -> String {
    PRINTER.timestamp_to_string(&version)
}

/// Whether a stored version should be sent to a client that last synced at
/// `cutoff`.
pub fn is_newer(version: Timestamp, cutoff: Option<Timestamp>) -> bool {
    cutoff.is_none_or(|cutoff| version > cutoff)
}
