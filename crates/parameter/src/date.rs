//! Date normalization for the `date` parameter type (§4.3).
//!
//! Accepts an ISO-8601 string, a numeric epoch (seconds or milliseconds),
//! or an already-structured date value, and always normalizes to an
//! ISO-8601 UTC string on the wire.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Numbers this large are almost certainly milliseconds, not seconds —
/// `1e12` seconds is the year 33658.
const MILLIS_THRESHOLD: f64 = 1e12;

/// Best-effort date normalization. Returns `None` on unparseable input
/// rather than erroring — per §4.3, an unparseable date is `undefined`,
/// not a `missing_dependency` failure.
#[must_use]
pub fn normalize_to_rfc3339_utc(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).to_rfc3339());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&dt).to_rfc3339());
    }
    if let Ok(epoch) = raw.parse::<f64>() {
        return from_epoch(epoch);
    }
    None
}

#[must_use]
pub fn from_epoch(epoch: f64) -> Option<String> {
    let millis = if epoch.abs() >= MILLIS_THRESHOLD {
        epoch
    } else {
        epoch * 1000.0
    };
    #[allow(clippy::cast_possible_truncation)]
    let dt = DateTime::from_timestamp_millis(millis as i64)?;
    Some(dt.to_rfc3339())
}
