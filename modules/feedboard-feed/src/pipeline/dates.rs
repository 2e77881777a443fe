//! Date cutoffs and bounds.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use feedboard_common::DateRange;

/// Earliest publish instant a basic date range still admits, or `None`
/// for [`DateRange::All`]. Calendar arithmetic is in UTC.
pub fn cutoff(range: DateRange, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match range {
        DateRange::All => None,
        DateRange::Today => Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
        DateRange::Week => Some(now - Duration::days(7)),
        // Short months clamp rather than roll over: Mar 31 minus one month
        // is Feb 28/29, never Mar 2/3.
        DateRange::Month => Some(months_back(now, 1)),
        DateRange::Year => Some(months_back(now, 12)),
    }
}

fn months_back(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parse an advanced-search date bound.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC), or a bare
/// `YYYY-MM-DD` (UTC midnight). Blank or unparseable input is no bound.
pub fn parse_bound(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    tracing::debug!(bound = raw, "Ignoring unparseable date bound");
    None
}
