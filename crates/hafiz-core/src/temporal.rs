//! Calendar bucketing helpers.
//!
//! Streaks, heatmaps and the status classifier all key on the *local*
//! calendar day; weekly aggregation keys on the ISO-8601 week. Keeping the
//! conversions here means the rest of the crate never touches a timezone.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Canonical `YYYY-MM-DD` key for a local timestamp.
///
/// Two instants within the same local calendar day map to the same key
/// regardless of time-of-day.
pub fn day_key(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// The local calendar day an instant falls on.
pub fn local_day(at: &DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// ISO-8601 week identifier, `YYYY-Www`.
///
/// Weeks run Monday through Sunday; the year is the ISO week-year (nearest
/// Thursday), so the first days of January may belong to the previous year's
/// last week and vice versa.
pub fn week_key(day: NaiveDate) -> String {
    let iso = day.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Today's local calendar day.
///
/// The single clock read in the crate; everything downstream takes `today`
/// as a parameter so it stays deterministic under test.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
