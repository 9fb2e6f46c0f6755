//! Consecutive-day review streak.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::model::ReviewEvent;
use crate::temporal::local_day;

/// Safety cap on the backward walk.
///
/// This bounds the loop, it is not a domain rule: a streak that has genuinely
/// run longer than a year is reported as `STREAK_LOOKBACK_CAP_DAYS`.
pub const STREAK_LOOKBACK_CAP_DAYS: u32 = 365;

/// Count of consecutive local calendar days ending at `today` with at least
/// one review event.
///
/// Events are matched by local calendar day regardless of time-of-day, and
/// multiple events on one day count once. A day with no event ends the walk,
/// including `today` itself (yielding 0).
pub fn current_streak(events: &[ReviewEvent], today: NaiveDate) -> u32 {
    if events.is_empty() {
        return 0;
    }

    let days: HashSet<NaiveDate> = events.iter().map(|e| local_day(&e.occurred_at)).collect();

    let mut streak = 0;
    let mut cursor = today;
    while streak < STREAK_LOOKBACK_CAP_DAYS && days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}
