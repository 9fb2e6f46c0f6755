//! ISO-week aggregation of completed segments.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::temporal::{local_day, week_key};

/// Completions in one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCount {
    /// `YYYY-Www` key, see [`week_key`].
    pub week: String,
    pub count: u32,
}

/// Bucket completion timestamps by ISO week, ascending by week key.
///
/// Lexicographic order on `YYYY-Www` keys is chronological, so a BTreeMap
/// does the sorting.
pub fn weekly_counts(completed_at: &[DateTime<Utc>]) -> Vec<WeekCount> {
    let mut buckets: BTreeMap<String, u32> = BTreeMap::new();
    for at in completed_at {
        let key = week_key(local_day(at));
        *buckets.entry(key).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(week, count)| WeekCount { week, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(weekly_counts(&[]).is_empty());
    }

    #[test]
    fn groups_by_iso_week_in_order() {
        // 2024-01-01 (Mon, W01), 2024-01-07 (Sun, W01), 2024-01-08 (Mon, W02).
        let counts = weekly_counts(&[at(2024, 1, 8), at(2024, 1, 1), at(2024, 1, 7)]);
        assert_eq!(
            counts,
            vec![
                WeekCount { week: "2024-W01".into(), count: 2 },
                WeekCount { week: "2024-W02".into(), count: 1 },
            ]
        );
    }
}
