//! Calendar activity heatmap.

use std::collections::HashMap;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::ReviewEvent;
use crate::temporal::local_day;

/// Number of quantized intensity levels (0 = no activity, 4 = peak).
pub const INTENSITY_LEVELS: u8 = 5;

/// One calendar day in the heatmap window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: NaiveDate,
    pub count: u32,
    /// Quantized intensity, `0..INTENSITY_LEVELS`.
    pub level: u8,
}

/// Bucket review events per local calendar day over the window
/// `[today - window_months, today]`, both ends inclusive.
///
/// Every day in the window is present, zero-count days included. Intensity is
/// quantized against the window maximum with inclusive-lower thresholds at
/// `0, max/4, max/2, 3*max/4`; a zero count is always level 0, and a window
/// with no activity at all is entirely level 0.
pub fn activity_heatmap(
    events: &[ReviewEvent],
    window_months: u32,
    today: NaiveDate,
) -> Vec<DayActivity> {
    let start = today
        .checked_sub_months(Months::new(window_months))
        .unwrap_or(today);

    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for event in events {
        let day = local_day(&event.occurred_at);
        if day >= start && day <= today {
            *counts.entry(day).or_insert(0) += 1;
        }
    }

    let max = counts.values().copied().max().unwrap_or(0);

    let mut out = Vec::new();
    let mut cursor = start;
    while cursor <= today {
        let count = counts.get(&cursor).copied().unwrap_or(0);
        out.push(DayActivity {
            day: cursor,
            count,
            level: quantize(count, max),
        });
        cursor += Duration::days(1);
    }
    out
}

fn quantize(count: u32, max: u32) -> u8 {
    if count == 0 || max == 0 {
        return 0;
    }
    let c = count as u64 * 4;
    let m = max as u64;
    if c >= m * 3 {
        4
    } else if c >= m * 2 {
        3
    } else if c >= m {
        2
    } else {
        1
    }
}
