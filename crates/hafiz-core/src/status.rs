//! Schedule status classification.
//!
//! A pending segment is late, due today, or upcoming -- a pure function of
//! its planned date against the caller-supplied "today". The sort order
//! defined here (status rank, then planned date, then id) is the one total
//! order used everywhere a segment list is shown, and its head is the single
//! "priority" item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Segment;

/// Derived schedule status of a pending segment. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStatus {
    Late,
    Today,
    Next,
}

impl SegmentStatus {
    /// Classify a planned date against today.
    ///
    /// Invariant: `Late ⇔ planned < today`, `Today ⇔ planned == today`,
    /// `Next ⇔ planned > today`. Exactly one holds for any pair of dates.
    pub fn classify(planned: NaiveDate, today: NaiveDate) -> Self {
        if planned < today {
            SegmentStatus::Late
        } else if planned == today {
            SegmentStatus::Today
        } else {
            SegmentStatus::Next
        }
    }

    /// Sort rank: late work first, then today's, then upcoming.
    pub fn rank(&self) -> u8 {
        match self {
            SegmentStatus::Late => 0,
            SegmentStatus::Today => 1,
            SegmentStatus::Next => 2,
        }
    }

    /// Human label for list rows and badges.
    pub fn label(&self) -> &'static str {
        match self {
            SegmentStatus::Late => "Late",
            SegmentStatus::Today => "Due today",
            SegmentStatus::Next => "Upcoming",
        }
    }
}

/// Sort key for a segment under the schedule ordering contract.
///
/// Primary: status rank. Secondary: planned date ascending (lexicographic on
/// ISO dates equals chronological). Tertiary: id ascending. The result is a
/// stable total order -- re-sorting a sorted list is a no-op.
pub fn sort_key(segment: &Segment, today: NaiveDate) -> (u8, NaiveDate, i64) {
    let status = SegmentStatus::classify(segment.planned_date, today);
    (status.rank(), segment.planned_date, segment.id)
}

/// Sort a segment list in place under the schedule ordering.
pub fn sort_segments(segments: &mut [Segment], today: NaiveDate) {
    segments.sort_by_key(|s| sort_key(s, today));
}
