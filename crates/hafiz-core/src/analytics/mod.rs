//! Review-history analytics.
//!
//! Pure functions over the immutable review-event log: the consecutive-day
//! streak, the calendar activity heatmap, and ISO-week aggregation of
//! completed segments. The dashboard renders these; nothing here does I/O.

mod heatmap;
mod streak;
mod weekly;

pub use heatmap::{activity_heatmap, DayActivity, INTENSITY_LEVELS};
pub use streak::{current_streak, STREAK_LOOKBACK_CAP_DAYS};
pub use weekly::{weekly_counts, WeekCount};
