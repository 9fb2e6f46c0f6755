//! Remote scheduling service seam.
//!
//! The spaced-repetition algorithm lives server-side: the client submits
//! quality grades and reads back due dates, never computing intervals. Every
//! engine talks to this trait object, which keeps sessions testable with a
//! scripted in-memory implementation.

mod http;

pub use http::HttpScheduler;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ServiceError;
use crate::model::{Program, ReviewEvent, Segment, WorkItem};

/// Operations the remote scheduler exposes to the client.
///
/// All calls are non-blocking; failures carry a human-readable message the
/// session surfaces verbatim.
#[async_trait]
pub trait SchedulerService: Send + Sync {
    /// Items with `due_date <= as_of`, ascending by due date, capped at
    /// `limit`. The remote's tie-break order is authoritative and must not
    /// be re-sorted locally.
    async fn fetch_due_work_items(
        &self,
        as_of: NaiveDate,
        limit: usize,
    ) -> Result<Vec<WorkItem>, ServiceError>;

    /// Submit a recall grade for one item. On success the remote logs a
    /// review event and assigns the item its next due date.
    async fn submit_grade(&self, item_id: i64, quality: u8) -> Result<(), ServiceError>;

    /// Mark a segment learned and initialize its review schedule. On success
    /// new work items become eligible for future due fetches.
    async fn complete_segment(&self, segment_id: i64) -> Result<(), ServiceError>;

    /// Review-event history, optionally bounded below.
    async fn fetch_review_events(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<ReviewEvent>, ServiceError>;

    /// All segments not yet completed.
    async fn fetch_pending_segments(&self) -> Result<Vec<Segment>, ServiceError>;

    /// One segment by id; `None` when the id is unknown.
    async fn fetch_segment(&self, segment_id: i64) -> Result<Option<Segment>, ServiceError>;

    /// Move a pending segment to a new planned date. Completion state is
    /// untouched.
    async fn reschedule_segment(
        &self,
        segment_id: i64,
        new_date: NaiveDate,
    ) -> Result<(), ServiceError>;

    /// Programs, for labeling overview rows.
    async fn fetch_programs(&self) -> Result<Vec<Program>, ServiceError>;

    /// Completion timestamps of finished segments, for weekly aggregation.
    async fn fetch_completed_segment_dates(&self) -> Result<Vec<DateTime<Utc>>, ServiceError>;
}
