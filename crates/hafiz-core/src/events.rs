use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every successful state transition in a session produces an Event.
/// The frontend renders them; tests assert on them. Failures travel as
/// errors, not events -- the session surfaces the message and moves to its
/// fallback state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    QueueLoaded {
        count: usize,
        at: DateTime<Utc>,
    },
    ItemRevealed {
        item_id: i64,
        at: DateTime<Utc>,
    },
    ItemHidden {
        item_id: i64,
        at: DateTime<Utc>,
    },
    /// The recall countdown hit zero and forced a reveal.
    RecallTimeExpired {
        item_id: i64,
        at: DateTime<Utc>,
    },
    GradeSubmitted {
        item_id: i64,
        quality: u8,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SegmentLoaded {
        segment_id: i64,
        verse_count: usize,
        at: DateTime<Utc>,
    },
    SegmentNotFound {
        at: DateTime<Utc>,
    },
    SegmentCompleted {
        segment_id: i64,
        at: DateTime<Utc>,
    },
    SegmentRescheduled {
        segment_id: i64,
        new_date: NaiveDate,
        at: DateTime<Utc>,
    },
}
