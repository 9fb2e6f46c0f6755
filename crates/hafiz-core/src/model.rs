//! Shared domain types.
//!
//! Everything here is remote-owned data: the scheduling service assigns ids
//! and due dates, the catalog service owns chapters and verse text. The
//! client never invents identity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A previously learned unit now due for recall.
///
/// Created server-side when a segment is completed; enters the review queue
/// once `due_date <= today` and leaves it the moment a grade is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: i64,
    pub due_date: NaiveDate,
    /// Text to recall, enough to render on reveal.
    pub content: String,
    #[serde(default)]
    pub chapter_id: Option<i64>,
    /// Position within the chapter, when the scheduler provides it.
    #[serde(default)]
    pub verse_no: Option<u32>,
}

/// A contiguous page range of new material planned for a given date.
///
/// `completed_at == None` means pending. Completing a segment hands it to the
/// scheduler, which then emits `WorkItem`s for its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub program_id: i64,
    pub planned_date: NaiveDate,
    /// Ordinal within the program; tie-break when planned dates collide.
    #[serde(default)]
    pub day_index: u32,
    pub page_from: u32,
    pub page_to: u32,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Segment {
    pub fn is_pending(&self) -> bool {
        self.completed_at.is_none()
    }

    /// "Page 12" or "Pages 12-14".
    pub fn pages_label(&self) -> String {
        if self.page_from == self.page_to {
            format!("Page {}", self.page_from)
        } else {
            format!("Pages {}-{}", self.page_from, self.page_to)
        }
    }
}

/// An immutable timestamped fact appended by the scheduler whenever a grade
/// is submitted. Source of truth for streak and heatmap analytics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub occurred_at: DateTime<Utc>,
}

/// A study program owning a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
}

/// Static catalog row: a chapter of the memorized work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i64,
    pub name: String,
    pub verse_count: u32,
}

/// One verse of segment content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub id: i64,
    pub chapter_id: i64,
    /// Number within the chapter.
    pub number: u32,
    pub text: String,
    #[serde(default)]
    pub page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_pages_label() {
        let mut seg = Segment {
            id: 1,
            program_id: 1,
            planned_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            day_index: 0,
            page_from: 12,
            page_to: 12,
            completed_at: None,
        };
        assert_eq!(seg.pages_label(), "Page 12");
        seg.page_to = 14;
        assert_eq!(seg.pages_label(), "Pages 12-14");
    }

    #[test]
    fn segment_pending_tracks_completed_at() {
        let mut seg = Segment {
            id: 1,
            program_id: 1,
            planned_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            day_index: 0,
            page_from: 1,
            page_to: 2,
            completed_at: None,
        };
        assert!(seg.is_pending());
        seg.completed_at = Some(Utc::now());
        assert!(!seg.is_pending());
    }

    #[test]
    fn work_item_roundtrips_through_json() {
        let item = WorkItem {
            id: 7,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            content: "text".into(),
            chapter_id: Some(2),
            verse_no: Some(255),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: WorkItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
