//! Segment learning session.
//!
//! ```text
//! Loading -> (NotFound | Loaded) -> Completing -> Completed
//! ```
//!
//! A simpler sibling of the review session: resolve which segment to learn,
//! show its content, mark it learned. Completion hands the material to the
//! scheduler, whose new work items surface on the review session's next load.
//! `NotFound` is a legitimate empty state -- nothing planned for today is not
//! an error.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::audio;
use crate::content::ContentService;
use crate::error::{CoreError, ValidationError};
use crate::events::SessionEvent;
use crate::model::{Segment, Verse};
use crate::scheduler::SchedulerService;

/// Named states of the learning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnPhase {
    Loading,
    /// No explicit segment and nothing pending on or before today.
    NotFound,
    Loaded,
    /// The completion call is in flight.
    Completing,
    Completed,
}

/// A single "learn this segment" session.
pub struct LearnSession {
    scheduler: Arc<dyn SchedulerService>,
    content: Arc<dyn ContentService>,
    sound: bool,
    phase: LearnPhase,
    segment: Option<Segment>,
    verses: Vec<Verse>,
    last_error: Option<String>,
}

impl LearnSession {
    pub fn new(
        scheduler: Arc<dyn SchedulerService>,
        content: Arc<dyn ContentService>,
        sound: bool,
    ) -> Self {
        Self {
            scheduler,
            content,
            sound,
            phase: LearnPhase::Loading,
            segment: None,
            verses: Vec::new(),
            last_error: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> LearnPhase {
        self.phase
    }

    pub fn segment(&self) -> Option<&Segment> {
        self.segment.as_ref()
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resolve and load the segment to learn.
    ///
    /// An explicit id wins; otherwise the earliest pending segment with
    /// `planned_date <= today`, ties broken by `day_index` then id. Neither
    /// resolving is the `NotFound` state, not an error.
    pub async fn load(
        &mut self,
        explicit: Option<i64>,
        today: NaiveDate,
    ) -> Result<SessionEvent, CoreError> {
        self.phase = LearnPhase::Loading;
        self.segment = None;
        self.verses.clear();
        self.last_error = None;

        let resolved = match explicit {
            Some(id) => self.scheduler.fetch_segment(id).await?,
            None => {
                let mut pending: Vec<Segment> = self
                    .scheduler
                    .fetch_pending_segments()
                    .await?
                    .into_iter()
                    .filter(|s| s.is_pending() && s.planned_date <= today)
                    .collect();
                pending.sort_by_key(|s| (s.planned_date, s.day_index, s.id));
                pending.into_iter().next()
            }
        };

        let Some(segment) = resolved else {
            self.phase = LearnPhase::NotFound;
            return Ok(SessionEvent::SegmentNotFound { at: Utc::now() });
        };

        let segment_id = segment.id;
        let fetched = self
            .content
            .fetch_page_verses(segment.page_from, segment.page_to)
            .await;
        self.segment = Some(segment);
        self.phase = LearnPhase::Loaded;

        match fetched {
            Ok(verses) => {
                self.verses = verses;
                Ok(SessionEvent::SegmentLoaded {
                    segment_id,
                    verse_count: self.verses.len(),
                    at: Utc::now(),
                })
            }
            Err(err) => {
                // Keep the segment visible; the empty content set blocks
                // complete() until a reload succeeds.
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Mark the loaded segment learned and initialize its schedule.
    ///
    /// Rejected client-side when the content set is empty -- completing zero
    /// material would create an empty schedule. On remote failure the session
    /// stays `Loaded` with nothing mutated.
    pub async fn complete(&mut self) -> Result<SessionEvent, CoreError> {
        let Some(segment) = self.segment.clone() else {
            return Err(ValidationError::InvalidValue {
                field: "segment".into(),
                message: "no segment loaded".into(),
            }
            .into());
        };
        if self.verses.is_empty() {
            return Err(ValidationError::EmptyContent {
                segment_id: segment.id,
            }
            .into());
        }

        self.phase = LearnPhase::Completing;
        match self.scheduler.complete_segment(segment.id).await {
            Ok(()) => {
                self.phase = LearnPhase::Completed;
                if self.sound {
                    audio::tick();
                }
                Ok(SessionEvent::SegmentCompleted {
                    segment_id: segment.id,
                    at: Utc::now(),
                })
            }
            Err(err) => {
                self.phase = LearnPhase::Loaded;
                self.last_error = Some(err.to_string());
                log::warn!("segment {} completion failed: {err}", segment.id);
                Err(err.into())
            }
        }
    }
}
