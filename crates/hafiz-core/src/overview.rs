//! Schedule overview: the "in progress" view.
//!
//! Pure composition over the pending segments: classify each against today,
//! sort under the schedule ordering, expose counts and the single priority
//! item. Mutations (reschedule, complete) go to the scheduler and re-run
//! classification immediately so the counts never go stale.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::audio;
use crate::error::CoreError;
use crate::events::SessionEvent;
use crate::model::{Program, Segment};
use crate::scheduler::SchedulerService;
use crate::status::{sort_key, SegmentStatus};

/// One pending segment annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewEntry {
    pub segment: Segment,
    pub status: SegmentStatus,
    pub program_title: String,
}

/// Aggregate counts over the pending segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleCounts {
    pub late: usize,
    pub today: usize,
    pub next: usize,
    pub total: usize,
}

/// The assembled overview: sorted entries plus counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleOverview {
    pub entries: Vec<OverviewEntry>,
    pub counts: ScheduleCounts,
}

impl ScheduleOverview {
    /// Annotate, sort and count the pending segments. Pure.
    pub fn build(
        segments: Vec<Segment>,
        programs: &HashMap<i64, String>,
        today: NaiveDate,
    ) -> Self {
        let mut pending: Vec<Segment> =
            segments.into_iter().filter(Segment::is_pending).collect();
        pending.sort_by_key(|s| sort_key(s, today));

        let mut counts = ScheduleCounts::default();
        let entries: Vec<OverviewEntry> = pending
            .into_iter()
            .map(|segment| {
                let status = SegmentStatus::classify(segment.planned_date, today);
                match status {
                    SegmentStatus::Late => counts.late += 1,
                    SegmentStatus::Today => counts.today += 1,
                    SegmentStatus::Next => counts.next += 1,
                }
                counts.total += 1;
                let program_title = programs
                    .get(&segment.program_id)
                    .cloned()
                    .unwrap_or_else(|| "Program".to_string());
                OverviewEntry {
                    segment,
                    status,
                    program_title,
                }
            })
            .collect();

        Self { entries, counts }
    }

    /// The most urgent entry: head of the sorted list.
    pub fn priority(&self) -> Option<&OverviewEntry> {
        self.entries.first()
    }
}

/// Overview plus the remote operations acting on it.
pub struct OverviewSession {
    scheduler: Arc<dyn SchedulerService>,
    sound: bool,
    overview: ScheduleOverview,
    programs: HashMap<i64, String>,
    last_error: Option<String>,
}

impl OverviewSession {
    pub fn new(scheduler: Arc<dyn SchedulerService>, sound: bool) -> Self {
        Self {
            scheduler,
            sound,
            overview: ScheduleOverview::default(),
            programs: HashMap::new(),
            last_error: None,
        }
    }

    pub fn overview(&self) -> &ScheduleOverview {
        &self.overview
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch programs and pending segments, rebuild the overview.
    pub async fn refresh(&mut self, today: NaiveDate) -> Result<(), CoreError> {
        let programs: Vec<Program> = self.scheduler.fetch_programs().await?;
        self.programs = programs.into_iter().map(|p| (p.id, p.title)).collect();
        let segments = self.scheduler.fetch_pending_segments().await?;
        self.overview = ScheduleOverview::build(segments, &self.programs, today);
        self.last_error = None;
        Ok(())
    }

    /// Move a segment to a new planned date and reclassify immediately.
    pub async fn reschedule(
        &mut self,
        segment_id: i64,
        new_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<SessionEvent, CoreError> {
        match self.scheduler.reschedule_segment(segment_id, new_date).await {
            Ok(()) => {
                self.refresh(today).await?;
                if self.sound {
                    audio::tick();
                }
                Ok(SessionEvent::SegmentRescheduled {
                    segment_id,
                    new_date,
                    at: Utc::now(),
                })
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Complete a segment straight from the overview.
    ///
    /// The row is dropped optimistically; success and failure both end in a
    /// refresh, since the remote owns the pending set either way.
    pub async fn complete(
        &mut self,
        segment_id: i64,
        today: NaiveDate,
    ) -> Result<SessionEvent, CoreError> {
        self.overview
            .entries
            .retain(|e| e.segment.id != segment_id);

        match self.scheduler.complete_segment(segment_id).await {
            Ok(()) => {
                self.refresh(today).await?;
                if self.sound {
                    audio::tick();
                }
                Ok(SessionEvent::SegmentCompleted {
                    segment_id,
                    at: Utc::now(),
                })
            }
            Err(err) => {
                // Reload first: refresh clears last_error on success, and the
                // submit failure is the message that must survive.
                let _ = self.refresh(today).await;
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}
