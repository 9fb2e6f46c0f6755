//! Review session state machine.
//!
//! ```text
//! Loading -> Ready -> (Grading -> Ready | Failed)
//!                 \-> Empty (queue drained, terminal)
//! ```
//!
//! The session owns the queue exclusively: grading always acts on the head,
//! removes it optimistically before the remote confirms, and reconciles by
//! reloading when the remote disagrees. The per-item recall timer is reset
//! whenever the head's identity changes.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::audio;
use crate::error::{CoreError, ValidationError};
use crate::events::SessionEvent;
use crate::model::WorkItem;
use crate::scheduler::SchedulerService;

use super::timer::{RecallTimer, TimerTick};
use super::ReviewOptions;

/// Named states of the review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Initial state and any in-flight queue fetch.
    Loading,
    /// A current item is surfaced and gradable.
    Ready,
    /// A grade submission is in flight.
    Grading,
    /// The queue drained; nothing left to review.
    Empty,
    /// The last load failed; queue is empty, message in `last_error`.
    Failed,
}

/// The queue-driven grading session.
pub struct ReviewSession {
    service: Arc<dyn SchedulerService>,
    options: ReviewOptions,
    phase: SessionPhase,
    queue: VecDeque<WorkItem>,
    total: usize,
    done: usize,
    revealed: bool,
    timer: RecallTimer,
    last_error: Option<String>,
    /// Bumped on every `load`; a response is applied only if no newer load
    /// started while it was in flight. Dropping the future at the await
    /// point cancels the fetch outright.
    load_generation: u64,
}

impl ReviewSession {
    pub fn new(service: Arc<dyn SchedulerService>, options: ReviewOptions) -> Self {
        Self {
            service,
            timer: RecallTimer::new(options.timer_secs),
            options,
            phase: SessionPhase::Loading,
            queue: VecDeque::new(),
            total: 0,
            done: 0,
            revealed: options.mode.starts_revealed(),
            last_error: None,
            load_generation: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The queue head; the only gradable item.
    pub fn current(&self) -> Option<&WorkItem> {
        self.queue.front()
    }

    /// The queued items in remote order, head first. Read-only: grading is
    /// the only way the queue shrinks.
    pub fn items(&self) -> impl Iterator<Item = &WorkItem> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn timer(&self) -> &RecallTimer {
        &self.timer
    }

    pub fn options(&self) -> &ReviewOptions {
        &self.options
    }

    /// Items graded this session.
    pub fn done(&self) -> usize {
        self.done
    }

    /// Queue size at the last successful load.
    pub fn total(&self) -> usize {
        self.total
    }

    /// 0..100 share of the session completed.
    pub fn progress_pct(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.done * 100 / self.total) as u32
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Fetch the due queue and replace the local one wholesale.
    ///
    /// On failure the session moves to `Failed` with an empty queue and the
    /// remote message surfaced; retry is manual. Returns `None` when a newer
    /// load superseded this one while it was in flight.
    pub async fn load(&mut self, today: NaiveDate) -> Result<Option<SessionEvent>, CoreError> {
        self.load_generation += 1;
        let generation = self.load_generation;
        self.phase = SessionPhase::Loading;

        let fetched = self
            .service
            .fetch_due_work_items(today, self.options.batch_size)
            .await;

        if generation != self.load_generation {
            // A newer load owns the session now; discard this response.
            return Ok(None);
        }

        match fetched {
            Ok(items) => {
                self.queue = dedupe_by_id(items);
                self.total = self.queue.len();
                self.done = 0;
                self.last_error = None;
                self.on_head_changed();
                log::debug!("review queue loaded: {} due items", self.total);
                Ok(Some(SessionEvent::QueueLoaded {
                    count: self.total,
                    at: Utc::now(),
                }))
            }
            Err(err) => {
                self.queue.clear();
                self.total = 0;
                self.done = 0;
                self.phase = SessionPhase::Failed;
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Grade the current head.
    ///
    /// The head is removed optimistically before the remote confirms. On
    /// remote failure the queue is reloaded from the service -- the remote
    /// state is authoritative, so reconciliation is a reload, not a local
    /// rollback -- and the submit error is returned. `Ok(None)` when there is
    /// no current item.
    pub async fn grade(
        &mut self,
        quality: u8,
        today: NaiveDate,
    ) -> Result<Option<SessionEvent>, CoreError> {
        if !self.options.scale.contains(quality) {
            return Err(ValidationError::QualityOutOfRange {
                quality,
                allowed: self.options.scale.allowed().to_vec(),
            }
            .into());
        }
        let Some(item) = self.queue.front().cloned() else {
            return Ok(None);
        };

        self.phase = SessionPhase::Grading;
        self.queue.pop_front();

        match self.service.submit_grade(item.id, quality).await {
            Ok(()) => {
                self.done += 1;
                self.on_head_changed();
                if self.options.sound {
                    audio::tick();
                }
                Ok(Some(SessionEvent::GradeSubmitted {
                    item_id: item.id,
                    quality,
                    at: Utc::now(),
                }))
            }
            Err(err) => {
                log::warn!("grade submission for item {} failed: {err}", item.id);
                // Whatever the reload yields is the truth; the submit error
                // is still the one surfaced, so set it after the reload.
                let _ = self.load(today).await;
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Show the current item's content.
    pub fn reveal(&mut self) -> Option<SessionEvent> {
        let item_id = self.current()?.id;
        if self.revealed {
            return None;
        }
        self.revealed = true;
        if self.options.sound {
            audio::tick();
        }
        Some(SessionEvent::ItemRevealed {
            item_id,
            at: Utc::now(),
        })
    }

    /// Hide the current item's content.
    pub fn hide(&mut self) -> Option<SessionEvent> {
        let item_id = self.current()?.id;
        if !self.revealed {
            return None;
        }
        self.revealed = false;
        Some(SessionEvent::ItemHidden {
            item_id,
            at: Utc::now(),
        })
    }

    pub fn toggle_reveal(&mut self) -> Option<SessionEvent> {
        if self.revealed {
            self.hide()
        } else {
            self.reveal()
        }
    }

    /// Advance the recall countdown by one second.
    ///
    /// Called on a fixed one-second cadence, independent of in-flight
    /// network calls. Expiry forces a reveal exactly once per item.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        if self.phase != SessionPhase::Ready {
            return None;
        }
        let item_id = self.current()?.id;
        match self.timer.tick() {
            TimerTick::Expired => {
                self.revealed = true;
                if self.options.sound {
                    audio::tick();
                }
                Some(SessionEvent::RecallTimeExpired {
                    item_id,
                    at: Utc::now(),
                })
            }
            TimerTick::Decremented | TimerTick::Idle => None,
        }
    }

    /// Freeze the countdown without resetting it.
    pub fn pause(&mut self) -> Option<SessionEvent> {
        if self.timer.is_paused() {
            return None;
        }
        self.timer.pause();
        Some(SessionEvent::TimerPaused {
            remaining_secs: self.timer.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<SessionEvent> {
        if !self.timer.is_paused() {
            return None;
        }
        self.timer.resume();
        Some(SessionEvent::TimerResumed {
            remaining_secs: self.timer.remaining_secs(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// The head's identity changed (load or successful grade): fresh timer,
    /// mode-dependent initial reveal, phase from queue occupancy.
    fn on_head_changed(&mut self) {
        self.timer.reset();
        self.revealed = self.options.mode.starts_revealed();
        self.phase = if self.queue.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Ready
        };
    }
}

/// Keep the first occurrence of each id, preserving remote order.
fn dedupe_by_id(items: Vec<WorkItem>) -> VecDeque<WorkItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id))
        .collect()
}
