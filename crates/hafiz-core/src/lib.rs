//! # Hafiz Core Library
//!
//! Core business logic for Hafiz, a memorization trainer for structured
//! texts divided into numbered segments. All operations are available
//! through a standalone CLI binary built on this crate; any GUI would be a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Review session**: a queue-driven grading state machine with a
//!   deterministic, caller-ticked recall countdown
//! - **Learn session**: resolve today's segment, show its content, mark it
//!   learned and hand the material to the scheduler
//! - **Schedule overview**: late/today/upcoming classification and the
//!   priority item over all pending segments
//! - **Analytics**: streak, activity heatmap and weekly aggregation over
//!   the review-event history
//! - **Remote seams**: the spaced-repetition scheduler and the content
//!   catalog are external services behind async traits
//!
//! ## Key Components
//!
//! - [`ReviewSession`]: the grading state machine
//! - [`LearnSession`]: the segment learning state machine
//! - [`OverviewSession`]: the schedule overview
//! - [`SchedulerService`] / [`ContentService`]: remote seams
//! - [`Config`]: application configuration

pub mod analytics;
pub mod audio;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod learn;
pub mod model;
pub mod overview;
pub mod review;
pub mod scheduler;
pub mod status;
pub mod temporal;

pub use analytics::{activity_heatmap, current_streak, weekly_counts, DayActivity, WeekCount};
pub use config::Config;
pub use content::{ChapterCatalog, ContentService, HttpContent};
pub use error::{ConfigError, CoreError, Result, ServiceError, ValidationError};
pub use events::SessionEvent;
pub use learn::{LearnPhase, LearnSession};
pub use model::{Chapter, Program, ReviewEvent, Segment, Verse, WorkItem};
pub use overview::{OverviewSession, ScheduleCounts, ScheduleOverview};
pub use review::{
    GradingScale, RecallTimer, ReviewOptions, ReviewSession, SessionMode, SessionPhase,
};
pub use scheduler::{HttpScheduler, SchedulerService};
pub use status::SegmentStatus;
