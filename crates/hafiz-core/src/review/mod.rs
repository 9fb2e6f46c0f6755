//! Review session: the queue-driven grading state machine.
//!
//! A session fetches the due queue from the scheduler, surfaces one item at a
//! time under a recall countdown, and submits quality grades. Two knobs are
//! configuration rather than constants: the session mode (whether a new item
//! starts hidden) and the grading scale (3-point or 5-point).

mod engine;
mod keys;
mod timer;

pub use engine::{ReviewSession, SessionPhase};
pub use keys::{map_key, SessionCommand};
pub use timer::{RecallTimer, TimerTick};

use serde::{Deserialize, Serialize};

/// Whether a newly surfaced item starts hidden or revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Recall first: each item starts hidden, reveal after reciting.
    Quiz,
    /// Read-along: each item starts revealed.
    Plain,
}

impl SessionMode {
    pub fn starts_revealed(&self) -> bool {
        matches!(self, SessionMode::Plain)
    }
}

/// The quality scale a session grades on.
///
/// The timed flow uses three buttons mapped to {2, 3, 5}; the untimed flow
/// exposes the full {1..5} range. Both are valid remote inputs; which one a
/// session uses is per-mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingScale {
    ThreePoint,
    FivePoint,
}

impl GradingScale {
    /// The valid quality values, ascending.
    pub fn allowed(&self) -> &'static [u8] {
        match self {
            GradingScale::ThreePoint => &[2, 3, 5],
            GradingScale::FivePoint => &[1, 2, 3, 4, 5],
        }
    }

    pub fn contains(&self, quality: u8) -> bool {
        self.allowed().contains(&quality)
    }
}

/// Per-session tunables, usually taken from the `[review]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewOptions {
    pub mode: SessionMode,
    pub scale: GradingScale,
    /// Recall countdown per item, in seconds.
    pub timer_secs: u32,
    /// Queue cap per session.
    pub batch_size: usize,
    /// Play the tick cue on reveal/grade.
    pub sound: bool,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            mode: SessionMode::Quiz,
            scale: GradingScale::ThreePoint,
            timer_secs: 30,
            batch_size: 50,
            sound: true,
        }
    }
}
