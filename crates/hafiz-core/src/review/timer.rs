//! Per-item recall countdown.
//!
//! The timer is deterministic and caller-driven: one `tick()` call is one
//! elapsed second. It holds no thread and reads no clock, which is what makes
//! the 30-tick contract testable.

use serde::{Deserialize, Serialize};

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// One second consumed.
    Decremented,
    /// The countdown just hit zero. Fired exactly once per item.
    Expired,
    /// Paused or already expired; nothing changed.
    Idle,
}

/// Countdown state for the current work item.
///
/// Reset whenever the current item's identity changes; pausing freezes
/// `remaining_secs` without resetting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallTimer {
    duration_secs: u32,
    remaining_secs: u32,
    paused: bool,
    /// Expiry already reported; keeps the zero state idempotent.
    expired_fired: bool,
}

impl RecallTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            paused: false,
            expired_fired: false,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_expired(&self) -> bool {
        self.expired_fired
    }

    /// 0.0 .. 1.0 of the countdown consumed.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 1.0;
        }
        1.0 - (self.remaining_secs as f64 / self.duration_secs as f64)
    }

    /// Advance one second. Returns `Expired` exactly once, on the tick that
    /// reaches zero; after that the timer stays at zero and reports `Idle`.
    pub fn tick(&mut self) -> TimerTick {
        if self.paused || self.expired_fired {
            return TimerTick::Idle;
        }
        if self.remaining_secs == 0 {
            // Zero-duration timer: expire on the first tick.
            self.expired_fired = true;
            return TimerTick::Expired;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.expired_fired = true;
            TimerTick::Expired
        } else {
            TimerTick::Decremented
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Restart the full countdown for a new item.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.paused = false;
        self.expired_fired = false;
    }
}
