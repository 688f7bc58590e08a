//! Auto-assignment timer — owns the "wait N seconds, then drain" state.
//!
//! There is no background thread. The deadline is stored in the session
//! and checked against an explicit `now` on every poll cycle; the
//! caller's scheduling loop owns the cadence.

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoAssignTimer {
    pub deadline: Option<DateTime<Local>>,
    pub active: bool,
}

impl AutoAssignTimer {
    pub fn new() -> Self {
        Self { deadline: None, active: false }
    }

    /// Arm the timer: processing begins `delay_secs` after `now`.
    pub fn arm(&mut self, now: DateTime<Local>, delay_secs: i64) {
        self.deadline = Some(now + Duration::seconds(delay_secs));
        self.active = false;
    }

    /// True once the armed deadline has elapsed.
    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        matches!(self.deadline, Some(d) if now >= d)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Seconds left before the deadline; 0 when due or unarmed.
    pub fn remaining_secs(&self, now: DateTime<Local>) -> i64 {
        self.deadline
            .map(|d| (d - now).num_seconds().max(0))
            .unwrap_or(0)
    }

    /// Flip into the active drain phase, consuming the deadline.
    pub fn activate(&mut self) {
        self.deadline = None;
        self.active = true;
    }

    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn reset(&mut self) {
        self.deadline = None;
        self.active = false;
    }
}

impl Default for AutoAssignTimer {
    fn default() -> Self {
        Self::new()
    }
}
