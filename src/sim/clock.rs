//! Session countdown
//!
//! Ticks are deadlines checked against the frame clock, and every tick
//! updates the remaining time stored here, so nothing works from a stale copy.

use crate::consts::CLOCK_TICK_MS;

/// Result of advancing the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    /// Not started or already finished
    Stopped,
    Running,
    /// Reached zero on this call (reported once)
    Expired,
}

#[derive(Debug, Clone)]
pub struct SessionClock {
    remaining_ms: u32,
    next_tick_ms: Option<f64>,
    bonus_awarded: bool,
}

impl SessionClock {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            remaining_ms: duration_ms,
            next_tick_ms: None,
            bonus_awarded: false,
        }
    }

    /// Arm the first one-second tick
    pub fn start(&mut self, now_ms: f64) {
        self.next_tick_ms = Some(now_ms + CLOCK_TICK_MS as f64);
    }

    pub fn stop(&mut self) {
        self.next_tick_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick_ms.is_some()
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn bonus_awarded(&self) -> bool {
        self.bonus_awarded
    }

    /// Apply every tick that is due at `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> ClockStatus {
        let Some(mut next) = self.next_tick_ms else {
            return ClockStatus::Stopped;
        };

        while now_ms >= next {
            self.remaining_ms = self.remaining_ms.saturating_sub(CLOCK_TICK_MS);
            if self.remaining_ms == 0 {
                self.next_tick_ms = None;
                return ClockStatus::Expired;
            }
            next += CLOCK_TICK_MS as f64;
        }

        self.next_tick_ms = Some(next);
        ClockStatus::Running
    }

    /// One-time time bonus when `hits` first reaches `threshold`
    pub fn award_bonus(&mut self, hits: u32, threshold: u32, bonus_ms: u32) -> bool {
        if self.bonus_awarded || hits < threshold {
            return false;
        }
        self.bonus_awarded = true;
        self.remaining_ms = self.remaining_ms.saturating_add(bonus_ms);
        true
    }
}
