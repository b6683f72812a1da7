//! Fire detection from a thumb flick
//!
//! Tracks the thumb tip's vertical velocity, measured positive upward
//! (image y shrinks as the thumb rises), in normalized units per second.
//! A full flick passes `FLICK_VELOCITY` on its own; a short snap passes the
//! lower velocity gate together with a sharp acceleration.

use super::landmarks::{HandLandmarks, THUMB_TIP};
use crate::consts::SHOT_COOLDOWN_MS;

/// Upward speed that fires on its own
pub const FLICK_VELOCITY: f32 = 2.5;
/// Snap gate: speed and acceleration must both pass
pub const SNAP_VELOCITY: f32 = 1.5;
pub const SNAP_ACCELERATION: f32 = 30.0;
/// Samples farther apart than this start a fresh history
pub const MAX_SAMPLE_GAP_MS: f64 = 200.0;

#[derive(Debug, Clone, Copy)]
struct Sample {
    y: f32,
    timestamp_ms: f64,
    velocity: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct ShotDetector {
    last: Option<Sample>,
    cooldown_until: Option<f64>,
}

impl ShotDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame; true when this frame completes a flick
    pub fn detect(&mut self, hand: &HandLandmarks, timestamp_ms: f64) -> bool {
        self.detect_y(hand.point(THUMB_TIP).y, timestamp_ms)
    }

    fn detect_y(&mut self, y: f32, timestamp_ms: f64) -> bool {
        let Some(prev) = self.last else {
            self.last = Some(Sample { y, timestamp_ms, velocity: None });
            return false;
        };

        let dt_ms = timestamp_ms - prev.timestamp_ms;
        if dt_ms <= 0.0 {
            // Same or older frame, nothing to measure
            return false;
        }
        if dt_ms > MAX_SAMPLE_GAP_MS {
            self.last = Some(Sample { y, timestamp_ms, velocity: None });
            return false;
        }

        let dt = (dt_ms / 1000.0) as f32;
        let velocity = (prev.y - y) / dt;
        let acceleration = prev.velocity.map(|v| (velocity - v) / dt);
        self.last = Some(Sample { y, timestamp_ms, velocity: Some(velocity) });

        if self.cooling_down(timestamp_ms) {
            return false;
        }

        let flick = velocity > FLICK_VELOCITY;
        let snap = velocity > SNAP_VELOCITY
            && acceleration.is_some_and(|a| a > SNAP_ACCELERATION);

        if flick || snap {
            self.cooldown_until = Some(timestamp_ms + SHOT_COOLDOWN_MS);
            log::debug!(
                "Shot at {:.0}ms (v={:.2}, a={:?}, {})",
                timestamp_ms,
                velocity,
                acceleration,
                if flick { "flick" } else { "snap" }
            );
            return true;
        }
        false
    }

    pub fn cooling_down(&self, timestamp_ms: f64) -> bool {
        self.cooldown_until.is_some_and(|until| timestamp_ms < until)
    }

    /// Forget motion history (hand lost or pose dropped); cooldown survives
    pub fn clear_history(&mut self) {
        self.last = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
