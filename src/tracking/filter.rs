//! Aim point smoothing
//!
//! Exponential smoothing toward the fingertip while a hand is visible, and a
//! slower glide back to the field center once it is lost. A second "steady"
//! position only moves while the hand is still; shots anchor to it.

use glam::Vec2;

use crate::FIELD_CENTER;

/// Smoothing factor while a hand is tracked
pub const TRACKING_SMOOTHING: f32 = 0.4;
/// Smoothing factor while gliding back to center
pub const LOST_SMOOTHING: f32 = 0.15;
/// Raw frame-to-frame motion below this counts as holding still
pub const STEADY_THRESHOLD: f32 = 0.01;
/// Remaining distance below which the output locks onto its target
pub const SNAP_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone)]
pub struct PositionFilter {
    current: Vec2,
    steady: Vec2,
    last_target: Option<Vec2>,
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionFilter {
    pub fn new() -> Self {
        Self {
            current: FIELD_CENTER,
            steady: FIELD_CENTER,
            last_target: None,
        }
    }

    /// Advance one frame. `target` is ignored when no hand is present.
    pub fn update(&mut self, target: Vec2, hand_present: bool) -> Vec2 {
        let (target, factor) = if hand_present {
            (target, TRACKING_SMOOTHING)
        } else {
            (FIELD_CENTER, LOST_SMOOTHING)
        };

        let delta = target - self.current;
        if delta.length() < SNAP_EPSILON {
            self.current = target;
        } else {
            self.current += delta * factor;
        }

        let displacement = self
            .last_target
            .map(|last| target.distance(last))
            .unwrap_or(f32::INFINITY);
        if displacement < STEADY_THRESHOLD {
            self.steady = self.current;
        }
        self.last_target = Some(target);

        self.current
    }

    /// Smoothed aim point
    pub fn position(&self) -> Vec2 {
        self.current
    }

    /// Last position recorded while the hand was holding still
    pub fn steady_position(&self) -> Vec2 {
        self.steady
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
