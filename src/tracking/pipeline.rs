//! Per-frame gesture pipeline
//!
//! classify → smooth → detect, always in that order, so a shot and its aim
//! point come from the same frame.

use glam::Vec2;
use serde::Serialize;

use super::filter::PositionFilter;
use super::gesture::classify;
use super::landmarks::{HandLandmarks, INDEX_TIP, Landmark};
use super::shot::ShotDetector;
use crate::consts::FREEZE_WINDOW_MS;
use crate::{FIELD_CENTER, mirror_x};

/// Unsmoothed per-frame reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AimSample {
    /// Mirrored index fingertip, or field center with no hand
    pub position: Vec2,
    pub is_aiming: bool,
    pub timestamp_ms: f64,
}

/// Aim point as displayed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilteredAim {
    pub position: Vec2,
    /// Held still after a shot
    pub frozen: bool,
    pub raw: AimSample,
}

/// One shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FireEvent {
    pub position: Vec2,
    pub timestamp_ms: f64,
}

/// Pipeline output for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimFrame {
    pub aim: FilteredAim,
    pub hand_present: bool,
    pub fire: Option<FireEvent>,
}

impl AimFrame {
    pub fn is_aiming(&self) -> bool {
        self.aim.raw.is_aiming
    }
}

#[derive(Debug, Clone, Copy)]
struct Freeze {
    position: Vec2,
    until_ms: f64,
}

/// Session-scoped tracking state
#[derive(Debug, Clone, Default)]
pub struct AimPipeline {
    filter: PositionFilter,
    detector: ShotDetector,
    freeze: Option<Freeze>,
}

impl AimPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an unvalidated engine result. Bad sets count as no hand.
    pub fn process_raw(&mut self, points: Option<&[Landmark]>, timestamp_ms: f64) -> AimFrame {
        let hand = points.and_then(|points| match HandLandmarks::from_slice(points) {
            Ok(hand) => Some(hand),
            Err(e) => {
                log::debug!("Dropping frame at {:.0}ms: {}", timestamp_ms, e);
                None
            }
        });
        self.process(hand.as_ref(), timestamp_ms)
    }

    pub fn process(&mut self, hand: Option<&HandLandmarks>, timestamp_ms: f64) -> AimFrame {
        // 1. Pose
        let is_aiming = hand.is_some_and(classify);

        // 2. Smoothing
        let raw_position = hand
            .map(|h| mirror_x(h.point(INDEX_TIP)))
            .unwrap_or(FIELD_CENTER);
        let smoothed = self.filter.update(raw_position, hand.is_some());

        // 3. Fire (only from the aiming pose)
        let fired = match hand {
            Some(h) if is_aiming => self.detector.detect(h, timestamp_ms),
            _ => {
                self.detector.clear_history();
                false
            }
        };

        let mut fire = None;
        if fired {
            let anchor = self.filter.steady_position();
            self.freeze = Some(Freeze {
                position: anchor,
                until_ms: timestamp_ms + FREEZE_WINDOW_MS,
            });
            fire = Some(FireEvent {
                position: anchor,
                timestamp_ms,
            });
        }

        if self.freeze.is_some_and(|f| timestamp_ms >= f.until_ms) {
            self.freeze = None;
        }

        let (position, frozen) = match self.freeze {
            Some(f) => (f.position, true),
            None => (smoothed, false),
        };

        AimFrame {
            aim: FilteredAim {
                position,
                frozen,
                raw: AimSample {
                    position: raw_position,
                    is_aiming,
                    timestamp_ms,
                },
            },
            hand_present: hand.is_some(),
            fire,
        }
    }

    /// Repeat `last` when the camera had nothing new. Never fires again;
    /// the freeze still ends on time.
    pub fn hold(&mut self, last: &AimFrame, timestamp_ms: f64) -> AimFrame {
        if self.freeze.is_some_and(|f| timestamp_ms >= f.until_ms) {
            self.freeze = None;
        }
        let (position, frozen) = match self.freeze {
            Some(f) => (f.position, true),
            None => (self.filter.position(), false),
        };
        AimFrame {
            aim: FilteredAim {
                position,
                frozen,
                raw: last.aim.raw,
            },
            hand_present: last.hand_present,
            fire: None,
        }
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.detector.reset();
        self.freeze = None;
    }
}
