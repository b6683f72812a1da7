//! Shot resolution against targets
//!
//! First live target in list order within the hit radius wins; nearest is
//! not considered.

use glam::Vec2;

use super::state::{Target, TargetState};
use crate::settings::SessionConfig;
use crate::tracking::FireEvent;

/// Result of resolving one shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub hit_target: Option<u32>,
    pub score: u32,
}

impl Resolution {
    pub fn is_hit(&self) -> bool {
        self.hit_target.is_some()
    }
}

#[inline]
fn within(point: Vec2, target: &Target, radius: f32) -> bool {
    target.is_live() && point.distance(target.position) < radius
}

/// Apply a shot: mark at most one target hit and return the new score.
/// A miss costs the penalty, never taking the score below zero.
pub fn resolve(
    fire: &FireEvent,
    targets: &mut [Target],
    score: u32,
    config: &SessionConfig,
) -> Resolution {
    match targets
        .iter_mut()
        .find(|t| within(fire.position, t, config.hit_radius))
    {
        Some(target) => {
            target.state = TargetState::Hit {
                at_ms: fire.timestamp_ms,
            };
            Resolution {
                hit_target: Some(target.id),
                score: score.saturating_add(config.points_per_hit),
            }
        }
        None => Resolution {
            hit_target: None,
            score: score.saturating_sub(config.miss_penalty),
        },
    }
}

/// Target under the crosshair, using the same radius as hits
pub fn hovered_target(aim: Vec2, targets: &[Target], radius: f32) -> Option<u32> {
    targets.iter().find(|t| within(aim, t, radius)).map(|t| t.id)
}

/// Drop hit targets whose linger time has passed
pub fn expire_hit_targets(targets: &mut Vec<Target>, now_ms: f64, linger_ms: u32) {
    targets.retain(|t| match t.state {
        TargetState::Spawned => true,
        TargetState::Hit { at_ms } => now_ms - at_ms < linger_ms as f64,
    });
}
