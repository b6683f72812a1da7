//! Target spawning
//!
//! Random placement inside the safe rectangle, rejecting candidates that
//! crowd an existing live target. Skipping a spawn is normal backpressure.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Target};
use crate::consts::*;
use crate::settings::SessionConfig;

/// Pick a free spot for a new target, or None if the field is full or no
/// candidate cleared the separation check
pub fn find_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &[Target],
    config: &SessionConfig,
) -> Option<Vec2> {
    let live: Vec<Vec2> = existing
        .iter()
        .filter(|t| t.is_live())
        .map(|t| t.position)
        .collect();

    if live.len() >= config.max_live_targets {
        return None;
    }

    for _ in 0..SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(SPAWN_MIN_X..=SPAWN_MAX_X),
            rng.random_range(SPAWN_MIN_Y..=SPAWN_MAX_Y),
        );
        if live
            .iter()
            .all(|p| p.distance(candidate) >= config.min_target_separation)
        {
            return Some(candidate);
        }
    }

    None
}

/// Try to add one target to the session; returns its id on success
pub fn try_spawn(state: &mut GameState) -> Option<u32> {
    let Some(position) = find_spawn_point(&mut state.rng, &state.targets, &state.config) else {
        log::debug!(
            "Spawn skipped ({} live)",
            state.targets.iter().filter(|t| t.is_live()).count()
        );
        return None;
    };

    let id = state.next_entity_id();
    state.targets.push(Target::new(id, position));
    state.events.push(GameEvent::TargetSpawned { id });
    Some(id)
}
