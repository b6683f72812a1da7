//! Session tick
//!
//! The state machine advances once per processed frame. State goes in by
//! value and comes back out; the frame's intents, aim and shot are a
//! read-only snapshot.

use glam::Vec2;

use super::clock::ClockStatus;
use super::collision::{expire_hit_targets, resolve};
use super::spawn::try_spawn;
use super::state::{GameEvent, GamePhase, GameState, Impact, Intent, SessionOutcome};
use crate::FIELD_CENTER;
use crate::consts::IMPACT_LIFETIME_MS;
use crate::tracking::FireEvent;

/// Input snapshot for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Frame timestamp (ms, monotonic)
    pub now_ms: f64,
    /// Displayed aim point
    pub aim: Vec2,
    pub is_aiming: bool,
    /// Shot detected this frame
    pub fire: Option<FireEvent>,
    /// Player/host requests since the last tick, in order
    pub intents: Vec<Intent>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            aim: FIELD_CENTER,
            is_aiming: false,
            fire: None,
            intents: Vec::new(),
        }
    }
}

/// Advance the session by one frame
pub fn tick(mut state: GameState, input: &TickInput) -> GameState {
    state.events.clear();

    // A shot taken before Begin landed belongs to no session
    let was_playing = state.phase == GamePhase::Playing;

    for intent in &input.intents {
        apply_intent(&mut state, intent, input.now_ms);
    }

    if state.phase == GamePhase::Playing {
        play(&mut state, input, was_playing);
    }

    state
}

fn apply_intent(state: &mut GameState, intent: &Intent, now_ms: f64) {
    match (state.phase, intent) {
        (GamePhase::Idle, Intent::Start) => {
            state.status = None;
            state.set_phase(GamePhase::AwaitingPermission);
            state.events.push(GameEvent::CaptureRequested);
        }
        (GamePhase::AwaitingPermission, Intent::PermissionGranted) => {
            state.set_phase(GamePhase::Ready);
        }
        (GamePhase::AwaitingPermission, Intent::PermissionFailed(err)) => {
            log::warn!("Hand tracking unavailable: {}", err);
            state.status = Some(err.clone());
            state.set_phase(GamePhase::Idle);
        }
        (GamePhase::Ready, Intent::Begin) => begin(state, now_ms),
        (GamePhase::Ended, Intent::Restart) => {
            state.reset_session();
            state.set_phase(GamePhase::Ready);
        }
        (phase, Intent::Quit) if phase != GamePhase::Idle => {
            if phase == GamePhase::Playing {
                state.events.push(GameEvent::AmbientStop);
            }
            state.reset_session();
            state.set_phase(GamePhase::Idle);
        }
        (phase, intent) => {
            log::debug!("Ignoring {:?} in {:?}", intent, phase);
        }
    }
}

/// Ready -> Playing. The reset happens before the clock is armed.
fn begin(state: &mut GameState, now_ms: f64) {
    state.reset_session();

    state.set_phase(GamePhase::Playing);
    state.events.push(GameEvent::AmbientStart);
    state.clock.start(now_ms);

    try_spawn(state);
    state.next_spawn_ms = Some(now_ms + state.config.spawn_interval_ms as f64);
}

fn play(state: &mut GameState, input: &TickInput, resolve_fire: bool) {
    let now = input.now_ms;

    // Lingering hits and old impact markers
    expire_hit_targets(&mut state.targets, now, state.config.hit_linger_ms);
    state
        .impacts
        .retain(|i| now - i.fired_at_ms < IMPACT_LIFETIME_MS as f64);

    if let Some(fire) = input.fire.as_ref().filter(|_| resolve_fire) {
        shoot(state, fire);
    }

    if let Some(next) = state.next_spawn_ms {
        if now >= next {
            try_spawn(state);
            let interval = state.config.spawn_interval_ms as f64;
            let mut next = next + interval;
            if next <= now {
                // Stalled frame loop: don't burst-spawn to catch up
                next = now + interval;
            }
            state.next_spawn_ms = Some(next);
        }
    }

    if state.clock.advance(now) == ClockStatus::Expired {
        end(state);
    }
}

fn shoot(state: &mut GameState, fire: &FireEvent) {
    state.shots_fired += 1;
    let id = state.next_entity_id();
    state.impacts.push(Impact {
        id,
        position: fire.position,
        fired_at_ms: fire.timestamp_ms,
    });
    state.events.push(GameEvent::Fired {
        position: fire.position,
    });

    let resolution = resolve(fire, &mut state.targets, state.score, &state.config);
    state.score = resolution.score;

    match resolution.hit_target {
        Some(id) => {
            state.targets_hit += 1;
            state.events.push(GameEvent::TargetHit { id });

            let config = &state.config;
            if state.clock.award_bonus(
                state.targets_hit,
                config.bonus_hit_threshold,
                config.bonus_time_ms,
            ) {
                log::info!("Bonus +{}ms at {} hits", config.bonus_time_ms, state.targets_hit);
                state.events.push(GameEvent::BonusAwarded {
                    ms: config.bonus_time_ms,
                });
            }
        }
        None => state.events.push(GameEvent::Missed),
    }
}

/// Playing -> Ended
fn end(state: &mut GameState) {
    state.cancel_timers();
    state.targets.clear();
    state.impacts.clear();

    let outcome = SessionOutcome::from_hits(state.targets_hit, state.config.min_hits_required);
    log::info!(
        "Session over: score {} hits {}/{} ({:?})",
        state.score,
        state.targets_hit,
        state.shots_fired,
        outcome
    );
    state.outcome = Some(outcome);
    state.set_phase(GamePhase::Ended);
    state.events.push(GameEvent::AmbientStop);
    state.events.push(GameEvent::SessionEnded(outcome));
}
