//! Game state and core session types
//!
//! Everything the session needs between frames lives in `GameState`; the
//! tick function owns it by value.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::clock::SessionClock;
use crate::error::TrackingError;
use crate::settings::SessionConfig;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Start menu
    Idle,
    /// Waiting on camera permission and engine load
    AwaitingPermission,
    /// Camera live, waiting for the player to begin
    Ready,
    /// Countdown running
    Playing,
    /// Time's up
    Ended,
}

/// Target lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TargetState {
    Spawned,
    /// Hit at the given time; removed after the linger duration
    Hit { at_ms: f64 },
}

/// A target on the field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub id: u32,
    pub position: Vec2,
    pub state: TargetState,
}

impl Target {
    pub fn new(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            state: TargetState::Spawned,
        }
    }

    /// Spawned and not yet hit
    #[inline]
    pub fn is_live(&self) -> bool {
        self.state == TargetState::Spawned
    }
}

/// Where a shot landed (display only)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub id: u32,
    pub position: Vec2,
    pub fired_at_ms: f64,
}

/// Challenge result once time runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionOutcome {
    Passed,
    Failed { short_by: u32 },
}

impl SessionOutcome {
    pub fn from_hits(hits: u32, required: u32) -> Self {
        if hits >= required {
            SessionOutcome::Passed
        } else {
            SessionOutcome::Failed {
                short_by: required - hits,
            }
        }
    }
}

/// Player or host request, applied at the start of a tick
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Start menu button
    Start,
    /// Camera and engine are up
    PermissionGranted,
    PermissionFailed(TrackingError),
    /// Ready screen button
    Begin,
    /// Game over button
    Restart,
    /// Back to the start menu
    Quit,
}

/// Things that happened during a tick, for the driver to act on
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Driver should acquire the camera
    CaptureRequested,
    AmbientStart,
    AmbientStop,
    Fired { position: Vec2 },
    TargetSpawned { id: u32 },
    TargetHit { id: u32 },
    Missed,
    BonusAwarded { ms: u32 },
    SessionEnded(SessionOutcome),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SessionConfig,
    pub phase: GamePhase,
    pub score: u32,
    pub targets_hit: u32,
    pub shots_fired: u32,
    /// Live and lingering targets, in spawn order
    pub targets: Vec<Target>,
    pub impacts: Vec<Impact>,
    pub clock: SessionClock,
    /// Next spawn attempt (None = spawning off)
    pub next_spawn_ms: Option<f64>,
    /// Last capture failure, shown on the start menu
    pub status: Option<TrackingError>,
    pub outcome: Option<SessionOutcome>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0, SessionConfig::default())
    }
}

impl GameState {
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        let duration = config.game_duration_ms;
        Self {
            config,
            phase: GamePhase::Idle,
            score: 0,
            targets_hit: 0,
            shots_fired: 0,
            targets: Vec::new(),
            impacts: Vec::new(),
            clock: SessionClock::new(duration),
            next_spawn_ms: None,
            status: None,
            outcome: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn time_remaining_ms(&self) -> u32 {
        self.clock.remaining_ms()
    }

    pub fn bonus_awarded(&self) -> bool {
        self.clock.bonus_awarded()
    }

    pub fn live_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_live())
    }

    /// Back to initial values; cancels the clock and spawn timer
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.targets_hit = 0;
        self.shots_fired = 0;
        self.targets.clear();
        self.impacts.clear();
        self.clock = SessionClock::new(self.config.game_duration_ms);
        self.next_spawn_ms = None;
        self.outcome = None;
    }

    /// Cancel every pending timer
    pub fn cancel_timers(&mut self) {
        self.clock.stop();
        self.next_spawn_ms = None;
    }

    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            log::info!("Phase {:?} -> {:?}", from, to);
            self.phase = to;
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, SessionConfig::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining_ms(), 30_000);
        assert!(!state.bonus_awarded());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(7, SessionConfig::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_outcome() {
        assert_eq!(SessionOutcome::from_hits(12, 10), SessionOutcome::Passed);
        assert_eq!(
            SessionOutcome::from_hits(7, 10),
            SessionOutcome::Failed { short_by: 3 }
        );
    }
}
