//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from the tick input
//! - Seeded RNG only
//! - Stable iteration order (targets in spawn order)
//! - No camera, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{ClockStatus, SessionClock};
pub use collision::{Resolution, expire_hit_targets, hovered_target, resolve};
pub use spawn::{find_spawn_point, try_spawn};
pub use state::{
    GameEvent, GamePhase, GameState, Impact, Intent, SessionOutcome, Target, TargetState,
};
pub use tick::{TickInput, tick};
