//! Finger Gun - webcam target range driven by a hand gesture
//!
//! Core modules:
//! - `tracking`: Gesture-to-aim pipeline (pose, smoothing, flick detection)
//! - `sim`: Deterministic session state machine (targets, scoring, clock)
//! - `capture`: Camera/inference boundary with scoped acquisition
//! - `game`: Frame driver tying capture, tracking, sim and audio together
//! - `audio`: Procedural sound cues
//! - `settings`: Tunable session configuration

pub mod audio;
pub mod capture;
pub mod error;
pub mod game;
pub mod settings;
pub mod sim;
pub mod tracking;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{FrameFault, TrackingError};
pub use game::Game;
pub use settings::{SessionConfig, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Session length
    pub const GAME_DURATION_MS: u32 = 30_000;
    /// Hits needed to pass the challenge
    pub const MIN_HITS_REQUIRED: u32 = 10;
    pub const POINTS_PER_HIT: u32 = 10;
    pub const MISS_PENALTY: u32 = 10;

    /// Target field (all coordinates normalized to [0, 1])
    pub const MAX_LIVE_TARGETS: usize = 4;
    pub const MIN_TARGET_SEPARATION: f32 = 0.2;
    /// Same radius drives hit tests and hover highlighting
    pub const HIT_RADIUS: f32 = 0.08;
    pub const SPAWN_INTERVAL_MS: u32 = 2_000;
    pub const SPAWN_ATTEMPTS: u32 = 10;
    /// Safe spawn rectangle (keeps targets off the edges and the HUD strip)
    pub const SPAWN_MIN_X: f32 = 0.15;
    pub const SPAWN_MAX_X: f32 = 0.85;
    pub const SPAWN_MIN_Y: f32 = 0.15;
    pub const SPAWN_MAX_Y: f32 = 0.75;
    /// How long a hit target stays visible before removal
    pub const HIT_LINGER_MS: u32 = 400;
    /// Impact marker lifetime
    pub const IMPACT_LIFETIME_MS: u32 = 500;

    /// Countdown granularity
    pub const CLOCK_TICK_MS: u32 = 1_000;
    pub const BONUS_HIT_THRESHOLD: u32 = 10;
    pub const BONUS_TIME_MS: u32 = 15_000;

    /// Minimum time between two accepted shots
    pub const SHOT_COOLDOWN_MS: f64 = 400.0;
    /// Displayed aim is held still this long after a shot
    pub const FREEZE_WINDOW_MS: f64 = 400.0;
}

/// Center of the normalized play field
pub const FIELD_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Mirror a camera-space point so it matches what the player sees
#[inline]
pub fn mirror_x(p: Vec2) -> Vec2 {
    Vec2::new(1.0 - p.x, p.y)
}
