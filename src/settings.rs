//! Game settings and preferences
//!
//! Persisted as JSON: LocalStorage on web, a file on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable rules for one shooting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown length
    pub game_duration_ms: u32,
    /// Hits needed to pass
    pub min_hits_required: u32,
    pub points_per_hit: u32,
    /// Subtracted on a miss (score never goes below zero)
    pub miss_penalty: u32,
    pub max_live_targets: usize,
    /// Minimum distance between two live targets (fraction of field)
    pub min_target_separation: f32,
    /// Hit and hover radius (fraction of field)
    pub hit_radius: f32,
    /// Hit count that awards the one-time time bonus
    pub bonus_hit_threshold: u32,
    pub bonus_time_ms: u32,
    pub spawn_interval_ms: u32,
    pub hit_linger_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_duration_ms: GAME_DURATION_MS,
            min_hits_required: MIN_HITS_REQUIRED,
            points_per_hit: POINTS_PER_HIT,
            miss_penalty: MISS_PENALTY,
            max_live_targets: MAX_LIVE_TARGETS,
            min_target_separation: MIN_TARGET_SEPARATION,
            hit_radius: HIT_RADIUS,
            bonus_hit_threshold: BONUS_HIT_THRESHOLD,
            bonus_time_ms: BONUS_TIME_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            hit_linger_ms: HIT_LINGER_MS,
        }
    }
}

impl SessionConfig {
    /// Clamp hand-edited values into a playable range
    pub fn sanitized(mut self) -> Self {
        self.game_duration_ms = self.game_duration_ms.max(CLOCK_TICK_MS);
        self.max_live_targets = self.max_live_targets.clamp(1, 16);
        self.min_target_separation = self.min_target_separation.clamp(0.0, 0.5);
        self.hit_radius = self.hit_radius.clamp(0.01, 0.5);
        self.bonus_hit_threshold = self.bonus_hit_threshold.max(1);
        self.spawn_interval_ms = self.spawn_interval_ms.max(100);
        self
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session rules
    pub session: SessionConfig,

    // === Audio ===
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            muted: false,
            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.session = settings.session.sanitized();
                settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "finger_gun_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
        }
    }

    /// Load settings from a JSON file, defaults if missing or unreadable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.game_duration_ms, 30_000);
        assert_eq!(config.points_per_hit, 10);
        assert_eq!(config.miss_penalty, 10);
        assert_eq!(config.max_live_targets, 4);
        assert_eq!(config.bonus_time_ms, 15_000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"muted":true,"session":{"game_duration_ms":60000}}"#);
        assert!(settings.muted);
        assert_eq!(settings.session.game_duration_ms, 60_000);
        assert_eq!(settings.session.hit_radius, HIT_RADIUS);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let settings = Settings::from_json("not json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = SessionConfig {
            game_duration_ms: 0,
            max_live_targets: 0,
            hit_radius: 3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.game_duration_ms, CLOCK_TICK_MS);
        assert_eq!(config.max_live_targets, 1);
        assert_eq!(config.hit_radius, 0.5);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("finger_gun_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.muted = true;
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
