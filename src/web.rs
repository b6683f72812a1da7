//! Browser surface
//!
//! The page owns `getUserMedia`, the video element and the hand landmark
//! model. It reports camera results and pushes each inference result here,
//! calls `frame` from `requestAnimationFrame`, and draws the returned JSON.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::capture::{FeedDevice, HostFeed};
use crate::error::TrackingError;
use crate::game::Game;
use crate::settings::Settings;
use crate::sim::Intent;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Finger Gun starting...");
}

/// Game handle exported to the page
#[wasm_bindgen]
pub struct WebShooter {
    game: Game<FeedDevice, WebAudio>,
    feed: HostFeed,
    settings: Settings,
}

#[wasm_bindgen]
impl WebShooter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebShooter {
        let settings = Settings::load();
        let feed = HostFeed::new();

        let mut audio = WebAudio::new();
        audio.set_master_volume(settings.master_volume);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(
            FeedDevice::new(feed.clone()),
            audio,
            settings.session.clone(),
            seed,
        );
        game.set_muted(settings.muted);
        log::info!("Session seed: {}", seed);

        WebShooter {
            game,
            feed,
            settings,
        }
    }

    /// Start menu button
    pub fn start(&mut self) {
        self.game.dispatch(Intent::Start);
    }

    /// Ready screen button
    pub fn begin(&mut self) {
        self.game.dispatch(Intent::Begin);
    }

    /// Game over button
    pub fn restart(&mut self) {
        self.game.dispatch(Intent::Restart);
    }

    pub fn quit(&mut self) {
        self.game.dispatch(Intent::Quit);
    }

    /// True once the core is waiting for the page to open the camera
    pub fn wants_camera(&self) -> bool {
        self.feed.capture_requested()
    }

    /// Camera stream and landmark model are both up
    pub fn camera_ready(&mut self) {
        self.feed.report_ready();
    }

    /// `name` is the DOMException name (e.g. `NotAllowedError`)
    pub fn camera_failed(&mut self, name: &str, message: &str) {
        self.feed.report_failure(TrackingError::from_host(name, message));
    }

    /// Video `readyState >= HAVE_CURRENT_DATA`
    pub fn set_video_ready(&mut self, ready: bool) {
        self.feed.set_ready(ready);
    }

    /// Latest inference result for the frame shown at `frame_ms`: flat
    /// `x, y, z` triples of the first hand, or empty when no hand was found
    pub fn push_hands(&mut self, frame_ms: f64, landmarks: &[f32]) {
        self.feed.push_flat(frame_ms, landmarks);
    }

    /// Run one display frame; returns the frame view as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let view = self.game.frame(now_ms);
        serde_json::to_string(&view).unwrap_or_default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.game.set_muted(muted);
        self.settings.muted = muted;
        self.settings.save();
    }

    pub fn muted(&self) -> bool {
        self.game.muted()
    }

    /// Release the camera and stop audio (page hide / unload)
    pub fn shutdown(&mut self) {
        self.game.teardown();
    }
}

impl Default for WebShooter {
    fn default() -> Self {
        Self::new()
    }
}
