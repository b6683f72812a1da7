//! Frame driver
//!
//! `Game` owns the capture, the audio handle, the gesture pipeline and the
//! session state. The host calls `frame` once per display refresh and
//! renders the returned `FrameView`; everything else is an intent.

use glam::Vec2;
use serde::Serialize;

use crate::audio::AudioCues;
use crate::capture::{Capture, CaptureDevice, FramePoll};
use crate::error::TrackingError;
use crate::settings::SessionConfig;
use crate::sim::{
    GameEvent, GamePhase, GameState, Impact, Intent, SessionOutcome, Target, TickInput,
    hovered_target, tick,
};
use crate::tracking::{AimFrame, AimPipeline};

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    /// Displayed aim point (normalized, mirrored)
    pub aim: Vec2,
    pub is_aiming: bool,
    pub frozen: bool,
    pub hand_present: bool,
    pub hovering_target: Option<u32>,
    pub targets: Vec<Target>,
    pub impacts: Vec<Impact>,
    pub score: u32,
    pub targets_hit: u32,
    pub shots_fired: u32,
    pub time_remaining_ms: u32,
    pub phase: GamePhase,
    /// Why the camera could not be started, if it failed
    pub status: Option<TrackingError>,
    pub outcome: Option<SessionOutcome>,
    pub muted: bool,
}

/// Game instance holding all state
pub struct Game<D: CaptureDevice, A: AudioCues> {
    device: D,
    capture: Option<Capture<D::Source, D::Engine>>,
    audio: A,
    pipeline: AimPipeline,
    state: GameState,
    /// Intents queued since the last frame
    pending: Vec<Intent>,
    /// Reused while the camera has no new frame
    last_aim: Option<AimFrame>,
    muted: bool,
}

impl<D: CaptureDevice, A: AudioCues> Game<D, A> {
    pub fn new(device: D, audio: A, config: SessionConfig, seed: u64) -> Self {
        Self {
            device,
            capture: None,
            audio,
            pipeline: AimPipeline::new(),
            state: GameState::new(seed, config.sanitized()),
            pending: Vec::new(),
            last_aim: None,
            muted: false,
        }
    }

    /// Queue a player/host request for the next frame
    pub fn dispatch(&mut self, intent: Intent) {
        log::debug!("Intent {:?}", intent);
        self.pending.push(intent);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.audio.set_muted(muted);
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Camera and engine currently held
    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Run one frame: capture → gesture pipeline → session tick → side effects
    pub fn frame(&mut self, now_ms: f64) -> FrameView {
        self.acquire_capture();

        let aim = self.poll_aim(now_ms);
        let input = TickInput {
            now_ms,
            aim: aim.aim.position,
            is_aiming: aim.is_aiming(),
            fire: aim.fire,
            intents: std::mem::take(&mut self.pending),
        };

        let state = std::mem::take(&mut self.state);
        self.state = tick(state, &input);
        self.handle_events();

        self.view(&aim)
    }

    /// Ask the device for the camera; repeated each frame while pending
    fn acquire_capture(&mut self) {
        if self.state.phase != GamePhase::AwaitingPermission || self.capture.is_some() {
            return;
        }
        match self.device.acquire() {
            Ok(Some(capture)) => {
                log::info!("Camera and hand tracking ready");
                self.capture = Some(capture);
                self.pending.push(Intent::PermissionGranted);
            }
            Ok(None) => {}
            Err(e) => {
                self.pending.push(Intent::PermissionFailed(e));
            }
        }
    }

    fn poll_aim(&mut self, now_ms: f64) -> AimFrame {
        let poll = match self.capture.as_mut() {
            Some(capture) => capture.poll(now_ms),
            None => FramePoll::NoHand,
        };

        let frame = match poll {
            FramePoll::NoNewFrame => match self.last_aim {
                Some(last) => self.pipeline.hold(&last, now_ms),
                None => self.pipeline.process(None, now_ms),
            },
            FramePoll::NoHand => self.pipeline.process(None, now_ms),
            FramePoll::Hand(points) => self.pipeline.process_raw(Some(&points), now_ms),
        };
        self.last_aim = Some(frame);
        frame
    }

    fn handle_events(&mut self) {
        let mut capture_requested = false;
        for event in &self.state.events {
            match event {
                GameEvent::CaptureRequested => capture_requested = true,
                GameEvent::Fired { .. } => self.audio.play_fire_sound(),
                GameEvent::AmbientStart => self.audio.play_ambient_loop(),
                GameEvent::AmbientStop => self.audio.stop_ambient_loop(),
                GameEvent::PhaseChanged { to, .. } => match to {
                    GamePhase::Ready | GamePhase::Playing => {
                        self.pipeline.reset();
                        self.last_aim = None;
                    }
                    GamePhase::Idle => {
                        // Menu: camera off until the player starts again
                        self.capture = None;
                        self.pipeline.reset();
                        self.last_aim = None;
                    }
                    _ => {}
                },
                GameEvent::SessionEnded(outcome) => {
                    log::info!("Challenge {:?}", outcome);
                }
                _ => {}
            }
        }

        if capture_requested {
            self.acquire_capture();
        }
    }

    fn view(&self, aim: &AimFrame) -> FrameView {
        let state = &self.state;
        let hovering_target = if state.phase == GamePhase::Playing && aim.is_aiming() {
            hovered_target(aim.aim.position, &state.targets, state.config.hit_radius)
        } else {
            None
        };
        FrameView {
            aim: aim.aim.position,
            is_aiming: aim.is_aiming(),
            frozen: aim.aim.frozen,
            hand_present: aim.hand_present,
            hovering_target,
            targets: state.targets.clone(),
            impacts: state.impacts.clone(),
            score: state.score,
            targets_hit: state.targets_hit,
            shots_fired: state.shots_fired,
            time_remaining_ms: state.time_remaining_ms(),
            phase: state.phase,
            status: state.status.clone(),
            outcome: state.outcome,
            muted: self.muted,
        }
    }

    /// Stop everything: timers, ambient audio, camera and engine
    pub fn teardown(&mut self) {
        self.state.cancel_timers();
        if self.state.phase == GamePhase::Playing {
            self.audio.stop_ambient_loop();
        }
        self.state.reset_session();
        self.state.phase = GamePhase::Idle;
        self.pending.clear();
        self.last_aim = None;
        if self.capture.take().is_some() {
            log::info!("Game torn down");
        }
    }
}

impl<D: CaptureDevice, A: AudioCues> Drop for Game<D, A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::capture::{FeedDevice, HostFeed};
    use crate::tracking::poses::{gun_pose, open_hand};
    use crate::tracking::HandLandmarks;

    type TestGame = Game<FeedDevice, SilentAudio>;

    fn new_game() -> (TestGame, HostFeed) {
        let feed = HostFeed::new();
        let game = Game::new(
            FeedDevice::new(feed.clone()),
            SilentAudio::default(),
            SessionConfig::default(),
            42,
        );
        (game, feed)
    }

    fn push(feed: &HostFeed, t: f64, hand: &HandLandmarks) {
        feed.push_frame(t, Some(hand.as_slice().to_vec()));
    }

    /// Idle → Ready with the host granting on the second frame
    fn to_ready(game: &mut TestGame, feed: &HostFeed) {
        game.dispatch(Intent::Start);
        game.frame(0.0);
        assert_eq!(game.phase(), GamePhase::AwaitingPermission);
        game.frame(16.0);
        assert!(feed.capture_requested());
        feed.report_ready();
        game.frame(32.0);
        assert_eq!(game.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_permission_flow() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);
        assert!(game.has_capture());
        assert_eq!(feed.acquisitions(), 1);
    }

    #[test]
    fn test_permission_failure_surfaces_status() {
        let (mut game, feed) = new_game();
        game.dispatch(Intent::Start);
        game.frame(0.0);
        feed.report_failure(TrackingError::PermissionDenied);
        let view = game.frame(16.0);
        assert_eq!(view.phase, GamePhase::Idle);
        assert_eq!(view.status, Some(TrackingError::PermissionDenied));
        assert!(!game.has_capture());

        // Stays put until the player asks again
        let view = game.frame(32.0);
        assert_eq!(view.phase, GamePhase::Idle);
        assert_eq!(feed.acquisitions(), 0);
    }

    #[test]
    fn test_aim_follows_hand() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);

        let mut view = game.frame(48.0);
        for i in 0..60 {
            let t = 64.0 + i as f64 * 16.0;
            push(&feed, t, &gun_pose(Vec2::new(0.3, 0.4), 0.0));
            view = game.frame(t);
        }
        assert!(view.is_aiming);
        assert!(view.hand_present);
        assert!(view.aim.distance(Vec2::new(0.7, 0.4)) < 1e-3);
    }

    #[test]
    fn test_stale_frame_keeps_aim_without_refiring() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);
        game.dispatch(Intent::Begin);
        game.frame(40.0);

        let tip = Vec2::new(0.5, 0.5);
        let mut t = 50.0;
        for _ in 0..30 {
            push(&feed, t, &gun_pose(tip, 0.0));
            game.frame(t);
            t += 33.0;
        }
        push(&feed, t, &gun_pose(tip, 0.12));
        let fired = game.frame(t);
        assert_eq!(fired.shots_fired, 1);

        // Same camera frame seen again on the next refresh
        let again = game.frame(t + 16.0);
        assert_eq!(again.shots_fired, 1);
        assert_eq!(again.aim, fired.aim);
    }

    #[test]
    fn test_start_asks_for_camera_on_same_frame() {
        let (mut game, feed) = new_game();
        game.dispatch(Intent::Start);
        game.frame(0.0);
        assert!(feed.capture_requested());
    }

    #[test]
    fn test_flick_in_ready_does_not_count_on_begin() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);

        let tip = Vec2::new(0.5, 0.5);
        let mut t = 50.0;
        for _ in 0..30 {
            push(&feed, t, &gun_pose(tip, 0.0));
            game.frame(t);
            t += 33.0;
        }
        push(&feed, t, &gun_pose(tip, 0.12));
        game.dispatch(Intent::Begin);
        let view = game.frame(t);
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.shots_fired, 0);
        assert_eq!(view.score, 0);
        assert!(view.impacts.is_empty());
    }

    #[test]
    fn test_freeze_ends_while_camera_stalls() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);
        game.dispatch(Intent::Begin);
        game.frame(40.0);

        let tip = Vec2::new(0.5, 0.5);
        let mut t = 50.0;
        for _ in 0..30 {
            push(&feed, t, &gun_pose(tip, 0.0));
            game.frame(t);
            t += 33.0;
        }
        push(&feed, t, &gun_pose(tip, 0.12));
        assert!(game.frame(t).frozen);

        // No new camera frame for two seconds
        let view = game.frame(t + 2_000.0);
        assert!(!view.frozen);
        assert_eq!(view.shots_fired, 1);
    }

    #[test]
    fn test_open_hand_never_shoots() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);
        game.dispatch(Intent::Begin);
        game.frame(40.0);

        let mut t = 50.0;
        for i in 0..40 {
            let wrist = Vec2::new(0.5, 0.8 - (i % 2) as f32 * 0.2);
            push(&feed, t, &open_hand(wrist));
            let view = game.frame(t);
            assert!(!view.is_aiming);
            assert_eq!(view.shots_fired, 0);
            t += 33.0;
        }
    }

    #[test]
    fn test_quit_releases_camera() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);
        game.dispatch(Intent::Quit);
        game.frame(50.0);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(!feed.is_live());
    }

    #[test]
    fn test_drop_releases_camera() {
        let (mut game, feed) = new_game();
        to_ready(&mut game, &feed);
        drop(game);
        assert_eq!(feed.releases(), 1);
        assert!(!feed.is_live());
    }

    #[test]
    fn test_mute_is_reported() {
        let (mut game, _feed) = new_game();
        game.set_muted(true);
        assert!(game.frame(0.0).muted);
    }
}
