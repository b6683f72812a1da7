//! Finger Gun entry point
//!
//! The browser build is driven from `web::WebShooter`. Natively this runs a
//! headless session with a scripted hand: aim at the oldest live target,
//! hold still, flick the thumb.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use finger_gun::audio::SilentAudio;
    use finger_gun::capture::{FeedDevice, HostFeed};
    use finger_gun::sim::{GamePhase, Intent};
    use finger_gun::tracking::poses::gun_pose;
    use finger_gun::{FIELD_CENTER, Game, Settings, mirror_x};

    const FRAME_MS: f64 = 1000.0 / 30.0;
    /// Frames to steady the aim before pulling the trigger
    const AIM_FRAMES: u32 = 12;
    const THUMB_FLICK: f32 = 0.12;
    /// Per-frame hand travel while moving between targets
    const HAND_SPEED: f32 = 0.02;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Finger Gun (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);

    let feed = HostFeed::new();
    let mut game = Game::new(
        FeedDevice::new(feed.clone()),
        SilentAudio::default(),
        settings.session.clone(),
        seed,
    );
    game.set_muted(settings.muted);

    let mut t = 0.0;
    game.dispatch(Intent::Start);
    while game.phase() != GamePhase::Ready {
        if feed.capture_requested() {
            feed.report_ready();
        }
        game.frame(t);
        t += FRAME_MS;
        if t > 1_000.0 {
            log::error!("Scripted camera never came up");
            return;
        }
    }

    game.dispatch(Intent::Begin);
    let mut hand = mirror_x(FIELD_CENTER);
    let mut steady = 0;
    let mut view = game.frame(t);
    while view.phase != GamePhase::Ended && t < 120_000.0 {
        t += FRAME_MS;

        // Glide toward the oldest live target; a jump would read as a flick
        let target = game.state().live_targets().next().map(|target| mirror_x(target.position));
        let goal = target.unwrap_or(hand);
        let moving = hand != goal;
        hand = if hand.distance(goal) <= HAND_SPEED {
            goal
        } else {
            hand + (goal - hand).normalize() * HAND_SPEED
        };

        let lift = if moving {
            steady = 0;
            0.0
        } else if target.is_some() && steady >= AIM_FRAMES {
            steady = 0;
            THUMB_FLICK
        } else {
            steady += 1;
            0.0
        };

        feed.push_frame(t, Some(gun_pose(hand, lift).as_slice().to_vec()));
        view = game.frame(t);
    }

    println!(
        "Session over after {:.1}s: score {} | hits {}/{} | outcome {:?}",
        t / 1000.0,
        view.score,
        view.targets_hit,
        view.shots_fired,
        view.outcome
    );

    game.teardown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
