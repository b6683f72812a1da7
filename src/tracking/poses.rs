//! Synthetic hand poses
//!
//! Used by the headless demo's scripted camera and by tests. Coordinates are
//! camera space (not mirrored), y grows downward.

use glam::Vec2;

use super::landmarks::*;

const FINGER_LENGTH: f32 = 0.3;
const CURLED_LENGTH: f32 = 0.1;

fn finger(points: &mut [Landmark; LANDMARK_COUNT], base: usize, wrist: Vec2, tip: Vec2) {
    // MCP, PIP, DIP, TIP spread evenly along the wrist-tip segment
    for joint in 0..4 {
        let t = 0.4 + 0.2 * joint as f32;
        let p = wrist.lerp(tip, t);
        points[base + joint] = Landmark::new(p.x, p.y);
    }
}

fn build(wrist: Vec2, tips: [Vec2; 5]) -> HandLandmarks {
    let mut points = [Landmark::new(wrist.x, wrist.y); LANDMARK_COUNT];
    finger(&mut points, THUMB_CMC, wrist, tips[0]);
    finger(&mut points, INDEX_MCP, wrist, tips[1]);
    finger(&mut points, MIDDLE_MCP, wrist, tips[2]);
    finger(&mut points, RING_MCP, wrist, tips[3]);
    finger(&mut points, PINKY_MCP, wrist, tips[4]);
    HandLandmarks::from_trusted(points)
}

/// Finger gun with the index tip at `index_tip`; `thumb_lift` raises the
/// thumb tip (positive = up on screen)
pub fn gun_pose(index_tip: Vec2, thumb_lift: f32) -> HandLandmarks {
    let wrist = index_tip + Vec2::new(0.0, FINGER_LENGTH);
    build(
        wrist,
        [
            wrist + Vec2::new(-0.08, -0.15 - thumb_lift),
            index_tip,
            wrist + Vec2::new(0.02, -CURLED_LENGTH),
            wrist + Vec2::new(0.04, -CURLED_LENGTH * 0.9),
            wrist + Vec2::new(0.06, -CURLED_LENGTH * 0.8),
        ],
    )
}

/// All five fingers extended
pub fn open_hand(wrist: Vec2) -> HandLandmarks {
    build(
        wrist,
        [
            wrist + Vec2::new(-0.2, -0.15),
            wrist + Vec2::new(-0.05, -FINGER_LENGTH),
            wrist + Vec2::new(0.0, -FINGER_LENGTH * 1.05),
            wrist + Vec2::new(0.05, -FINGER_LENGTH * 0.98),
            wrist + Vec2::new(0.1, -FINGER_LENGTH * 0.85),
        ],
    )
}

/// All fingers curled
pub fn fist(wrist: Vec2) -> HandLandmarks {
    build(
        wrist,
        [
            wrist + Vec2::new(-0.05, -0.08),
            wrist + Vec2::new(-0.02, -CURLED_LENGTH),
            wrist + Vec2::new(0.0, -CURLED_LENGTH),
            wrist + Vec2::new(0.02, -CURLED_LENGTH * 0.95),
            wrist + Vec2::new(0.04, -CURLED_LENGTH * 0.9),
        ],
    )
}
