//! Finger-gun pose classification
//!
//! Index finger extended, middle/ring/pinky curled. The thumb is left free
//! because it drives the fire flick.

use super::landmarks::*;

/// Index tip must be this many times farther from the wrist than each
/// curled fingertip
pub const EXTENDED_RATIO: f32 = 1.3;
/// Curled fingertips must sit within this fraction of the index distance
pub const CURLED_FRACTION: f32 = 0.8;

const CURLED_TIPS: [usize; 3] = [MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// True if the hand is making the aiming pose
pub fn classify(hand: &HandLandmarks) -> bool {
    let index = hand.wrist_distance(INDEX_TIP);
    if index <= f32::EPSILON {
        return false;
    }

    CURLED_TIPS.iter().all(|&tip| {
        let d = hand.wrist_distance(tip);
        let extended = index > d * EXTENDED_RATIO;
        let curled = d < index * CURLED_FRACTION;
        extended && curled
    })
}

/// Classify an unvalidated engine result; malformed sets are not aiming
pub fn classify_points(points: &[Landmark]) -> bool {
    HandLandmarks::from_slice(points)
        .map(|hand| classify(&hand))
        .unwrap_or(false)
}
