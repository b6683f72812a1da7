//! Gesture-to-aim pipeline
//!
//! Turns raw hand landmarks into an aim point, an aiming flag and fire events.
//! Per frame the stages run in a fixed order: pose classification, position
//! smoothing, then shot detection. Nothing here knows about targets or score.

pub mod filter;
pub mod gesture;
pub mod landmarks;
pub mod pipeline;
pub mod poses;
pub mod shot;

pub use filter::PositionFilter;
pub use gesture::{classify, classify_points};
pub use landmarks::{HandLandmarks, Landmark, LANDMARK_COUNT};
pub use pipeline::{AimFrame, AimPipeline, AimSample, FilteredAim, FireEvent};
pub use shot::ShotDetector;
