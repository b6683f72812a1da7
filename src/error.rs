//! Error types
//!
//! Capture failures end the session attempt and are shown to the player.
//! Frame faults are per-frame and never leave the tracking pipeline.

use serde::Serialize;
use thiserror::Error;

/// Failure acquiring the camera or the landmark engine
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum TrackingError {
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("No camera device available")]
    DeviceUnavailable,
    #[error("Hand tracking engine failed to load: {0}")]
    EngineInitFailed(String),
}

impl TrackingError {
    /// Map a host-reported failure name (DOMException style) to an error
    pub fn from_host(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDenied" => {
                TrackingError::PermissionDenied
            }
            "NotFoundError" | "OverconstrainedError" | "NotReadableError" | "DeviceUnavailable" => {
                TrackingError::DeviceUnavailable
            }
            _ => TrackingError::EngineInitFailed(message.to_string()),
        }
    }
}

/// A single bad frame of landmark data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameFault {
    #[error("Expected 21 hand landmarks, got {len}")]
    MalformedLandmarkSet { len: usize },
    #[error("Landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host() {
        assert_eq!(
            TrackingError::from_host("NotAllowedError", ""),
            TrackingError::PermissionDenied
        );
        assert_eq!(
            TrackingError::from_host("NotFoundError", ""),
            TrackingError::DeviceUnavailable
        );
        assert_eq!(
            TrackingError::from_host("TypeError", "wasm fetch failed"),
            TrackingError::EngineInitFailed("wasm fetch failed".to_string())
        );
    }

    #[test]
    fn test_display() {
        let err = FrameFault::MalformedLandmarkSet { len: 3 };
        assert_eq!(err.to_string(), "Expected 21 hand landmarks, got 3");
    }
}
