//! Hand landmark storage
//!
//! 21 normalized keypoints per hand, indexed by anatomical role.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::FrameFault;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Keypoints per detected hand
pub const LANDMARK_COUNT: usize = 21;

/// One normalized keypoint. `z` is relative depth and unused by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A validated set of 21 landmarks for one hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Result<Self, FrameFault> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(FrameFault::NonFiniteLandmark { index });
        }
        Ok(Self { points })
    }

    /// Points built in-crate from finite values
    pub(crate) fn from_trusted(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Validate an engine result of arbitrary length
    pub fn from_slice(points: &[Landmark]) -> Result<Self, FrameFault> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| FrameFault::MalformedLandmarkSet { len: points.len() })?;
        Self::new(points)
    }

    /// Build from a flat `[x0, y0, z0, x1, y1, z1, ...]` buffer
    pub fn from_flat_xyz(values: &[f32]) -> Result<Self, FrameFault> {
        if values.len() != LANDMARK_COUNT * 3 {
            return Err(FrameFault::MalformedLandmarkSet {
                len: values.len() / 3,
            });
        }
        let points: Vec<Landmark> = values
            .chunks_exact(3)
            .map(|c| Landmark { x: c[0], y: c[1], z: c[2] })
            .collect();
        Self::from_slice(&points)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index].xy()
    }

    /// 2-D distance of a landmark from the wrist
    #[inline]
    pub fn wrist_distance(&self, index: usize) -> f32 {
        self.point(index).distance(self.point(WRIST))
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.points
    }
}
