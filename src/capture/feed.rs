//! Host-fed capture
//!
//! For hosts that run the camera and landmark model themselves (the browser
//! page, the headless demo, tests). The host reports permission results and
//! pushes each inference result; the core sees a normal `CaptureDevice`.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Capture, CaptureDevice, FrameSource, LandmarkEngine};
use crate::error::TrackingError;
use crate::tracking::{HandLandmarks, Landmark};

#[derive(Debug, Clone, PartialEq)]
enum Permission {
    Pending,
    Granted,
    Failed(TrackingError),
}

#[derive(Debug)]
struct FeedState {
    permission: Permission,
    /// Core is waiting on the host to open the camera
    requested: bool,
    ready: bool,
    latest: Option<(f64, Option<Vec<Landmark>>)>,
    acquisitions: u32,
    releases: u32,
}

/// Shared handle between the host and the capture it feeds
#[derive(Debug, Clone)]
pub struct HostFeed(Rc<RefCell<FeedState>>);

impl Default for HostFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFeed {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(FeedState {
            permission: Permission::Pending,
            requested: false,
            ready: false,
            latest: None,
            acquisitions: 0,
            releases: 0,
        })))
    }

    /// The core wants a camera and the host has not answered yet
    pub fn capture_requested(&self) -> bool {
        let state = self.0.borrow();
        state.requested && state.permission == Permission::Pending
    }

    /// Camera permission granted and model loaded
    pub fn report_ready(&self) {
        let mut state = self.0.borrow_mut();
        state.permission = Permission::Granted;
        state.ready = true;
    }

    pub fn report_failure(&self, err: TrackingError) {
        self.0.borrow_mut().permission = Permission::Failed(err);
    }

    /// Video readiness (e.g. `readyState >= 2`)
    pub fn set_ready(&self, ready: bool) {
        self.0.borrow_mut().ready = ready;
    }

    /// Latest inference result; replaces any frame not yet consumed
    pub fn push_frame(&self, frame_ms: f64, hand: Option<Vec<Landmark>>) {
        self.0.borrow_mut().latest = Some((frame_ms, hand));
    }

    /// Same as `push_frame` for a flat `x, y, z` buffer of one hand; empty
    /// means no hand. A malformed buffer counts as no hand.
    pub fn push_flat(&self, frame_ms: f64, values: &[f32]) {
        let hand = if values.is_empty() {
            None
        } else {
            match HandLandmarks::from_flat_xyz(values) {
                Ok(hand) => Some(hand.as_slice().to_vec()),
                Err(e) => {
                    log::debug!("Dropping host frame at {:.0}ms: {}", frame_ms, e);
                    None
                }
            }
        };
        self.push_frame(frame_ms, hand);
    }

    pub fn acquisitions(&self) -> u32 {
        self.0.borrow().acquisitions
    }

    pub fn releases(&self) -> u32 {
        self.0.borrow().releases
    }

    pub fn is_live(&self) -> bool {
        let state = self.0.borrow();
        state.acquisitions > state.releases
    }
}

/// Frame side of a host feed; a frame is the host's inference result
pub struct FeedSource(HostFeed);

impl FrameSource for FeedSource {
    type Frame = Option<Vec<Landmark>>;

    fn is_ready(&self) -> bool {
        self.0.0.borrow().ready
    }

    fn current_frame(&mut self) -> Option<(f64, Self::Frame)> {
        self.0.0.borrow().latest.clone()
    }

    fn release(&mut self) {
        let mut state = self.0.0.borrow_mut();
        state.releases += 1;
        state.ready = false;
        state.latest = None;
        state.permission = Permission::Pending;
    }
}

/// Inference already ran on the host; pass its result through
pub struct FeedEngine;

impl LandmarkEngine<Option<Vec<Landmark>>> for FeedEngine {
    fn detect(&mut self, frame: &Option<Vec<Landmark>>, _timestamp_ms: f64) -> Vec<Vec<Landmark>> {
        frame.iter().cloned().collect()
    }

    fn close(&mut self) {}
}

/// `CaptureDevice` backed by a `HostFeed`
#[derive(Debug, Clone)]
pub struct FeedDevice {
    feed: HostFeed,
}

impl FeedDevice {
    pub fn new(feed: HostFeed) -> Self {
        Self { feed }
    }

    pub fn feed(&self) -> &HostFeed {
        &self.feed
    }
}

impl CaptureDevice for FeedDevice {
    type Source = FeedSource;
    type Engine = FeedEngine;

    fn acquire(&mut self) -> Result<Option<Capture<FeedSource, FeedEngine>>, TrackingError> {
        let mut state = self.feed.0.borrow_mut();
        match state.permission.clone() {
            Permission::Pending => {
                state.requested = true;
                Ok(None)
            }
            Permission::Granted => {
                state.requested = false;
                state.acquisitions += 1;
                drop(state);
                Ok(Some(Capture::new(FeedSource(self.feed.clone()), FeedEngine)))
            }
            Permission::Failed(err) => {
                // The player has to ask again
                state.requested = false;
                state.permission = Permission::Pending;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::FramePoll;

    #[test]
    fn test_pending_until_host_reports() {
        let feed = HostFeed::new();
        let mut device = FeedDevice::new(feed.clone());
        assert!(!feed.capture_requested());
        assert!(device.acquire().unwrap().is_none());
        assert!(feed.capture_requested());

        feed.report_ready();
        assert!(!feed.capture_requested());
        let capture = device.acquire().unwrap();
        assert!(capture.is_some());
        assert!(feed.is_live());
        drop(capture);
        assert!(!feed.is_live());
        assert_eq!(feed.releases(), 1);
    }

    #[test]
    fn test_failure_is_reported_once() {
        let feed = HostFeed::new();
        let mut device = FeedDevice::new(feed.clone());
        feed.report_failure(TrackingError::DeviceUnavailable);
        assert_eq!(device.acquire().err(), Some(TrackingError::DeviceUnavailable));
        // Back to waiting for the host
        assert!(device.acquire().unwrap().is_none());
    }

    #[test]
    fn test_only_latest_frame_is_seen() {
        let feed = HostFeed::new();
        let mut device = FeedDevice::new(feed.clone());
        feed.report_ready();
        let mut capture = device.acquire().unwrap().unwrap();

        feed.push_frame(1.0, None);
        feed.push_frame(2.0, Some(vec![Landmark::default(); 21]));
        assert!(matches!(capture.poll(10.0), FramePoll::Hand(_)));
        assert_eq!(capture.poll(20.0), FramePoll::NoNewFrame);
        feed.push_frame(3.0, None);
        assert_eq!(capture.poll(30.0), FramePoll::NoHand);
    }

    #[test]
    fn test_flat_buffer_frames() {
        let feed = HostFeed::new();
        let mut device = FeedDevice::new(feed.clone());
        feed.report_ready();
        let mut capture = device.acquire().unwrap().unwrap();

        let values: Vec<f32> = (0..63).map(|i| (i % 10) as f32 / 10.0).collect();
        feed.push_flat(1.0, &values);
        match capture.poll(10.0) {
            FramePoll::Hand(points) => {
                assert_eq!(points.len(), 21);
                assert_eq!(points[1], Landmark { x: 0.3, y: 0.4, z: 0.5 });
            }
            other => panic!("expected a hand, got {:?}", other),
        }

        // Truncated buffer and empty buffer both read as no hand
        feed.push_flat(2.0, &values[..30]);
        assert_eq!(capture.poll(20.0), FramePoll::NoHand);
        feed.push_flat(3.0, &[]);
        assert_eq!(capture.poll(30.0), FramePoll::NoHand);
    }
}
