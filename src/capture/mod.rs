//! Camera and landmark engine boundary
//!
//! The core never talks to a camera directly. A `CaptureDevice` hands out a
//! `Capture` once permission and the engine are ready; dropping the capture
//! releases both. Only the newest frame is ever looked at.

pub mod feed;

pub use feed::{FeedDevice, HostFeed};

use crate::error::TrackingError;
use crate::tracking::Landmark;

/// Video frames as they arrive
pub trait FrameSource {
    type Frame;

    /// Enough data to run inference on
    fn is_ready(&self) -> bool;

    /// Newest frame with its presentation time; older frames are gone
    fn current_frame(&mut self) -> Option<(f64, Self::Frame)>;

    /// Stop the camera
    fn release(&mut self);
}

/// Hand landmark inference
pub trait LandmarkEngine<F> {
    /// Zero or more hands, 21 landmarks each (only the first is used)
    fn detect(&mut self, frame: &F, timestamp_ms: f64) -> Vec<Vec<Landmark>>;

    fn close(&mut self);
}

/// Something that can open a capture. Acquisition may take several frames:
/// `Ok(None)` means "still waiting".
pub trait CaptureDevice {
    type Source: FrameSource;
    type Engine: LandmarkEngine<<Self::Source as FrameSource>::Frame>;

    fn acquire(&mut self) -> Result<Option<Capture<Self::Source, Self::Engine>>, TrackingError>;
}

/// Result of polling the capture once
#[derive(Debug, Clone, PartialEq)]
pub enum FramePoll {
    /// Camera not ready or no frame since the last poll
    NoNewFrame,
    NoHand,
    Hand(Vec<Landmark>),
}

/// A live camera + engine pair, released on drop
pub struct Capture<S: FrameSource, E: LandmarkEngine<S::Frame>> {
    source: S,
    engine: E,
    last_frame_ms: Option<f64>,
}

impl<S: FrameSource, E: LandmarkEngine<S::Frame>> Capture<S, E> {
    pub fn new(source: S, engine: E) -> Self {
        Self {
            source,
            engine,
            last_frame_ms: None,
        }
    }

    /// Run inference on the newest frame, if there is one we have not seen
    pub fn poll(&mut self, timestamp_ms: f64) -> FramePoll {
        if !self.source.is_ready() {
            return FramePoll::NoNewFrame;
        }
        let Some((frame_ms, frame)) = self.source.current_frame() else {
            return FramePoll::NoNewFrame;
        };
        if self.last_frame_ms == Some(frame_ms) {
            return FramePoll::NoNewFrame;
        }
        self.last_frame_ms = Some(frame_ms);

        match self.engine.detect(&frame, timestamp_ms).into_iter().next() {
            Some(hand) => FramePoll::Hand(hand),
            None => FramePoll::NoHand,
        }
    }
}

impl<S: FrameSource, E: LandmarkEngine<S::Frame>> Drop for Capture<S, E> {
    fn drop(&mut self) {
        log::info!("Releasing camera and hand tracking engine");
        self.engine.close();
        self.source.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        frame_ms: f64,
        ready: bool,
        released: Rc<Cell<bool>>,
    }

    impl FrameSource for Counter {
        type Frame = u32;
        fn is_ready(&self) -> bool {
            self.ready
        }
        fn current_frame(&mut self) -> Option<(f64, u32)> {
            Some((self.frame_ms, self.frame_ms as u32))
        }
        fn release(&mut self) {
            self.released.set(true);
        }
    }

    struct OddHands {
        closed: Rc<Cell<bool>>,
    }

    impl LandmarkEngine<u32> for OddHands {
        fn detect(&mut self, frame: &u32, _timestamp_ms: f64) -> Vec<Vec<Landmark>> {
            if frame % 2 == 1 {
                vec![vec![Landmark::default(); 21]]
            } else {
                Vec::new()
            }
        }
        fn close(&mut self) {
            self.closed.set(true);
        }
    }

    fn capture(ready: bool) -> (Capture<Counter, OddHands>, Rc<Cell<bool>>, Rc<Cell<bool>>) {
        let released = Rc::new(Cell::new(false));
        let closed = Rc::new(Cell::new(false));
        let cap = Capture::new(
            Counter {
                frame_ms: 1.0,
                ready,
                released: released.clone(),
            },
            OddHands {
                closed: closed.clone(),
            },
        );
        (cap, released, closed)
    }

    #[test]
    fn test_same_frame_is_not_processed_twice() {
        let (mut cap, _, _) = capture(true);
        assert!(matches!(cap.poll(0.0), FramePoll::Hand(_)));
        assert_eq!(cap.poll(16.0), FramePoll::NoNewFrame);
        cap.source.frame_ms = 2.0;
        assert_eq!(cap.poll(32.0), FramePoll::NoHand);
    }

    #[test]
    fn test_not_ready_yields_nothing() {
        let (mut cap, _, _) = capture(false);
        assert_eq!(cap.poll(0.0), FramePoll::NoNewFrame);
    }

    #[test]
    fn test_drop_releases_everything() {
        let (cap, released, closed) = capture(true);
        drop(cap);
        assert!(released.get());
        assert!(closed.get());
    }
}
