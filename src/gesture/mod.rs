//! Gesture intake: raw pointer/touch events in, drag and pinch signals out.
//!
//! - `tracker`: contact bookkeeping, single drag vs two-finger pinch
//! - `velocity`: instantaneous velocity from consecutive samples
//! - `drag`: drag progress and the commit/cancel decision on release
//! - `pinch`: clamped zoom scale from two-point distance

pub mod drag;
pub mod pinch;
pub mod tracker;
pub mod velocity;

pub use drag::{DragController, DragRelease, DragState};
pub use pinch::{PinchState, PinchZoomController};
pub use tracker::{InputSource, InputTracker, TrackedInput};
pub use velocity::VelocityEstimator;

/// One recorded input event along the drag axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Position in pixels
    pub position: f64,
    /// Host clock reading in milliseconds
    pub timestamp_ms: f64,
}

impl GestureSample {
    pub fn new(position: f64, timestamp_ms: f64) -> Self {
        Self {
            position,
            timestamp_ms,
        }
    }
}

/// A touch contact point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &TouchPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
