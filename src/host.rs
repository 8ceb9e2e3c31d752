//! Scheduling primitives the embedding environment provides.
//!
//! The engine never owns a thread or a timer. It asks the host for one frame
//! at a time and for a single repeating interval, and the host reports back by
//! calling [`CarouselEngine::on_frame`] and [`CarouselEngine::on_timer`] with
//! the handle it issued. Cancelled handles may still be delivered by a lazy
//! host; the engine drops them.
//!
//! [`CarouselEngine::on_frame`]: crate::engine::CarouselEngine::on_frame
//! [`CarouselEngine::on_timer`]: crate::engine::CarouselEngine::on_timer

use std::time::Duration;

use crate::page::Direction;

/// Handle for one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for a repeating interval timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

pub trait Host {
    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> f64;

    /// Schedule a single callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start a repeating timer firing every `period`.
    fn start_interval(&mut self, period: Duration) -> TimerHandle;

    fn cancel_interval(&mut self, handle: TimerHandle);

    /// Called when a user gesture commits a page change.
    fn haptic_feedback(&mut self, _direction: Direction) {}
}

/// Deterministic host for tests and headless embedding.
///
/// Nothing fires on its own: callers advance the clock and pull pending
/// frames or intervals out explicitly.
#[derive(Debug, Default)]
pub struct ManualHost {
    now_ms: f64,
    next_handle: u64,
    frames: Vec<FrameHandle>,
    intervals: Vec<(TimerHandle, Duration)>,
    haptics: Vec<Direction>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    /// Remove and return the oldest pending frame.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    pub fn pending_frames(&self) -> &[FrameHandle] {
        &self.frames
    }

    pub fn active_intervals(&self) -> Vec<TimerHandle> {
        self.intervals.iter().map(|(handle, _)| *handle).collect()
    }

    pub fn interval_period(&self, handle: TimerHandle) -> Option<Duration> {
        self.intervals
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, period)| *period)
    }

    /// Haptic pulses requested so far, oldest first.
    pub fn haptics(&self) -> &[Direction] {
        &self.haptics
    }

    /// True while any frame or interval is outstanding.
    pub fn has_scheduled_work(&self) -> bool {
        !self.frames.is_empty() || !self.intervals.is_empty()
    }

    fn issue(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Host for ManualHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.issue());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn start_interval(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.issue());
        self.intervals.push((handle, period));
        handle
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        self.intervals.retain(|(h, _)| *h != handle);
    }

    fn haptic_feedback(&mut self, direction: Direction) {
        self.haptics.push(direction);
    }
}
