//! Single-contact drag: bounded progress while moving, commit or cancel on release.

use crate::page::Direction;

/// Snapshot of the active drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub start_position: f64,
    pub current_position: f64,
    /// `delta / threshold`, clamped to `[-1, 1]`
    pub progress: f64,
    pub active: bool,
}

/// Outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Total displacement, `current - start`
    pub delta: f64,
    /// Page transition to commit, if the drag went past half the threshold
    pub transition: Option<Direction>,
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    threshold_px: f64,
}

impl DragController {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            state: DragState::default(),
            threshold_px,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn begin(&mut self, position: f64) {
        self.state = DragState {
            start_position: position,
            current_position: position,
            progress: 0.0,
            active: true,
        };
    }

    /// Move the drag to `position` and return the new progress.
    pub fn update(&mut self, position: f64) -> f64 {
        if !self.state.active {
            log::debug!("Ignoring drag update with no active drag");
            return 0.0;
        }
        self.state.current_position = position;
        let delta = position - self.state.start_position;
        self.state.progress = (delta / self.threshold_px).clamp(-1.0, 1.0);
        self.state.progress
    }

    /// End the drag and decide whether it commits a page transition.
    ///
    /// Anything past half the threshold commits exactly one step: positive
    /// deltas reveal the previous page, negative ones the next.
    pub fn release(&mut self) -> Option<DragRelease> {
        if !self.state.active {
            log::debug!("Ignoring release with no active drag");
            return None;
        }
        let delta = self.state.current_position - self.state.start_position;
        self.state = DragState::default();

        let transition = if delta.abs() > self.threshold_px / 2.0 {
            Direction::from_motion(delta)
        } else {
            None
        };
        Some(DragRelease { delta, transition })
    }

    /// Abandon the drag without committing anything.
    pub fn cancel(&mut self) {
        self.state = DragState::default();
    }
}
