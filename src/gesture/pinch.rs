//! Two-finger pinch scaling.

/// Distances at or below this cannot anchor a ratio.
const MIN_PINCH_DISTANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    /// Finger distance captured when the pinch began
    pub initial_distance: f64,
    pub scale: f64,
    pub active: bool,
}

impl Default for PinchState {
    fn default() -> Self {
        Self {
            initial_distance: 0.0,
            scale: 1.0,
            active: false,
        }
    }
}

/// Derives `clamp(current / initial, min, max)` from two-point distances.
///
/// By default the scale snaps back to 1.0 when the pinch ends. With
/// `reset_on_release` off, the next pinch scales relative to the kept value.
#[derive(Debug, Clone)]
pub struct PinchZoomController {
    state: PinchState,
    min_scale: f64,
    max_scale: f64,
    reset_on_release: bool,
    base_scale: f64,
}

impl PinchZoomController {
    pub fn new(min_scale: f64, max_scale: f64, reset_on_release: bool) -> Self {
        Self {
            state: PinchState::default(),
            min_scale,
            max_scale,
            reset_on_release,
            base_scale: 1.0,
        }
    }

    pub fn state(&self) -> PinchState {
        self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn begin(&mut self, distance: f64) {
        self.state.active = true;
        self.state.initial_distance = distance;
        self.state.scale = self.base_scale;
        if distance.is_nan() || distance <= MIN_PINCH_DISTANCE {
            log::debug!("Pinch started with degenerate distance {}", distance);
        }
    }

    /// Apply a new finger distance and return the resulting scale.
    pub fn update(&mut self, distance: f64) -> f64 {
        if !self.state.active {
            log::debug!("Ignoring pinch update with no active pinch");
            return self.state.scale;
        }
        if !(distance.is_finite() && distance > MIN_PINCH_DISTANCE) {
            log::debug!("Skipping pinch update with distance {}", distance);
            return self.state.scale;
        }
        let initial = self.state.initial_distance;
        if initial.is_nan() || initial <= MIN_PINCH_DISTANCE {
            // Fingers started on top of each other; measure from here instead.
            self.state.initial_distance = distance;
            return self.state.scale;
        }

        let ratio = distance / self.state.initial_distance;
        self.state.scale = (self.base_scale * ratio).clamp(self.min_scale, self.max_scale);
        self.state.scale
    }

    pub fn end(&mut self) {
        if self.reset_on_release {
            self.base_scale = 1.0;
        } else {
            self.base_scale = self.state.scale;
        }
        self.state = PinchState {
            initial_distance: 0.0,
            scale: self.base_scale,
            active: false,
        };
    }
}
