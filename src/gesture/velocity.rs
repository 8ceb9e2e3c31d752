//! Instantaneous velocity from consecutive gesture samples.

use super::GestureSample;

/// Default multiplier bringing px/ms into a convenient range.
pub const DEFAULT_VELOCITY_SCALE: f64 = 10.0;

/// Tracks `(position - previous) / dt * scale` across a drag.
///
/// Samples with a non-positive time delta leave the velocity untouched, so
/// duplicate timestamps never divide by zero.
#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    scale: f64,
    previous: Option<GestureSample>,
    velocity: f64,
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_SCALE)
    }
}

impl VelocityEstimator {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            previous: None,
            velocity: 0.0,
        }
    }

    /// Start a fresh estimate anchored at `sample`.
    pub fn begin(&mut self, sample: GestureSample) {
        self.previous = Some(sample);
        self.velocity = 0.0;
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.velocity = 0.0;
    }

    /// Record a sample and return the current velocity.
    pub fn update(&mut self, sample: GestureSample) -> f64 {
        let Some(previous) = self.previous else {
            self.previous = Some(sample);
            return self.velocity;
        };

        let dt = sample.timestamp_ms - previous.timestamp_ms;
        if dt <= 0.0 || dt.is_nan() {
            log::debug!("Keeping velocity {} for sample with dt={}ms", self.velocity, dt);
            return self.velocity;
        }

        let velocity = (sample.position - previous.position) / dt * self.scale;
        if !velocity.is_finite() {
            log::debug!("Dropping non-finite velocity from sample {:?}", sample);
            return self.velocity;
        }

        self.velocity = velocity;
        self.previous = Some(sample);
        self.velocity
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_uses_scale() {
        let mut estimator = VelocityEstimator::default();
        estimator.begin(GestureSample::new(0.0, 0.0));
        assert_eq!(estimator.update(GestureSample::new(-40.0, 100.0)), -4.0);
    }

    #[test]
    fn test_duplicate_timestamp_keeps_previous_velocity() {
        let mut estimator = VelocityEstimator::default();
        estimator.begin(GestureSample::new(0.0, 0.0));
        estimator.update(GestureSample::new(20.0, 10.0));
        assert_eq!(estimator.update(GestureSample::new(500.0, 10.0)), 20.0);
    }

    #[test]
    fn test_time_going_backwards_keeps_previous_velocity() {
        let mut estimator = VelocityEstimator::new(1.0);
        estimator.begin(GestureSample::new(0.0, 50.0));
        estimator.update(GestureSample::new(10.0, 60.0));
        assert_eq!(estimator.update(GestureSample::new(90.0, 40.0)), 1.0);
    }

    #[test]
    fn test_nan_timestamp_keeps_previous_velocity() {
        let mut estimator = VelocityEstimator::new(1.0);
        estimator.begin(GestureSample::new(0.0, 0.0));
        estimator.update(GestureSample::new(10.0, 10.0));
        assert_eq!(estimator.update(GestureSample::new(90.0, f64::NAN)), 1.0);
        assert_eq!(estimator.update(GestureSample::new(30.0, 20.0)), 2.0);
    }

    #[test]
    fn test_begin_resets_velocity() {
        let mut estimator = VelocityEstimator::default();
        estimator.begin(GestureSample::new(0.0, 0.0));
        estimator.update(GestureSample::new(30.0, 10.0));
        estimator.begin(GestureSample::new(5.0, 20.0));
        assert_eq!(estimator.velocity(), 0.0);
    }
}
