//! Momentum scrolling after release.
//!
//! A fixed-step decay: every step multiplies the velocity by the friction
//! coefficient. While the velocity is still above the transition threshold
//! the step also moves one page and applies the extra transition damping, so
//! a single step can never skip more than one page. Because friction is below
//! one, any finite start velocity falls under the stop threshold in a bounded
//! number of steps (see [`InertiaSimulator::step_bound`]).

use crate::config::CarouselConfig;
use crate::page::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InertiaState {
    pub velocity: f64,
    pub active: bool,
}

/// Decay constants, taken from [`CarouselConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaParams {
    pub friction: f64,
    pub transition_damping: f64,
    pub start_threshold: f64,
    pub transition_threshold: f64,
    pub stop_threshold: f64,
}

impl InertiaParams {
    pub fn from_config(config: &CarouselConfig) -> Self {
        Self {
            friction: config.friction_coefficient,
            transition_damping: config.transition_damping,
            start_threshold: config.tuning.inertia_start_threshold,
            transition_threshold: config.tuning.inertia_transition_threshold,
            stop_threshold: config.tuning.inertia_stop_threshold,
        }
    }
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaStep {
    /// Page move triggered by this step
    pub transition: Option<Direction>,
    /// True once the simulation has halted
    pub finished: bool,
}

impl InertiaStep {
    const HALTED: InertiaStep = InertiaStep {
        transition: None,
        finished: true,
    };
}

#[derive(Debug, Clone)]
pub struct InertiaSimulator {
    params: InertiaParams,
    state: InertiaState,
}

impl InertiaSimulator {
    pub fn new(params: InertiaParams) -> Self {
        Self {
            params,
            state: InertiaState::default(),
        }
    }

    pub fn state(&self) -> InertiaState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Start momentum from a release velocity. Returns whether it started.
    pub fn start(&mut self, release_velocity: f64) -> bool {
        if !release_velocity.is_finite() {
            log::debug!("Not starting inertia from velocity {}", release_velocity);
            self.cancel();
            return false;
        }
        if release_velocity.abs() <= self.params.start_threshold {
            self.cancel();
            return false;
        }
        self.state = InertiaState {
            velocity: release_velocity,
            active: true,
        };
        true
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self) -> InertiaStep {
        if !self.state.active {
            return InertiaStep::HALTED;
        }

        let mut velocity = self.state.velocity * self.params.friction;
        if !velocity.is_finite() {
            log::debug!("Halting inertia on non-finite velocity");
            self.cancel();
            return InertiaStep::HALTED;
        }

        let mut transition = None;
        if velocity.abs() > self.params.transition_threshold {
            transition = Direction::from_motion(velocity);
            velocity *= self.params.transition_damping;
        }

        let finished = velocity.abs() < self.params.stop_threshold;
        self.state = InertiaState {
            velocity: if finished { 0.0 } else { velocity },
            active: !finished,
        };
        log::trace!("Inertia step: velocity={} transition={:?}", velocity, transition);

        InertiaStep {
            transition,
            finished,
        }
    }

    pub fn cancel(&mut self) {
        self.state = InertiaState::default();
    }

    /// Upper bound on the steps needed to halt from `velocity`.
    ///
    /// Friction alone gives `|v| * friction^n < stop`; transition damping only
    /// shortens the run.
    pub fn step_bound(&self, velocity: f64) -> usize {
        let speed = velocity.abs();
        if !speed.is_finite() || speed < self.params.stop_threshold {
            return 1;
        }
        let steps = (self.params.stop_threshold / speed).ln() / self.params.friction.ln();
        steps.ceil() as usize + 1
    }
}
