//! The carousel engine: one event-driven API over all gesture components.
//!
//! Every mutation happens inside an input method or a host callback
//! (`on_frame`, `on_timer`), never concurrently. The engine holds exactly one
//! operating [`Mode`] at a time, so drag, inertia and pinch can never overlap
//! and autoplay only ticks when nothing else is going on.

use std::fmt;

use crate::autoplay::AutoPlayScheduler;
use crate::config::CarouselConfig;
use crate::error::ConfigError;
use crate::gesture::{
    DragController, GestureSample, InputTracker, PinchZoomController, TouchPoint, TrackedInput,
    VelocityEstimator,
};
use crate::host::{FrameHandle, Host, TimerHandle};
use crate::inertia::{InertiaParams, InertiaSimulator};
use crate::page::{Direction, PageIndex};

/// Mutually exclusive operating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Dragging,
    Inertia,
    Pinching,
    AutoPlaying,
}

/// Read-only view of the engine handed to renderers and subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSnapshot {
    pub current_index: usize,
    pub page_count: usize,
    pub mode: Mode,
    /// Drag progress in `[-1, 1]`, zero outside a drag
    pub drag_progress: f64,
    /// Pinch scale in `[min_scale, max_scale]`
    pub scale: f64,
}

/// Identifies a state-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CarouselSnapshot)>;

/// The single mutable carousel state. Only the engine writes to it.
#[derive(Debug)]
struct CarouselState {
    page: PageIndex,
    mode: Mode,
}

/// Gesture components rebuilt whenever the config changes.
#[derive(Debug)]
struct Gestures {
    tracker: InputTracker,
    velocity: VelocityEstimator,
    drag: DragController,
    inertia: InertiaSimulator,
    pinch: PinchZoomController,
}

impl Gestures {
    fn from_config(config: &CarouselConfig) -> Self {
        Self {
            tracker: InputTracker::new(),
            velocity: VelocityEstimator::new(config.tuning.velocity_scale),
            drag: DragController::new(config.drag_threshold_px),
            inertia: InertiaSimulator::new(InertiaParams::from_config(config)),
            pinch: PinchZoomController::new(
                config.tuning.min_scale,
                config.tuning.max_scale,
                config.reset_scale_on_release,
            ),
        }
    }
}

pub struct CarouselEngine<H: Host> {
    config: CarouselConfig,
    state: CarouselState,
    gestures: Gestures,
    autoplay: AutoPlayScheduler,
    /// The one outstanding frame request, if any
    frame: Option<FrameHandle>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_published: CarouselSnapshot,
    disposed: bool,
    host: H,
}

impl<H: Host> CarouselEngine<H> {
    /// Validate `config` and build an engine driven by `host`.
    ///
    /// Autoplay is armed immediately when the config allows it.
    pub fn new(config: CarouselConfig, mut host: H) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut autoplay = AutoPlayScheduler::new(&config);
        let mode = if autoplay.arm(&mut host) {
            Mode::AutoPlaying
        } else {
            Mode::Idle
        };
        let state = CarouselState {
            page: PageIndex::from_config(&config),
            mode,
        };
        let last_published = CarouselSnapshot {
            current_index: state.page.current(),
            page_count: state.page.page_count(),
            mode,
            drag_progress: 0.0,
            scale: 1.0,
        };

        Ok(Self {
            gestures: Gestures::from_config(&config),
            config,
            state,
            autoplay,
            frame: None,
            listeners: Vec::new(),
            next_subscription: 0,
            last_published,
            disposed: false,
            host,
        })
    }

    /// Replace the configuration.
    ///
    /// Invalid configs are rejected and leave the engine untouched. A valid
    /// one cancels any gesture or momentum in flight, re-normalizes the
    /// current index into the new bounds and re-arms autoplay unless a user
    /// interaction already disabled it.
    pub fn configure(&mut self, config: CarouselConfig) -> Result<(), ConfigError> {
        config.validate()?;

        self.cancel_frame();
        self.gestures = Gestures::from_config(&config);
        self.state
            .page
            .reconfigure(config.page_count(), config.infinite);

        let armed = if self.disposed {
            false
        } else {
            self.autoplay.reconfigure(&config, &mut self.host)
        };
        self.config = config;
        self.set_mode(if armed { Mode::AutoPlaying } else { Mode::Idle });
        self.publish();
        Ok(())
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access for drivers and tests. Scheduling state lives in
    /// the engine; cancelling its handles behind its back only makes it wait.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn page_count(&self) -> usize {
        self.state.page.page_count()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current snapshot.
    pub fn state(&self) -> CarouselSnapshot {
        let drag_progress = if self.state.mode == Mode::Dragging {
            self.gestures.drag.progress()
        } else {
            0.0
        };
        CarouselSnapshot {
            current_index: self.state.page.current(),
            page_count: self.state.page.page_count(),
            mode: self.state.mode,
            drag_progress,
            scale: self.gestures.pinch.scale(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Register a callback invoked whenever the snapshot changes.
    pub fn on_state_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CarouselSnapshot) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    fn publish(&mut self) {
        if self.disposed {
            return;
        }
        let snapshot = self.state();
        if snapshot == self.last_published {
            return;
        }
        self.last_published = snapshot;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Input intake
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn on_pointer_down(&mut self, x: f64) {
        if self.ignore_when_disposed("pointer down") {
            return;
        }
        let now = self.host.now_ms();
        let input = self.gestures.tracker.pointer_down(x, now);
        self.dispatch(input);
    }

    pub fn on_pointer_move(&mut self, x: f64) {
        if self.ignore_when_disposed("pointer move") {
            return;
        }
        let now = self.host.now_ms();
        let input = self.gestures.tracker.pointer_move(x, now);
        self.dispatch(input);
    }

    pub fn on_pointer_up(&mut self) {
        if self.ignore_when_disposed("pointer up") {
            return;
        }
        let input = self.gestures.tracker.pointer_up();
        self.dispatch(input);
    }

    /// Feed every current touch contact. Zero, one or two points are
    /// meaningful; extra points are dropped.
    pub fn on_touches_change(&mut self, points: &[TouchPoint]) {
        if self.ignore_when_disposed("touch change") {
            return;
        }
        let now = self.host.now_ms();
        let input = self.gestures.tracker.touches_changed(points, now);
        self.dispatch(input);
    }

    fn dispatch(&mut self, input: Option<TrackedInput>) {
        let Some(input) = input else {
            return;
        };
        match input {
            TrackedInput::DragStart(sample) => self.begin_drag(sample),
            TrackedInput::DragMove(sample) => self.move_drag(sample),
            TrackedInput::DragEnd(_) => self.release_drag(),
            TrackedInput::PinchStart { distance } => self.begin_pinch(distance),
            TrackedInput::PinchMove { distance } => self.move_pinch(distance),
            TrackedInput::PinchEnd => self.end_pinch(),
        }
        self.publish();
    }

    fn begin_drag(&mut self, sample: GestureSample) {
        self.stop_inertia();
        self.disable_autoplay();
        self.gestures.drag.begin(sample.position);
        self.gestures.velocity.begin(sample);
        self.set_mode(Mode::Dragging);
    }

    fn move_drag(&mut self, sample: GestureSample) {
        if self.state.mode != Mode::Dragging {
            log::debug!("Ignoring drag move in {:?}", self.state.mode);
            return;
        }
        self.gestures.drag.update(sample.position);
        self.gestures.velocity.update(sample);
    }

    fn release_drag(&mut self) {
        if self.state.mode != Mode::Dragging {
            log::debug!("Ignoring drag release in {:?}", self.state.mode);
            return;
        }
        let release = self.gestures.drag.release();
        if let Some(direction) = release.and_then(|r| r.transition) {
            self.commit(direction);
        }

        let velocity = self.gestures.velocity.velocity();
        self.gestures.velocity.reset();
        if self.gestures.inertia.start(velocity) {
            self.set_mode(Mode::Inertia);
            self.request_frame();
        } else {
            self.set_mode(Mode::Idle);
        }
    }

    fn begin_pinch(&mut self, distance: f64) {
        if self.state.mode == Mode::Dragging {
            self.gestures.drag.cancel();
            self.gestures.velocity.reset();
        }
        self.stop_inertia();
        self.disable_autoplay();
        self.gestures.pinch.begin(distance);
        self.set_mode(Mode::Pinching);
    }

    fn move_pinch(&mut self, distance: f64) {
        if self.state.mode != Mode::Pinching {
            log::debug!("Ignoring pinch move in {:?}", self.state.mode);
            return;
        }
        self.gestures.pinch.update(distance);
    }

    fn end_pinch(&mut self) {
        if self.state.mode != Mode::Pinching {
            log::debug!("Ignoring pinch end in {:?}", self.state.mode);
            return;
        }
        self.gestures.pinch.end();
        self.set_mode(Mode::Idle);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Manual navigation
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn navigate_next(&mut self) {
        self.navigate(Some(Direction::Next), |page| page.next());
    }

    pub fn navigate_previous(&mut self) {
        self.navigate(Some(Direction::Previous), |page| page.previous());
    }

    /// Jump to `index`, wrapped or clamped by the carousel's policy.
    pub fn go_to(&mut self, index: i64) {
        self.navigate(None, |page| page.go_to(index));
    }

    /// Apply a manual page change. Jumps without a stated direction report
    /// the one implied by the index change.
    fn navigate(
        &mut self,
        direction: Option<Direction>,
        apply: impl FnOnce(&mut PageIndex) -> bool,
    ) {
        if self.ignore_when_disposed("navigation") {
            return;
        }
        self.disable_autoplay();
        if self.state.mode == Mode::Inertia {
            self.stop_inertia();
            self.set_mode(Mode::Idle);
        }

        let before = self.state.page.current();
        if apply(&mut self.state.page) {
            let direction = direction.unwrap_or(if self.state.page.current() > before {
                Direction::Next
            } else {
                Direction::Previous
            });
            self.host.haptic_feedback(direction);
        }
        self.publish();
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Host callbacks
    // ─────────────────────────────────────────────────────────────────────────────

    /// Run one inertia step for the frame the engine requested.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.ignore_when_disposed("frame") {
            return;
        }
        if self.frame != Some(handle) {
            log::debug!("Ignoring stale frame {:?}", handle);
            return;
        }
        self.frame = None;
        if self.state.mode != Mode::Inertia {
            log::debug!("Frame delivered outside inertia ({:?})", self.state.mode);
            return;
        }

        let step = self.gestures.inertia.step();
        if let Some(direction) = step.transition {
            self.commit(direction);
        }
        if step.finished {
            self.set_mode(Mode::Idle);
        } else {
            self.request_frame();
        }
        self.publish();
    }

    /// Advance one page for the autoplay timer.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.ignore_when_disposed("timer") {
            return;
        }
        if !self.autoplay.owns(handle) {
            log::debug!("Ignoring stale timer {:?}", handle);
            return;
        }
        if self.state.mode != Mode::AutoPlaying {
            log::debug!("Autoplay tick skipped in {:?}", self.state.mode);
            return;
        }
        self.state.page.next();
        self.publish();
    }

    /// Cancel all scheduled work and stop reacting to input. Safe to repeat.
    pub fn dispose(&mut self) {
        if self.disposed {
            log::debug!("Engine already disposed");
            return;
        }
        self.stop_inertia();
        self.autoplay.disarm(&mut self.host);
        self.gestures.drag.cancel();
        self.gestures.pinch.end();
        self.gestures.tracker.reset();
        self.set_mode(Mode::Idle);
        self.listeners.clear();
        self.disposed = true;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────────

    /// Commit one user-driven page transition.
    fn commit(&mut self, direction: Direction) {
        if self.state.page.step(direction) {
            self.host.haptic_feedback(direction);
        }
    }

    fn request_frame(&mut self) {
        if self.frame.is_none() {
            self.frame = Some(self.host.request_frame());
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.host.cancel_frame(handle);
        }
    }

    fn stop_inertia(&mut self) {
        self.gestures.inertia.cancel();
        self.cancel_frame();
    }

    fn disable_autoplay(&mut self) {
        self.autoplay.disable(&mut self.host);
        if self.state.mode == Mode::AutoPlaying {
            self.set_mode(Mode::Idle);
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            log::debug!("Carousel mode {:?} -> {:?}", self.state.mode, mode);
            self.state.mode = mode;
        }
    }

    fn ignore_when_disposed(&self, what: &str) -> bool {
        if self.disposed {
            log::debug!("Ignoring {} after dispose", what);
        }
        self.disposed
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for CarouselEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("frame", &self.frame)
            .field("listeners", &self.listeners.len())
            .field("disposed", &self.disposed)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}
