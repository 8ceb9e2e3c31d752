//! Self-pausing autoplay timer.
//!
//! Autoplay runs only while the carousel has more items than fit on a page
//! and nothing else is happening. The first user interaction turns it off for
//! the rest of the instance's life; it is never re-armed.

use std::time::Duration;

use crate::config::CarouselConfig;
use crate::host::{Host, TimerHandle};

#[derive(Debug)]
pub struct AutoPlayScheduler {
    interval: Duration,
    enabled: bool,
    has_overflow: bool,
    disabled_by_interaction: bool,
    timer: Option<TimerHandle>,
}

impl AutoPlayScheduler {
    pub fn new(config: &CarouselConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.autoplay_interval_ms),
            enabled: config.autoplay,
            has_overflow: config.has_overflow(),
            disabled_by_interaction: false,
            timer: None,
        }
    }

    /// Whether autoplay would run if nothing else were active.
    pub fn can_run(&self) -> bool {
        self.enabled && self.has_overflow && !self.disabled_by_interaction
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_by_interaction
    }

    /// True if `handle` is the live autoplay timer.
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.timer == Some(handle)
    }

    /// Start the interval if allowed. Returns whether a timer is running.
    pub fn arm<H: Host>(&mut self, host: &mut H) -> bool {
        if self.timer.is_none() && self.can_run() {
            self.timer = Some(host.start_interval(self.interval));
            log::debug!("Autoplay armed every {:?}", self.interval);
        }
        self.timer.is_some()
    }

    pub fn disarm<H: Host>(&mut self, host: &mut H) {
        if let Some(handle) = self.timer.take() {
            host.cancel_interval(handle);
        }
    }

    /// Permanently disable autoplay after a user interaction.
    pub fn disable<H: Host>(&mut self, host: &mut H) {
        if !self.disabled_by_interaction {
            log::debug!("Autoplay disabled by user interaction");
        }
        self.disabled_by_interaction = true;
        self.disarm(host);
    }

    /// Adopt a new config. The interaction flag survives.
    pub fn reconfigure<H: Host>(&mut self, config: &CarouselConfig, host: &mut H) -> bool {
        self.disarm(host);
        self.interval = Duration::from_millis(config.autoplay_interval_ms);
        self.enabled = config.autoplay;
        self.has_overflow = config.has_overflow();
        self.arm(host)
    }
}
