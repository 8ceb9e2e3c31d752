use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, Terminal};

use crate::config::Config;
use crate::engine::CarouselEngine;
use crate::gesture::TouchPoint;
use crate::host::{FrameHandle, Host, TimerHandle};
use crate::page::Direction;
use crate::ui;

/// Result of handling a key event.
pub enum HandleResult {
    /// Continue running the app
    Continue,
    /// Exit the app
    Exit,
}

/// How long the haptic indicator stays lit.
const HAPTIC_FLASH_MS: u64 = 150;

/// Finger spread a simulated pinch starts from, in pixels.
const PINCH_BASE_SPREAD: f64 = 100.0;

/// Spread change per `+`/`-` key press.
const PINCH_STEP: f64 = 20.0;

/// Callback the terminal host owes the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Frame(FrameHandle),
    Timer(TimerHandle),
}

#[derive(Debug)]
struct Interval {
    handle: TimerHandle,
    period: Duration,
    next_due: Instant,
}

/// Wall-clock host for the terminal demo.
///
/// Frames and intervals are only bookkeeping; the event loop asks for
/// whatever is due and feeds it back into the engine.
#[derive(Debug)]
pub struct TerminalHost {
    started: Instant,
    frame_duration: Duration,
    next_handle: u64,
    frame: Option<(FrameHandle, Instant)>,
    intervals: Vec<Interval>,
    last_haptic: Option<Instant>,
}

impl TerminalHost {
    pub fn new(frame_duration: Duration) -> Self {
        Self {
            started: Instant::now(),
            frame_duration,
            next_handle: 0,
            frame: None,
            intervals: Vec::new(),
            last_haptic: None,
        }
    }

    /// Collect every callback due at `now`, frames first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Due> {
        let mut due = Vec::new();
        if let Some((handle, at)) = self.frame {
            if at <= now {
                self.frame = None;
                due.push(Due::Frame(handle));
            }
        }
        for interval in self.intervals.iter_mut() {
            if interval.next_due <= now {
                interval.next_due = now + interval.period;
                due.push(Due::Timer(interval.handle));
            }
        }
        due
    }

    /// Earliest pending deadline, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        let frame = self.frame.map(|(_, at)| at);
        let timers = self.intervals.iter().map(|i| i.next_due);
        frame.into_iter().chain(timers).min()
    }

    /// Whether a haptic pulse fired recently enough to show.
    pub fn haptic_flash(&self, now: Instant) -> bool {
        self.last_haptic
            .is_some_and(|at| now.duration_since(at) < Duration::from_millis(HAPTIC_FLASH_MS))
    }

    fn issue(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Host for TerminalHost {
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.issue());
        self.frame = Some((handle, Instant::now() + self.frame_duration));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame.is_some_and(|(pending, _)| pending == handle) {
            self.frame = None;
        }
    }

    fn start_interval(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.issue());
        self.intervals.push(Interval {
            handle,
            period,
            next_due: Instant::now() + period,
        });
        handle
    }

    fn cancel_interval(&mut self, handle: TimerHandle) {
        self.intervals.retain(|i| i.handle != handle);
    }

    fn haptic_feedback(&mut self, direction: Direction) {
        log::debug!("Haptic pulse ({:?})", direction);
        self.last_haptic = Some(Instant::now());
    }
}

/// Keyboard-simulated two-finger pinch.
#[derive(Debug, Default)]
pub struct SimulatedPinch {
    spread: Option<f64>,
}

impl SimulatedPinch {
    /// Widen (positive) or narrow (negative) the spread, starting a pinch if needed.
    pub fn adjust(&mut self, engine: &mut CarouselEngine<TerminalHost>, delta: f64) {
        let spread = match self.spread {
            Some(spread) => spread,
            None => {
                engine.on_touches_change(&Self::points(PINCH_BASE_SPREAD));
                PINCH_BASE_SPREAD
            }
        };
        let spread = (spread + delta).max(1.0);
        self.spread = Some(spread);
        engine.on_touches_change(&Self::points(spread));
    }

    /// Lift both fingers.
    pub fn release(&mut self, engine: &mut CarouselEngine<TerminalHost>) {
        if self.spread.take().is_some() {
            engine.on_touches_change(&[]);
        }
    }

    fn points(spread: f64) -> [TouchPoint; 2] {
        [
            TouchPoint::new(-spread / 2.0, 0.0),
            TouchPoint::new(spread / 2.0, 0.0),
        ]
    }
}

/// Run the main application loop.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    engine: &mut CarouselEngine<TerminalHost>,
    config: &Config,
) -> io::Result<()> {
    let idle_poll = Duration::from_millis(config.demo.idle_poll_ms);
    let mut pinch = SimulatedPinch::default();

    loop {
        // Deliver whatever the engine scheduled
        let now = Instant::now();
        for due in engine.host_mut().take_due(now) {
            match due {
                Due::Frame(handle) => engine.on_frame(handle),
                Due::Timer(handle) => engine.on_timer(handle),
            }
        }

        let snapshot = engine.state();
        let flash = engine.host().haptic_flash(Instant::now());
        terminal.draw(|f| ui::ui(f, &snapshot, config, flash))?;

        // Sleep until the next deadline, but keep the haptic flash responsive
        let timeout = engine
            .host()
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(idle_poll, |until| until.min(idle_poll));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key_event(engine, &mut pinch, key.code, key.modifiers) {
                        HandleResult::Exit => return Ok(()),
                        HandleResult::Continue => {}
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(engine, mouse, config.demo.px_per_column);
                }
                _ => {}
            }
        }
    }
}

/// Handle a key event and return whether to continue or exit.
fn handle_key_event(
    engine: &mut CarouselEngine<TerminalHost>,
    pinch: &mut SimulatedPinch,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> HandleResult {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return HandleResult::Exit;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            return HandleResult::Exit;
        }
        KeyCode::Left => engine.navigate_previous(),
        KeyCode::Right => engine.navigate_next(),
        KeyCode::Home => engine.go_to(0),
        KeyCode::End => {
            let last = engine.page_count().saturating_sub(1);
            engine.go_to(last as i64);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => pinch.adjust(engine, PINCH_STEP),
        KeyCode::Char('-') => pinch.adjust(engine, -PINCH_STEP),
        KeyCode::Char('0') | KeyCode::Char(' ') => pinch.release(engine),
        _ => {}
    }
    HandleResult::Continue
}

/// Map left-button mouse events onto the single-pointer intake.
fn handle_mouse_event(
    engine: &mut CarouselEngine<TerminalHost>,
    mouse: MouseEvent,
    px_per_column: f64,
) {
    let x = mouse.column as f64 * px_per_column;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => engine.on_pointer_down(x),
        MouseEventKind::Drag(MouseButton::Left) => engine.on_pointer_move(x),
        MouseEventKind::Up(MouseButton::Left) => engine.on_pointer_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_fires_frame_once() {
        let mut host = TerminalHost::new(Duration::from_millis(16));
        let handle = host.request_frame();
        let later = Instant::now() + Duration::from_millis(50);
        assert_eq!(host.take_due(later), vec![Due::Frame(handle)]);
        assert!(host.take_due(later).is_empty());
    }

    #[test]
    fn test_interval_rearms_after_firing() {
        let mut host = TerminalHost::new(Duration::from_millis(16));
        let handle = host.start_interval(Duration::from_millis(100));
        let later = Instant::now() + Duration::from_millis(150);
        assert_eq!(host.take_due(later), vec![Due::Timer(handle)]);
        assert!(host.take_due(later).is_empty());
        assert!(host.next_deadline().is_some());
    }

    #[test]
    fn test_cancelled_work_never_fires() {
        let mut host = TerminalHost::new(Duration::from_millis(16));
        let frame = host.request_frame();
        let timer = host.start_interval(Duration::from_millis(10));
        host.cancel_frame(frame);
        host.cancel_interval(timer);
        let later = Instant::now() + Duration::from_secs(1);
        assert!(host.take_due(later).is_empty());
        assert_eq!(host.next_deadline(), None);
    }
}
