//! Carousel demo - drive the gesture engine from a terminal.
//!
//! Drag with the mouse, page with the arrow keys, pinch with +/-.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Target};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};

use carousel_engine::config::Config;
use carousel_engine::input::{self, TerminalHost};
use carousel_engine::CarouselEngine;

fn init_logger() {
    // Stderr keeps log lines out of the alternate screen buffer.
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .init();
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    // Load configuration before touching the terminal so errors print cleanly
    let config = Config::load()?;

    let host = TerminalHost::new(Duration::from_millis(config.demo.frame_ms));
    let mut engine = CarouselEngine::new(config.carousel.clone(), host)
        .context("invalid carousel configuration")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = input::run_app(&mut terminal, &mut engine, &config);
    engine.dispose();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
