//! Carousel Engine - a framework-independent carousel gesture engine.
//!
//! Turns raw pointer and touch events into page transitions with momentum
//! scrolling, pinch scaling and a self-pausing autoplay timer. The host
//! supplies frames, timers and a clock through [`host::Host`]; renderers read
//! [`engine::CarouselSnapshot`] values.
//!
//! The `input` and `ui` modules are the terminal demo built on top.

pub mod autoplay;
pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod host;
pub mod inertia;
pub mod input;
pub mod page;
pub mod ui;

pub use config::{CarouselConfig, GestureTuning};
pub use engine::{CarouselEngine, CarouselSnapshot, Mode, SubscriptionId};
pub use error::ConfigError;
pub use host::{FrameHandle, Host, ManualHost, TimerHandle};
pub use page::Direction;
