//! Terminal rendering for the carousel demo.
//!
//! This module contains all UI rendering logic including:
//! - Page card, page dots, drag gauge and status line
//! - Gradient utilities

pub mod gradient;
mod render;

pub use render::{card_rect, ui};
