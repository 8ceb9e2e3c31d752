use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// RGB color represented as a 3-element array.
pub type Rgb = [u8; 3];

/// Gesture constants that are tuned rather than chosen per product surface.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureTuning {
    /// Multiplier bringing px/ms velocities into a convenient range
    pub velocity_scale: f64,
    /// Release velocity above which momentum scrolling starts
    pub inertia_start_threshold: f64,
    /// Velocity above which an inertia step also moves one page
    pub inertia_transition_threshold: f64,
    /// Velocity below which momentum scrolling halts
    pub inertia_stop_threshold: f64,
    /// Lower pinch scale bound
    pub min_scale: f64,
    /// Upper pinch scale bound
    pub max_scale: f64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            velocity_scale: 10.0,
            inertia_start_threshold: 1.0,
            inertia_transition_threshold: 2.0,
            inertia_stop_threshold: 0.1,
            min_scale: 0.5,
            max_scale: 2.0,
        }
    }
}

/// Per-instance carousel configuration.
///
/// An engine never mutates its config; `CarouselEngine::configure` swaps in a
/// whole new validated value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Items shown on one page
    pub items_per_page: usize,
    /// Total number of items in the carousel
    pub total_items: usize,
    /// Pixel displacement that maps to a full drag progress of ±1
    pub drag_threshold_px: f64,
    /// Per-step velocity decay during inertia
    pub friction_coefficient: f64,
    /// Extra decay applied after an inertia step changes page
    pub transition_damping: f64,
    /// Autoplay period in milliseconds
    pub autoplay_interval_ms: u64,
    /// Wrap around at both ends instead of clamping
    pub infinite: bool,
    /// Whether autoplay runs at all for this instance
    pub autoplay: bool,
    /// Reset pinch scale to 1.0 when a pinch ends
    pub reset_scale_on_release: bool,
    pub tuning: GestureTuning,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            items_per_page: 3,
            total_items: 0,
            drag_threshold_px: 100.0,
            friction_coefficient: 0.95,
            transition_damping: 0.7,
            autoplay_interval_ms: 6500,
            infinite: false,
            autoplay: true,
            reset_scale_on_release: true,
            tuning: GestureTuning::default(),
        }
    }
}

impl CarouselConfig {
    /// Full-width hero banner: one item per page, wrapping, short drags.
    pub fn hero(total_items: usize) -> Self {
        Self {
            items_per_page: 1,
            total_items,
            drag_threshold_px: 50.0,
            autoplay_interval_ms: 6000,
            infinite: true,
            ..Self::default()
        }
    }

    /// Three-up gallery strip that stops at both ends.
    pub fn gallery(total_items: usize) -> Self {
        Self {
            items_per_page: 3,
            total_items,
            friction_coefficient: 0.92,
            autoplay_interval_ms: 7000,
            ..Self::default()
        }
    }

    /// Dense four-up row with stronger damping.
    pub fn compact(total_items: usize) -> Self {
        Self {
            items_per_page: 4,
            total_items,
            drag_threshold_px: 80.0,
            friction_coefficient: 0.9,
            transition_damping: 0.6,
            infinite: true,
            ..Self::default()
        }
    }

    /// Parse a carousel section from TOML and validate it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: CarouselConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of pages, `ceil(total_items / items_per_page)`.
    ///
    /// Zero items per page would divide by zero; such configs never pass
    /// [`validate`](Self::validate), and this returns 0 for them.
    pub fn page_count(&self) -> usize {
        if self.items_per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.items_per_page)
    }

    /// Highest reachable index in bounded mode.
    pub fn max_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Whether there is more than one page worth of items to rotate through.
    pub fn has_overflow(&self) -> bool {
        self.total_items > self.items_per_page
    }

    /// Check every numeric parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 {
            return Err(ConfigError::ZeroItemsPerPage);
        }
        if !positive_finite(self.drag_threshold_px) {
            return Err(ConfigError::DragThreshold(self.drag_threshold_px));
        }
        let friction = self.friction_coefficient;
        if !(friction.is_finite() && friction > 0.0 && friction < 1.0) {
            return Err(ConfigError::Friction(friction));
        }
        let damping = self.transition_damping;
        if !(damping.is_finite() && damping > 0.0 && damping <= 1.0) {
            return Err(ConfigError::TransitionDamping(damping));
        }
        if self.autoplay_interval_ms == 0 {
            return Err(ConfigError::ZeroAutoplayInterval);
        }
        self.tuning.validate()
    }
}

impl GestureTuning {
    /// Check thresholds and scale bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive_finite(self.velocity_scale) {
            return Err(ConfigError::VelocityScale(self.velocity_scale));
        }
        for (name, value) in [
            ("inertia_start_threshold", self.inertia_start_threshold),
            ("inertia_transition_threshold", self.inertia_transition_threshold),
            ("inertia_stop_threshold", self.inertia_stop_threshold),
        ] {
            if !positive_finite(value) {
                return Err(ConfigError::Threshold { name, value });
            }
        }
        if self.inertia_stop_threshold >= self.inertia_start_threshold {
            return Err(ConfigError::ThresholdOrder {
                start: self.inertia_start_threshold,
                stop: self.inertia_stop_threshold,
            });
        }
        let (min, max) = (self.min_scale, self.max_scale);
        if !(positive_finite(min) && max.is_finite() && min <= 1.0 && max >= 1.0) {
            return Err(ConfigError::ScaleBounds { min, max });
        }
        Ok(())
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Terminal demo timing and layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frame duration in milliseconds while inertia runs
    pub frame_ms: u64,
    /// Idle polling interval in milliseconds
    pub idle_poll_ms: u64,
    /// Horizontal pixels represented by one terminal column
    pub px_per_column: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16, // ~60 FPS
            idle_poll_ms: 50,
            px_per_column: 8.0,
        }
    }
}

/// Color configuration for the demo UI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Page card gradient start color (Purple by default)
    pub card_gradient_start: Rgb,
    /// Page card gradient end color (Blue by default)
    pub card_gradient_end: Rgb,
    /// Active page dot
    pub dot_active: Rgb,
    /// Inactive page dot
    pub dot_inactive: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            card_gradient_start: [147, 51, 234], // Purple
            card_gradient_end: [59, 130, 246],   // Blue
            dot_active: [0, 255, 255],           // Cyan
            dot_inactive: [80, 80, 100],
        }
    }
}

impl ColorConfig {
    /// Convert an RGB array to a tuple for gradient helpers.
    pub fn to_tuple(rgb: &Rgb) -> (u8, u8, u8) {
        (rgb[0], rgb[1], rgb[2])
    }

    /// Get card gradient colors as tuples.
    pub fn card_gradient(&self) -> ((u8, u8, u8), (u8, u8, u8)) {
        (
            Self::to_tuple(&self.card_gradient_start),
            Self::to_tuple(&self.card_gradient_end),
        )
    }

    /// Convert an RGB array to a ratatui Color.
    pub fn to_color(rgb: &Rgb) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub demo: DemoConfig,
    pub colors: ColorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // The demo needs something to page through.
            carousel: CarouselConfig::gallery(12),
            demo: DemoConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path: ~/.config/carousel-engine/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("carousel-engine").join("config.toml"))
    }

    /// Load configuration from the default path.
    ///
    /// Defaults are used only when there is no config file. A file that
    /// exists but fails to parse or validate is an error.
    pub fn load() -> anyhow::Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(path),
            None => {
                log::debug!("No config directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from `path`, or defaults if the file is missing.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(path)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load configuration from a specific path.
    ///
    /// The carousel section is validated; a file that parses but describes
    /// an unusable carousel is an error.
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.carousel.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
