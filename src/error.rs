//! Construction-time errors.
//!
//! Only configuration can fail. Once an engine exists, every operation on it
//! is infallible and degenerate input is logged and dropped instead.

use thiserror::Error;

/// Reasons a [`CarouselConfig`](crate::config::CarouselConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("items_per_page must be at least 1")]
    ZeroItemsPerPage,

    #[error("drag_threshold_px must be a positive finite number, got {0}")]
    DragThreshold(f64),

    #[error("friction_coefficient must lie in (0, 1), got {0}")]
    Friction(f64),

    #[error("transition_damping must lie in (0, 1], got {0}")]
    TransitionDamping(f64),

    #[error("autoplay_interval_ms must be greater than zero")]
    ZeroAutoplayInterval,

    #[error("velocity_scale must be a positive finite number, got {0}")]
    VelocityScale(f64),

    /// A tuning threshold is non-finite or not positive.
    #[error("{name} must be a positive finite number, got {value}")]
    Threshold { name: &'static str, value: f64 },

    #[error("inertia_stop_threshold ({stop}) must be below inertia_start_threshold ({start})")]
    ThresholdOrder { start: f64, stop: f64 },

    #[error("scale bounds must satisfy 0 < min_scale <= 1 <= max_scale, got [{min}, {max}]")]
    ScaleBounds { min: f64, max: f64 },

    /// The config file could not be parsed.
    #[error("invalid config file: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_parameter() {
        assert_eq!(
            ConfigError::ZeroItemsPerPage.to_string(),
            "items_per_page must be at least 1"
        );
        let err = ConfigError::Threshold {
            name: "inertia_start_threshold",
            value: -1.0,
        };
        assert!(err.to_string().starts_with("inertia_start_threshold"));
    }
}
