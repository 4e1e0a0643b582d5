//! Error types for viewer configuration.
//!
//! Invalid expressions are not errors: the engine reports them per slot and
//! the controller surfaces them through [`crate::expressions::ValidityReport`].

use thiserror::Error;

/// Errors raised while validating a [`crate::config::ViewerConfig`] or
/// building a [`crate::view_rect::ViewRect`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid view rectangle: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidView {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("invalid zoom limits: min range {min} must be positive and below max range {max}")]
    InvalidZoomLimits { min: f64, max: f64 },

    #[error("initial view width {width} lies outside the zoom limits [{min}, {max}]")]
    ViewOutsideZoomLimits { width: f64, min: f64, max: f64 },

    #[error("{name} must be a positive, finite number (got {value})")]
    NonPositive { name: &'static str, value: f64 },
}
