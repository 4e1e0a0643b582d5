//! Viewer configuration.

use std::time::Duration;

use bon::Builder;

use crate::error::ConfigError;
use crate::view_rect::ViewRect;
use crate::zoom::ZoomLimits;

/// Tunables for a [`crate::controller::GraphController`]. Every field has a
/// default, so `ViewerConfig::builder().build()` is the stock viewer.
#[derive(Debug, Clone, Builder)]
pub struct ViewerConfig {
    /// View shown before any interaction.
    #[builder(default = ViewRect::DEFAULT)]
    pub initial_view: ViewRect,

    #[builder(default)]
    pub zoom: ZoomLimits,

    /// Layout size the surface is first derived from, in pixels.
    #[builder(default = 700.0)]
    pub initial_surface: f64,

    /// Largest side the square render surface may take.
    #[builder(default = 700.0)]
    pub max_surface: f64,

    /// Layout changes at or below this many pixels are ignored.
    #[builder(default = 100.0)]
    pub resize_threshold: f64,

    /// Pause between two cache expansion steps.
    #[builder(default = Duration::from_millis(10))]
    pub expansion_delay: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_view.validate()?;
        self.zoom.validate()?;

        let width = self.initial_view.width();
        if width < self.zoom.min_range || width > self.zoom.max_range {
            return Err(ConfigError::ViewOutsideZoomLimits {
                width,
                min: self.zoom.min_range,
                max: self.zoom.max_range,
            });
        }

        positive("initial_surface", self.initial_surface)?;
        positive("max_surface", self.max_surface)?;
        positive("resize_threshold", self.resize_threshold)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_view, ViewRect::DEFAULT);
        assert_eq!(config.max_surface, 700.0);
        assert_eq!(config.resize_threshold, 100.0);
    }

    #[test]
    fn rejects_view_wider_than_zoom_allows() {
        let config = ViewerConfig::builder()
            .initial_view(ViewRect {
                x_min: -50.0,
                x_max: 50.0,
                y_min: -50.0,
                y_max: 50.0,
            })
            .build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ViewOutsideZoomLimits { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let config = ViewerConfig::builder().max_surface(0.0).build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "max_surface",
                value: 0.0
            })
        );
    }
}
