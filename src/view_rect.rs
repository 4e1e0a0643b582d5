//! The visible coordinate rectangle and pixel-to-model scaling.

use crate::error::ConfigError;

/// The visible rectangle of the model plane, mapped onto the square render
/// surface.
///
/// The engine treats the rectangle as square for scaling purposes, so the
/// controller only ever changes both extents together (zoom) or translates
/// the whole rectangle (pan).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ViewRect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ViewRect {
    /// The `[-5, 5] x [-5, 5]` view the viewer opens with.
    pub const DEFAULT: ViewRect = ViewRect {
        x_min: -5.0,
        x_max: 5.0,
        y_min: -5.0,
        y_max: 5.0,
    };

    /// Builds a rectangle, rejecting non-finite or inverted bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ConfigError> {
        let rect = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        rect.validate()?;
        Ok(rect)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());

        if finite && self.x_min < self.x_max && self.y_min < self.y_max {
            Ok(())
        } else {
            Err(ConfigError::InvalidView {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            })
        }
    }

    /// Horizontal extent, the quantity zoom limits are expressed in.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Translates the view by a model-space delta. Panning is unbounded.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x_min += dx;
        self.x_max += dx;
        self.y_min += dy;
        self.y_max += dy;
    }

    /// Re-centres the view on its current centre with `half_extent` on each
    /// side of both axes.
    pub(crate) fn recenter(&mut self, half_extent: f64) {
        let (cx, cy) = self.center();
        self.x_min = cx - half_extent;
        self.x_max = cx + half_extent;
        self.y_min = cy - half_extent;
        self.y_max = cy + half_extent;
    }

    /// Per-axis pixels-per-unit scale for a square surface of side `surface`.
    pub fn scale(&self, surface: f64) -> (f64, f64) {
        (surface / self.width(), surface / self.height())
    }

    /// Converts a surface position (pixels) into model units relative to the
    /// surface origin.
    pub fn to_model_units(&self, px: f64, py: f64, surface: f64) -> (f64, f64) {
        let (sx, sy) = self.scale(surface);
        (px / sx, py / sy)
    }

    /// Converts a pixel delta into a model-space delta.
    pub fn from_pixel_delta(&self, dx_pixels: f64, dy_pixels: f64, surface: f64) -> (f64, f64) {
        self.to_model_units(dx_pixels, dy_pixels, surface)
    }
}
