//! Discrete zoom steps clamped to a workable range.

use crate::error::ConfigError;
use crate::view_rect::ViewRect;

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Bounds on the horizontal extent of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min_range: f64,
    pub max_range: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_range: 10.0,
            max_range: 40.0,
        }
    }
}

impl ZoomLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.min_range.is_finite()
            && self.max_range.is_finite()
            && self.min_range > 0.0
            && self.min_range < self.max_range;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidZoomLimits {
                min: self.min_range,
                max: self.max_range,
            })
        }
    }

    /// Whether a further zoom-out is allowed. The ceiling absorbs float drift
    /// just below the limit.
    pub fn can_zoom_out(&self, view: &ViewRect) -> bool {
        view.width().ceil() < self.max_range
    }

    pub fn can_zoom_in(&self, view: &ViewRect) -> bool {
        view.width().floor() > self.min_range
    }

    pub fn affordance(&self, view: &ViewRect) -> ZoomAffordance {
        ZoomAffordance {
            can_zoom_in: self.can_zoom_in(view),
            can_zoom_out: self.can_zoom_out(view),
        }
    }

    /// Applies one zoom step in place. Returns `false` (and leaves `view`
    /// untouched) when the step is blocked by a limit.
    ///
    /// Both directions keep the pre-zoom centre. Zooming out doubles the
    /// extent, zooming in halves it; the result is clamped to the limits.
    pub fn step(&self, view: &mut ViewRect, direction: ZoomDirection) -> bool {
        let range = view.width();
        match direction {
            ZoomDirection::Out => {
                if !self.can_zoom_out(view) {
                    return false;
                }
                let new_range = (range * 2.0).min(self.max_range);
                view.recenter(new_range / 2.0);
            }
            ZoomDirection::In => {
                if !self.can_zoom_in(view) {
                    return false;
                }
                let new_range = (range / 2.0).max(self.min_range);
                view.recenter(new_range / 2.0);
            }
        }
        true
    }
}

/// Enabled state of the zoom controls, derived from the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomAffordance {
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
}

impl ViewRect {
    /// Applies one zoom step with the given limits.
    pub fn zoom_step(&mut self, direction: ZoomDirection, limits: &ZoomLimits) -> bool {
        limits.step(self, direction)
    }
}
