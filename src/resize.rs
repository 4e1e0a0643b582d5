//! Debounced render-surface size changes.

/// Tracks host layout size and decides when a change is large enough to
/// rebuild the surface.
#[derive(Debug, Clone)]
pub struct ResizeCoordinator {
    last_observed: f64,
    surface: f64,
    threshold: f64,
    max_surface: f64,
}

impl ResizeCoordinator {
    /// `initial` is the layout size the surface was first derived from.
    pub fn new(initial: f64, threshold: f64, max_surface: f64) -> Self {
        Self {
            last_observed: initial,
            surface: initial.min(max_surface),
            threshold,
            max_surface,
        }
    }

    /// Side of the square render surface in pixels.
    pub fn surface(&self) -> f64 {
        self.surface
    }

    /// Records a new layout size. Returns the new surface side when the
    /// change exceeds the threshold; smaller changes are dropped without
    /// updating the reference size.
    pub fn observe(&mut self, observed: f64) -> Option<f64> {
        if !observed.is_finite() || observed <= 0.0 {
            return None;
        }
        if (observed - self.last_observed).abs() <= self.threshold {
            return None;
        }

        self.last_observed = observed;
        self.surface = observed.min(self.max_surface);
        tracing::info!(observed, surface = self.surface, "render surface resized");
        Some(self.surface)
    }
}
