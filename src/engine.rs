//! The numeric engine the controller drives.
//!
//! Parsing, sampling and rasterization live behind this trait; the controller
//! only decides when each operation runs.

use crate::view_rect::ViewRect;

/// Coordinate interpretation used by the engine for `run` and `expand_cache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
    #[default]
    Cartesian,
    Polar,
}

impl CoordinateMode {
    pub fn toggled(self) -> Self {
        match self {
            CoordinateMode::Cartesian => CoordinateMode::Polar,
            CoordinateMode::Polar => CoordinateMode::Cartesian,
        }
    }
}

/// A graphing engine holding compiled expressions and a sample cache.
///
/// The engine is a single logical session: `reset` clears it and must precede
/// every `initialize`.
pub trait Engine {
    /// Draws the cached (or freshly sampled) points clipped to `view`.
    fn run(&mut self, view: &ViewRect);

    /// Clears all expression and cache state.
    fn reset(&mut self);

    /// Compiles each expression, returning one acceptance flag per input in
    /// the same order. Failures are reported only through the flags.
    fn initialize(&mut self, expressions: &[String]) -> Vec<bool>;

    /// Performs one bounded unit of cache precomputation. Returns `true`
    /// once no further work remains.
    fn expand_cache(&mut self) -> bool;

    /// Switches between polar and Cartesian interpretation.
    fn toggle_mode(&mut self);
}
