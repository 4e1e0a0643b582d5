//! The viewport controller: owns the view, input, expressions and scheduler,
//! and sequences every engine call.

use crate::config::ViewerConfig;
use crate::engine::{CoordinateMode, Engine};
use crate::error::ConfigError;
use crate::expressions::{ExpressionEntry, ExpressionSet, ValidityReport};
use crate::input::{InputOutcome, InputTranslator, PointerEvent};
use crate::resize::ResizeCoordinator;
use crate::scheduler::{LoopHost, LoopKind, LoopToken, RenderScheduler, SchedulingMode};
use crate::view_rect::ViewRect;
use crate::zoom::{ZoomAffordance, ZoomDirection, ZoomLimits};

/// Interactive viewport and incremental cache-expansion controller.
///
/// All host events enter through the methods below; each one that may start
/// or stop a loop takes the host's [`LoopHost`].
#[derive(Debug)]
pub struct GraphController<E> {
    engine: E,
    view: ViewRect,
    zoom: ZoomLimits,
    affordance: ZoomAffordance,
    input: InputTranslator,
    expressions: ExpressionSet,
    scheduler: RenderScheduler,
    resize: ResizeCoordinator,
    coordinate_mode: CoordinateMode,
}

impl<E: Engine> GraphController<E> {
    /// Builds an idle controller. No engine call is made until the first
    /// event.
    pub fn new(engine: E, config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            engine,
            view: config.initial_view,
            zoom: config.zoom,
            affordance: config.zoom.affordance(&config.initial_view),
            input: InputTranslator::new(),
            expressions: ExpressionSet::new(),
            scheduler: RenderScheduler::new(config.expansion_delay),
            resize: ResizeCoordinator::new(
                config.initial_surface,
                config.resize_threshold,
                config.max_surface,
            ),
            coordinate_mode: CoordinateMode::default(),
        })
    }

    // ================================================================================
    // Accessors
    // ================================================================================

    pub fn view(&self) -> &ViewRect {
        &self.view
    }

    pub fn mode(&self) -> SchedulingMode {
        self.scheduler.mode()
    }

    pub fn active_loop(&self) -> Option<(LoopKind, LoopToken)> {
        self.scheduler.active_loop()
    }

    pub fn affordance(&self) -> ZoomAffordance {
        self.affordance
    }

    pub fn surface_size(&self) -> f64 {
        self.resize.surface()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    pub fn coordinate_mode(&self) -> CoordinateMode {
        self.coordinate_mode
    }

    pub fn entries(&self) -> &[ExpressionEntry] {
        self.expressions.entries()
    }

    pub fn slots(&self) -> &[String] {
        self.expressions.slots()
    }

    pub fn validity(&self) -> &ValidityReport {
        self.expressions.report()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Registers a callback receiving every validity report.
    pub fn on_validity(&mut self, observer: impl FnMut(&ValidityReport) + 'static) {
        self.expressions.set_observer(observer);
    }

    // ================================================================================
    // Events
    // ================================================================================

    /// Feeds a pointer or touch event.
    pub fn pointer(&mut self, event: PointerEvent, host: &mut impl LoopHost) -> InputOutcome {
        let outcome = self
            .input
            .handle(&event, &mut self.view, self.resize.surface());

        match outcome {
            InputOutcome::DragStarted => {
                self.scheduler.transition(SchedulingMode::Continuous, host);
            }
            InputOutcome::DragEnded => {
                self.affordance = self.zoom.affordance(&self.view);
                self.scheduler.transition(SchedulingMode::Expanding, host);
            }
            InputOutcome::Panned { .. } | InputOutcome::Ignored => {}
        }
        outcome
    }

    /// Halves the visible range. Returns `false` without redrawing when the
    /// view is already at the minimum.
    pub fn zoom_in(&mut self, host: &mut impl LoopHost) -> bool {
        self.zoom(ZoomDirection::In, host)
    }

    /// Doubles the visible range. Returns `false` without redrawing when the
    /// view is already at the maximum.
    pub fn zoom_out(&mut self, host: &mut impl LoopHost) -> bool {
        self.zoom(ZoomDirection::Out, host)
    }

    fn zoom(&mut self, direction: ZoomDirection, host: &mut impl LoopHost) -> bool {
        if !self.view.zoom_step(direction, &self.zoom) {
            return false;
        }
        self.affordance = self.zoom.affordance(&self.view);
        tracing::debug!(?direction, width = self.view.width(), "zoom");
        self.redraw_and_resume(host);
        true
    }

    /// Replaces the expression slots. Invalid entries are reported per slot;
    /// the remaining ones are drawn regardless.
    pub fn edit_expressions<S: AsRef<str>>(
        &mut self,
        slots: &[S],
        host: &mut impl LoopHost,
    ) -> &ValidityReport {
        self.interrupt_drag(host);
        self.expressions.apply(slots, &mut self.engine);
        self.redraw_and_resume(host);
        self.expressions.report()
    }

    /// Reports a new host layout size. Returns whether it was large enough
    /// to rebuild the surface.
    pub fn resize(&mut self, observed: f64, host: &mut impl LoopHost) -> bool {
        if self.resize.observe(observed).is_none() {
            return false;
        }
        // Cached samples are tied to the surface resolution.
        self.interrupt_drag(host);
        self.expressions.reinitialize(&mut self.engine);
        self.redraw_and_resume(host);
        true
    }

    /// Switches between Cartesian and polar graphs. Cache expansion resumes
    /// only when switching back to Cartesian.
    pub fn toggle_mode(&mut self, host: &mut impl LoopHost) -> CoordinateMode {
        self.interrupt_drag(host);
        self.engine.toggle_mode();
        self.coordinate_mode = self.coordinate_mode.toggled();
        self.engine.run(&self.view);

        let next = match self.coordinate_mode {
            CoordinateMode::Cartesian => SchedulingMode::Expanding,
            CoordinateMode::Polar => SchedulingMode::Idle,
        };
        self.scheduler.transition(next, host);
        self.coordinate_mode
    }

    /// Delivers a tick scheduled through the host. Stale tokens are ignored.
    pub fn tick(&mut self, token: LoopToken, host: &mut impl LoopHost) {
        match self.scheduler.accept_tick(token) {
            Some(LoopKind::Frame) => {
                self.engine.run(&self.view);
                self.scheduler.rearm(host);
            }
            Some(LoopKind::Timer) => {
                if self.engine.expand_cache() {
                    tracing::debug!("render cache full");
                    self.scheduler.transition(SchedulingMode::Idle, host);
                } else {
                    self.scheduler.rearm(host);
                }
            }
            None => {}
        }
    }

    // ================================================================================
    // Helpers
    // ================================================================================

    fn interrupt_drag(&mut self, host: &mut impl LoopHost) {
        if self.input.cancel() {
            tracing::debug!("drag interrupted");
            self.affordance = self.zoom.affordance(&self.view);
        }
        if self.scheduler.mode() == SchedulingMode::Continuous {
            self.scheduler.transition(SchedulingMode::Idle, host);
        }
    }

    /// One redraw with the current view, then cache expansion unless it is
    /// already running.
    fn redraw_and_resume(&mut self, host: &mut impl LoopHost) {
        self.interrupt_drag(host);
        self.engine.run(&self.view);
        self.scheduler.transition(SchedulingMode::Expanding, host);
    }
}
