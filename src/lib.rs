//! Interaction layer for an interactive 2D function-graph viewer.
//!
//! [`GraphController`] keeps the visible rectangle, turns pointer input into
//! pans and clamped zoom steps, and decides when the graphing [`Engine`]
//! redraws every frame (while dragging) or fills its sample cache in the
//! background (while idle). Only one of those loops is ever scheduled.
//!
//! The [`canvas`] and [`subscription`] modules connect the controller to an
//! iced application.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod expressions;
pub mod input;
pub mod resize;
pub mod scheduler;
pub mod subscription;
pub mod view_rect;
pub mod zoom;

pub use canvas::{GraphCanvas, Scene};
pub use config::ViewerConfig;
pub use controller::GraphController;
pub use engine::{CoordinateMode, Engine};
pub use error::ConfigError;
pub use expressions::{ExpressionEntry, ValidityReport};
pub use input::{InputOutcome, Pointer, PointerEvent, PointerPhase};
pub use scheduler::{LoopHost, LoopKind, LoopToken, SchedulingMode};
pub use subscription::SubscriptionHost;
pub use view_rect::ViewRect;
pub use zoom::{ZoomAffordance, ZoomLimits};
