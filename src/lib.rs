//! curve-motion: frame-driven motion along parametric curves
//!
//! Advances an object's position along a curve over time, with fixed or
//! speed-derived timing, eased progress, parent-frame correction for
//! mid-motion reparenting, and one-shot callbacks at progress thresholds.
//!
//! The crate owns no frame loop, scene graph, or physics world: the host
//! calls [`MotionManager::tick`] once per frame with a [`FrameSnapshot`]
//! of the object's current placement and applies the returned position.

pub mod curve;
pub mod easing;
pub mod motion; // Curve-following motion core
pub mod physics; // Rapier velocity handoff
pub mod settings;

pub use curve::{Curve, StraightLine, WaypointPath};
pub use easing::Easing;
pub use motion::{
    FrameSnapshot, MotionConfig, MotionController, MotionManager, ParentFrame, PositionUpdate,
    Space, TickReport,
};
pub use settings::MotionSettings;
