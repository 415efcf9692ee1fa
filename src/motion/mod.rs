/// Frame-driven motion along parametric curves
///
/// This module provides:
/// - Progress timing with fixed-duration or speed-derived budgets
/// - Parent-frame correction so mid-motion reparenting stays continuous
/// - A motion state machine producing positions and velocity estimates
/// - One-shot progress-threshold callbacks

pub mod controller;
pub mod flags;
pub mod manager;
pub mod offset;
pub mod timer;

use glam::{DMat4, DVec3};
use hecs::Entity;

pub use controller::{MotionController, PositionUpdate, Space, TickOutcome, DIRECTION_LOOKAHEAD};
pub use flags::{Flag, FlagCallback, FlagScheduler};
pub use manager::{MotionConfig, MotionManager, MotionPath, TickReport};
pub use offset::FrameOffsetTracker;
pub use timer::ProgressTimer;

/// The parent coordinate frame an object is attached to, if any.
#[derive(Debug, Clone, Copy)]
pub struct ParentFrame {
    /// Scene identity of the parent
    pub entity: Entity,
    /// The parent's current local-to-world transform
    pub local_to_world: DMat4,
}

/// Per-frame snapshot of the host object's placement, supplied by the
/// driver on every tick. Positions are the object's placement as currently
/// applied, before this frame's motion update.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    pub parent: Option<ParentFrame>,
    pub local_position: DVec3,
    pub world_position: DVec3,
}

impl FrameSnapshot {
    /// Snapshot for an unparented object, where local and world space
    /// coincide.
    pub fn unparented(position: DVec3) -> Self {
        Self {
            parent: None,
            local_position: position,
            world_position: position,
        }
    }

    pub(crate) fn parent_pair(&self) -> Option<(Entity, DMat4)> {
        self.parent.map(|p| (p.entity, p.local_to_world))
    }
}
