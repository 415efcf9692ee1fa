/// Parent-frame change tracking and correction transform
///
/// Motion positions are computed in the coordinate frame the parent had
/// when it was last (re)attached. If the parent frame then moves, the
/// correction transform carries the curve-local trajectory along with it,
/// so a mid-motion reparent never requires restarting the motion.

use glam::DMat4;
use hecs::Entity;

#[derive(Debug, Clone)]
pub struct FrameOffsetTracker {
    /// Identity of the observed parent frame
    tracked: Option<Entity>,
    /// Parent world transform captured when the identity last changed
    baseline: DMat4,
    /// Parent world transform as of the latest observation
    current: DMat4,
}

impl Default for FrameOffsetTracker {
    fn default() -> Self {
        Self {
            tracked: None,
            baseline: DMat4::IDENTITY,
            current: DMat4::IDENTITY,
        }
    }
}

impl FrameOffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called every tick. A changed parent identity re-captures the
    /// baseline; the live transform is refreshed on every call since the
    /// parent moves even when the identity does not.
    pub fn observe(&mut self, parent: Option<(Entity, DMat4)>) {
        match parent {
            Some((entity, local_to_world)) => {
                if self.tracked != Some(entity) {
                    self.tracked = Some(entity);
                    self.baseline = local_to_world;
                }
                self.current = local_to_world;
            }
            None => {
                self.tracked = None;
                self.baseline = DMat4::IDENTITY;
                self.current = DMat4::IDENTITY;
            }
        }
    }

    /// Unconditional baseline capture. Used when a motion is configured so
    /// the new motion starts from a clean identity correction, even if the
    /// parent identity has not changed since the last capture.
    pub fn rebase(&mut self, parent: Option<(Entity, DMat4)>) {
        match parent {
            Some((entity, local_to_world)) => {
                self.tracked = Some(entity);
                self.baseline = local_to_world;
                self.current = local_to_world;
            }
            None => {
                self.tracked = None;
                self.baseline = DMat4::IDENTITY;
                self.current = DMat4::IDENTITY;
            }
        }
    }

    /// The transform mapping curve-local positions into the parent's
    /// current frame: identity when no parent is tracked.
    pub fn correction(&self) -> DMat4 {
        if self.tracked.is_some() {
            self.current * self.baseline.inverse()
        } else {
            DMat4::IDENTITY
        }
    }

    pub fn tracked(&self) -> Option<Entity> {
        self.tracked
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
