/// Motion state machine
///
/// Owns at most one live motion: a curve handle, its timing, the begin
/// position captured at activation, and the parent-frame offset tracker.
/// Drives the progress timer each tick and turns eased progress into a
/// world- or local-space position plus a velocity estimate.

use std::sync::Arc;

use glam::{DMat4, DVec3};
use hecs::Entity;
use tracing::{debug, warn};

use crate::curve::Curve;
use crate::easing::Easing;
use crate::motion::offset::FrameOffsetTracker;
use crate::motion::timer::ProgressTimer;
use crate::motion::FrameSnapshot;

/// Lookahead distance (in curve arc-length units) for direction sampling
pub const DIRECTION_LOOKAHEAD: f64 = 1.0;

/// Which coordinate space a produced position belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Local,
    World,
}

/// A position the driver should apply to its transform this frame
#[derive(Debug, Clone, Copy)]
pub struct PositionUpdate {
    pub position: DVec3,
    pub space: Space,
}

/// Outcome of a single controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No motion configured, or the motion already finished
    Idle,
    /// Motion is live (running or paused)
    Running,
    /// The motion's time budget was exhausted this tick; reported exactly
    /// once so the driver can zero an attached physics body
    Completed,
}

struct Motion {
    curve: Arc<dyn Curve>,
    duration: f64,
    speed_based: bool,
    local: bool,
    /// Start offset within curve-local space, fixed at activation
    begin: DVec3,
}

#[derive(Default)]
pub struct MotionController {
    motion: Option<Motion>,
    timer: ProgressTimer,
    easing: Easing,
    offset: FrameOffsetTracker,
    velocity: DVec3,
}

impl MotionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any current motion with a new one.
    ///
    /// The parent-frame baseline is re-captured here, so the begin position
    /// is exactly the object's current placement in the parent's present
    /// frame. The new motion starts paused; call `start` to run it.
    pub fn configure(
        &mut self,
        curve: Arc<dyn Curve>,
        duration: f64,
        speed_based: bool,
        local: bool,
        snapshot: &FrameSnapshot,
    ) {
        self.offset.rebase(snapshot.parent_pair());

        let begin = if local {
            snapshot.local_position
        } else {
            // Map the world position back into curve space through the
            // live correction (identity right after the rebase above)
            self.offset
                .correction()
                .inverse()
                .transform_point3(snapshot.world_position)
        };

        let budget = if speed_based {
            if duration > 0.0 {
                curve.length() / duration
            } else {
                0.0
            }
        } else {
            duration
        };

        self.timer.configure(budget);
        self.motion = Some(Motion {
            curve,
            duration,
            speed_based,
            local,
            begin,
        });
        debug!(budget, speed_based, local, "motion configured");
    }

    pub fn start(&mut self) {
        self.timer.resume();
    }

    pub fn pause(&mut self) {
        self.timer.pause();
    }

    /// Override progress directly. `value` is a progress fraction when
    /// `normalized`, otherwise an arc-length distance along the curve.
    pub fn set_progress(&mut self, value: f64, normalized: bool) {
        let Some(motion) = &self.motion else {
            warn!("set_progress called with no curve configured");
            return;
        };
        let fraction = if normalized {
            value
        } else {
            let length = motion.curve.length();
            if length <= 0.0 {
                warn!("set_progress on a zero-length curve");
                return;
            }
            value / length
        };
        self.timer.set_elapsed(fraction * self.timer.budget());
    }

    /// Advance the motion by `dt` seconds.
    ///
    /// The parent frame is observed every tick, motion or not, so a
    /// reparent that happens while idle is still picked up.
    pub fn tick(&mut self, dt: f64, parent: Option<(Entity, DMat4)>) -> TickOutcome {
        self.offset.observe(parent);
        if self.motion.is_none() || !self.timer.active() {
            return TickOutcome::Idle;
        }
        if self.timer.advance(dt) {
            debug!("motion completed");
            TickOutcome::Completed
        } else {
            TickOutcome::Running
        }
    }

    /// The position the motion dictates right now, or None when no curve
    /// is configured.
    pub fn compute_position(&self) -> Option<DVec3> {
        let Some(motion) = &self.motion else {
            warn!("compute_position called with no curve configured");
            return None;
        };
        let t = self.eased_progress();
        let curve_local = motion.curve.position_at(t, true) + motion.begin;
        Some(self.correction_for(motion).transform_point3(curve_local))
    }

    /// Compute this frame's position update and refresh the velocity
    /// estimate from the positional delta against the currently-applied
    /// position. Velocity resets to zero whenever the motion is not
    /// actively running or `dt` is not positive.
    pub fn apply_position(&mut self, dt: f64, snapshot: &FrameSnapshot) -> Option<PositionUpdate> {
        let local = match &self.motion {
            Some(motion) => motion.local,
            None => return None,
        };
        if !self.timer.active() || self.timer.paused() || dt <= 0.0 {
            self.velocity = DVec3::ZERO;
            return None;
        }

        let position = self.compute_position()?;
        let applied = if local {
            snapshot.local_position
        } else {
            snapshot.world_position
        };
        self.velocity = (position - applied) / dt;

        Some(PositionUpdate {
            position,
            space: if local { Space::Local } else { Space::World },
        })
    }

    /// Non-normalized direction of travel: the difference between the
    /// curve sample at T and a sample `lookahead` arc-length units behind.
    /// Degenerate curves produce a zero vector.
    pub fn direction_of_travel(&self, lookahead: f64) -> DVec3 {
        let Some(motion) = &self.motion else {
            warn!("direction_of_travel called with no curve configured");
            return DVec3::ZERO;
        };
        let length = motion.curve.length();
        if length <= 0.0 {
            return DVec3::ZERO;
        }
        let t = self.eased_progress();
        let behind = t - lookahead / length;
        motion.curve.position_at(t, true) - motion.curve.position_at(behind, true)
    }

    /// Tear down all motion state and hand the last velocity estimate to
    /// the caller (e.g. to seed a physics body).
    pub fn remove(&mut self) -> DVec3 {
        let velocity = self.velocity;
        self.motion = None;
        self.timer.reset();
        self.easing = Easing::Linear;
        self.offset.reset();
        self.velocity = DVec3::ZERO;
        velocity
    }

    /// Easing persists across reconfiguration; only `remove` resets it.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn eased_progress(&self) -> f64 {
        self.timer.eased_progress(self.easing)
    }

    pub fn raw_progress(&self) -> f64 {
        self.timer.raw_progress()
    }

    pub fn active(&self) -> bool {
        self.timer.active()
    }

    pub fn paused(&self) -> bool {
        self.timer.paused()
    }

    pub fn completed(&self) -> bool {
        self.timer.completed()
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn duration(&self) -> Option<f64> {
        self.motion.as_ref().map(|m| m.duration)
    }

    pub fn speed_based(&self) -> Option<bool> {
        self.motion.as_ref().map(|m| m.speed_based)
    }

    pub fn is_local(&self) -> Option<bool> {
        self.motion.as_ref().map(|m| m.local)
    }

    fn correction_for(&self, motion: &Motion) -> DMat4 {
        if motion.local {
            DMat4::IDENTITY
        } else {
            self.offset.correction()
        }
    }
}
