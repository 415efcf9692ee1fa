/// Motion orchestration: one controller, one flag scheduler, and the
/// configuration surface that binds a path, timing, and flags atomically
///
/// The driver calls `tick` once per frame with the frame's delta time and
/// a snapshot of the object's current placement; the manager advances the
/// motion, produces the position to apply, and fires any due flags at the
/// fresh eased progress.

use std::sync::Arc;

use glam::DVec3;

use crate::curve::{Curve, StraightLine, WaypointPath};
use crate::easing::Easing;
use crate::motion::controller::{MotionController, PositionUpdate, TickOutcome, DIRECTION_LOOKAHEAD};
use crate::motion::flags::{FlagCallback, FlagScheduler};
use crate::motion::FrameSnapshot;

/// The geometry a motion follows, before it is anchored at the begin
/// position.
pub enum MotionPath {
    /// Straight path to a single target point
    Point(DVec3),
    /// Smooth path through ordered waypoints, prefixed with the current
    /// position at apply time
    Waypoints(Vec<DVec3>),
    /// Pre-built curve; positions are offsets from the begin position
    Curve(Arc<dyn Curve>),
}

/// Owned configuration for one motion, applied atomically.
///
/// Build with the chainable setters, then hand to
/// [`MotionManager::apply`]. Target points and waypoints are world-space
/// (or local-space for local motions); the manager rebases them around the
/// object's position when the motion is applied.
pub struct MotionConfig {
    path: MotionPath,
    duration: f64,
    speed_based: bool,
    local: bool,
    easing: Option<Easing>,
    flags: Vec<(f64, FlagCallback)>,
}

impl MotionConfig {
    fn with_path(path: MotionPath) -> Self {
        Self {
            path,
            duration: 1.0,
            speed_based: false,
            local: false,
            easing: None,
            flags: Vec::new(),
        }
    }

    /// Straight motion toward a single destination point.
    pub fn to_point(target: DVec3) -> Self {
        Self::with_path(MotionPath::Point(target))
    }

    /// Smooth motion through an ordered list of waypoints.
    pub fn along_waypoints(points: Vec<DVec3>) -> Self {
        Self::with_path(MotionPath::Waypoints(points))
    }

    /// Motion along caller-built geometry.
    pub fn along_curve(curve: Arc<dyn Curve>) -> Self {
        Self::with_path(MotionPath::Curve(curve))
    }

    /// Seconds to complete the motion, or the speed divisor when
    /// `speed_based` is set (budget = curve length / duration).
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn speed_based(mut self, speed_based: bool) -> Self {
        self.speed_based = speed_based;
        self
    }

    /// Apply produced positions in local space instead of world space.
    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// One-shot callback fired when eased progress reaches `threshold`.
    pub fn flag(mut self, threshold: f64, callback: impl FnMut(&mut MotionManager) + 'static) -> Self {
        self.flags.push((threshold, Box::new(callback)));
        self
    }
}

/// What a tick produced.
#[derive(Debug, Clone, Copy)]
pub struct TickReport {
    /// Position to apply this frame, if the motion is actively running
    pub position: Option<PositionUpdate>,
    /// True exactly once, on the tick that exhausted the time budget; the
    /// driver uses this to zero an attached physics body
    pub completed: bool,
}

#[derive(Default)]
pub struct MotionManager {
    controller: MotionController,
    scheduler: FlagScheduler,
}

impl MotionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current motion (and its flag set) with `config`.
    ///
    /// The begin position is the object's placement from `snapshot`;
    /// synthesized paths are built relative to it so the motion departs
    /// from where the object currently is. The motion starts paused.
    pub fn apply(&mut self, config: MotionConfig, snapshot: &FrameSnapshot) {
        let begin = if config.local {
            snapshot.local_position
        } else {
            snapshot.world_position
        };

        let curve: Arc<dyn Curve> = match config.path {
            MotionPath::Point(target) => {
                Arc::new(StraightLine::new(DVec3::ZERO, target - begin))
            }
            MotionPath::Waypoints(points) => {
                let mut relative = Vec::with_capacity(points.len() + 1);
                relative.push(DVec3::ZERO);
                relative.extend(points.into_iter().map(|p| p - begin));
                Arc::new(WaypointPath::new(relative))
            }
            MotionPath::Curve(curve) => curve,
        };

        self.controller
            .configure(curve, config.duration, config.speed_based, config.local, snapshot);
        if let Some(easing) = config.easing {
            self.controller.set_easing(easing);
        }

        self.scheduler.clear();
        for (threshold, callback) in config.flags {
            self.scheduler.add(threshold, callback);
        }
    }

    /// Advance by `dt` seconds and fire due flags. Call once per frame.
    pub fn tick(&mut self, dt: f64, snapshot: &FrameSnapshot) -> TickReport {
        let outcome = self.controller.tick(dt, snapshot.parent_pair());
        let position = self.controller.apply_position(dt, snapshot);
        let progress = self.controller.eased_progress();
        self.fire_flags(progress);
        TickReport {
            position,
            completed: outcome == TickOutcome::Completed,
        }
    }

    /// Fire every unfired flag whose threshold the progress value has
    /// reached, in insertion order.
    ///
    /// The flag list is snapshotted before callbacks run: a callback may
    /// reconfigure this manager (clearing or replacing the scheduler's
    /// flags) without corrupting the iteration. The snapshot is only put
    /// back if no callback touched the scheduler in the meantime.
    pub fn fire_flags(&mut self, progress: f64) {
        if self.scheduler.is_empty() {
            return;
        }
        let generation = self.scheduler.generation();
        let mut snapshot = self.scheduler.take_flags();
        for flag in &mut snapshot {
            if flag.is_due(progress) {
                flag.fired = true;
                (flag.callback)(self);
            }
        }
        if self.scheduler.generation() == generation {
            self.scheduler.restore_flags(snapshot);
        }
    }

    pub fn start(&mut self) {
        self.controller.start();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Tear down the motion; returns the last velocity estimate as a final
    /// handoff. Flags stay installed until the next `apply` replaces them.
    pub fn remove(&mut self) -> DVec3 {
        self.controller.remove()
    }

    pub fn set_progress(&mut self, value: f64, normalized: bool) {
        self.controller.set_progress(value, normalized);
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.controller.set_easing(easing);
    }

    /// Re-arm all flags for a repeated motion.
    pub fn reset_flags(&mut self) {
        self.scheduler.reset_all();
    }

    pub fn add_flag(&mut self, threshold: f64, callback: impl FnMut(&mut MotionManager) + 'static) {
        self.scheduler.add(threshold, Box::new(callback));
    }

    pub fn clear_flags(&mut self) {
        self.scheduler.clear();
    }

    pub fn direction(&self) -> DVec3 {
        self.controller.direction_of_travel(DIRECTION_LOOKAHEAD)
    }

    pub fn eased_progress(&self) -> f64 {
        self.controller.eased_progress()
    }

    pub fn raw_progress(&self) -> f64 {
        self.controller.raw_progress()
    }

    pub fn active(&self) -> bool {
        self.controller.active()
    }

    pub fn paused(&self) -> bool {
        self.controller.paused()
    }

    pub fn velocity(&self) -> DVec3 {
        self.controller.velocity()
    }

    pub fn controller(&self) -> &MotionController {
        &self.controller
    }
}
