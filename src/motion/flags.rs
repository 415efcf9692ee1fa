/// One-shot callbacks keyed to progress thresholds
///
/// A flag fires when the evaluated progress reaches its threshold, at most
/// once per armed window. Fired flags stay down until `reset_all` re-arms
/// them or `clear` drops the set. Firing order is insertion order; flags
/// with equal thresholds fire in the same evaluation.

use crate::motion::manager::MotionManager;

/// Callback invoked when a flag fires. Receives the owning manager so a
/// callback may legally reconfigure the motion it belongs to.
pub type FlagCallback = Box<dyn FnMut(&mut MotionManager)>;

pub struct Flag {
    pub threshold: f64,
    pub(crate) callback: FlagCallback,
    pub fired: bool,
}

impl Flag {
    pub fn new(threshold: f64, callback: FlagCallback) -> Self {
        Self {
            threshold,
            callback,
            fired: false,
        }
    }

    /// At-or-past comparison against the current progress value.
    pub fn is_due(&self, progress: f64) -> bool {
        !self.fired && progress >= self.threshold
    }
}

/// Insertion-ordered set of one-shot flags for a single motion's timeline.
///
/// Evaluation lives on [`MotionManager`], which snapshots the list before
/// invoking callbacks; the generation counter lets it detect a callback
/// that cleared or replaced the set mid-iteration.
#[derive(Default)]
pub struct FlagScheduler {
    flags: Vec<Flag>,
    generation: u64,
}

impl FlagScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all flags. Called whenever a new motion is configured, since
    /// flags are tied to one motion's timeline.
    pub fn clear(&mut self) {
        self.flags.clear();
        self.generation += 1;
    }

    /// Append a one-shot trigger.
    pub fn add(&mut self, threshold: f64, callback: FlagCallback) {
        self.flags.push(Flag::new(threshold, callback));
        self.generation += 1;
    }

    /// Re-arm every flag without removing it, so the same set can replay
    /// on a repeated motion.
    pub fn reset_all(&mut self) {
        for flag in &mut self.flags {
            flag.fired = false;
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Take the flag list out for snapshot iteration. Does not bump the
    /// generation: only external mutation counts as a replacement.
    pub(crate) fn take_flags(&mut self) -> Vec<Flag> {
        std::mem::take(&mut self.flags)
    }

    pub(crate) fn restore_flags(&mut self, flags: Vec<Flag>) {
        self.flags = flags;
    }
}
