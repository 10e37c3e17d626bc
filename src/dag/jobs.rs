// src/dag/jobs.rs

//! Job kinds emitted by the scheduler.
//!
//! The set of kinds is fixed: three dirty-triggered jobs (one instance each)
//! and two pooled evaluation jobs (one instance per running animator). The
//! job objects only carry configuration; what a job actually does is up to
//! the [`JobHandler`] it is run against.

use std::fmt;

use tracing::warn;

use crate::exec::JobHandler;
use crate::resources::{
    BlendedClipAnimator, BlendedClipAnimatorHandle, ClipAnimator, ClipAnimatorHandle, ClipHandle,
    Handle,
};

/// Upper bound on the number of dependencies any job can have in one frame.
///
/// Evaluation jobs wait on at most two upstream jobs (clip loading plus
/// either animator discovery or blend-tree building).
pub const MAX_DEPENDENCIES: usize = 2;

/// Identity of a job within a frame.
///
/// Pooled kinds carry their pool slot, which is also the position of the
/// animator in its running set for that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JobId {
    LoadClips,
    FindRunningClipAnimators,
    BuildBlendTrees,
    EvaluateClipAnimator(usize),
    EvaluateBlendedClipAnimator(usize),
}

impl JobId {
    /// Whether this job comes from a dirty queue rather than a running set.
    pub fn is_dirty_triggered(&self) -> bool {
        matches!(
            self,
            JobId::LoadClips | JobId::FindRunningClipAnimators | JobId::BuildBlendTrees
        )
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::LoadClips => f.write_str("load-clips"),
            JobId::FindRunningClipAnimators => f.write_str("find-running-clip-animators"),
            JobId::BuildBlendTrees => f.write_str("build-blend-trees"),
            JobId::EvaluateClipAnimator(slot) => write!(f, "evaluate-clip-animator[{slot}]"),
            JobId::EvaluateBlendedClipAnimator(slot) => {
                write!(f, "evaluate-blended-clip-animator[{slot}]")
            }
        }
    }
}

/// Inline, fixed-capacity dependency list for one job in one frame.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct JobDeps {
    ids: [Option<JobId>; MAX_DEPENDENCIES],
}

impl JobDeps {
    pub const fn none() -> Self {
        Self {
            ids: [None; MAX_DEPENDENCIES],
        }
    }

    /// Add `id` unless it is already present.
    pub fn push(&mut self, id: JobId) {
        if self.contains(id) {
            return;
        }
        let free = self.ids.iter_mut().find(|slot| slot.is_none());
        debug_assert!(free.is_some(), "JobDeps capacity exceeded while adding {id}");
        match free {
            Some(slot) => *slot = Some(id),
            None => warn!(dependency = %id, "dependency list full; edge dropped"),
        }
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.ids.contains(&Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = JobId> + '_ {
        self.ids.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(Option::is_none)
    }
}

impl fmt::Debug for JobDeps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// One entry of a frame's ordered job list: which job, and what it waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledJob {
    pub id: JobId,
    pub deps: JobDeps,
}

impl ScheduledJob {
    pub fn new(id: JobId, deps: JobDeps) -> Self {
        Self { id, deps }
    }
}

/// Loads (or reloads) the data of every dirty clip.
#[derive(Debug, Default)]
pub struct LoadClipsJob {
    clips: Vec<ClipHandle>,
}

impl LoadClipsJob {
    /// Take ownership of the queued handles, leaving `queue` empty.
    ///
    /// The buffers are swapped so neither side reallocates in steady state.
    pub(crate) fn take_clips(&mut self, queue: &mut Vec<ClipHandle>) {
        self.clips.clear();
        std::mem::swap(&mut self.clips, queue);
    }

    pub fn clips(&self) -> &[ClipHandle] {
        &self.clips
    }
}

/// Re-evaluates whether dirty clip animators should be running.
#[derive(Debug, Default)]
pub struct FindRunningClipAnimatorsJob {
    animators: Vec<ClipAnimatorHandle>,
}

impl FindRunningClipAnimatorsJob {
    pub(crate) fn take_animators(&mut self, queue: &mut Vec<ClipAnimatorHandle>) {
        self.animators.clear();
        std::mem::swap(&mut self.animators, queue);
    }

    pub fn animators(&self) -> &[ClipAnimatorHandle] {
        &self.animators
    }
}

/// Rebuilds the blend trees of dirty blended clip animators.
#[derive(Debug, Default)]
pub struct BuildBlendTreesJob {
    animators: Vec<BlendedClipAnimatorHandle>,
}

impl BuildBlendTreesJob {
    pub(crate) fn take_animators(&mut self, queue: &mut Vec<BlendedClipAnimatorHandle>) {
        self.animators.clear();
        std::mem::swap(&mut self.animators, queue);
    }

    pub fn animators(&self) -> &[BlendedClipAnimatorHandle] {
        &self.animators
    }
}

/// Per-animator evaluation job, rebound to a running animator every frame.
///
/// A freshly allocated job is bound to the null handle until its first
/// build.
pub struct EvaluateAnimatorJob<T> {
    animator: Handle<T>,
    start_time: f64,
    current_time: f64,
}

pub type EvaluateClipAnimatorJob = EvaluateAnimatorJob<ClipAnimator>;
pub type EvaluateBlendedClipAnimatorJob = EvaluateAnimatorJob<BlendedClipAnimator>;

impl<T> EvaluateAnimatorJob<T> {
    pub(crate) fn bind(&mut self, animator: Handle<T>, start_time: f64, current_time: f64) {
        self.animator = animator;
        self.start_time = start_time;
        self.current_time = current_time;
    }

    pub fn animator(&self) -> Handle<T> {
        self.animator
    }

    /// Simulation time at which the animator entered its running set.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Simulation time of the frame this job was built for.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn elapsed(&self) -> f64 {
        self.current_time - self.start_time
    }
}

impl<T> Default for EvaluateAnimatorJob<T> {
    fn default() -> Self {
        Self {
            animator: Handle::null(),
            start_time: 0.0,
            current_time: 0.0,
        }
    }
}

impl<T> fmt::Debug for EvaluateAnimatorJob<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluateAnimatorJob")
            .field("animator", &self.animator)
            .field("start_time", &self.start_time)
            .field("current_time", &self.current_time)
            .finish()
    }
}

/// Borrowed view of one job object, tagged with its kind.
#[derive(Debug, Clone, Copy)]
pub enum JobRef<'a> {
    LoadClips(&'a LoadClipsJob),
    FindRunningClipAnimators(&'a FindRunningClipAnimatorsJob),
    BuildBlendTrees(&'a BuildBlendTreesJob),
    EvaluateClipAnimator(&'a EvaluateClipAnimatorJob),
    EvaluateBlendedClipAnimator(&'a EvaluateBlendedClipAnimatorJob),
}

impl JobRef<'_> {
    /// Run this job against `handler`.
    ///
    /// Callers must have run every dependency of the job first.
    pub fn run<H: JobHandler + ?Sized>(self, handler: &mut H) {
        match self {
            JobRef::LoadClips(job) => handler.load_clips(job.clips()),
            JobRef::FindRunningClipAnimators(job) => {
                handler.find_running_clip_animators(job.animators())
            }
            JobRef::BuildBlendTrees(job) => handler.build_blend_trees(job.animators()),
            JobRef::EvaluateClipAnimator(job) => handler.evaluate_clip_animator(job),
            JobRef::EvaluateBlendedClipAnimator(job) => {
                handler.evaluate_blended_clip_animator(job)
            }
        }
    }
}
