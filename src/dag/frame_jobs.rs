// src/dag/frame_jobs.rs

//! Result of one frame build.

use crate::dag::job_pool::JobPool;
use crate::dag::jobs::{
    BuildBlendTreesJob, EvaluateBlendedClipAnimatorJob, EvaluateClipAnimatorJob,
    FindRunningClipAnimatorsJob, JobDeps, JobId, JobRef, LoadClipsJob, ScheduledJob,
};

/// Every job object the scheduler owns, plus the reusable per-frame list.
#[derive(Debug, Default)]
pub(crate) struct JobStore {
    pub(crate) load_clips: LoadClipsJob,
    pub(crate) find_running: FindRunningClipAnimatorsJob,
    pub(crate) build_blend_trees: BuildBlendTreesJob,
    pub(crate) clip_evaluators: JobPool<EvaluateClipAnimatorJob>,
    pub(crate) blended_evaluators: JobPool<EvaluateBlendedClipAnimatorJob>,
    /// Ordered job list of the most recent build. Cleared, not freed.
    pub(crate) scheduled: Vec<ScheduledJob>,
}

impl JobStore {
    pub(crate) fn resolve(&self, id: JobId) -> Option<JobRef<'_>> {
        match id {
            JobId::LoadClips => Some(JobRef::LoadClips(&self.load_clips)),
            JobId::FindRunningClipAnimators => {
                Some(JobRef::FindRunningClipAnimators(&self.find_running))
            }
            JobId::BuildBlendTrees => Some(JobRef::BuildBlendTrees(&self.build_blend_trees)),
            JobId::EvaluateClipAnimator(slot) => self
                .clip_evaluators
                .get(slot)
                .map(JobRef::EvaluateClipAnimator),
            JobId::EvaluateBlendedClipAnimator(slot) => self
                .blended_evaluators
                .get(slot)
                .map(JobRef::EvaluateBlendedClipAnimator),
        }
    }
}

/// One job of a frame together with its dependencies.
#[derive(Debug, Clone, Copy)]
pub struct FrameJob<'a> {
    pub id: JobId,
    pub deps: JobDeps,
    pub job: JobRef<'a>,
}

/// Ordered jobs for one frame, borrowed from the scheduler.
///
/// List order is a valid execution order: every job comes after all of its
/// dependencies, and every dependency is part of the same list.
#[derive(Debug, Clone, Copy)]
pub struct FrameJobs<'a> {
    store: &'a JobStore,
    time: f64,
    frame: u64,
}

impl<'a> FrameJobs<'a> {
    pub(crate) fn new(store: &'a JobStore, time: f64, frame: u64) -> Self {
        Self { store, time, frame }
    }

    /// Simulation time the frame was built for.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// 1-based number of this build.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.store.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.scheduled.is_empty()
    }

    /// The raw `(id, deps)` list.
    pub fn scheduled(&self) -> &'a [ScheduledJob] {
        &self.store.scheduled
    }

    pub fn ids(&self) -> impl Iterator<Item = JobId> + 'a {
        self.store.scheduled.iter().map(|s| s.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = FrameJob<'a>> + 'a {
        let store = self.store;
        store.scheduled.iter().filter_map(move |s| {
            store.resolve(s.id).map(|job| FrameJob {
                id: s.id,
                deps: s.deps,
                job,
            })
        })
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.store.scheduled.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: JobId) -> Option<FrameJob<'a>> {
        let scheduled = self.store.scheduled.iter().find(|s| s.id == id)?;
        let job = self.store.resolve(id)?;
        Some(FrameJob {
            id,
            deps: scheduled.deps,
            job,
        })
    }

    /// Dependencies of `id` in this frame, or `None` if it is not scheduled.
    pub fn dependencies_of(&self, id: JobId) -> Option<JobDeps> {
        self.store
            .scheduled
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.deps)
    }
}
