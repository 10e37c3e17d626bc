use std::fmt;

use tracing::{debug, trace};

use crate::config::SchedulerConfig;
use crate::dag::dirty::DirtyQueues;
use crate::dag::frame_jobs::{FrameJobs, JobStore};
use crate::dag::job_pool::JobPool;
use crate::dag::jobs::{EvaluateAnimatorJob, JobDeps, JobId, ScheduledJob};
use crate::dag::running_set::RunningSet;
use crate::resources::{
    BlendedClipAnimator, BlendedClipAnimatorHandle, ClipAnimator, ClipAnimatorHandle, NodeId,
    ResourceLookup,
};
use crate::types::DirtyFlag;

/// Per-frame job scheduler for the animation subsystem.
///
/// It owns:
/// - the dirty queues filled by [`mark_dirty`](Self::mark_dirty)
/// - the clip / blended clip running sets driven by the lifecycle calls
/// - every job object it will ever hand out, including the grow-only
///   evaluation pools
///
/// and once per frame turns them into an ordered job list with
/// [`jobs_to_execute`](Self::jobs_to_execute).
///
/// All operations take `&mut self`: the scheduler is meant to be driven from
/// one frame loop, between frames.
pub struct AnimationScheduler<L> {
    lookup: L,
    config: SchedulerConfig,
    /// Time of the last build; start time for animators started after it.
    simulation_time: f64,
    dirty: DirtyQueues,
    clip_animators: RunningSet<ClipAnimator>,
    blended_clip_animators: RunningSet<BlendedClipAnimator>,
    jobs: JobStore,
    /// Number of builds so far.
    frame_counter: u64,
}

impl<L> fmt::Debug for AnimationScheduler<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("config", &self.config)
            .field("simulation_time", &self.simulation_time)
            .field("dirty", &self.dirty)
            .field("clip_animators", &self.clip_animators)
            .field("blended_clip_animators", &self.blended_clip_animators)
            .field("frame_counter", &self.frame_counter)
            .finish_non_exhaustive()
    }
}

impl<L: ResourceLookup> AnimationScheduler<L> {
    /// Construct a scheduler with default options around a lookup service.
    pub fn new(lookup: L) -> Self {
        Self::with_config(lookup, SchedulerConfig::default())
    }

    pub fn with_config(lookup: L, config: SchedulerConfig) -> Self {
        Self {
            lookup,
            config,
            simulation_time: 0.0,
            dirty: DirtyQueues::new(config.dirty_dedup),
            clip_animators: RunningSet::new(),
            blended_clip_animators: RunningSet::new(),
            jobs: JobStore::default(),
            frame_counter: 0,
        }
    }

    /// Record that the resource behind `node` changed.
    ///
    /// The handle is resolved now and consumed by the next build.
    pub fn mark_dirty(&mut self, flag: DirtyFlag, node: NodeId) {
        self.dirty.mark_dirty(&mut self.lookup, flag, node);
    }

    /// Start or stop a clip animator.
    ///
    /// Returns whether running-set membership changed.
    pub fn set_clip_animator_running(&mut self, handle: ClipAnimatorHandle, running: bool) -> bool {
        let changed = self
            .clip_animators
            .set_running(handle, running, self.simulation_time);
        if changed {
            debug!(
                ?handle,
                running,
                time = self.simulation_time,
                count = self.clip_animators.len(),
                "clip animator running state changed"
            );
        }
        changed
    }

    /// Start or stop a blended clip animator.
    ///
    /// Returns whether running-set membership changed.
    pub fn set_blended_clip_animator_running(
        &mut self,
        handle: BlendedClipAnimatorHandle,
        running: bool,
    ) -> bool {
        let changed =
            self.blended_clip_animators
                .set_running(handle, running, self.simulation_time);
        if changed {
            debug!(
                ?handle,
                running,
                time = self.simulation_time,
                count = self.blended_clip_animators.len(),
                "blended clip animator running state changed"
            );
        }
        changed
    }

    /// Build this frame's ordered job list.
    ///
    /// Drains every dirty queue. The returned list holds, in order: clip
    /// loading, animator discovery and blend-tree building (each only if its
    /// queue had entries), then one evaluation job per running clip animator,
    /// then one per running blended clip animator.
    pub fn jobs_to_execute(&mut self, current_time: f64) -> FrameJobs<'_> {
        self.simulation_time = current_time;
        self.frame_counter += 1;

        let jobs = &mut self.jobs;
        jobs.scheduled.clear();

        let load_clips = !self.dirty.clips.is_empty();
        if load_clips {
            jobs.load_clips.take_clips(&mut self.dirty.clips);
            trace!(clips = jobs.load_clips.clips().len(), "scheduling clip loading");
            jobs.scheduled
                .push(ScheduledJob::new(JobId::LoadClips, JobDeps::none()));
        }

        let find_running = !self.dirty.clip_animators.is_empty();
        if find_running {
            jobs.find_running
                .take_animators(&mut self.dirty.clip_animators);
            let mut deps = JobDeps::none();
            if load_clips {
                deps.push(JobId::LoadClips);
            }
            trace!(
                animators = jobs.find_running.animators().len(),
                "scheduling running clip animator discovery"
            );
            jobs.scheduled
                .push(ScheduledJob::new(JobId::FindRunningClipAnimators, deps));
        }

        let build_blend_trees = !self.dirty.blended_clip_animators.is_empty();
        if build_blend_trees {
            jobs.build_blend_trees
                .take_animators(&mut self.dirty.blended_clip_animators);
            let mut deps = JobDeps::none();
            if load_clips && self.config.blend_build_waits_for_clip_load {
                deps.push(JobId::LoadClips);
            }
            trace!(
                animators = jobs.build_blend_trees.animators().len(),
                "scheduling blend tree rebuild"
            );
            jobs.scheduled
                .push(ScheduledJob::new(JobId::BuildBlendTrees, deps));
        }

        // No job consumes channel mapper changes; drop them so the queue
        // stays bounded.
        if !self.dirty.channel_mappers.is_empty() {
            debug!(
                mappers = self.dirty.channel_mappers.len(),
                "discarding dirty channel mappers"
            );
            self.dirty.channel_mappers.clear();
        }

        let mut clip_upstream = JobDeps::none();
        if load_clips {
            clip_upstream.push(JobId::LoadClips);
        }
        if find_running {
            clip_upstream.push(JobId::FindRunningClipAnimators);
        }
        schedule_evaluators(
            &self.clip_animators,
            &mut jobs.clip_evaluators,
            &mut jobs.scheduled,
            JobId::EvaluateClipAnimator,
            clip_upstream,
            current_time,
        );

        let mut blended_upstream = JobDeps::none();
        if load_clips {
            blended_upstream.push(JobId::LoadClips);
        }
        if build_blend_trees {
            blended_upstream.push(JobId::BuildBlendTrees);
        }
        schedule_evaluators(
            &self.blended_clip_animators,
            &mut jobs.blended_evaluators,
            &mut jobs.scheduled,
            JobId::EvaluateBlendedClipAnimator,
            blended_upstream,
            current_time,
        );

        debug!(
            frame = self.frame_counter,
            time = current_time,
            jobs = jobs.scheduled.len(),
            clip_evaluators = self.clip_animators.len(),
            blended_evaluators = self.blended_clip_animators.len(),
            "built frame job list"
        );

        FrameJobs::new(&self.jobs, current_time, self.frame_counter)
    }

    /// Time passed to the most recent [`jobs_to_execute`](Self::jobs_to_execute).
    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    /// Number of frames built so far.
    pub fn frames_built(&self) -> u64 {
        self.frame_counter
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn resources(&self) -> &L {
        &self.lookup
    }

    /// Mutable access to the lookup service, e.g. to resolve an animator
    /// handle before a lifecycle call.
    pub fn resources_mut(&mut self) -> &mut L {
        &mut self.lookup
    }

    pub fn dirty_queues(&self) -> &DirtyQueues {
        &self.dirty
    }

    pub fn running_clip_animators(&self) -> impl Iterator<Item = ClipAnimatorHandle> + '_ {
        self.clip_animators.handles()
    }

    pub fn running_blended_clip_animators(
        &self,
    ) -> impl Iterator<Item = BlendedClipAnimatorHandle> + '_ {
        self.blended_clip_animators.handles()
    }

    pub fn is_clip_animator_running(&self, handle: ClipAnimatorHandle) -> bool {
        self.clip_animators.contains(handle)
    }

    pub fn is_blended_clip_animator_running(&self, handle: BlendedClipAnimatorHandle) -> bool {
        self.blended_clip_animators.contains(handle)
    }

    /// Start time of a running clip animator.
    pub fn clip_animator_start_time(&self, handle: ClipAnimatorHandle) -> Option<f64> {
        self.clip_animators.start_time(handle)
    }

    /// Start time of a running blended clip animator.
    pub fn blended_clip_animator_start_time(
        &self,
        handle: BlendedClipAnimatorHandle,
    ) -> Option<f64> {
        self.blended_clip_animators.start_time(handle)
    }

    /// Clip evaluation jobs allocated so far.
    pub fn clip_evaluator_pool_size(&self) -> usize {
        self.jobs.clip_evaluators.allocated()
    }

    /// Blended clip evaluation jobs allocated so far.
    pub fn blended_evaluator_pool_size(&self) -> usize {
        self.jobs.blended_evaluators.allocated()
    }

    /// The job list of the most recent build, without rebuilding.
    pub fn last_frame(&self) -> FrameJobs<'_> {
        FrameJobs::new(&self.jobs, self.simulation_time, self.frame_counter)
    }
}

/// Bind pool slot `i` to running-set member `i` and queue one evaluation job
/// per member, each depending on `upstream`.
fn schedule_evaluators<T>(
    running: &RunningSet<T>,
    pool: &mut JobPool<EvaluateAnimatorJob<T>>,
    scheduled: &mut Vec<ScheduledJob>,
    job_id: fn(usize) -> JobId,
    upstream: JobDeps,
    current_time: f64,
) {
    pool.ensure_capacity(running.len());

    for (slot, (animator, start_time)) in running.iter().enumerate() {
        if let Some(job) = pool.get_mut(slot) {
            job.bind(animator, start_time, current_time);
            scheduled.push(ScheduledJob::new(job_id(slot), upstream));
        }
    }
}
