// src/dag/dirty.rs

//! Dirty event routing: one queue of handles per change category.

use tracing::{trace, warn};

use crate::resources::{
    BlendedClipAnimatorHandle, ChannelMapperHandle, ClipAnimatorHandle, ClipHandle, Handle,
    NodeId, ResourceLookup,
};
use crate::types::{DirtyDedup, DirtyFlag};

/// Handles dirtied since the last build, bucketed by [`DirtyFlag`].
///
/// Queues keep insertion order. Whether duplicates are kept depends on the
/// configured [`DirtyDedup`] policy.
#[derive(Debug, Default)]
pub struct DirtyQueues {
    dedup: DirtyDedup,
    pub(crate) clips: Vec<ClipHandle>,
    pub(crate) channel_mappers: Vec<ChannelMapperHandle>,
    pub(crate) clip_animators: Vec<ClipAnimatorHandle>,
    pub(crate) blended_clip_animators: Vec<BlendedClipAnimatorHandle>,
}

impl DirtyQueues {
    pub fn new(dedup: DirtyDedup) -> Self {
        Self {
            dedup,
            ..Self::default()
        }
    }

    /// Resolve `node` through the lookup matching `flag` and queue the handle.
    ///
    /// Returns `false` only when the dedup policy skipped an already-queued
    /// handle.
    pub fn mark_dirty<L: ResourceLookup + ?Sized>(
        &mut self,
        lookup: &mut L,
        flag: DirtyFlag,
        node: NodeId,
    ) -> bool {
        match flag {
            DirtyFlag::ClipDirty => {
                let handle = lookup.lookup_clip(node);
                enqueue(&mut self.clips, handle, self.dedup, flag, node)
            }
            DirtyFlag::MappingsDirty => {
                let handle = lookup.lookup_channel_mapper(node);
                enqueue(&mut self.channel_mappers, handle, self.dedup, flag, node)
            }
            DirtyFlag::AnimatorDirty => {
                let handle = lookup.lookup_clip_animator(node);
                enqueue(&mut self.clip_animators, handle, self.dedup, flag, node)
            }
            DirtyFlag::BlendedAnimatorDirty => {
                let handle = lookup.lookup_blended_clip_animator(node);
                enqueue(
                    &mut self.blended_clip_animators,
                    handle,
                    self.dedup,
                    flag,
                    node,
                )
            }
        }
    }

    /// Number of handles waiting in the queue for `flag`.
    pub fn queued(&self, flag: DirtyFlag) -> usize {
        match flag {
            DirtyFlag::ClipDirty => self.clips.len(),
            DirtyFlag::MappingsDirty => self.channel_mappers.len(),
            DirtyFlag::AnimatorDirty => self.clip_animators.len(),
            DirtyFlag::BlendedAnimatorDirty => self.blended_clip_animators.len(),
        }
    }

    /// `true` when no queue holds anything.
    pub fn is_empty(&self) -> bool {
        DirtyFlag::ALL.iter().all(|flag| self.queued(*flag) == 0)
    }

    pub fn dedup(&self) -> DirtyDedup {
        self.dedup
    }

    pub fn clips(&self) -> &[ClipHandle] {
        &self.clips
    }

    pub fn channel_mappers(&self) -> &[ChannelMapperHandle] {
        &self.channel_mappers
    }

    pub fn clip_animators(&self) -> &[ClipAnimatorHandle] {
        &self.clip_animators
    }

    pub fn blended_clip_animators(&self) -> &[BlendedClipAnimatorHandle] {
        &self.blended_clip_animators
    }
}

fn enqueue<T>(
    queue: &mut Vec<Handle<T>>,
    handle: Handle<T>,
    dedup: DirtyDedup,
    flag: DirtyFlag,
    node: NodeId,
) -> bool {
    if dedup == DirtyDedup::OnInsert && queue.contains(&handle) {
        trace!(%flag, %node, ?handle, "handle already queued; skipping");
        return false;
    }

    if handle.is_null() {
        warn!(%flag, %node, "lookup returned a null handle; queuing it anyway");
    }

    queue.push(handle);
    trace!(%flag, %node, ?handle, queued = queue.len(), "marked dirty");
    true
}
