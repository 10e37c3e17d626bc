// src/resources/lookup.rs

//! Node-id → handle resolution.
//!
//! The scheduler only ever calls the four `lookup_*` methods; it never reads
//! or mutates the resources behind the handles.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::resources::handle::{
    BlendedClipAnimatorHandle, ChannelMapperHandle, ClipAnimatorHandle, ClipHandle, Handle,
    NodeId,
};

/// Lookup service injected into [`AnimationScheduler`](crate::dag::AnimationScheduler).
///
/// Each method resolves a node id into a handle for its pool, creating the
/// backing entry lazily if the node has never been seen. Implementations may
/// return [`Handle::null`] when a node cannot be resolved; the scheduler passes
/// such handles through unexamined.
pub trait ResourceLookup {
    fn lookup_clip(&mut self, node: NodeId) -> ClipHandle;
    fn lookup_channel_mapper(&mut self, node: NodeId) -> ChannelMapperHandle;
    fn lookup_clip_animator(&mut self, node: NodeId) -> ClipAnimatorHandle;
    fn lookup_blended_clip_animator(&mut self, node: NodeId) -> BlendedClipAnimatorHandle;
}

impl<L: ResourceLookup + ?Sized> ResourceLookup for &mut L {
    fn lookup_clip(&mut self, node: NodeId) -> ClipHandle {
        (**self).lookup_clip(node)
    }

    fn lookup_channel_mapper(&mut self, node: NodeId) -> ChannelMapperHandle {
        (**self).lookup_channel_mapper(node)
    }

    fn lookup_clip_animator(&mut self, node: NodeId) -> ClipAnimatorHandle {
        (**self).lookup_clip_animator(node)
    }

    fn lookup_blended_clip_animator(&mut self, node: NodeId) -> BlendedClipAnimatorHandle {
        (**self).lookup_blended_clip_animator(node)
    }
}

/// In-memory id → handle table for a single pool.
///
/// Handles are dense indices handed out in first-seen order. A node keeps the
/// same handle for the lifetime of the manager.
pub struct HandleManager<T> {
    handles: HashMap<NodeId, Handle<T>>,
    next_index: u32,
}

impl<T> HandleManager<T> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            next_index: 0,
        }
    }

    /// Return the handle for `node`, allocating one on first use.
    pub fn lookup_handle(&mut self, node: NodeId) -> Handle<T> {
        let next_index = &mut self.next_index;
        *self.handles.entry(node).or_insert_with(|| {
            let handle = Handle::new(*next_index, 1);
            *next_index = next_index.wrapping_add(1);
            trace!(%node, ?handle, "allocated handle");
            handle
        })
    }

    /// Handle for `node` if it has already been resolved once.
    pub fn get(&self, node: NodeId) -> Option<Handle<T>> {
        self.handles.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<T> Default for HandleManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandleManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleManager")
            .field("len", &self.handles.len())
            .field("next_index", &self.next_index)
            .finish()
    }
}

/// The four resource managers bundled together.
#[derive(Debug, Default)]
pub struct ResourceManagers {
    pub clips: HandleManager<crate::resources::Clip>,
    pub channel_mappers: HandleManager<crate::resources::ChannelMapper>,
    pub clip_animators: HandleManager<crate::resources::ClipAnimator>,
    pub blended_clip_animators: HandleManager<crate::resources::BlendedClipAnimator>,
}

impl ResourceManagers {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceLookup for ResourceManagers {
    fn lookup_clip(&mut self, node: NodeId) -> ClipHandle {
        self.clips.lookup_handle(node)
    }

    fn lookup_channel_mapper(&mut self, node: NodeId) -> ChannelMapperHandle {
        self.channel_mappers.lookup_handle(node)
    }

    fn lookup_clip_animator(&mut self, node: NodeId) -> ClipAnimatorHandle {
        self.clip_animators.lookup_handle(node)
    }

    fn lookup_blended_clip_animator(&mut self, node: NodeId) -> BlendedClipAnimatorHandle {
        self.blended_clip_animators.lookup_handle(node)
    }
}
