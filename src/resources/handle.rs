// src/resources/handle.rs

//! Node identifiers and typed resource handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::Deserialize;

/// Externally-owned, stable identifier of a scene resource.
///
/// The scheduler never creates these; they come from the scene graph and are
/// only ever resolved into a [`Handle`] through a
/// [`ResourceLookup`](crate::resources::ResourceLookup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Pool marker for animation clip assets.
#[derive(Debug)]
pub enum Clip {}

/// Pool marker for channel mapping tables.
#[derive(Debug)]
pub enum ChannelMapper {}

/// Pool marker for playing clip animator instances.
#[derive(Debug)]
pub enum ClipAnimator {}

/// Pool marker for playing blended clip animator instances.
#[derive(Debug)]
pub enum BlendedClipAnimator {}

/// Opaque reference into one of the typed resource pools.
///
/// `T` is a zero-sized pool marker, so a clip handle can never be pushed into
/// an animator queue. A generation of `0` is reserved for the null handle,
/// which is what a lookup may hand back for a resource it could not resolve.
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _pool: PhantomData<fn() -> T>,
}

pub type ClipHandle = Handle<Clip>;
pub type ChannelMapperHandle = Handle<ChannelMapper>;
pub type ClipAnimatorHandle = Handle<ClipAnimator>;
pub type BlendedClipAnimatorHandle = Handle<BlendedClipAnimator>;

impl<T> Handle<T> {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _pool: PhantomData,
        }
    }

    /// The handle that refers to nothing.
    pub const fn null() -> Self {
        Self::new(0, 0)
    }

    pub fn is_null(&self) -> bool {
        self.generation == 0
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

// Manual impls: deriving would put bounds on the marker type.

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Handle(null)");
        }
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}
