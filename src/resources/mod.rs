// src/resources/mod.rs

//! Scene resource identifiers and the lookup services that resolve them.
//!
//! - [`handle`] defines [`NodeId`] and the typed [`Handle`] family.
//! - [`lookup`] defines the [`ResourceLookup`] service the scheduler is
//!   constructed with, plus an in-memory implementation.

pub mod handle;
pub mod lookup;

pub use handle::{
    BlendedClipAnimator, BlendedClipAnimatorHandle, ChannelMapper, ChannelMapperHandle, Clip,
    ClipAnimator, ClipAnimatorHandle, ClipHandle, Handle, NodeId,
};
pub use lookup::{HandleManager, ResourceLookup, ResourceManagers};
