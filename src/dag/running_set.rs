// src/dag/running_set.rs

//! Membership of currently playing animators.

use indexmap::IndexMap;

use crate::resources::Handle;

/// Order-preserving set of running animators, each with its start time.
///
/// Membership only changes through [`RunningSet::set_running`]; nothing here
/// expires on its own.
#[derive(Debug)]
pub struct RunningSet<T> {
    /// Running animator → simulation time it (last) started at.
    members: IndexMap<Handle<T>, f64>,
}

impl<T> RunningSet<T> {
    pub fn new() -> Self {
        Self {
            members: IndexMap::new(),
        }
    }

    /// Apply a play/stop transition.
    ///
    /// - not running → running: appended and stamped with `now`.
    /// - running → not running: removed; the last member takes its slot.
    /// - anything else is a no-op.
    ///
    /// Returns whether membership changed.
    pub fn set_running(&mut self, handle: Handle<T>, running: bool, now: f64) -> bool {
        if running {
            if self.members.contains_key(&handle) {
                return false;
            }
            self.members.insert(handle, now);
            true
        } else {
            self.members.swap_remove(&handle).is_some()
        }
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.members.contains_key(&handle)
    }

    /// Start time recorded when `handle` last entered the set, while it is
    /// still a member.
    pub fn start_time(&self, handle: Handle<T>) -> Option<f64> {
        self.members.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in running-set order.
    pub fn handles(&self) -> impl Iterator<Item = Handle<T>> + '_ {
        self.members.keys().copied()
    }

    /// Members in running-set order, paired with their start times.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, f64)> + '_ {
        self.members.iter().map(|(handle, start)| (*handle, *start))
    }
}

impl<T> Default for RunningSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
