// src/dag/job_pool.rs

//! Grow-only pool of reusable job objects.

use std::fmt;

use tracing::debug;

/// Arena of job objects indexed by running-set position.
///
/// The pool never shrinks and never replaces an existing entry, so slot `i`
/// is the same object on every frame for as long as the scheduler lives.
pub struct JobPool<J> {
    jobs: Vec<J>,
}

impl<J> JobPool<J> {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Number of job objects allocated so far.
    pub fn allocated(&self) -> usize {
        self.jobs.len()
    }

    pub fn get(&self, slot: usize) -> Option<&J> {
        self.jobs.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut J> {
        self.jobs.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &J> {
        self.jobs.iter()
    }
}

impl<J: Default> JobPool<J> {
    /// Grow the pool to at least `n` entries.
    ///
    /// Returns how many job objects were created; `0` when the pool was
    /// already large enough.
    pub fn ensure_capacity(&mut self, n: usize) -> usize {
        let current = self.jobs.len();
        if current >= n {
            return 0;
        }

        let added = n - current;
        self.jobs.resize_with(n, J::default);
        debug!(from = current, to = n, "job pool grown");
        added
    }
}

impl<J> Default for JobPool<J> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J> fmt::Debug for JobPool<J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobPool")
            .field("allocated", &self.jobs.len())
            .finish()
    }
}
