//! Tracking of the placeholder paths currently under resolution.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use crate::error::StencilError;

/// Paths on the current resolution stack, in entry order, with a parallel
/// set for membership tests. Lives for one top-level call.
#[derive(Debug, Default)]
pub struct ActivePaths {
    stack: Vec<String>,
    members: HashSet<String>,
}

impl ActivePaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `path`, or fails with [`StencilError::Cycle`] without touching
    /// the state if it is already active. The returned guard pops it again.
    ///
    /// The empty path is never pushed.
    pub fn enter(&mut self, path: &str) -> Result<ActivePathGuard<'_>, StencilError> {
        if path.is_empty() {
            return Ok(ActivePathGuard {
                paths: self,
                pushed: false,
            });
        }
        if self.members.contains(path) {
            return Err(StencilError::Cycle {
                path: path.to_string(),
                stack: self.stack.clone(),
            });
        }
        self.stack.push(path.to_string());
        self.members.insert(path.to_string());
        Ok(ActivePathGuard {
            paths: self,
            pushed: true,
        })
    }

    fn pop(&mut self) {
        if let Some(path) = self.stack.pop() {
            self.members.remove(&path);
        }
    }
}

/// Scoped membership of one path. Dereferences to the set so nested
/// resolutions can enter further paths while this one is held.
#[derive(Debug)]
pub struct ActivePathGuard<'a> {
    paths: &'a mut ActivePaths,
    pushed: bool,
}

impl Deref for ActivePathGuard<'_> {
    type Target = ActivePaths;

    fn deref(&self) -> &ActivePaths {
        self.paths
    }
}

impl DerefMut for ActivePathGuard<'_> {
    fn deref_mut(&mut self) -> &mut ActivePaths {
        self.paths
    }
}

impl Drop for ActivePathGuard<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.paths.pop();
        }
    }
}
