//! Group prefixes for nested registration.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::normalize::normalize_segment;
use crate::router::Router;

/// The accumulated prefix of the groups currently being registered.
#[derive(Debug, Clone)]
pub struct PrefixStack {
    prefix: String,
    /// Prefix length to restore for each open group.
    marks: Vec<usize>,
}

impl Default for PrefixStack {
    fn default() -> Self {
        Self {
            prefix: String::from("/"),
            marks: Vec::new(),
        }
    }
}

impl PrefixStack {
    /// The current prefix, always starting and ending with `/`.
    pub fn current(&self) -> &str {
        &self.prefix
    }

    /// Number of open groups.
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// Opens a group. An empty segment opens a group that adds nothing.
    fn push(&mut self, fragment: &str) {
        self.marks.push(self.prefix.len());
        let segment = normalize_segment(fragment);
        if !segment.is_empty() {
            self.prefix.push_str(&segment);
            self.prefix.push('/');
        }
    }

    /// Closes the innermost group, restoring the prefix it extended.
    fn pop(&mut self) {
        if let Some(len) = self.marks.pop() {
            self.prefix.truncate(len);
        }
    }
}

/// A router with one more group open.
///
/// Dropping the scope closes the group, so the prefix is restored however
/// the group callback exits, including by unwinding.
pub struct GroupScope<'r, T> {
    router: &'r mut Router<T>,
}

impl<'r, T> GroupScope<'r, T> {
    pub(crate) fn enter(router: &'r mut Router<T>, fragment: &str) -> Self {
        router.prefix.push(fragment);
        debug!(
            prefix = %router.prefix.current(),
            depth = router.prefix.depth(),
            "Entered route group"
        );
        Self { router }
    }
}

impl<T> Drop for GroupScope<'_, T> {
    fn drop(&mut self) {
        self.router.prefix.pop();
        debug!(
            prefix = %self.router.prefix.current(),
            depth = self.router.prefix.depth(),
            "Left route group"
        );
    }
}

impl<T> Deref for GroupScope<'_, T> {
    type Target = Router<T>;

    fn deref(&self) -> &Router<T> {
        &*self.router
    }
}

impl<T> DerefMut for GroupScope<'_, T> {
    fn deref_mut(&mut self) -> &mut Router<T> {
        &mut *self.router
    }
}
