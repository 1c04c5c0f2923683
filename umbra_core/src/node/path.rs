// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor paths.

use alloc::sync::Arc;
use alloc::vec::Vec;

use super::shadow::ShadowNode;

/// One hop of an [`AncestorPath`]: an ancestor instance and the index of the
/// next node on the path among its children.
#[derive(Clone, Copy, Debug)]
pub struct AncestorStep<'a> {
    /// The ancestor instance in the revision being queried.
    pub node: &'a Arc<ShadowNode>,
    /// Index of the next node on the path in `node`'s children.
    pub index: usize,
}

impl<'a> AncestorStep<'a> {
    /// The child this step leads to.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range, which means the path was not
    /// built against this tree.
    #[must_use]
    pub fn child(&self) -> &'a Arc<ShadowNode> {
        let children = self.node.children();
        assert!(
            self.index < children.len(),
            "ancestor path index {} out of range for {:?} ({} children)",
            self.index,
            self.node.tag(),
            children.len()
        );
        &children[self.index]
    }
}

/// The chain of ancestors from a revision's root down to (not including) a
/// target node.
///
/// Built per query by [`Family::ancestors`](super::Family::ancestors); never
/// stored. An empty path means the target is the root itself.
#[derive(Clone, Debug, Default)]
pub struct AncestorPath<'a> {
    steps: Vec<AncestorStep<'a>>,
}

impl<'a> AncestorPath<'a> {
    pub(crate) fn from_steps(steps: Vec<AncestorStep<'a>>) -> Self {
        Self { steps }
    }

    /// Number of ancestors (the target's depth below the root).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the target is the root.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The steps, root first.
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[AncestorStep<'a>] {
        &self.steps
    }

    /// Iterates over the steps, root first.
    pub fn iter(&self) -> core::slice::Iter<'_, AncestorStep<'a>> {
        self.steps.iter()
    }

    /// The target's current instance.
    ///
    /// # Panics
    ///
    /// Panics on an empty path; the root has no step leading to it.
    #[must_use]
    pub fn target(&self) -> &'a Arc<ShadowNode> {
        match self.steps.last() {
            Some(step) => step.child(),
            None => panic!("empty ancestor path has no target step"),
        }
    }

    /// The target's parent instance, or `None` for an empty path.
    ///
    /// This is the last ancestor on the path; for a node directly below the
    /// root it is the root.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&'a Arc<ShadowNode>> {
        self.steps.last().map(|step| step.node)
    }

    /// Length of the longest common prefix of child indices.
    ///
    /// Both paths must come from the same revision; up to the divergence
    /// point equal indices mean equal ancestors.
    #[must_use]
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.steps
            .iter()
            .zip(&other.steps)
            .take_while(|(a, b)| a.index == b.index)
            .count()
    }
}

impl<'p, 'a> IntoIterator for &'p AncestorPath<'a> {
    type Item = &'p AncestorStep<'a>;
    type IntoIter = core::slice::Iter<'p, AncestorStep<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Fixture;

    #[test]
    fn parent_is_last_ancestor() {
        let fx = Fixture::new();
        let path = fx
            .first
            .family()
            .ancestors(fx.revision.root())
            .expect("first is connected");
        let parent = path.parent().expect("non-empty path");
        assert!(parent.family().is(fx.container.family()));
    }

    #[test]
    fn common_prefix_stops_at_divergence() {
        let fx = Fixture::new();
        let root = fx.revision.root();
        let first = fx.first.family().ancestors(root).expect("connected");
        let second = fx.second.family().ancestors(root).expect("connected");
        let container = fx.container.family().ancestors(root).expect("connected");
        assert_eq!(first.common_prefix_len(&second), 1);
        assert_eq!(first.common_prefix_len(&container), 1);
        assert_eq!(container.common_prefix_len(&container), container.len());
    }

    #[test]
    #[should_panic(expected = "empty ancestor path")]
    fn empty_path_has_no_target() {
        let fx = Fixture::new();
        let path = fx
            .root_family
            .ancestors(fx.revision.root())
            .expect("root resolves to itself");
        let _ = path.target();
    }
}
