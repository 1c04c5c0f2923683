// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed tree snapshots.
//!
//! A [`Revision`] is one immutable snapshot of a surface's whole tree. The
//! commit process that produces revisions and decides which one is current
//! lives outside this crate; queries receive the current revision explicitly.

use alloc::sync::Arc;
use core::fmt;

use crate::node::{Family, ShadowNode, ShadowNodeFragment, SurfaceId, Tag};

/// Monotonic revision counter for one surface.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevisionNumber(pub u64);

impl fmt::Debug for RevisionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevisionNumber({})", self.0)
    }
}

/// An immutable snapshot of one surface's tree.
///
/// Cloning a `Revision` is cheap: it only bumps the root's reference count.
#[derive(Clone, Debug)]
pub struct Revision {
    root: Arc<ShadowNode>,
    number: RevisionNumber,
}

impl Revision {
    /// Wraps `root` as revision `number`.
    ///
    /// # Panics
    ///
    /// Panics if `root` does not carry the root-node trait.
    #[must_use]
    pub fn new(root: Arc<ShadowNode>, number: RevisionNumber) -> Self {
        assert!(
            root.is_root_kind(),
            "revision root {:?} must carry the root-node trait",
            root.tag()
        );
        Self { root, number }
    }

    /// Creates the revision that follows `self` with a new root.
    ///
    /// # Panics
    ///
    /// Panics if `root` belongs to a different surface or lacks the root-node
    /// trait.
    #[must_use]
    pub fn next(&self, root: Arc<ShadowNode>) -> Self {
        assert_eq!(
            root.surface_id(),
            self.surface_id(),
            "cannot chain revisions of different surfaces"
        );
        Self::new(root, RevisionNumber(self.number.0 + 1))
    }

    /// Returns the root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Arc<ShadowNode> {
        &self.root
    }

    /// Returns the surface this revision snapshots.
    #[inline]
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.root.surface_id()
    }

    /// Returns the revision number.
    #[inline]
    #[must_use]
    pub fn number(&self) -> RevisionNumber {
        self.number
    }

    /// Produces the next revision by replacing `family`'s current instance
    /// with `f(instance)`.
    ///
    /// Only the nodes on the path from the root to the replaced node are
    /// cloned; every other subtree is shared with `self`. Returns `None` if
    /// `family` is not part of this revision.
    ///
    /// # Panics
    ///
    /// Panics if `f` returns a node of a different family.
    #[must_use]
    pub fn clone_tree(
        &self,
        family: &Family,
        f: impl FnOnce(&ShadowNode) -> ShadowNode,
    ) -> Option<Self> {
        let path = family.ancestors(&self.root)?;
        let current = if path.is_empty() {
            &self.root
        } else {
            path.target()
        };

        let replacement = f(current);
        assert!(
            replacement.family().is(family),
            "clone_tree callback replaced {:?} with a node of another family ({:?})",
            family.tag(),
            replacement.tag()
        );

        let mut node = Arc::new(replacement);
        for step in path.iter().rev() {
            let mut children = step.node.children().to_vec();
            children[step.index] = node;
            node = Arc::new(step.node.clone_with(ShadowNodeFragment {
                children: Some(children),
                ..ShadowNodeFragment::default()
            }));
        }
        Some(self.next(node))
    }

    /// Finds the node with `tag`, searching in tree order.
    #[must_use]
    pub fn find(&self, tag: Tag) -> Option<&Arc<ShadowNode>> {
        if self.root.tag() == tag {
            return Some(&self.root);
        }
        self.root.descendants().find(|node| node.tag() == tag)
    }
}
