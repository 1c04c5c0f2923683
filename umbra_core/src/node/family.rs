// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable logical node identity.

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::{fmt, ptr};

use super::id::{SurfaceId, Tag};
use super::path::{AncestorPath, AncestorStep};
use super::shadow::ShadowNode;

/// The identity of one logical node across every revision it appears in.
///
/// Two shadow nodes are the same logical node iff they point at the same
/// `Family`. Families are created once, when a logical node first enters a
/// tree, and are never mutated afterwards. The parent link is weak: it exists
/// only so that [`ancestors`](Self::ancestors) can find the node again in a
/// later revision, and it does not keep the parent family alive.
pub struct Family {
    tag: Tag,
    surface: SurfaceId,
    component_name: &'static str,
    parent: Option<Weak<Self>>,
}

impl Family {
    /// Creates the family of a surface's root node.
    #[must_use]
    pub fn new_root(tag: Tag, surface: SurfaceId, component_name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            tag,
            surface,
            component_name,
            parent: None,
        })
    }

    /// Creates the family of a node whose parent is `parent`'s logical node.
    ///
    /// The new family inherits the parent's surface.
    #[must_use]
    pub fn new_child(parent: &Arc<Self>, tag: Tag, component_name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            tag,
            surface: parent.surface,
            component_name,
            parent: Some(Arc::downgrade(parent)),
        })
    }

    /// Returns the node tag.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the surface this logical node belongs to.
    #[inline]
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    /// Returns the component name (e.g. `"View"`, `"RawText"`).
    #[inline]
    #[must_use]
    pub fn component_name(&self) -> &'static str {
        self.component_name
    }

    /// Returns the parent family, if it is still alive.
    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Whether `self` and `other` are the same family object.
    #[inline]
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }

    /// Locates this family's current instance below `root`.
    ///
    /// Returns the chain of (ancestor, child index) pairs from `root` down to
    /// the node's parent. The path is empty when this *is* `root`'s family.
    /// Returns `None` when the node is not reachable from `root`: the family
    /// chain never meets `root`'s family, a parent family has been dropped,
    /// or some family on the way is missing from its parent's children in
    /// this tree.
    ///
    /// Runs in time proportional to depth × fan-out and never recurses.
    #[must_use]
    pub fn ancestors<'a>(&self, root: &'a Arc<ShadowNode>) -> Option<AncestorPath<'a>> {
        let root_family = root.family();
        if self.is(root_family) {
            return Some(AncestorPath::default());
        }

        // Families strictly between `root` and `self`, nearest first.
        let mut lineage: Vec<Arc<Self>> = Vec::new();
        let mut next = self.parent();
        loop {
            let family = next?;
            if family.is(root_family) {
                break;
            }
            next = family.parent();
            lineage.push(family);
        }

        let mut steps = Vec::with_capacity(lineage.len() + 1);
        let mut parent = root;
        let descent = lineage
            .iter()
            .rev()
            .map(|f| &**f)
            .chain(core::iter::once(self));
        for family in descent {
            let index = parent
                .children()
                .iter()
                .position(|child| child.family().is(family))?;
            steps.push(AncestorStep {
                node: parent,
                index,
            });
            parent = &parent.children()[index];
        }
        Some(AncestorPath::from_steps(steps))
    }
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("tag", &self.tag)
            .field("surface", &self.surface)
            .field("component_name", &self.component_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::*;
    use crate::testing::{Fixture, view};

    #[test]
    fn root_family_has_empty_path() {
        let fx = Fixture::new();
        let path = fx.root_family.ancestors(fx.revision.root());
        assert!(path.is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn path_records_child_indices_from_root() {
        let fx = Fixture::new();
        // root ─ container(0) ─ second(1)
        let path = fx
            .second
            .family()
            .ancestors(fx.revision.root())
            .expect("second is connected");
        let indices: alloc::vec::Vec<usize> = path.iter().map(|s| s.index).collect();
        assert_eq!(indices, [0, 1]);
        assert!(Arc::ptr_eq(path.steps()[0].node, fx.revision.root()));
        assert!(path.target().family().is(fx.second.family()));
    }

    #[test]
    fn foreign_family_is_unreachable() {
        let fx = Fixture::new();
        let stranger_root = Family::new_root(Tag(900), SurfaceId(1), "RootView");
        let stranger = Family::new_child(&stranger_root, Tag(901), "View");
        assert!(stranger.ancestors(fx.revision.root()).is_none());
    }

    #[test]
    fn family_absent_from_children_is_unreachable() {
        let fx = Fixture::new();
        // A family created under `container` that no revision ever placed.
        let detached = Family::new_child(fx.container.family_handle(), Tag(77), "View");
        let _node = view(&detached, 0.0, 0.0, 1.0, 1.0);
        assert!(detached.ancestors(fx.revision.root()).is_none());
    }

    #[test]
    fn dropped_parent_family_disconnects() {
        let root = Family::new_root(Tag(1), SurfaceId(3), "RootView");
        let orphan = {
            let middle = Family::new_child(&root, Tag(2), "View");
            Family::new_child(&middle, Tag(3), "View")
        };
        assert!(orphan.parent().is_none());
        assert_eq!(orphan.surface_id(), SurfaceId(3));
    }
}
