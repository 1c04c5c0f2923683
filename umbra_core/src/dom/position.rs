// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-order comparison.

use core::{fmt, ops};

use crate::node::ShadowNode;
use crate::revision::Revision;

/// DOM-style document position bitmask.
///
/// A value returned by [`compare_document_position(revision, a, b)`] describes
/// where `a` sits relative to `b`.
///
/// [`compare_document_position(revision, a, b)`]: compare_document_position
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocumentPosition(u16);

impl DocumentPosition {
    /// Same node: no relation bits.
    pub const NONE: Self = Self(0);
    /// The nodes are not in the same tree.
    pub const DISCONNECTED: Self = Self(1);
    /// Comes first in tree order.
    pub const PRECEDING: Self = Self(2);
    /// Comes later in tree order.
    pub const FOLLOWING: Self = Self(4);
    /// Is an ancestor of the other node.
    pub const CONTAINS: Self = Self(8);
    /// Is a descendant of the other node.
    pub const CONTAINED_BY: Self = Self(16);

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl ops::BitOr for DocumentPosition {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for DocumentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(DocumentPosition, &str); 5] = [
            (DocumentPosition::DISCONNECTED, "DISCONNECTED"),
            (DocumentPosition::PRECEDING, "PRECEDING"),
            (DocumentPosition::FOLLOWING, "FOLLOWING"),
            (DocumentPosition::CONTAINS, "CONTAINS"),
            (DocumentPosition::CONTAINED_BY, "CONTAINED_BY"),
        ];
        if self.0 == 0 {
            return f.write_str("DocumentPosition(NONE)");
        }
        f.write_str("DocumentPosition(")?;
        let mut sep = "";
        for (flag, name) in NAMES {
            if self.contains(flag) {
                write!(f, "{sep}{name}")?;
                sep = " | ";
            }
        }
        f.write_str(")")
    }
}

/// Compares the tree positions of `a` and `b` in `revision`.
///
/// The result describes `a` relative to `b`: an ancestor gets
/// [`CONTAINS`](DocumentPosition::CONTAINS) | [`PRECEDING`](DocumentPosition::PRECEDING),
/// a descendant gets
/// [`CONTAINED_BY`](DocumentPosition::CONTAINED_BY) | [`FOLLOWING`](DocumentPosition::FOLLOWING),
/// and otherwise the node whose branch has the smaller sibling index at the
/// point where the two paths diverge is `PRECEDING`.
///
/// A node compared with itself, or with another snapshot of the same logical
/// node present in `revision`, is [`NONE`](DocumentPosition::NONE). Nodes on
/// different surfaces, nodes missing from `revision`, and the root compared
/// with any other node (the root has no path) are
/// [`DISCONNECTED`](DocumentPosition::DISCONNECTED).
#[must_use]
pub fn compare_document_position(
    revision: &Revision,
    a: &ShadowNode,
    b: &ShadowNode,
) -> DocumentPosition {
    if a.surface_id() != b.surface_id() {
        return DocumentPosition::DISCONNECTED;
    }
    if core::ptr::eq(a, b) {
        return DocumentPosition::NONE;
    }

    let root = revision.root();
    let (Some(path_a), Some(path_b)) = (a.family().ancestors(root), b.family().ancestors(root))
    else {
        return DocumentPosition::DISCONNECTED;
    };
    if a.same_family(b) {
        return DocumentPosition::NONE;
    }
    if path_a.is_empty() || path_b.is_empty() {
        return DocumentPosition::DISCONNECTED;
    }

    let common = path_a.common_prefix_len(&path_b);
    if common == path_a.len() {
        return DocumentPosition::CONTAINS | DocumentPosition::PRECEDING;
    }
    if common == path_b.len() {
        return DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING;
    }
    if path_a.steps()[common].index < path_b.steps()[common].index {
        DocumentPosition::PRECEDING
    } else {
        DocumentPosition::FOLLOWING
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::sync::Arc;
    use alloc::vec;

    use super::*;
    use crate::node::{Family, NodeTraits, ShadowNodeFragment, SurfaceId, Tag};
    use crate::revision::RevisionNumber;
    use crate::testing::Fixture;

    #[test]
    fn node_compared_with_itself_is_none() {
        let fx = Fixture::new();
        for node in fx.revision.root().descendants() {
            assert_eq!(
                compare_document_position(&fx.revision, node, node),
                DocumentPosition::NONE
            );
        }
    }

    #[test]
    fn siblings_are_ordered_by_index() {
        let fx = Fixture::new();
        assert_eq!(
            compare_document_position(&fx.revision, &fx.first, &fx.second),
            DocumentPosition::PRECEDING
        );
        assert_eq!(
            compare_document_position(&fx.revision, &fx.second, &fx.first),
            DocumentPosition::FOLLOWING
        );
    }

    #[test]
    fn cousins_are_ordered_at_divergence() {
        let fx = Fixture::new();
        let text = &fx.label.children()[0];
        assert_eq!(
            compare_document_position(&fx.revision, &fx.second, text),
            DocumentPosition::PRECEDING
        );
        assert_eq!(
            compare_document_position(&fx.revision, text, &fx.first),
            DocumentPosition::FOLLOWING
        );
    }

    #[test]
    fn ancestor_contains_descendant() {
        let fx = Fixture::new();
        let down = compare_document_position(&fx.revision, &fx.container, &fx.second);
        assert_eq!(down, DocumentPosition::CONTAINS | DocumentPosition::PRECEDING);
        let up = compare_document_position(&fx.revision, &fx.second, &fx.container);
        assert_eq!(
            up,
            DocumentPosition::CONTAINED_BY | DocumentPosition::FOLLOWING
        );
    }

    #[test]
    fn other_surface_is_disconnected_both_ways() {
        let fx = Fixture::new();
        let other_root = Family::new_root(Tag(1), SurfaceId(2), "RootView");
        let other = Family::new_child(&other_root, Tag(2), "View");
        let node = ShadowNode::new(Arc::clone(&other));
        assert_eq!(
            compare_document_position(&fx.revision, &fx.first, &node),
            DocumentPosition::DISCONNECTED
        );
        assert_eq!(
            compare_document_position(&fx.revision, &node, &fx.first),
            DocumentPosition::DISCONNECTED
        );
    }

    #[test]
    fn removed_or_root_node_is_disconnected() {
        let fx = Fixture::new();
        let bare_root = Arc::new(
            ShadowNode::new(Arc::clone(&fx.root_family)).with_traits(NodeTraits::ROOT_NODE_KIND),
        );
        let emptied = Revision::new(bare_root, RevisionNumber(9));
        assert_eq!(
            compare_document_position(&emptied, &fx.first, &fx.second),
            DocumentPosition::DISCONNECTED
        );
        assert_eq!(
            compare_document_position(&fx.revision, fx.revision.root(), &fx.first),
            DocumentPosition::DISCONNECTED
        );
    }

    #[test]
    fn removed_node_is_disconnected_from_its_own_snapshots() {
        let fx = Fixture::new();
        let next = fx
            .revision
            .clone_tree(fx.container.family(), |container| {
                container.clone_with(ShadowNodeFragment {
                    children: Some(vec![Arc::clone(&fx.second)]),
                    ..ShadowNodeFragment::default()
                })
            })
            .expect("container is in the revision");
        let copy = fx.first.clone_with(ShadowNodeFragment::default());

        assert_eq!(
            compare_document_position(&next, &fx.first, &copy),
            DocumentPosition::DISCONNECTED
        );
        assert_eq!(
            compare_document_position(&next, &fx.first, &fx.first),
            DocumentPosition::NONE
        );
        // Still present in the original revision.
        assert_eq!(
            compare_document_position(&fx.revision, &fx.first, &copy),
            DocumentPosition::NONE
        );
    }

    #[test]
    fn debug_lists_flags() {
        let both = DocumentPosition::CONTAINS | DocumentPosition::PRECEDING;
        assert_eq!(
            format!("{both:?}"),
            "DocumentPosition(PRECEDING | CONTAINS)"
        );
        assert_eq!(both.bits(), 10);
        assert_eq!(
            format!("{:?}", DocumentPosition::NONE),
            "DocumentPosition(NONE)"
        );
    }
}
