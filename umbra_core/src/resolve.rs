// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Revision resolution.
//!
//! Callers hold [`ShadowNode`] references of unknown vintage. The functions
//! here map such a reference to the corresponding instance in a given
//! [`Revision`], or report that the node is gone. "Gone" is an ordinary
//! outcome, expressed as `None`.

use alloc::sync::Arc;

use crate::geometry::PositionType;
use crate::node::ShadowNode;
use crate::revision::Revision;

/// Why a query produced no result.
///
/// Never returned from the public query API (which uses `Option`); carried
/// internally and reported to trace sinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Miss {
    /// The node is not part of the revision.
    Disconnected,
    /// A node that must take part in layout does not.
    NotLayoutable,
    /// The node or one of its ancestors is not displayed.
    NotDisplayed,
    /// The node is displayed inline and has no box of its own.
    InlineDisplay,
    /// Positioned-ancestor resolution failed (the node is the root, or an
    /// ancestor is outside the layout system).
    NoPositionedAncestor,
    /// The node to measure against is not part of the revision.
    RelativeNodeDisconnected,
}

impl Miss {
    /// Every reason, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Disconnected,
        Self::NotLayoutable,
        Self::NotDisplayed,
        Self::InlineDisplay,
        Self::NoPositionedAncestor,
        Self::RelativeNodeDisconnected,
    ];

    /// The variant name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::NotLayoutable => "NotLayoutable",
            Self::NotDisplayed => "NotDisplayed",
            Self::InlineDisplay => "InlineDisplay",
            Self::NoPositionedAncestor => "NoPositionedAncestor",
            Self::RelativeNodeDisconnected => "RelativeNodeDisconnected",
        }
    }
}

/// Returns `node`'s instance in `revision`.
///
/// The result always has `node`'s family.
#[must_use]
pub fn current_instance(revision: &Revision, node: &ShadowNode) -> Option<Arc<ShadowNode>> {
    let root = revision.root();
    if node.same_family(root) {
        return Some(Arc::clone(root));
    }
    let path = node.family().ancestors(root)?;
    Some(Arc::clone(path.target()))
}

/// Returns the instance of `node`'s parent in `revision`.
///
/// For the root itself this returns the root; callers that care must check
/// for that case.
#[must_use]
pub fn parent_instance(revision: &Revision, node: &ShadowNode) -> Option<Arc<ShadowNode>> {
    let root = revision.root();
    if node.same_family(root) {
        return Some(Arc::clone(root));
    }
    let path = node.family().ancestors(root)?;
    path.parent().map(Arc::clone)
}

/// Returns `node`'s positioned ancestor (offset parent) in `revision`.
///
/// Walks from the parent toward the root and returns the first ancestor
/// whose position type is not [`Static`](PositionType::Static). If there is
/// none, the root is the positioned ancestor. Returns `None` if the node is
/// disconnected, if it is the root, or if an ancestor visited on the way does
/// not take part in layout.
#[must_use]
pub fn positioned_ancestor(revision: &Revision, node: &ShadowNode) -> Option<Arc<ShadowNode>> {
    let root = revision.root();
    let path = node.family().ancestors(root)?;
    if path.is_empty() {
        return None;
    }
    for step in path.iter().rev() {
        let layout = step.node.layout()?;
        if layout.metrics.position_type != PositionType::Static {
            return Some(Arc::clone(step.node));
        }
    }
    Some(Arc::clone(root))
}
