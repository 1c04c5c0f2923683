// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable per-revision node snapshots.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::{fmt, ops};

use crate::geometry::{Frame, LayoutMetrics, Vec2};
use crate::transform::Transform;

use super::family::Family;
use super::id::{SurfaceId, Tag};
use super::traverse::Descendants;

/// Per-node trait bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeTraits(u8);

impl NodeTraits {
    /// No traits.
    pub const NONE: Self = Self(0);
    /// The node roots a surface (or a nested surface). Its transform is the
    /// viewport offset, and geometry composition never climbs past it.
    pub const ROOT_NODE_KIND: Self = Self(1 << 0);

    /// Whether every bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl ops::BitOr for NodeTraits {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The layout-participant capability: everything the layout engine reports
/// for one node in one revision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layoutable {
    /// Box-model metrics.
    pub metrics: LayoutMetrics,
    /// Visual transform, applied about the frame's centre.
    pub transform: Transform,
    /// Displacement of the content relative to the box. Scroll containers
    /// report the negated scroll offset here; other nodes report zero.
    pub content_origin_offset: Vec2,
    /// Bounds of all content (children included) in the node's own
    /// coordinate space.
    pub content_bounds: Frame,
}

impl Layoutable {
    /// Wraps `metrics` with an identity transform, no content offset, and
    /// empty content bounds.
    #[must_use]
    pub const fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            transform: Transform::IDENTITY,
            content_origin_offset: Vec2::ZERO,
            content_bounds: Frame::ZERO,
        }
    }

    /// Sets the visual transform.
    #[must_use]
    pub const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the content-origin offset.
    #[must_use]
    pub const fn with_content_origin_offset(mut self, offset: Vec2) -> Self {
        self.content_origin_offset = offset;
        self
    }

    /// Sets the content bounds.
    #[must_use]
    pub const fn with_content_bounds(mut self, bounds: Frame) -> Self {
        self.content_bounds = bounds;
        self
    }
}

/// Replacement values for [`ShadowNode::clone_with`]. `None` keeps the
/// source node's value.
#[derive(Clone, Debug, Default)]
pub struct ShadowNodeFragment {
    /// New children.
    pub children: Option<Vec<Arc<ShadowNode>>>,
    /// New layout capability.
    pub layout: Option<Layoutable>,
    /// New raw text.
    pub raw_text: Option<String>,
}

/// An immutable snapshot of one node in one revision.
///
/// Built by value with the `with_*` methods, then frozen in an [`Arc`]. Every
/// child must belong to a family whose parent family is this node's family;
/// that link is how later revisions find the child again.
#[derive(Clone)]
pub struct ShadowNode {
    family: Arc<Family>,
    traits: NodeTraits,
    children: Vec<Arc<Self>>,
    layout: Option<Layoutable>,
    raw_text: Option<String>,
}

impl ShadowNode {
    /// Creates a childless node with no capabilities.
    #[must_use]
    pub fn new(family: Arc<Family>) -> Self {
        Self {
            family,
            traits: NodeTraits::NONE,
            children: Vec::new(),
            layout: None,
            raw_text: None,
        }
    }

    /// Sets the node traits.
    #[must_use]
    pub fn with_traits(mut self, traits: NodeTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Sets the children.
    ///
    /// # Panics
    ///
    /// Panics if a child's family is not a child family of this node's
    /// family.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Arc<Self>>) -> Self {
        self.set_children(children);
        self
    }

    /// Declares the layout-participant capability.
    #[must_use]
    pub fn with_layout(mut self, layout: Layoutable) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Declares the raw-text-leaf capability.
    #[must_use]
    pub fn with_raw_text(mut self, text: impl Into<String>) -> Self {
        self.raw_text = Some(text.into());
        self
    }

    /// Creates a new instance of the same logical node, replacing the fields
    /// present in `fragment`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`with_children`](Self::with_children).
    #[must_use]
    pub fn clone_with(&self, fragment: ShadowNodeFragment) -> Self {
        let mut node = Self {
            family: Arc::clone(&self.family),
            traits: self.traits,
            children: Vec::new(),
            layout: fragment.layout.or(self.layout),
            raw_text: fragment.raw_text.or_else(|| self.raw_text.clone()),
        };
        node.set_children(fragment.children.unwrap_or_else(|| self.children.clone()));
        node
    }

    fn set_children(&mut self, children: Vec<Arc<Self>>) {
        for child in &children {
            let parent = child.family.parent();
            assert!(
                parent.is_some_and(|p| p.is(&self.family)),
                "{:?} cannot be a child of {:?}: its family has a different parent",
                child.tag(),
                self.tag()
            );
        }
        self.children = children;
    }

    /// Returns the logical identity.
    #[inline]
    #[must_use]
    pub fn family(&self) -> &Family {
        &self.family
    }

    /// Returns the shared handle to the logical identity, for creating child
    /// families.
    #[inline]
    #[must_use]
    pub fn family_handle(&self) -> &Arc<Family> {
        &self.family
    }

    /// Whether `self` and `other` are snapshots of the same logical node.
    #[inline]
    #[must_use]
    pub fn same_family(&self, other: &Self) -> bool {
        self.family.is(&other.family)
    }

    /// Returns the node tag.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.family.tag()
    }

    /// Returns the surface this node belongs to.
    #[inline]
    #[must_use]
    pub fn surface_id(&self) -> SurfaceId {
        self.family.surface_id()
    }

    /// Returns the component name.
    #[inline]
    #[must_use]
    pub fn component_name(&self) -> &'static str {
        self.family.component_name()
    }

    /// Returns the node traits.
    #[inline]
    #[must_use]
    pub fn traits(&self) -> NodeTraits {
        self.traits
    }

    /// Whether this node roots a surface.
    #[inline]
    #[must_use]
    pub fn is_root_kind(&self) -> bool {
        self.traits.contains(NodeTraits::ROOT_NODE_KIND)
    }

    /// Returns the children in order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    /// Returns the layout capability, if this node participates in layout.
    #[inline]
    #[must_use]
    pub fn layout(&self) -> Option<&Layoutable> {
        self.layout.as_ref()
    }

    /// Returns this node's own metrics, or [`LayoutMetrics::EMPTY`] for a
    /// node outside the layout system.
    #[inline]
    #[must_use]
    pub fn layout_metrics(&self) -> LayoutMetrics {
        self.layout
            .as_ref()
            .map_or(LayoutMetrics::EMPTY, |layout| layout.metrics)
    }

    /// Returns the text of a raw text leaf.
    #[inline]
    #[must_use]
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    /// Iterates over this node's subtree in pre-order, not including `self`.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }
}

impl Drop for ShadowNode {
    /// Tears the subtree down with an explicit stack. Children still shared
    /// with another tree are left alone.
    fn drop(&mut self) {
        let mut stack = core::mem::take(&mut self.children);
        while let Some(child) = stack.pop() {
            if let Some(mut node) = Arc::into_inner(child) {
                stack.append(&mut node.children);
            }
        }
    }
}

impl fmt::Debug for ShadowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowNode")
            .field("tag", &self.tag())
            .field("component_name", &self.component_name())
            .field("traits", &self.traits)
            .field("children", &self.children.len())
            .field("layout", &self.layout.is_some())
            .field("raw_text", &self.raw_text)
            .finish_non_exhaustive()
    }
}
